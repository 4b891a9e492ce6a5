//! # Key Map
//!
//! Translates terminal events into core actions, depending on what is on
//! screen. Modal layers take priority, top first:
//!
//! 1. An open dialog swallows everything except dismiss.
//! 2. A form overlay (book form, profile editor) gets text input.
//! 3. The profile settings menu gets arrow keys.
//! 4. Otherwise the screen's own shortcuts apply.

use crate::core::action::Action;
use crate::core::form::FormInput;
use crate::core::navigation::{Route, Tab};
use crate::core::state::App;
use crate::tui::event::TuiEvent;

/// Map text-editing keys onto form input. Returns None for everything else.
fn form_input(event: &TuiEvent) -> Option<FormInput> {
    match event {
        TuiEvent::InputChar(c) => Some(FormInput::Char(*c)),
        TuiEvent::Paste(text) => Some(FormInput::Paste(text.clone())),
        TuiEvent::Backspace => Some(FormInput::Backspace),
        TuiEvent::Delete => Some(FormInput::Delete),
        TuiEvent::CursorLeft => Some(FormInput::Left),
        TuiEvent::CursorRight => Some(FormInput::Right),
        TuiEvent::CursorHome => Some(FormInput::Home),
        TuiEvent::CursorEnd => Some(FormInput::End),
        TuiEvent::Tab | TuiEvent::CursorDown => Some(FormInput::NextField),
        TuiEvent::BackTab | TuiEvent::CursorUp => Some(FormInput::PrevField),
        _ => None,
    }
}

pub fn action_for(app: &App, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    if app.dialog().is_some() {
        return matches!(event, TuiEvent::Submit | TuiEvent::Escape)
            .then_some(Action::DismissDialog);
    }

    match app.nav.current() {
        Route::Login => match event {
            TuiEvent::Submit => Some(Action::SubmitLogin),
            TuiEvent::Control('r') => Some(Action::OpenRegister),
            _ => form_input(event).map(Action::Input),
        },
        Route::Register => match event {
            TuiEvent::Submit => Some(Action::SubmitRegister),
            TuiEvent::Escape => Some(Action::LeaveRegister),
            _ => form_input(event).map(Action::Input),
        },
        Route::MainTabs => tabs_action(app, event),
    }
}

fn tabs_action(app: &App, event: &TuiEvent) -> Option<Action> {
    let tab = app.nav.tab();

    // Overlays on the current tab
    if tab == Tab::Books && app.books.as_ref().is_some_and(|b| b.form.is_some()) {
        return match event {
            TuiEvent::Submit => Some(Action::SubmitBookForm),
            TuiEvent::Escape => Some(Action::CloseBookForm),
            _ => form_input(event).map(Action::Input),
        };
    }
    if tab == Tab::Profile
        && let Some(profile) = app.profile.as_ref()
    {
        if profile.editing {
            return match event {
                TuiEvent::Submit => Some(Action::SaveProfile),
                TuiEvent::Escape => Some(Action::CloseProfileEditor),
                _ => form_input(event).map(Action::Input),
            };
        }
        if profile.settings_open {
            return match event {
                TuiEvent::CursorUp => Some(Action::SettingsUp),
                TuiEvent::CursorDown => Some(Action::SettingsDown),
                TuiEvent::Submit => Some(Action::SettingsConfirm),
                TuiEvent::Escape | TuiEvent::InputChar('s') => Some(Action::ToggleSettings),
                _ => None,
            };
        }
    }

    // Shell-wide shortcuts
    match event {
        TuiEvent::InputChar('1') => return Some(Action::SelectTab(Tab::Home)),
        TuiEvent::InputChar('2') => return Some(Action::SelectTab(Tab::Books)),
        TuiEvent::InputChar('3') => return Some(Action::SelectTab(Tab::Profile)),
        TuiEvent::CursorRight | TuiEvent::Tab => return Some(Action::SelectTab(tab.next())),
        TuiEvent::CursorLeft | TuiEvent::BackTab => return Some(Action::SelectTab(tab.prev())),
        TuiEvent::InputChar('q') => return Some(Action::Quit),
        _ => {}
    }

    match (tab, event) {
        (Tab::Books, TuiEvent::CursorUp) => Some(Action::SelectPrevBook),
        (Tab::Books, TuiEvent::CursorDown) => Some(Action::SelectNextBook),
        (Tab::Books, TuiEvent::InputChar('a' | '+')) => Some(Action::OpenNewBook),
        (Tab::Books, TuiEvent::InputChar('e') | TuiEvent::Submit) => Some(Action::EditSelectedBook),
        (Tab::Books, TuiEvent::InputChar('d')) => Some(Action::DeleteSelectedBook),
        (Tab::Books, TuiEvent::InputChar('r')) => Some(Action::ReloadBooks),
        (Tab::Profile, TuiEvent::InputChar('s')) => Some(Action::ToggleSettings),
        _ => None,
    }
}

/// Footer hint for the current screen.
pub fn help_text(app: &App) -> &'static str {
    if app.dialog().is_some() {
        return " Enter/Esc OK ";
    }
    match app.nav.current() {
        Route::Login => " Tab Next field  Enter Login  Ctrl+R Register  Ctrl+C Quit ",
        Route::Register => " Tab Next field  Enter Register  Esc Back  Ctrl+C Quit ",
        Route::MainTabs => match app.nav.tab() {
            Tab::Books if app.books.as_ref().is_some_and(|b| b.form.is_some()) => {
                " Tab Next field  Enter Save  Esc Close "
            }
            Tab::Books => " a Add  e Edit  d Delete  r Reload  ←/→ Tabs  q Quit ",
            Tab::Profile if app.profile.as_ref().is_some_and(|p| p.editing) => {
                " Tab Next field  Enter Save  Esc Close "
            }
            Tab::Profile if app.profile.as_ref().is_some_and(|p| p.settings_open) => {
                " ↑/↓ Choose  Enter Select  Esc Close "
            }
            Tab::Profile => " s Settings  ←/→ Tabs  q Quit ",
            Tab::Home => " 1 Home  2 Books  3 Profile  q Quit ",
        },
    }
}
