//! Frame layout: title bar, the current screen, the key hint footer, and the
//! dialog on top of everything.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::navigation::{Route, Tab};
use crate::core::state::{App, Status};
use crate::tui::component::Component;
use crate::tui::components::{
    AuthScreen, BookFormView, BookList, DialogView, HomeScreen, ProfileView, Spinner, TitleBar,
};
use crate::tui::keymap::help_text;

pub fn draw_ui(frame: &mut Frame, app: &App, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar::new(app.nav.current(), app.nav.tab(), &app.status_message)
        .render(frame, title_area);

    match app.nav.current() {
        Route::Login => AuthScreen::login(&app.login).render(frame, main_area),
        Route::Register => AuthScreen::register(&app.register).render(frame, main_area),
        Route::MainTabs => draw_tab(frame, app, main_area, spinner_frame),
    }

    frame.render_widget(
        Paragraph::new(help_text(app)).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(dialog) = app.dialog() {
        DialogView::new(dialog).render(frame, frame.area());
    }
}

fn draw_tab(frame: &mut Frame, app: &App, area: Rect, spinner_frame: usize) {
    match app.nav.tab() {
        Tab::Home => HomeScreen.render(frame, area),
        Tab::Books => match &app.books {
            Some(books) => {
                BookList::new(books, spinner_frame).render(frame, area);
                if let Some(form) = &books.form {
                    let saving = books.save_status == Status::Loading;
                    BookFormView::new(form, saving).render(frame, area);
                }
            }
            None => Spinner::new(spinner_frame, "Loading books...").render(frame, area),
        },
        Tab::Profile => match &app.profile {
            Some(profile) => ProfileView::new(profile, spinner_frame).render(frame, area),
            None => Spinner::new(spinner_frame, "Loading profile...").render(frame, area),
        },
    }
}
