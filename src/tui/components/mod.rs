//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Components are props-based: each one is built per frame from data
//! borrowed out of `App`, renders into a `Rect`, and is then dropped. None of
//! them mutate application state; input goes through `keymap` and `update`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file, plus layout helpers)
//! ├── title_bar.rs     (top bar: tabs or auth screen, status message)
//! ├── text_field.rs    (single bordered input field)
//! ├── auth_screen.rs   (Login and Register)
//! ├── home.rs          (landing tab)
//! ├── book_list.rs     (Books tab list)
//! ├── book_form.rs     (add/edit overlay)
//! ├── profile.rs       (Profile tab, settings menu, editor overlay)
//! ├── dialog.rs        (blocking alert)
//! └── spinner.rs       (loading indicator)
//! ```

mod auth_screen;
mod book_form;
mod book_list;
mod dialog;
mod home;
mod profile;
mod spinner;
mod text_field;
mod title_bar;

pub use auth_screen::AuthScreen;
pub use book_form::BookFormView;
pub use book_list::BookList;
pub use dialog::DialogView;
pub use home::HomeScreen;
pub use profile::ProfileView;
pub use spinner::Spinner;
pub use text_field::TextField;
pub use title_bar::TitleBar;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// A rect of fixed size centered in `outer`, shrunk to fit if needed.
pub fn centered_fixed(width: u16, height: u16, outer: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(outer.height))])
        .flex(Flex::Center)
        .areas(outer);
    let [center] = Layout::horizontal([Constraint::Length(width.min(outer.width))])
        .flex(Flex::Center)
        .areas(row);
    center
}
