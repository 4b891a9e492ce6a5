//! # Application State
//!
//! Core business state for Booktrack. This module contains domain logic only -
//! no TUI-specific types. Rendering lives in the `tui` module.
//!
//! ```text
//! App
//! ├── nav: Navigator                  // route stack + active tab
//! ├── dialogs: VecDeque<Dialog>       // blocking alerts, oldest first
//! ├── login: LoginState               // Login screen (mounted at the root)
//! ├── register: RegisterState         // Register screen
//! ├── books: Option<BookListState>    // Books tab, None until first focus
//! ├── profile: Option<ProfileState>   // Profile tab, None until first focus
//! ├── status_message: String          // status bar text
//! └── api_origin: String              // shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::VecDeque;

use crate::api::{Book, BookDraft, User};
use crate::core::form::{Field, Form, FormInput};
use crate::core::navigation::{Navigator, Route, Tab};

/// Per-action request lifecycle. `Error` is terminal for that action; the
/// user retries by repeating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What happens when a dialog is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnDismiss {
    #[default]
    Stay,
    GoToLogin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: Option<String>,
    pub message: String,
    pub on_dismiss: OnDismiss,
}

impl Dialog {
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            on_dismiss: OnDismiss::Stay,
        }
    }

    pub fn titled(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::notice(message)
        }
    }
}

// ============================================================================
// Auth screens
// ============================================================================

pub const LOGIN_USERNAME: usize = 0;
pub const LOGIN_PASSWORD: usize = 1;

#[derive(Debug, Clone)]
pub struct LoginState {
    pub form: Form,
    pub status: Status,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![Field::new("Username"), Field::masked("Password")]),
            status: Status::Idle,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.status == Status::Loading {
            "Logging in..."
        } else {
            "Login"
        }
    }
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

pub const REGISTER_USERNAME: usize = 0;
pub const REGISTER_EMAIL: usize = 1;
pub const REGISTER_PASSWORD: usize = 2;

#[derive(Debug, Clone)]
pub struct RegisterState {
    pub form: Form,
    pub status: Status,
}

impl RegisterState {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                Field::new("Enter Username"),
                Field::new("Enter Email"),
                Field::masked("Enter Password"),
            ]),
            status: Status::Idle,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.status == Status::Loading {
            "Processing..."
        } else {
            "Register"
        }
    }
}

impl Default for RegisterState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Books tab
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// The add/edit overlay. `editing` is the record being updated, if any.
#[derive(Debug, Clone)]
pub struct BookForm {
    pub form: Form,
    pub editing: Option<Book>,
}

impl BookForm {
    pub fn empty() -> Self {
        Self {
            form: Form::new(vec![
                Field::new("Book Title"),
                Field::new("Author"),
                Field::new("Genre"),
                Field::new("Description"),
            ]),
            editing: None,
        }
    }

    pub fn for_book(book: &Book) -> Self {
        let mut form = Self::empty();
        form.form.set_value(0, &book.title);
        form.form.set_value(1, &book.author);
        form.form.set_value(2, &book.genre);
        form.form.set_value(3, &book.description);
        form.editing = Some(book.clone());
        form
    }

    pub fn draft(&self) -> BookDraft {
        BookDraft {
            title: self.form.value(0).to_string(),
            author: self.form.value(1).to_string(),
            genre: self.form.value(2).to_string(),
            description: self.form.value(3).to_string(),
        }
    }

    pub fn mode(&self) -> SaveMode {
        if self.editing.is_some() {
            SaveMode::Update
        } else {
            SaveMode::Create
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            SaveMode::Create => "Add Book",
            SaveMode::Update => "Update Book",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookListState {
    pub books: Vec<Book>,
    pub selected: usize,
    pub list_status: Status,
    pub save_status: Status,
    pub form: Option<BookForm>,
}

impl BookListState {
    pub fn selected_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.books.is_empty() {
            self.selected = (self.selected + 1).min(self.books.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.books.len().saturating_sub(1));
    }

    /// Append a created record.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Replace the record whose id matches `book.id`; others stay as they are.
    pub fn replace(&mut self, book: Book) {
        for existing in self.books.iter_mut() {
            if existing.id == book.id {
                *existing = book.clone();
            }
        }
    }

    /// Remove the record with this id. Ids are unique, so at most one entry goes.
    pub fn remove(&mut self, id: &str) {
        if let Some(index) = self.books.iter().position(|b| b.id == id) {
            self.books.remove(index);
        }
        self.clamp_selection();
    }
}

// ============================================================================
// Profile tab
// ============================================================================

pub const SETTINGS_ITEMS: [&str; 2] = ["Edit Profile", "Logout"];

pub const PROFILE_USERNAME: usize = 0;
pub const PROFILE_EMAIL: usize = 1;

#[derive(Debug, Clone)]
pub struct ProfileState {
    pub status: Status,
    pub user: Option<User>,
    pub settings_open: bool,
    pub settings_index: usize,
    pub editing: bool,
    /// Edit-form values. They survive closing the editor without saving.
    pub editor: Form,
}

impl ProfileState {
    pub fn loading() -> Self {
        Self {
            status: Status::Loading,
            user: None,
            settings_open: false,
            settings_index: 0,
            editing: false,
            editor: Form::new(vec![Field::new("Username"), Field::new("Email")]),
        }
    }
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub nav: Navigator,
    pub dialogs: VecDeque<Dialog>,
    pub login: LoginState,
    pub register: RegisterState,
    pub books: Option<BookListState>,
    pub profile: Option<ProfileState>,
    pub status_message: String,
    pub api_origin: String,
}

impl App {
    pub fn new(api_origin: String) -> Self {
        Self {
            nav: Navigator::new(Route::Login),
            dialogs: VecDeque::new(),
            login: LoginState::new(),
            register: RegisterState::new(),
            books: None,
            profile: None,
            status_message: String::from("Welcome to Booktrack!"),
            api_origin,
        }
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialogs.front()
    }

    pub fn show(&mut self, dialog: Dialog) {
        self.dialogs.push_back(dialog);
    }

    /// True while any request the user is waiting on is in flight.
    pub fn is_busy(&self) -> bool {
        self.login.status == Status::Loading
            || self.register.status == Status::Loading
            || self
                .books
                .as_ref()
                .is_some_and(|b| b.list_status == Status::Loading)
            || self
                .profile
                .as_ref()
                .is_some_and(|p| p.status == Status::Loading)
    }

    /// The form that receives typed input right now, if any.
    pub fn active_form_mut(&mut self) -> Option<&mut Form> {
        if !self.dialogs.is_empty() {
            return None;
        }
        match self.nav.current() {
            Route::Login => Some(&mut self.login.form),
            Route::Register => Some(&mut self.register.form),
            Route::MainTabs => match self.nav.tab() {
                Tab::Home => None,
                Tab::Books => self
                    .books
                    .as_mut()
                    .and_then(|b| b.form.as_mut())
                    .map(|f| &mut f.form),
                Tab::Profile => self
                    .profile
                    .as_mut()
                    .filter(|p| p.editing)
                    .map(|p| &mut p.editor),
            },
        }
    }

    pub fn apply_input(&mut self, input: &FormInput) -> bool {
        match self.active_form_mut() {
            Some(form) => {
                form.apply(input);
                true
            }
            None => false,
        }
    }
}
