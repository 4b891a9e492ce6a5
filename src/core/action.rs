//! # Actions
//!
//! Everything that can happen in Booktrack becomes an `Action`.
//! User presses Enter on the login form? That's `Action::SubmitLogin`.
//! The service answers? That's `Action::LoginFinished(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O to perform. No side
//! effects here. Requests run elsewhere (see `tasks.rs`) and come back as
//! new actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{ApiError, Book, BookDraft, User};
use crate::core::form::FormInput;
use crate::core::navigation::{Navigator, Route, Tab};
use crate::core::state::{
    App, BookForm, BookListState, Dialog, LOGIN_PASSWORD, LOGIN_USERNAME, LoginState, OnDismiss,
    PROFILE_EMAIL, PROFILE_USERNAME, ProfileState, REGISTER_EMAIL, REGISTER_PASSWORD,
    REGISTER_USERNAME, RegisterState, SETTINGS_ITEMS, SaveMode, Status,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    DismissDialog,
    /// Editing input for the focused form.
    Input(FormInput),

    // Authentication
    OpenRegister,
    LeaveRegister,
    SubmitLogin,
    /// The token has already been stored when this arrives with `Ok`.
    LoginFinished(Result<(), ApiError>),
    SubmitRegister,
    RegisterFinished(Result<(), ApiError>),
    LoggedOut,

    // Tab shell
    SelectTab(Tab),

    // Books
    ReloadBooks,
    BooksLoaded(Result<Vec<Book>, ApiError>),
    SelectNextBook,
    SelectPrevBook,
    OpenNewBook,
    EditSelectedBook,
    CloseBookForm,
    SubmitBookForm,
    BookSaved {
        mode: SaveMode,
        result: Result<Book, ApiError>,
    },
    DeleteSelectedBook,
    BookDeleted {
        id: String,
        result: Result<(), ApiError>,
    },

    // Profile
    /// `None` when there was no token or the fetch failed.
    ProfileLoaded(Option<User>),
    ToggleSettings,
    SettingsUp,
    SettingsDown,
    SettingsConfirm,
    CloseProfileEditor,
    SaveProfile,
    /// A request finished. `generation` is the navigator generation it was
    /// issued under; results from an earlier session are dropped.
    Completed {
        generation: u64,
        action: Box<Action>,
    },
}

/// I/O the event loop must run on behalf of `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Login { username: String, password: String },
    Register { username: String, email: String, password: String },
    FetchBooks,
    CreateBook(BookDraft),
    UpdateBook { id: String, draft: BookDraft },
    DeleteBook { id: String },
    LoadProfile,
    Logout,
}

impl Request {
    /// Short name for logs. Never includes credentials.
    pub fn label(&self) -> &'static str {
        match self {
            Request::Login { .. } => "login",
            Request::Register { .. } => "register",
            Request::FetchBooks => "fetch books",
            Request::CreateBook(_) => "create book",
            Request::UpdateBook { .. } => "update book",
            Request::DeleteBook { .. } => "delete book",
            Request::LoadProfile => "load profile",
            Request::Logout => "logout",
        }
    }
}

/// A request tagged with the navigator generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub generation: u64,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Spawn(Task),
}

impl Effect {
    /// The request to run, if any.
    pub fn request(&self) -> Option<&Request> {
        match self {
            Effect::Spawn(task) => Some(&task.request),
            _ => None,
        }
    }
}

fn spawn(nav: &Navigator, request: Request) -> Effect {
    Effect::Spawn(Task {
        generation: nav.generation(),
        request,
    })
}

// ============================================================================
// User-facing messages
// ============================================================================

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_FILL_ALL_BOOK_FIELDS: &str = "Please fill in all fields.";
pub const MSG_SOMETHING_WENT_WRONG: &str = "Something went wrong";
pub const MSG_REGISTER_OK: &str = "Registration successful!";
pub const MSG_REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch books";
pub const MSG_FETCH_ERROR: &str = "Error fetching books";
pub const MSG_SAVE_FAILED: &str = "Failed to add or update book. Please try again.";
pub const MSG_SAVE_ERROR: &str = "An error occurred while adding/updating the book.";
pub const MSG_DELETE_ERROR: &str = "An error occurred while deleting the book.";
pub const MSG_PROFILE_LOCAL_ONLY: &str = "Profile updated locally (not synced to server)";

/// Message for a failed login: the server message, suffixed with the
/// password error if there is one, otherwise the username error.
pub fn login_failure_message(err: &ApiError) -> String {
    let detail = err.detail();
    let message = detail
        .and_then(|d| d.message.as_deref())
        .filter(|m| !m.is_empty())
        .unwrap_or(MSG_SOMETHING_WENT_WRONG);
    let errors = detail.and_then(|d| d.errors.as_ref());
    let password = errors.and_then(|e| e.password.as_deref()).filter(|s| !s.is_empty());
    let username = errors.and_then(|e| e.username.as_deref()).filter(|s| !s.is_empty());

    match password.or(username) {
        Some(field_error) => format!("{message}: {field_error}"),
        None => message.to_string(),
    }
}

// ============================================================================
// Reducer
// ============================================================================

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::Completed { generation, action } => {
            if generation != app.nav.generation() {
                debug!(
                    "Dropping result from generation {} (now {})",
                    generation,
                    app.nav.generation()
                );
                return Effect::None;
            }
            update(app, *action)
        }

        Action::DismissDialog => {
            if let Some(dialog) = app.dialogs.pop_front()
                && dialog.on_dismiss == OnDismiss::GoToLogin
            {
                app.nav.navigate(Route::Login);
                app.register = RegisterState::new();
            }
            Effect::None
        }

        Action::Input(input) => {
            app.apply_input(&input);
            Effect::None
        }

        // --------------------------------------------------------------------
        // Authentication
        // --------------------------------------------------------------------
        Action::OpenRegister => {
            if app.nav.current() == Route::Login {
                app.nav.navigate(Route::Register);
            }
            Effect::None
        }

        Action::LeaveRegister => {
            if app.nav.current() == Route::Register && app.nav.back() {
                app.register = RegisterState::new();
            }
            Effect::None
        }

        Action::SubmitLogin => {
            if app.login.status == Status::Loading {
                return Effect::None;
            }
            let username = app.login.form.value(LOGIN_USERNAME).to_string();
            let password = app.login.form.value(LOGIN_PASSWORD).to_string();
            if username.is_empty() || password.is_empty() {
                app.show(Dialog::titled("Error", MSG_FILL_ALL_FIELDS));
                return Effect::None;
            }
            app.login.status = Status::Loading;
            app.status_message = String::from("Logging in...");
            spawn(&app.nav, Request::Login { username, password })
        }

        Action::LoginFinished(Ok(())) => {
            info!("Login succeeded, entering main tabs");
            app.nav.reset(Route::MainTabs);
            app.login = LoginState::new();
            app.register = RegisterState::new();
            app.books = None;
            app.profile = None;
            app.status_message = String::from("Signed in");
            Effect::None
        }

        Action::LoginFinished(Err(e)) => {
            info!("Login failed: {}", e);
            app.login.status = Status::Error;
            app.status_message = String::from("Login failed");
            app.show(Dialog::titled("Error", login_failure_message(&e)));
            Effect::None
        }

        Action::SubmitRegister => {
            if app.register.status == Status::Loading {
                return Effect::None;
            }
            let form = &app.register.form;
            let request = Request::Register {
                username: form.value(REGISTER_USERNAME).to_string(),
                email: form.value(REGISTER_EMAIL).to_string(),
                password: form.value(REGISTER_PASSWORD).to_string(),
            };
            app.register.status = Status::Loading;
            spawn(&app.nav, request)
        }

        Action::RegisterFinished(result) => {
            match result {
                Ok(()) => {
                    app.register.status = Status::Success;
                    app.show(Dialog {
                        title: None,
                        message: MSG_REGISTER_OK.to_string(),
                        on_dismiss: OnDismiss::GoToLogin,
                    });
                }
                Err(e) => {
                    warn!("Failed to register: {}", e);
                    app.register.status = Status::Error;
                    app.show(Dialog::notice(MSG_REGISTER_FAILED));
                }
            }
            Effect::None
        }

        Action::LoggedOut => {
            info!("Logged out, back to login");
            app.nav.reset(Route::Login);
            app.login = LoginState::new();
            app.books = None;
            app.profile = None;
            app.status_message = String::from("Signed out");
            Effect::None
        }

        // --------------------------------------------------------------------
        // Tab shell
        // --------------------------------------------------------------------
        Action::SelectTab(tab) => {
            if !app.nav.select_tab(tab) {
                return Effect::None;
            }
            debug!("Mounting {} tab", tab.label());
            match tab {
                Tab::Home => Effect::None,
                Tab::Books => {
                    app.books = Some(BookListState {
                        list_status: Status::Loading,
                        ..Default::default()
                    });
                    spawn(&app.nav, Request::FetchBooks)
                }
                Tab::Profile => {
                    app.profile = Some(ProfileState::loading());
                    spawn(&app.nav, Request::LoadProfile)
                }
            }
        }

        // --------------------------------------------------------------------
        // Books
        // --------------------------------------------------------------------
        Action::ReloadBooks => match app.books.as_mut() {
            Some(list) => {
                list.list_status = Status::Loading;
                spawn(&app.nav, Request::FetchBooks)
            }
            None => Effect::None,
        },

        Action::BooksLoaded(result) => {
            let Some(list) = app.books.as_mut() else {
                debug!("Books loaded after the tab unmounted; dropping");
                return Effect::None;
            };
            match result {
                Ok(books) => {
                    list.books = books;
                    list.clamp_selection();
                    list.list_status = Status::Success;
                    app.status_message = format!("{} books", list.books.len());
                }
                Err(e) => {
                    warn!("Fetching books failed: {}", e);
                    list.list_status = Status::Error;
                    let message = if e.is_server_reply() {
                        MSG_FETCH_FAILED
                    } else {
                        MSG_FETCH_ERROR
                    };
                    app.show(Dialog::notice(message));
                }
            }
            Effect::None
        }

        Action::SelectNextBook => {
            if let Some(list) = app.books.as_mut() {
                list.select_next();
            }
            Effect::None
        }

        Action::SelectPrevBook => {
            if let Some(list) = app.books.as_mut() {
                list.select_prev();
            }
            Effect::None
        }

        Action::OpenNewBook => {
            if let Some(list) = app.books.as_mut() {
                list.form = Some(BookForm::empty());
            }
            Effect::None
        }

        Action::EditSelectedBook => {
            if let Some(list) = app.books.as_mut()
                && let Some(book) = list.selected_book()
            {
                list.form = Some(BookForm::for_book(book));
            }
            Effect::None
        }

        Action::CloseBookForm => {
            if let Some(list) = app.books.as_mut() {
                list.form = None;
            }
            Effect::None
        }

        Action::SubmitBookForm => {
            let Some(list) = app.books.as_mut() else {
                return Effect::None;
            };
            let Some(form) = list.form.as_ref() else {
                return Effect::None;
            };
            let draft = form.draft();
            if !draft.is_complete() {
                app.show(Dialog::notice(MSG_FILL_ALL_BOOK_FIELDS));
                return Effect::None;
            }
            let request = match &form.editing {
                Some(book) => Request::UpdateBook {
                    id: book.id.clone(),
                    draft,
                },
                None => Request::CreateBook(draft),
            };
            list.save_status = Status::Loading;
            spawn(&app.nav, request)
        }

        Action::BookSaved { mode, result } => {
            let Some(list) = app.books.as_mut() else {
                return Effect::None;
            };
            match result {
                Ok(book) => {
                    match mode {
                        SaveMode::Create => list.add(book),
                        SaveMode::Update => list.replace(book),
                    }
                    list.form = None;
                    list.save_status = Status::Success;
                    let (title, message) = match mode {
                        SaveMode::Create => ("Added", "Book added successfully!"),
                        SaveMode::Update => ("Updated", "Book updated successfully!"),
                    };
                    app.show(Dialog::titled(title, message));
                }
                Err(e) => {
                    warn!("Saving book failed: {}", e);
                    list.save_status = Status::Error;
                    let message = if e.is_server_reply() {
                        MSG_SAVE_FAILED
                    } else {
                        MSG_SAVE_ERROR
                    };
                    app.show(Dialog::notice(message));
                }
            }
            Effect::None
        }

        Action::DeleteSelectedBook => {
            match app.books.as_ref().and_then(|l| l.selected_book()) {
                Some(book) => {
                    let id = book.id.clone();
                    spawn(&app.nav, Request::DeleteBook { id })
                }
                None => Effect::None,
            }
        }

        Action::BookDeleted { id, result } => {
            let Some(list) = app.books.as_mut() else {
                return Effect::None;
            };
            match result {
                Ok(()) => {
                    list.remove(&id);
                    app.status_message = format!("Deleted book {id}");
                }
                Err(e) => {
                    warn!("Deleting book {} failed: {}", id, e);
                    app.show(Dialog::notice(MSG_DELETE_ERROR));
                }
            }
            Effect::None
        }

        // --------------------------------------------------------------------
        // Profile
        // --------------------------------------------------------------------
        Action::ProfileLoaded(user) => {
            let Some(profile) = app.profile.as_mut() else {
                return Effect::None;
            };
            if let Some(user) = &user {
                profile.editor.set_value(PROFILE_USERNAME, &user.username);
                profile.editor.set_value(PROFILE_EMAIL, &user.email);
            }
            profile.status = if user.is_some() {
                Status::Success
            } else {
                Status::Error
            };
            profile.user = user;
            Effect::None
        }

        Action::ToggleSettings => {
            if let Some(profile) = app.profile.as_mut()
                && profile.user.is_some()
            {
                profile.settings_open = !profile.settings_open;
                profile.settings_index = 0;
            }
            Effect::None
        }

        Action::SettingsUp => {
            if let Some(profile) = app.profile.as_mut() {
                profile.settings_index = profile.settings_index.saturating_sub(1);
            }
            Effect::None
        }

        Action::SettingsDown => {
            if let Some(profile) = app.profile.as_mut() {
                profile.settings_index = (profile.settings_index + 1).min(SETTINGS_ITEMS.len() - 1);
            }
            Effect::None
        }

        Action::SettingsConfirm => {
            let Some(profile) = app.profile.as_mut() else {
                return Effect::None;
            };
            if !profile.settings_open {
                return Effect::None;
            }
            profile.settings_open = false;
            match profile.settings_index {
                0 => {
                    profile.editing = true;
                    Effect::None
                }
                _ => spawn(&app.nav, Request::Logout),
            }
        }

        Action::CloseProfileEditor => {
            if let Some(profile) = app.profile.as_mut() {
                profile.editing = false;
            }
            Effect::None
        }

        Action::SaveProfile => {
            let Some(profile) = app.profile.as_mut() else {
                return Effect::None;
            };
            if let Some(user) = profile.user.as_mut() {
                user.username = profile.editor.value(PROFILE_USERNAME).to_string();
                user.email = profile.editor.value(PROFILE_EMAIL).to_string();
                // TODO: send to the server once the service exposes a profile update endpoint.
                app.status_message = MSG_PROFILE_LOCAL_ONLY.to_string();
            }
            profile.editing = false;
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ErrorDetail, FieldErrors};
    use crate::test_support::{book, logged_in_app, test_app, type_into};

    fn books_tab(books: Vec<Book>) -> App {
        let mut app = logged_in_app();
        let effect = update(&mut app, Action::SelectTab(Tab::Books));
        assert_eq!(effect.request(), Some(&Request::FetchBooks));
        update(&mut app, Action::BooksLoaded(Ok(books)));
        app
    }

    fn fill_book_form(app: &mut App, values: [&str; 4]) {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                update(app, Action::Input(FormInput::NextField));
            }
            type_into(app, value);
        }
    }

    fn list(app: &App) -> &BookListState {
        app.books.as_ref().unwrap()
    }

    fn rejected(message: Option<&str>, username: Option<&str>, password: Option<&str>) -> ApiError {
        ApiError::Api {
            status: 401,
            detail: Some(ErrorDetail {
                message: message.map(String::from),
                errors: Some(FieldErrors {
                    username: username.map(String::from),
                    password: password.map(String::from),
                }),
            }),
        }
    }

    // -- login ---------------------------------------------------------------

    #[test]
    fn test_login_with_empty_field_shows_dialog_without_request() {
        let mut app = test_app();
        type_into(&mut app, "reader");
        let effect = update(&mut app, Action::SubmitLogin);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.dialog().unwrap().message, MSG_FILL_ALL_FIELDS);
        assert_eq!(app.login.status, Status::Idle);
    }

    #[test]
    fn test_login_spawns_request_and_blocks_resubmit() {
        let mut app = test_app();
        type_into(&mut app, "reader");
        update(&mut app, Action::Input(FormInput::NextField));
        type_into(&mut app, "hunter2");
        let effect = update(&mut app, Action::SubmitLogin);
        assert_eq!(
            effect.request(),
            Some(&Request::Login {
                username: "reader".into(),
                password: "hunter2".into()
            })
        );
        assert_eq!(app.login.submit_label(), "Logging in...");
        assert_eq!(update(&mut app, Action::SubmitLogin), Effect::None);
    }

    #[test]
    fn test_login_success_resets_to_tabs() {
        let mut app = test_app();
        update(&mut app, Action::OpenRegister);
        update(&mut app, Action::LoginFinished(Ok(())));
        assert_eq!(app.nav.stack(), &[Route::MainTabs]);
        assert_eq!(app.nav.tab(), Tab::Home);
    }

    #[test]
    fn test_login_failure_prefers_password_error() {
        let err = rejected(Some("Invalid credentials"), Some("unknown user"), Some("wrong password"));
        assert_eq!(login_failure_message(&err), "Invalid credentials: wrong password");
    }

    #[test]
    fn test_login_failure_falls_back_to_username_error() {
        let err = rejected(Some("Invalid credentials"), Some("unknown user"), None);
        assert_eq!(login_failure_message(&err), "Invalid credentials: unknown user");
    }

    #[test]
    fn test_login_failure_generic_message() {
        assert_eq!(
            login_failure_message(&ApiError::Network("refused".into())),
            MSG_SOMETHING_WENT_WRONG
        );
        let err = rejected(None, None, Some("too short"));
        assert_eq!(login_failure_message(&err), "Something went wrong: too short");
    }

    #[test]
    fn test_login_failure_shows_error_dialog() {
        let mut app = test_app();
        app.login.status = Status::Loading;
        let err = rejected(Some("Invalid credentials"), None, Some("wrong password"));
        update(&mut app, Action::LoginFinished(Err(err)));
        let dialog = app.dialog().unwrap();
        assert_eq!(dialog.title.as_deref(), Some("Error"));
        assert!(dialog.message.contains("wrong password"));
        assert_eq!(app.nav.current(), Route::Login);
        assert_eq!(app.login.submit_label(), "Login");
    }

    // -- register ------------------------------------------------------------

    #[test]
    fn test_register_sends_without_local_check() {
        let mut app = test_app();
        update(&mut app, Action::OpenRegister);
        let effect = update(&mut app, Action::SubmitRegister);
        assert!(matches!(effect.request(), Some(Request::Register { .. })));
    }

    #[test]
    fn test_register_success_dismiss_goes_to_login() {
        let mut app = test_app();
        update(&mut app, Action::OpenRegister);
        type_into(&mut app, "newbie");
        update(&mut app, Action::SubmitRegister);
        update(&mut app, Action::RegisterFinished(Ok(())));
        assert_eq!(app.dialog().unwrap().message, MSG_REGISTER_OK);
        assert_eq!(app.nav.current(), Route::Register);

        update(&mut app, Action::DismissDialog);
        assert_eq!(app.nav.stack(), &[Route::Login]);
        assert_eq!(app.register.form.value(REGISTER_USERNAME), "");
    }

    #[test]
    fn test_register_failure_is_static_and_stays() {
        let mut app = test_app();
        update(&mut app, Action::OpenRegister);
        let err = rejected(Some("Username taken"), Some("taken"), None);
        update(&mut app, Action::RegisterFinished(Err(err)));
        assert_eq!(app.dialog().unwrap().message, MSG_REGISTER_FAILED);
        update(&mut app, Action::DismissDialog);
        assert_eq!(app.nav.current(), Route::Register);
    }

    // -- books ---------------------------------------------------------------

    #[test]
    fn test_books_mount_fetches_once() {
        let mut app = books_tab(vec![]);
        update(&mut app, Action::SelectTab(Tab::Home));
        assert_eq!(update(&mut app, Action::SelectTab(Tab::Books)), Effect::None);
    }

    #[test]
    fn test_books_loaded_replaces_list() {
        let app = books_tab(vec![book("1", "A"), book("2", "B")]);
        assert_eq!(list(&app).books.len(), 2);
        assert_eq!(list(&app).list_status, Status::Success);
    }

    #[test]
    fn test_books_missing_data_leaves_list_empty() {
        let mut app = logged_in_app();
        update(&mut app, Action::SelectTab(Tab::Books));
        update(&mut app, Action::BooksLoaded(Err(ApiError::MissingData)));
        assert!(list(&app).books.is_empty());
        assert_eq!(app.dialog().unwrap().message, MSG_FETCH_FAILED);
    }

    #[test]
    fn test_books_network_error_message() {
        let mut app = logged_in_app();
        update(&mut app, Action::SelectTab(Tab::Books));
        update(&mut app, Action::BooksLoaded(Err(ApiError::Network("down".into()))));
        assert_eq!(app.dialog().unwrap().message, MSG_FETCH_ERROR);
    }

    #[test]
    fn test_submit_with_any_empty_field_issues_no_request() {
        let full = ["T", "A", "G", "D"];
        for empty in 0..4 {
            let mut values = full;
            values[empty] = "";
            let mut app = books_tab(vec![]);
            update(&mut app, Action::OpenNewBook);
            fill_book_form(&mut app, values);
            let effect = update(&mut app, Action::SubmitBookForm);
            assert_eq!(effect, Effect::None, "field {empty} empty");
            assert_eq!(app.dialog().unwrap().message, MSG_FILL_ALL_BOOK_FIELDS);
            assert!(list(&app).form.is_some());
        }
    }

    #[test]
    fn test_create_appends_exactly_one_and_closes_form() {
        let mut app = books_tab(vec![book("1", "A")]);
        update(&mut app, Action::OpenNewBook);
        fill_book_form(&mut app, ["B", "Author", "Genre", "Desc"]);
        let effect = update(&mut app, Action::SubmitBookForm);
        assert!(matches!(effect.request(), Some(Request::CreateBook(d)) if d.title == "B"));

        update(
            &mut app,
            Action::BookSaved {
                mode: SaveMode::Create,
                result: Ok(book("2", "B")),
            },
        );
        assert_eq!(list(&app).books, vec![book("1", "A"), book("2", "B")]);
        assert!(list(&app).form.is_none());
        let dialog = app.dialog().unwrap();
        assert_eq!(dialog.title.as_deref(), Some("Added"));
        assert_eq!(dialog.message, "Book added successfully!");
    }

    #[test]
    fn test_update_replaces_only_matching_record() {
        let mut app = books_tab(vec![book("1", "A"), book("2", "B"), book("3", "C")]);
        update(&mut app, Action::SelectNextBook);
        update(&mut app, Action::EditSelectedBook);
        update(&mut app, Action::Input(FormInput::Char('!')));
        let effect = update(&mut app, Action::SubmitBookForm);
        match effect.request() {
            Some(Request::UpdateBook { id, draft }) => {
                assert_eq!(id, "2");
                assert_eq!(draft.title, "B!");
            }
            other => panic!("expected update request, got {other:?}"),
        }

        update(
            &mut app,
            Action::BookSaved {
                mode: SaveMode::Update,
                result: Ok(book("2", "B!")),
            },
        );
        assert_eq!(
            list(&app).books,
            vec![book("1", "A"), book("2", "B!"), book("3", "C")]
        );
        assert_eq!(app.dialog().unwrap().title.as_deref(), Some("Updated"));
    }

    #[test]
    fn test_save_failure_keeps_form_open() {
        let mut app = books_tab(vec![]);
        update(&mut app, Action::OpenNewBook);
        update(
            &mut app,
            Action::BookSaved {
                mode: SaveMode::Create,
                result: Err(ApiError::MissingData),
            },
        );
        assert!(list(&app).books.is_empty());
        assert!(list(&app).form.is_some());
        assert_eq!(app.dialog().unwrap().message, MSG_SAVE_FAILED);

        update(&mut app, Action::DismissDialog);
        update(
            &mut app,
            Action::BookSaved {
                mode: SaveMode::Create,
                result: Err(ApiError::Network("reset".into())),
            },
        );
        assert_eq!(app.dialog().unwrap().message, MSG_SAVE_ERROR);
    }

    #[test]
    fn test_delete_removes_exactly_the_matching_entry() {
        let mut app = books_tab(vec![book("1", "A"), book("2", "B")]);
        let effect = update(&mut app, Action::DeleteSelectedBook);
        assert_eq!(effect.request(), Some(&Request::DeleteBook { id: "1".into() }));
        update(
            &mut app,
            Action::BookDeleted {
                id: "1".into(),
                result: Ok(()),
            },
        );
        assert_eq!(list(&app).books, vec![book("2", "B")]);
    }

    #[test]
    fn test_delete_failure_keeps_entry() {
        let mut app = books_tab(vec![book("1", "A")]);
        update(
            &mut app,
            Action::BookDeleted {
                id: "1".into(),
                result: Err(ApiError::Network("down".into())),
            },
        );
        assert_eq!(list(&app).books.len(), 1);
        assert_eq!(app.dialog().unwrap().message, MSG_DELETE_ERROR);
    }

    #[test]
    fn test_delete_on_empty_list_is_noop() {
        let mut app = books_tab(vec![]);
        assert_eq!(update(&mut app, Action::DeleteSelectedBook), Effect::None);
    }

    #[test]
    fn test_results_after_unmount_are_dropped() {
        let mut app = logged_in_app();
        update(&mut app, Action::SelectTab(Tab::Books));
        update(&mut app, Action::LoggedOut);
        update(&mut app, Action::BooksLoaded(Ok(vec![book("1", "A")])));
        assert!(app.books.is_none());
    }

    fn completed(generation: u64, action: Action) -> Action {
        Action::Completed {
            generation,
            action: Box::new(action),
        }
    }

    #[test]
    fn test_save_from_previous_session_is_dropped_after_relogin() {
        let mut app = books_tab(vec![book("1", "Old")]);
        update(&mut app, Action::OpenNewBook);
        fill_book_form(&mut app, ["Stale", "Author", "Genre", "Desc"]);
        let Effect::Spawn(task) = update(&mut app, Action::SubmitBookForm) else {
            panic!("expected a create request");
        };

        update(&mut app, Action::LoggedOut);
        update(&mut app, Action::LoginFinished(Ok(())));
        let Effect::Spawn(fetch) = update(&mut app, Action::SelectTab(Tab::Books)) else {
            panic!("expected a fetch request");
        };
        update(
            &mut app,
            completed(fetch.generation, Action::BooksLoaded(Ok(vec![book("9", "Fresh")]))),
        );

        let late = Action::BookSaved {
            mode: SaveMode::Create,
            result: Ok(book("2", "Stale")),
        };
        assert_eq!(update(&mut app, completed(task.generation, late)), Effect::None);

        let titles: Vec<&str> = list(&app).books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Fresh"]);
        assert!(app.dialogs.is_empty());
    }

    #[test]
    fn test_profile_from_previous_session_is_dropped() {
        let mut app = logged_in_app();
        let Effect::Spawn(old) = update(&mut app, Action::SelectTab(Tab::Profile)) else {
            panic!("expected a profile request");
        };
        update(&mut app, Action::LoggedOut);
        update(&mut app, Action::LoginFinished(Ok(())));
        update(&mut app, Action::SelectTab(Tab::Profile));

        update(&mut app, completed(old.generation, Action::ProfileLoaded(Some(reader()))));
        let profile = app.profile.as_ref().unwrap();
        assert_eq!(profile.status, Status::Loading);
        assert!(profile.user.is_none());
    }

    #[test]
    fn test_current_generation_result_is_applied() {
        let mut app = logged_in_app();
        let Effect::Spawn(task) = update(&mut app, Action::SelectTab(Tab::Books)) else {
            panic!("expected a fetch request");
        };
        update(
            &mut app,
            completed(task.generation, Action::BooksLoaded(Ok(vec![book("1", "A")]))),
        );
        assert_eq!(list(&app).books, vec![book("1", "A")]);
    }

    // -- profile -------------------------------------------------------------

    fn profile_tab(user: Option<User>) -> App {
        let mut app = logged_in_app();
        let effect = update(&mut app, Action::SelectTab(Tab::Profile));
        assert_eq!(effect.request(), Some(&Request::LoadProfile));
        assert!(app.is_busy());
        update(&mut app, Action::ProfileLoaded(user));
        app
    }

    fn reader() -> User {
        User {
            username: "reader".into(),
            email: "reader@example.com".into(),
        }
    }

    #[test]
    fn test_profile_without_user_falls_back() {
        let mut app = profile_tab(None);
        let profile = app.profile.as_ref().unwrap();
        assert!(profile.user.is_none());
        assert_eq!(profile.status, Status::Error);
        assert!(app.dialogs.is_empty());
        update(&mut app, Action::ToggleSettings);
        assert!(!app.profile.as_ref().unwrap().settings_open);
    }

    #[test]
    fn test_profile_edit_is_local_only() {
        let mut app = profile_tab(Some(reader()));
        update(&mut app, Action::ToggleSettings);
        let effect = update(&mut app, Action::SettingsConfirm);
        assert_eq!(effect, Effect::None);
        assert!(app.profile.as_ref().unwrap().editing);

        update(&mut app, Action::Input(FormInput::End));
        update(&mut app, Action::Input(FormInput::Char('2')));
        let effect = update(&mut app, Action::SaveProfile);
        assert_eq!(effect, Effect::None);
        let profile = app.profile.as_ref().unwrap();
        assert_eq!(profile.user.as_ref().unwrap().username, "reader2");
        assert!(!profile.editing);
        assert_eq!(app.status_message, MSG_PROFILE_LOCAL_ONLY);
    }

    #[test]
    fn test_profile_editor_close_keeps_user() {
        let mut app = profile_tab(Some(reader()));
        update(&mut app, Action::ToggleSettings);
        update(&mut app, Action::SettingsConfirm);
        type_into(&mut app, "zzz");
        update(&mut app, Action::CloseProfileEditor);
        assert_eq!(app.profile.as_ref().unwrap().user, Some(reader()));
    }

    #[test]
    fn test_settings_logout_then_reset() {
        let mut app = profile_tab(Some(reader()));
        update(&mut app, Action::ToggleSettings);
        update(&mut app, Action::SettingsDown);
        let effect = update(&mut app, Action::SettingsConfirm);
        assert_eq!(effect.request(), Some(&Request::Logout));

        update(&mut app, Action::LoggedOut);
        assert_eq!(app.nav.stack(), &[Route::Login]);
        assert!(app.profile.is_none());
        assert!(app.books.is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
