//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, Book, BookApi, BookDraft, User};
use crate::core::action::{Action, update};
use crate::core::form::FormInput;
use crate::core::session::SessionStore;
use crate::core::state::App;

/// In-memory book service that records every call it receives.
pub struct FakeApi {
    pub login_result: Mutex<Result<String, ApiError>>,
    pub books: Mutex<Vec<Book>>,
    pub profile: Mutex<Result<User, ApiError>>,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            login_result: Mutex::new(Ok("test-token".to_string())),
            books: Mutex::new(Vec::new()),
            profile: Mutex::new(Ok(User::default())),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BookApi for FakeApi {
    async fn login(&self, username: &str, _password: &str) -> Result<String, ApiError> {
        self.record(format!("login {username}"));
        self.login_result.lock().unwrap().clone()
    }

    async fn register(&self, username: &str, _email: &str, _password: &str) -> Result<(), ApiError> {
        self.record(format!("register {username}"));
        Ok(())
    }

    async fn fetch_profile(&self, token: &str) -> Result<User, ApiError> {
        self.record(format!("fetch_profile token={token}"));
        self.profile.lock().unwrap().clone()
    }

    async fn list_books(&self, token: Option<&str>) -> Result<Vec<Book>, ApiError> {
        self.record(format!("list_books token={token:?}"));
        Ok(self.books.lock().unwrap().clone())
    }

    async fn create_book(&self, token: Option<&str>, draft: &BookDraft) -> Result<Book, ApiError> {
        self.record(format!("create_book token={token:?}"));
        Ok(Book {
            id: "new".to_string(),
            title: draft.title.clone(),
            author: draft.author.clone(),
            genre: draft.genre.clone(),
            description: draft.description.clone(),
        })
    }

    async fn update_book(
        &self,
        token: Option<&str>,
        id: &str,
        draft: &BookDraft,
    ) -> Result<Book, ApiError> {
        self.record(format!("update_book {id} token={token:?}"));
        Ok(Book {
            id: id.to_string(),
            title: draft.title.clone(),
            author: draft.author.clone(),
            genre: draft.genre.clone(),
            description: draft.description.clone(),
        })
    }

    async fn delete_book(&self, token: Option<&str>, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_book {id} token={token:?}"));
        Ok(())
    }
}

/// A book with placeholder author/genre/description.
pub fn book(id: &str, title: &str) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: "Author".to_string(),
        genre: "Genre".to_string(),
        description: "Description".to_string(),
    }
}

/// Creates a test App sitting on the Login screen.
pub fn test_app() -> App {
    App::new("http://test.invalid".to_string())
}

/// Creates a test App that has just logged in (Home tab focused).
pub fn logged_in_app() -> App {
    let mut app = test_app();
    update(&mut app, Action::LoginFinished(Ok(())));
    app
}

/// Types `text` into whichever form has focus.
pub fn type_into(app: &mut App, text: &str) {
    for c in text.chars() {
        update(app, Action::Input(FormInput::Char(c)));
    }
}

/// A session store in a fresh temporary directory. Keep the `TempDir`
/// alive for as long as the store is used.
pub fn temp_store() -> (tempfile::TempDir, SessionStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("storage.json"));
    (dir, store)
}

/// Flattens a rendered buffer into one string, rows joined by newlines.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width.max(1))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
