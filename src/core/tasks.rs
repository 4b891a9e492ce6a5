//! # Request Tasks
//!
//! Runs a [`Request`] against the book service and the session store, and
//! turns the outcome into the [`Action`] that reports it back to `update()`.
//!
//! Each request reads the token from the store itself; there is no
//! in-memory copy to go stale.

use log::{info, warn};

use crate::api::BookApi;
use crate::core::action::{Action, Request, Task};
use crate::core::session::SessionStore;
use crate::core::state::SaveMode;

/// Runs a spawned task and tags its result with the task's generation.
pub async fn run(task: Task, api: &dyn BookApi, store: &SessionStore) -> Action {
    let Task {
        generation,
        request,
    } = task;
    Action::Completed {
        generation,
        action: Box::new(perform(request, api, store).await),
    }
}

pub async fn perform(request: Request, api: &dyn BookApi, store: &SessionStore) -> Action {
    match request {
        Request::Login { username, password } => {
            let result = api.login(&username, &password).await.map(|token| {
                store.set_auth_token(&token);
            });
            Action::LoginFinished(result)
        }

        Request::Register {
            username,
            email,
            password,
        } => Action::RegisterFinished(api.register(&username, &email, &password).await),

        Request::FetchBooks => {
            let token = store.auth_token();
            Action::BooksLoaded(api.list_books(token.as_deref()).await)
        }

        Request::CreateBook(draft) => {
            let token = store.auth_token();
            Action::BookSaved {
                mode: SaveMode::Create,
                result: api.create_book(token.as_deref(), &draft).await,
            }
        }

        Request::UpdateBook { id, draft } => {
            let token = store.auth_token();
            Action::BookSaved {
                mode: SaveMode::Update,
                result: api.update_book(token.as_deref(), &id, &draft).await,
            }
        }

        Request::DeleteBook { id } => {
            let token = store.auth_token();
            let result = api.delete_book(token.as_deref(), &id).await;
            Action::BookDeleted { id, result }
        }

        Request::LoadProfile => {
            let Some(token) = store.auth_token() else {
                info!("No token stored; profile stays empty");
                return Action::ProfileLoaded(None);
            };
            match api.fetch_profile(&token).await {
                Ok(user) => Action::ProfileLoaded(Some(user)),
                Err(e) => {
                    warn!("Failed to fetch user profile: {}", e);
                    Action::ProfileLoaded(None)
                }
            }
        }

        Request::Logout => {
            store.remove_auth_token();
            Action::LoggedOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, BookDraft, User};
    use crate::test_support::{FakeApi, book, temp_store};

    #[tokio::test]
    async fn test_run_tags_result_with_generation() {
        let (_dir, store) = temp_store();
        let api = FakeApi::default();
        *api.books.lock().unwrap() = vec![book("1", "A")];

        let task = Task {
            generation: 7,
            request: Request::FetchBooks,
        };
        let action = run(task, &api, &store).await;
        assert_eq!(
            action,
            Action::Completed {
                generation: 7,
                action: Box::new(Action::BooksLoaded(Ok(vec![book("1", "A")]))),
            }
        );
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let (_dir, store) = temp_store();
        let api = FakeApi::default();
        *api.login_result.lock().unwrap() = Ok("tok-123".into());

        let action = perform(
            Request::Login {
                username: "reader".into(),
                password: "pw".into(),
            },
            &api,
            &store,
        )
        .await;
        assert_eq!(action, Action::LoginFinished(Ok(())));
        assert_eq!(store.auth_token().as_deref(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let (_dir, store) = temp_store();
        let api = FakeApi::default();
        *api.login_result.lock().unwrap() = Err(ApiError::Api {
            status: 401,
            detail: None,
        });

        let action = perform(
            Request::Login {
                username: "reader".into(),
                password: "bad".into(),
            },
            &api,
            &store,
        )
        .await;
        assert!(matches!(action, Action::LoginFinished(Err(_))));
        assert_eq!(store.auth_token(), None);
    }

    #[tokio::test]
    async fn test_book_requests_carry_stored_token() {
        let (_dir, store) = temp_store();
        store.set_auth_token("tok");
        let api = FakeApi::default();
        *api.books.lock().unwrap() = vec![book("1", "A")];

        let action = perform(Request::FetchBooks, &api, &store).await;
        assert_eq!(action, Action::BooksLoaded(Ok(vec![book("1", "A")])));
        assert_eq!(api.calls(), vec!["list_books token=Some(\"tok\")"]);
    }

    #[tokio::test]
    async fn test_book_requests_without_token() {
        let (_dir, store) = temp_store();
        let api = FakeApi::default();
        let draft = BookDraft {
            title: "T".into(),
            author: "A".into(),
            genre: "G".into(),
            description: "D".into(),
        };
        let action = perform(Request::CreateBook(draft), &api, &store).await;
        assert!(matches!(
            action,
            Action::BookSaved {
                mode: SaveMode::Create,
                result: Ok(_)
            }
        ));
        assert_eq!(api.calls(), vec!["create_book token=None"]);
    }

    #[tokio::test]
    async fn test_delete_reports_id() {
        let (_dir, store) = temp_store();
        let api = FakeApi::default();
        let action = perform(Request::DeleteBook { id: "7".into() }, &api, &store).await;
        assert_eq!(
            action,
            Action::BookDeleted {
                id: "7".into(),
                result: Ok(())
            }
        );
    }

    #[tokio::test]
    async fn test_profile_load_with_token() {
        let (_dir, store) = temp_store();
        store.set_auth_token("tok");
        let api = FakeApi::default();
        let user = User {
            username: "reader".into(),
            email: "r@example.com".into(),
        };
        *api.profile.lock().unwrap() = Ok(user.clone());

        let action = perform(Request::LoadProfile, &api, &store).await;
        assert_eq!(action, Action::ProfileLoaded(Some(user)));
    }

    #[tokio::test]
    async fn test_profile_error_is_swallowed() {
        let (_dir, store) = temp_store();
        store.set_auth_token("tok");
        let api = FakeApi::default();
        *api.profile.lock().unwrap() = Err(ApiError::Network("down".into()));

        let action = perform(Request::LoadProfile, &api, &store).await;
        assert_eq!(action, Action::ProfileLoaded(None));
    }

    #[tokio::test]
    async fn test_logout_makes_next_profile_load_unauthenticated() {
        let (_dir, store) = temp_store();
        store.set_auth_token("tok");
        let api = FakeApi::default();

        let action = perform(Request::Logout, &api, &store).await;
        assert_eq!(action, Action::LoggedOut);
        assert_eq!(store.auth_token(), None);

        let action = perform(Request::LoadProfile, &api, &store).await;
        assert_eq!(action, Action::ProfileLoaded(None));
        assert!(api.calls().is_empty(), "no profile request without a token");
    }
}
