use std::fmt;

use async_trait::async_trait;

use super::types::{Book, BookDraft, ErrorDetail, User};

/// Errors that can occur while talking to the book service.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service answered with a non-2xx status. `detail` holds the
    /// structured error payload when the body carried one.
    Api {
        status: u16,
        detail: Option<ErrorDetail>,
    },
    /// The body was not the JSON we expected.
    Parse(String),
    /// The body parsed but had no usable `data` field.
    MissingData,
}

impl ApiError {
    /// Server-provided error payload, if any.
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            ApiError::Api { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// True when the service answered at all (as opposed to a transport or
    /// decoding failure on our side).
    pub fn is_server_reply(&self) -> bool {
        matches!(self, ApiError::Api { .. } | ApiError::MissingData)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, detail } => {
                let message = detail
                    .as_ref()
                    .and_then(|d| d.message.as_deref())
                    .unwrap_or("no message");
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::MissingData => write!(f, "response carried no data"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// The remote book service.
///
/// Calls that need authentication take the raw token; implementations attach
/// it as a bearer header when present.
#[async_trait]
pub trait BookApi: Send + Sync {
    /// Returns the session token.
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;

    async fn register(&self, username: &str, email: &str, password: &str)
    -> Result<(), ApiError>;

    async fn fetch_profile(&self, token: &str) -> Result<User, ApiError>;

    async fn list_books(&self, token: Option<&str>) -> Result<Vec<Book>, ApiError>;

    async fn create_book(&self, token: Option<&str>, draft: &BookDraft)
    -> Result<Book, ApiError>;

    async fn update_book(
        &self,
        token: Option<&str>,
        id: &str,
        draft: &BookDraft,
    ) -> Result<Book, ApiError>;

    /// Succeeds whenever the service answered, whatever the status or body.
    async fn delete_book(&self, token: Option<&str>, id: &str) -> Result<(), ApiError>;
}
