pub mod client;
pub mod http;
pub mod types;

pub use client::{ApiError, BookApi};
pub use http::{DEFAULT_BASE_URL, HttpBookApi};
pub use types::{Book, BookDraft, ErrorDetail, FieldErrors, User};
