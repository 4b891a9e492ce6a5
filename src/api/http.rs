//! reqwest-backed implementation of [`BookApi`].
//!
//! Every call hits a single origin. Book endpoints live under `/api/books`,
//! account endpoints under `/api/auth`. Bodies are JSON wrapped in a
//! `{ "data": ... }` envelope.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::client::{ApiError, BookApi};
use super::types::{
    Book, BookDraft, ErrorEnvelope, LoginRequest, RegisterRequest, TokenData, User,
};

pub const DEFAULT_BASE_URL: &str = "https://backendbooktrack-production.up.railway.app";

pub struct HttpBookApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBookApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Attach `Authorization: Bearer <token>` when a token is present.
fn with_auth(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Read the body and pull the `data` field out of the envelope.
///
/// Non-2xx statuses become `ApiError::Api`, with the structured error
/// payload attached when the body has one.
async fn read_data(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    debug!("Response {}: {}", status, body);

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|env| env.data);
        warn!("Book service error: {} - {}", status.as_u16(), body);
        return Err(ApiError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    let mut value: Value =
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
    match value.get_mut("data").map(Value::take) {
        Some(Value::Null) | None => Err(ApiError::MissingData),
        Some(data) => Ok(data),
    }
}

/// A present-but-malformed record counts as missing data.
fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|e| {
        debug!("Discarding malformed record: {}", e);
        ApiError::MissingData
    })
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        info!("POST /api/auth/login (user={})", username);
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let token: TokenData = decode(read_data(response).await?)?;
        Ok(token.token)
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        info!("POST /api/auth/register (user={})", username);
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|env| env.data);
        Err(ApiError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn fetch_profile(&self, token: &str) -> Result<User, ApiError> {
        info!("GET /api/auth/profile");
        let response = with_auth(self.client.get(self.url("/api/auth/profile")), Some(token))
            .send()
            .await?;

        // The profile endpoint answers with either `{ data: User }` or a bare User.
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                detail: None,
            });
        }
        let body = response.text().await?;
        let mut value: Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        let enveloped = value.get("data").is_some_and(Value::is_object);
        let user = if enveloped { value["data"].take() } else { value };
        decode(user)
    }

    async fn list_books(&self, token: Option<&str>) -> Result<Vec<Book>, ApiError> {
        info!("GET /api/books");
        let response = with_auth(self.client.get(self.url("/api/books")), token)
            .send()
            .await?;
        let books: Vec<Book> = decode(read_data(response).await?)?;
        info!("Fetched {} books", books.len());
        Ok(books)
    }

    async fn create_book(
        &self,
        token: Option<&str>,
        draft: &BookDraft,
    ) -> Result<Book, ApiError> {
        info!("POST /api/books (title={:?})", draft.title);
        let response = with_auth(self.client.post(self.url("/api/books")), token)
            .json(draft)
            .send()
            .await?;
        decode(read_data(response).await?)
    }

    async fn update_book(
        &self,
        token: Option<&str>,
        id: &str,
        draft: &BookDraft,
    ) -> Result<Book, ApiError> {
        info!("PUT /api/books/{}", id);
        let response = with_auth(self.client.put(self.url(&format!("/api/books/{id}"))), token)
            .json(draft)
            .send()
            .await?;
        decode(read_data(response).await?)
    }

    async fn delete_book(&self, token: Option<&str>, id: &str) -> Result<(), ApiError> {
        info!("DELETE /api/books/{}", id);
        let response =
            with_auth(self.client.delete(self.url(&format!("/api/books/{id}"))), token)
                .send()
                .await?;
        // Body and status are ignored.
        debug!("Delete answered with {}", response.status());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpBookApi::new("http://localhost:3000/");
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.url("/api/books"), "http://localhost:3000/api/books");
    }

    #[test]
    fn test_decode_malformed_record_is_missing_data() {
        let result: Result<Book, ApiError> = decode(serde_json::json!({"title": "no id"}));
        assert_eq!(result, Err(ApiError::MissingData));
    }
}
