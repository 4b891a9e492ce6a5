use serde::{Deserialize, Deserializer, Serialize};

/// A book record as exchanged with the remote service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub description: String,
}

/// The editable fields of a book; also the JSON body for create and update.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
}

impl BookDraft {
    /// True when every field carries text. Whitespace counts as text.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.author.is_empty()
            && !self.genre.is_empty()
            && !self.description.is_empty()
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            description: book.description.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct TokenData {
    pub token: String,
}

/// Structured error payload: `{ data: { message, errors: { username?, password? } } }`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ErrorEnvelope {
    pub data: Option<ErrorDetail>,
}

/// Identifiers arrive as strings from the hosted backend, but numeric ids
/// are accepted too and kept in their decimal form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Uint(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_reads_underscore_id() {
        let json = r#"{"_id":"65f1","title":"Dune","author":"Herbert","genre":"SF","description":"Spice"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, "65f1");
        assert_eq!(book.title, "Dune");
    }

    #[test]
    fn test_book_accepts_numeric_id() {
        let book: Book = serde_json::from_str(r#"{"_id":1,"title":"A"}"#).unwrap();
        assert_eq!(book.id, "1");
        assert_eq!(book.author, "");
    }

    #[test]
    fn test_book_without_id_is_rejected() {
        assert!(serde_json::from_str::<Book>(r#"{"title":"A"}"#).is_err());
    }

    #[test]
    fn test_draft_serializes_only_editable_fields() {
        let draft = BookDraft {
            title: "T".into(),
            author: "A".into(),
            genre: "G".into(),
            description: "D".into(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title":"T","author":"A","genre":"G","description":"D"})
        );
    }

    #[test]
    fn test_draft_completeness() {
        let mut draft = BookDraft {
            title: "T".into(),
            author: "A".into(),
            genre: "G".into(),
            description: "D".into(),
        };
        assert!(draft.is_complete());
        draft.genre.clear();
        assert!(!draft.is_complete());
        assert!(!BookDraft::default().is_complete());
    }

    #[test]
    fn test_error_envelope_with_field_errors() {
        let json = r#"{"data":{"message":"Invalid credentials","errors":{"password":"wrong password"}}}"#;
        let env: ErrorEnvelope = serde_json::from_str(json).unwrap();
        let detail = env.data.unwrap();
        assert_eq!(detail.message.as_deref(), Some("Invalid credentials"));
        let errors = detail.errors.unwrap();
        assert_eq!(errors.password.as_deref(), Some("wrong password"));
        assert!(errors.username.is_none());
    }
}
