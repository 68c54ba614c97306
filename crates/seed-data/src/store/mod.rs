//! Document store access.
//!
//! [`DocumentStore`] is the seam between the seeding sequence and the
//! backend. [`FirestoreClient`] talks to Firestore (or its emulator) over
//! REST; [`MemoryStore`] keeps documents in process for tests.

mod credentials;
mod firestore;
mod memory;
pub mod value;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use credentials::{AccessToken, CredentialsFile};
pub use firestore::FirestoreClient;
pub use memory::MemoryStore;

/// Top-level fields of a document.
pub type Fields = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Firestore returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to read credentials file {path}: {source}")]
    CredentialsFile {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed credentials: {0}")]
    Credentials(String),
    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),
    #[error("Unable to determine project id; set GCLOUD_PROJECT")]
    MissingProjectId,
    #[error("Document must serialize to a map, got {0}")]
    NotADocument(&'static str),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid Firestore base URL: {0}")]
    InvalidUrl(String),
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("Write rejected for {0}")]
    Rejected(String),
}

/// Minimal document store: full overwrite by id, or insert with a
/// store-generated id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Replaces `collection/id` with `fields`, creating it if absent.
    async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<(), StoreError>;

    /// Creates a new document in `collection` and returns its generated id.
    async fn add(&self, collection: &str, fields: &Fields) -> Result<String, StoreError>;
}

/// Serializes a model into document fields.
pub fn to_fields<T: serde::Serialize>(document: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(document)? {
        Value::Object(fields) => Ok(fields),
        Value::Null => Err(StoreError::NotADocument("null")),
        Value::Bool(_) => Err(StoreError::NotADocument("bool")),
        Value::Number(_) => Err(StoreError::NotADocument("number")),
        Value::String(_) => Err(StoreError::NotADocument("string")),
        Value::Array(_) => Err(StoreError::NotADocument("array")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_fields_accepts_objects_only() {
        let fields = to_fields(&json!({ "title": "Culte", "isLive": true })).unwrap();
        assert_eq!(fields.len(), 2);

        assert!(matches!(
            to_fields(&json!(["a"])),
            Err(StoreError::NotADocument("array"))
        ));
        assert!(matches!(
            to_fields(&"plain"),
            Err(StoreError::NotADocument("string"))
        ));
    }
}
