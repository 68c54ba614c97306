//! Firestore REST client.
//!
//! Speaks the v1 REST API so the same code path serves the local emulator
//! and a live project. Full overwrites use `PATCH` without an update mask;
//! inserts `POST` to the collection and read the generated id back from the
//! returned document name.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::credentials::{AccessToken, CredentialsFile};
use super::value::{decode_fields, encode_fields};
use super::{DocumentStore, Fields, StoreError};
use crate::config::ConnectionMode;

const LIVE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
/// The emulator accepts this token as an admin bypassing security rules.
const EMULATOR_TOKEN: &str = "owner";

/// Document as returned by the REST API.
#[derive(Debug, Deserialize)]
struct DocumentResponse {
    name: String,
    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,
}

/// Authenticated handle to one Firestore database.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    client: Client,
    base_url: String,
    project_id: String,
    token: AccessToken,
}

impl FirestoreClient {
    /// Creates a client against an explicit endpoint.
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        token: AccessToken,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            project_id: project_id.into(),
            token,
        }
    }

    /// Connects using the resolved connection mode.
    ///
    /// Emulator mode needs no credentials. Default-credentials mode reads
    /// the credentials file and exchanges it for an access token up front,
    /// so an unusable file fails here rather than on the first write.
    pub async fn connect(mode: &ConnectionMode) -> Result<Self, StoreError> {
        match mode {
            ConnectionMode::Emulator { host, project_id } => {
                let client = Self::new(
                    emulator_base_url(host),
                    project_id.clone(),
                    AccessToken(EMULATOR_TOKEN.to_string()),
                );
                info!("Using Firestore Emulator at {}", host);
                Ok(client)
            }
            ConnectionMode::DefaultCredentials {
                credentials_path,
                project_id,
            } => {
                let credentials = CredentialsFile::load(credentials_path)?;
                let project_id = project_id
                    .clone()
                    .or_else(|| credentials.project_id().map(str::to_string))
                    .ok_or(StoreError::MissingProjectId)?;

                let http = Client::new();
                let token = credentials.fetch_token(&http).await?;

                info!("Initialized with application default credentials");
                Ok(Self {
                    client: http,
                    base_url: LIVE_BASE_URL.to_string(),
                    project_id,
                    token,
                })
            }
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// URL of a collection within the default database.
    fn collection_url(&self, collection: &str) -> Result<Url, StoreError> {
        self.documents_url(&[collection])
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<Url, StoreError> {
        self.documents_url(&[collection, id])
    }

    /// Appends `segments` below the documents root, percent-encoding each
    /// one so ids containing `#`, `?`, `/` or `%` stay a single segment.
    fn documents_url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let invalid = || StoreError::InvalidUrl(self.base_url.clone());

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend([
                "projects",
                self.project_id.as_str(),
                "databases",
                "(default)",
                "documents",
            ])
            .extend(segments);
        Ok(url)
    }

    /// Fetches a document's fields, or `None` if it does not exist.
    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError> {
        let resp = self
            .client
            .get(self.document_url(collection, id)?)
            .bearer_auth(&self.token.0)
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: DocumentResponse = check_status(resp).await?.json().await?;
        decode_fields(&document.fields)
            .map(Some)
            .ok_or_else(|| StoreError::UnexpectedResponse(document.name))
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<(), StoreError> {
        debug!("PATCH {}/{}", collection, id);

        let resp = self
            .client
            .patch(self.document_url(collection, id)?)
            .bearer_auth(&self.token.0)
            .json(&json!({ "fields": encode_fields(fields) }))
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    async fn add(&self, collection: &str, fields: &Fields) -> Result<String, StoreError> {
        debug!("POST {}", collection);

        let resp = self
            .client
            .post(self.collection_url(collection)?)
            .bearer_auth(&self.token.0)
            .json(&json!({ "fields": encode_fields(fields) }))
            .send()
            .await?;

        let document: DocumentResponse = check_status(resp).await?.json().await?;
        document_id(&document.name)
            .map(str::to_string)
            .ok_or(StoreError::UnexpectedResponse(document.name))
    }
}

/// Base URL for an emulator host such as `localhost:8080`.
fn emulator_base_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{host}/v1")
    } else {
        format!("http://{host}/v1")
    }
}

/// Last path segment of a full document name.
fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

async fn check_status(resp: Response) -> Result<Response, StoreError> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emulator_base_url() {
        assert_eq!(emulator_base_url("localhost:8080"), "http://localhost:8080/v1");
        assert_eq!(
            emulator_base_url("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080/v1"
        );
    }

    #[test]
    fn test_document_urls() {
        let client = FirestoreClient::new(
            "http://localhost:8080/v1",
            "demo-project",
            AccessToken(EMULATOR_TOKEN.to_string()),
        );

        assert_eq!(
            client.document_url("liveStreams", "main").unwrap().as_str(),
            "http://localhost:8080/v1/projects/demo-project/databases/(default)/documents/liveStreams/main"
        );
        assert_eq!(
            client.collection_url("notifications").unwrap().as_str(),
            "http://localhost:8080/v1/projects/demo-project/databases/(default)/documents/notifications"
        );
        assert_eq!(client.project_id(), "demo-project");
    }

    #[test]
    fn test_document_url_escapes_ids() {
        let client = FirestoreClient::new(
            "http://localhost:8080/v1/",
            "demo-project",
            AccessToken(EMULATOR_TOKEN.to_string()),
        );
        let root = "/v1/projects/demo-project/databases/(default)/documents/users";

        for (id, encoded) in [
            ("abc#1", "abc%231"),
            ("abc?x=1", "abc%3Fx=1"),
            ("a b", "a%20b"),
            ("50%/off", "50%25%2Foff"),
        ] {
            let url = client.document_url("users", id).unwrap();
            assert_eq!(url.path(), format!("{root}/{encoded}"), "id {id:?}");
            assert_eq!(url.query(), None, "id {id:?}");
            assert_eq!(url.fragment(), None, "id {id:?}");
        }
    }

    #[test]
    fn test_document_url_rejects_bad_base() {
        let client = FirestoreClient::new(
            "localhost:8080",
            "demo-project",
            AccessToken(EMULATOR_TOKEN.to_string()),
        );
        assert!(matches!(
            client.document_url("users", "test-user"),
            Err(StoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_document_id() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/notifications/Xy12AbCd"),
            Some("Xy12AbCd")
        );
        assert_eq!(document_id("projects/p/documents/"), None);
    }

    #[tokio::test]
    async fn test_connect_emulator_needs_no_credentials() {
        let mode = ConnectionMode::Emulator {
            host: "localhost:8080".to_string(),
            project_id: "demo-project".to_string(),
        };
        let client = FirestoreClient::connect(&mode).await.unwrap();

        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert_eq!(client.token, AccessToken("owner".to_string()));
    }

    #[tokio::test]
    async fn test_connect_with_missing_credentials_file() {
        let mode = ConnectionMode::DefaultCredentials {
            credentials_path: "/nonexistent/seed-credentials.json".into(),
            project_id: Some("church-dev".to_string()),
        };
        let result = FirestoreClient::connect(&mode).await;
        assert!(matches!(result, Err(StoreError::CredentialsFile { .. })));
    }
}
