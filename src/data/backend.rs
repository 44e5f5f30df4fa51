//! HTTP client for the platform's backend document service
//!
//! The backend is a hosted document store: collections of JSON documents
//! queried over REST, authenticated with a project id and API key. This
//! module knows nothing about the domain types it transports; the typed
//! clients in the sibling modules choose collections and payload shapes.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Base URL for the hosted backend
const DEFAULT_BASE_URL: &str = "https://cloud.signclass.app/v1";

/// Header carrying the project identifier
const PROJECT_HEADER: &str = "X-Signclass-Project";

/// Header carrying the API key
const API_KEY_HEADER: &str = "X-Signclass-Key";

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned status {code}")]
    Status { code: u16 },

    /// The requested document does not exist
    #[error("Document '{id}' not found in collection '{collection}'")]
    NotFound { collection: String, id: String },
}

/// Envelope the backend wraps every listing response in
#[derive(Debug, Deserialize)]
struct DocumentList<T> {
    /// Total number of matching documents
    #[allow(dead_code)]
    total: u64,
    /// The documents themselves
    documents: Vec<T>,
}

/// Client for the backend document service
///
/// Cheap to clone; all clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the service (allows override for testing)
    base_url: String,
    /// Project identifier sent with every request
    project: String,
    /// API key sent with every request
    api_key: String,
}

impl BackendClient {
    /// Creates a client for the hosted backend
    pub fn new(project: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            project: project.into(),
            api_key: api_key.into(),
        }
    }

    /// Overrides the base URL (self-hosted backends, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// URL of a collection's document listing
    fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{}/documents", self.base_url, collection)
    }

    /// URL of a single document
    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/collections/{}/documents/{}", self.base_url, collection, id)
    }

    /// Lists every document in a collection
    ///
    /// # Arguments
    /// * `collection` - Name of the backend collection
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The documents, in backend order
    /// * `Err(BackendError)` - If the request or parsing fails
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, BackendError> {
        debug!(collection, "listing documents");
        let response = self
            .http_client
            .get(self.collection_url(collection))
            .header(PROJECT_HEADER, &self.project)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                code: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let list: DocumentList<T> = serde_json::from_str(&text)?;
        Ok(list.documents)
    }

    /// Lists documents in a collection matching an equality filter
    ///
    /// # Arguments
    /// * `collection` - Name of the backend collection
    /// * `field` - Document field to filter on
    /// * `value` - Value the field must equal
    pub async fn list_documents_filtered<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<T>, BackendError> {
        debug!(collection, field, value, "listing filtered documents");
        let response = self
            .http_client
            .get(self.collection_url(collection))
            .query(&[("filter", format!("{}={}", field, value))])
            .header(PROJECT_HEADER, &self.project)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                code: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let list: DocumentList<T> = serde_json::from_str(&text)?;
        Ok(list.documents)
    }

    /// Fetches a single document by id
    ///
    /// # Returns
    /// * `Ok(T)` - The document
    /// * `Err(BackendError::NotFound)` - If the backend answers 404
    /// * `Err(BackendError)` - For any other failure
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<T, BackendError> {
        debug!(collection, id, "fetching document");
        let response = self
            .http_client
            .get(self.document_url(collection, id))
            .header(PROJECT_HEADER, &self.project)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(BackendError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                code: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let document: T = serde_json::from_str(&text)?;
        Ok(document)
    }

    /// Applies a partial update to a document and returns the updated copy
    ///
    /// # Arguments
    /// * `collection` - Name of the backend collection
    /// * `id` - Document to update
    /// * `patch` - Fields to change, serialized as the request body
    pub async fn patch_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        patch: &impl Serialize,
    ) -> Result<T, BackendError> {
        debug!(collection, id, "patching document");
        let response = self
            .http_client
            .patch(self.document_url(collection, id))
            .header(PROJECT_HEADER, &self.project)
            .header(API_KEY_HEADER, &self.api_key)
            .json(patch)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(BackendError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                code: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let document: T = serde_json::from_str(&text)?;
        Ok(document)
    }
}
