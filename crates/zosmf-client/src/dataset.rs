//! Dataset operations against the z/OSMF REST files API.
//!
//! All operations address the same resource path,
//! `{base_url}/zosmf/restfiles/ds/{name}`, and differ only in method and
//! content negotiation.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use zosmf_core::{DatasetAttributes, DatasetContent, DatasetName};

use crate::config::Connection;
use crate::error::Result;
use crate::transport::Transport;

/// Path of the REST files dataset resource, relative to the base URL.
pub const DATASET_RESOURCE_PATH: &str = "/zosmf/restfiles/ds";

const TEXT_PLAIN: &str = "text/plain";
const APPLICATION_JSON: &str = "application/json";

/// Build the resource URL for a dataset.
///
/// The name is percent-encoded, which leaves any name without path-reserved
/// characters unchanged.
#[must_use]
pub fn dataset_url(base_url: &str, name: &DatasetName) -> String {
    format!(
        "{base_url}{DATASET_RESOURCE_PATH}/{}",
        urlencoding::encode(name.as_str())
    )
}

/// Remote dataset operations.
///
/// Each method is a single request/response round trip with no retries.
/// This trait abstracts the HTTP client so the lifecycle orchestrator can be
/// tested against a mock.
#[async_trait]
pub trait DatasetClient: Send + Sync {
    /// Fetch the full content of a dataset.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Remote` if the dataset does not exist or the
    /// request is rejected, `ClientError::Transport` if no response arrives.
    async fn fetch_content(&self, name: &DatasetName) -> Result<DatasetContent>;

    /// Allocate a new dataset with the given attributes.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Remote` if allocation is rejected, including
    /// when the dataset already exists.
    async fn allocate(&self, name: &DatasetName, attributes: &DatasetAttributes) -> Result<()>;

    /// Replace the whole content of an existing dataset.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Remote` if the write is rejected.
    async fn replace_content(&self, name: &DatasetName, content: &DatasetContent) -> Result<()>;

    /// Delete a dataset.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Remote` if the delete is rejected.
    async fn delete(&self, name: &DatasetName) -> Result<()>;
}

/// HTTP implementation of [`DatasetClient`].
#[derive(Debug, Clone)]
pub struct HttpDatasetClient {
    transport: Transport,
}

impl HttpDatasetClient {
    /// Create a client for the given connection.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Build` if the HTTP client cannot be created.
    pub fn new(connection: Connection) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(connection)?,
        })
    }

    /// Create a client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, connection: Connection) -> Self {
        Self {
            transport: Transport::with_client(client, connection),
        }
    }

    /// Get the base URL of the z/OSMF instance.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.transport.connection().base_url()
    }

    fn url(&self, name: &DatasetName) -> String {
        dataset_url(self.base_url(), name)
    }
}

#[async_trait]
impl DatasetClient for HttpDatasetClient {
    async fn fetch_content(&self, name: &DatasetName) -> Result<DatasetContent> {
        let request = self
            .transport
            .request(Method::GET, &self.url(name))
            .header(ACCEPT, TEXT_PLAIN)
            .header(CONTENT_TYPE, TEXT_PLAIN);

        let body = self.transport.execute(request).await?;

        tracing::debug!(dataset = %name, bytes = body.len(), "Fetched dataset content");
        Ok(DatasetContent::from(body))
    }

    async fn allocate(&self, name: &DatasetName, attributes: &DatasetAttributes) -> Result<()> {
        let payload = serde_json::to_vec(attributes)?;

        let request = self
            .transport
            .request(Method::POST, &self.url(name))
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(payload);

        self.transport.execute(request).await?;
        tracing::debug!(dataset = %name, "Allocated dataset");
        Ok(())
    }

    async fn replace_content(&self, name: &DatasetName, content: &DatasetContent) -> Result<()> {
        let request = self
            .transport
            .request(Method::PUT, &self.url(name))
            .header(ACCEPT, TEXT_PLAIN)
            .header(CONTENT_TYPE, TEXT_PLAIN)
            .body(content.as_bytes().to_vec());

        self.transport.execute(request).await?;
        tracing::debug!(dataset = %name, bytes = content.len(), "Replaced dataset content");
        Ok(())
    }

    async fn delete(&self, name: &DatasetName) -> Result<()> {
        let request = self.transport.request(Method::DELETE, &self.url(name));

        self.transport.execute(request).await?;
        tracing::debug!(dataset = %name, "Deleted dataset");
        Ok(())
    }
}
