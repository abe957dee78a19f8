//! Authenticated HTTP transport.
//!
//! Every request leaving this module carries the z/OSMF anti-CSRF header and
//! HTTP basic credentials from the [`Connection`]. Only a 200 response counts
//! as success; anything else comes back as [`ClientError::Remote`] with the
//! body untouched.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};

use crate::config::Connection;
use crate::error::{ClientError, Result};

/// Header z/OSMF requires on every REST request.
pub const CSRF_HEADER: &str = "X-CSRF-ZOSMF-HEADER";

/// Placeholder value sent in [`CSRF_HEADER`].
pub const CSRF_HEADER_VALUE: &str = "dummy";

/// One-request-at-a-time HTTP transport bound to a connection.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    connection: Arc<Connection>,
}

impl Transport {
    /// Build a transport for the given connection.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Build` if the TLS backend cannot be initialized.
    pub fn new(connection: Connection) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(connection.timeout());

        if connection.tls().is_insecure() {
            tracing::warn!(
                base_url = %connection.base_url(),
                "TLS certificate verification is DISABLED for this connection; \
                 do not use this mode against production systems"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(ClientError::Build)?;
        Ok(Self::with_client(client, connection))
    }

    /// Create a transport with a custom reqwest client.
    ///
    /// The client's own timeout and TLS settings are used as-is.
    #[must_use]
    pub fn with_client(client: reqwest::Client, connection: Connection) -> Self {
        Self {
            client,
            connection: Arc::new(connection),
        }
    }

    /// The connection this transport authenticates with.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Start an authenticated request.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(CSRF_HEADER, CSRF_HEADER_VALUE)
            .basic_auth(self.connection.username(), Some(self.connection.password()))
    }

    /// Send a request and return the response body on HTTP 200.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if no response was obtained or a 200
    /// body could not be read, and `ClientError::Remote` for any status
    /// other than 200.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let request = request.build().map_err(ClientError::Transport)?;
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!(method = %method, url = %url, "Sending z/OSMF request");

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "z/OSMF request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();

        if status == StatusCode::OK {
            let body = response.bytes().await.map_err(|e| {
                tracing::warn!(
                    method = %method,
                    url = %url,
                    error = %e,
                    "Failed to read z/OSMF response"
                );
                ClientError::Transport(e)
            })?;
            tracing::debug!(
                method = %method,
                url = %url,
                bytes = body.len(),
                "z/OSMF request succeeded"
            );
            return Ok(body.to_vec());
        }

        // The status was received, so this stays a remote error even when the
        // body is cut short.
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(e) => {
                tracing::warn!(
                    method = %method,
                    url = %url,
                    status = status.as_u16(),
                    error = %e,
                    "Failed to read z/OSMF error body"
                );
                Vec::new()
            }
        };

        tracing::warn!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            "z/OSMF rejected request"
        );
        Err(ClientError::Remote {
            status: status.as_u16(),
            body,
        })
    }
}
