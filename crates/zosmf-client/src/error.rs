//! Error types for the z/OSMF client.
//!
//! A request either never produced a response ([`ClientError::Transport`]) or
//! produced one that was not a success ([`ClientError::Remote`]). The two are
//! kept apart so callers can tell a flaky network from a rejected request.

use std::borrow::Cow;

use thiserror::Error;

/// A result type using `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to z/OSMF.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was obtained (DNS, connect, TLS, timeout, reset).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A response was received with a status other than 200.
    #[error("z/OSMF returned status {status}: {}", String::from_utf8_lossy(.body))]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Response body, byte for byte. Empty if it could not be read.
        body: Vec<u8>,
    },

    /// The allocation payload could not be encoded.
    #[error("failed to encode allocation request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// The HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw response body, if a response was received.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Remote { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The response body as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn body_text(&self) -> Option<Cow<'_, str>> {
        self.body().map(String::from_utf8_lossy)
    }

    /// Returns true if no response was obtained at all.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns true if this error might be resolved by retrying.
    ///
    /// The client never retries on its own; this is advice for the caller.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Remote { status, .. } => matches!(*status, 429 | 502..=504),
            Self::Encode(_) | Self::Build(_) => false,
        }
    }
}

/// Errors raised while turning configuration into a [`Connection`](crate::Connection).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required setting is missing or empty.
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    /// The base URL cannot be used to reach z/OSMF.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_exposes_status_and_body() {
        let err = ClientError::Remote {
            status: 409,
            body: b"{\"category\":1}".to_vec(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.body(), Some(&b"{\"category\":1}"[..]));
        assert_eq!(err.to_string(), "z/OSMF returned status 409: {\"category\":1}");
        assert!(!err.is_transport());
        assert!(!err.is_retriable());
    }

    #[test]
    fn retriable_statuses() {
        let remote = |status| ClientError::Remote {
            status,
            body: Vec::new(),
        };
        assert!(remote(503).is_retriable());
        assert!(remote(429).is_retriable());
        assert!(!remote(500).is_retriable());
        assert!(!remote(404).is_retriable());
    }

    #[test]
    fn non_utf8_body_is_kept_raw() {
        let err = ClientError::Remote {
            status: 500,
            body: vec![b'E', b'R', 0xff, 0xfe],
        };
        assert_eq!(err.body(), Some(&[b'E', b'R', 0xff, 0xfe][..]));
        assert_eq!(err.body_text().as_deref(), Some("ER\u{fffd}\u{fffd}"));
    }

    #[test]
    fn encode_error_has_no_status() {
        let err = ClientError::from(serde_json::from_str::<u32>("x").unwrap_err());
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
        assert!(!err.is_retriable());
    }

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::Missing("password").to_string(),
            "missing required setting: password"
        );
    }
}
