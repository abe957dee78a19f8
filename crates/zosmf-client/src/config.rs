//! Connection configuration.
//!
//! [`ConnectionConfig`] is the deserializable, defaulted form a caller fills
//! in from its own configuration sources. [`Connection`] is the validated,
//! immutable result owned by a client.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// How server certificates are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Verify the certificate chain and host name.
    #[default]
    Verify,
    /// Accept any certificate. Only for test systems with self-signed
    /// certificates; every client built this way logs a warning.
    DangerAcceptInvalidCerts,
}

impl TlsVerification {
    /// Returns true if certificate verification is disabled.
    #[must_use]
    pub const fn is_insecure(self) -> bool {
        matches!(self, Self::DangerAcceptInvalidCerts)
    }
}

/// Settings for reaching a z/OSMF instance.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL, e.g. `https://mainframe.example.com:443`.
    #[serde(default)]
    pub host: String,

    /// User ID for basic authentication.
    #[serde(default)]
    pub username: String,

    /// Password for basic authentication.
    #[serde(default)]
    pub password: Option<String>,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure_skip_tls_verify: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "ConnectionConfig::default_timeout")]
    pub timeout_seconds: u64,
}

impl ConnectionConfig {
    const fn default_timeout() -> u64 {
        10
    }

    /// Create a config with the required settings and defaults elsewhere.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: Some(password.into()),
            insecure_skip_tls_verify: false,
            timeout_seconds: Self::default_timeout(),
        }
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validate the settings and build a [`Connection`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the host, username or password is
    /// empty, and `ConfigError::InvalidBaseUrl` if the host is not an
    /// `http` or `https` URL.
    pub fn into_connection(self) -> Result<Connection, ConfigError> {
        let tls = if self.insecure_skip_tls_verify {
            TlsVerification::DangerAcceptInvalidCerts
        } else {
            TlsVerification::Verify
        };
        let timeout = self.timeout();

        Connection::new(
            self.host,
            self.username,
            self.password.unwrap_or_default(),
            tls,
            timeout,
        )
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            password: None,
            insecure_skip_tls_verify: false,
            timeout_seconds: Self::default_timeout(),
        }
    }
}

/// A validated, immutable set of connection parameters.
#[derive(Clone)]
pub struct Connection {
    base_url: String,
    username: String,
    password: String,
    tls: TlsVerification,
    timeout: Duration,
}

impl Connection {
    /// Build a connection.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for an empty base URL, username or
    /// password and `ConfigError::InvalidBaseUrl` if the base URL does not
    /// parse or is not `http`/`https`.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        tls: TlsVerification,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let username = username.into();
        let password = password.into();

        if base_url.is_empty() {
            return Err(ConfigError::Missing("host"));
        }
        if username.is_empty() {
            return Err(ConfigError::Missing("username"));
        }
        if password.is_empty() {
            return Err(ConfigError::Missing("password"));
        }

        let parsed = reqwest::Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url,
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(Self {
            base_url,
            username,
            password,
            tls,
            timeout,
        })
    }

    /// Base URL as configured.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// User ID for basic authentication.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Certificate verification mode.
    #[must_use]
    pub const fn tls(&self) -> TlsVerification {
        self.tls
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .finish()
    }
}
