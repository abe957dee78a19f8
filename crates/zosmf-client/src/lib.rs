//! Authenticated z/OSMF REST files client for sequential datasets.
//!
//! This crate provides the transport, authentication and wire encoding used to
//! manage datasets through z/OSMF:
//!
//! - [`Transport`]: reqwest client with timeout and optional (loudly logged)
//!   TLS verification bypass; attaches the anti-CSRF header and basic auth
//! - [`DatasetClient`]: fetch, allocate, replace and delete operations
//! - [`HttpDatasetClient`]: the HTTP implementation of [`DatasetClient`]
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │   Lifecycle      │────▶│  DatasetClient   │
//! │   orchestrator   │     │  (trait)         │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │
//!                          ┌────────▼─────────┐
//!                          │ HttpDatasetClient│
//!                          └────────┬─────────┘
//!                                   │
//!                          ┌────────▼─────────┐
//!                          │    Transport     │
//!                          │ (CSRF + basic)   │
//!                          └────────┬─────────┘
//!                                   │ HTTPS
//!                          ┌────────▼─────────┐
//!                          │      z/OSMF      │
//!                          │ /zosmf/restfiles │
//!                          └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use zosmf_client::{ConnectionConfig, DatasetClient, HttpDatasetClient};
//! use zosmf_core::DatasetName;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = ConnectionConfig::new("https://mainframe:443", "IBMUSER", "secret")
//!     .into_connection()?;
//! let client = HttpDatasetClient::new(connection)?;
//!
//! let name: DatasetName = "IBMUSER.TEST.DATA".parse()?;
//! let content = client.fetch_content(&name).await?;
//! println!("{} bytes", content.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use config::{Connection, ConnectionConfig, TlsVerification};
pub use dataset::{dataset_url, DatasetClient, HttpDatasetClient, DATASET_RESOURCE_PATH};
pub use error::{ClientError, ConfigError, Result};
pub use transport::{Transport, CSRF_HEADER, CSRF_HEADER_VALUE};

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockDatasetClient, Operation, RecordedCall};
