//! Dataset lifecycle orchestration for z/OSMF.
//!
//! This crate sequences [`DatasetClient`] calls into higher-level intents and
//! defines what happens when a step in the sequence fails.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Caller (CLI / orchestrator)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     LifecycleService                        │
//! │  ┌──────────────┐ ┌──────────┐ ┌──────────────────────────┐ │
//! │  │ ensure-create│ │  read /  │ │   Lifecycle              │ │
//! │  │ (alloc+write)│ │ upd / del│ │   State Machine          │ │
//! │  └──────────────┘ └──────────┘ └──────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                     ┌──────────────────┐
//!                     │  DatasetClient   │
//!                     │  (z/OSMF HTTPS)  │
//!                     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use zosmf_client::{ConnectionConfig, HttpDatasetClient};
//! use zosmf_core::{DatasetAttributes, DatasetName};
//! use zosmf_lifecycle::{DatasetLifecycle, LifecycleError, LifecycleService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = ConnectionConfig::new("https://mainframe:443", "IBMUSER", "secret")
//!     .into_connection()?;
//! let service = LifecycleService::new(Arc::new(HttpDatasetClient::new(connection)?));
//!
//! let name: DatasetName = "IBMUSER.TEST.DATA".parse()?;
//! let attributes = DatasetAttributes::default().with_dsorg("PS").with_recfm("FB").with_lrecl(80);
//!
//! match service.ensure_created(&name, &attributes, &"HELLO".into()).await {
//!     Ok(record) => println!("{} is {}", record.name, record.state),
//!     Err(err @ LifecycleError::PartialLifecycle { .. }) => {
//!         // Persist err.record(): allocated, content unknown
//!         eprintln!("{err}");
//!     }
//!     Err(err) => return Err(err.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # State Machine
//!
//! - `Absent` → `Allocated` (allocate)
//! - `Allocated` → `Materialized` (content written)
//! - `Materialized` → `Materialized` (content replaced)
//! - `Allocated` / `Materialized` → `Absent` (delete)
//!
//! See the [`lifecycle`] module for transition validation helpers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod lifecycle;
pub mod service;

pub use error::{LifecycleError, Result, Step};
pub use service::{DatasetLifecycle, LifecycleService};

// Re-export commonly used types from dependencies for convenience
pub use zosmf_client::{ClientError, DatasetClient};
pub use zosmf_core::{DatasetAttributes, DatasetContent, DatasetName, DatasetRecord, DatasetState};
