//! Core types for the z/OSMF dataset lifecycle client.
//!
//! This crate provides the domain types shared by the client and the
//! lifecycle orchestrator:
//!
//! - **Identity**: [`DatasetName`], a validated z/OS dataset name that doubles
//!   as the remote resource key
//! - **Allocation parameters**: [`DatasetAttributes`], where empty strings and
//!   zero values mean "unset"
//! - **Content**: [`DatasetContent`], the full body of a sequential dataset
//! - **State**: [`DatasetState`] and the persisted [`DatasetRecord`]
//!
//! # Example
//!
//! ```
//! use zosmf_core::{DatasetAttributes, DatasetName};
//!
//! let name: DatasetName = "USER.TEST.DATA".parse().unwrap();
//! let attributes = DatasetAttributes::default()
//!     .with_dsorg("PS")
//!     .with_recfm("FB")
//!     .with_lrecl(80);
//!
//! assert_eq!(name.as_str(), "USER.TEST.DATA");
//! assert!(!attributes.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod name;
pub mod types;

pub use error::{CoreError, Result};
pub use name::DatasetName;
pub use types::{DatasetAttributes, DatasetContent, DatasetRecord, DatasetState};
