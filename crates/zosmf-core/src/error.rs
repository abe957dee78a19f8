//! Common error types for the dataset domain.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while constructing domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The dataset name violates z/OS naming rules.
    #[error("invalid dataset name {name:?}: {reason}")]
    InvalidDatasetName {
        /// The rejected name.
        name: String,
        /// Which rule was broken.
        reason: &'static str,
    },
}
