//! Error types for the lifecycle orchestrator.
//!
//! Every failure reports the last dataset state the remote system confirmed,
//! so a caller can persist what is actually true rather than what it asked
//! for.

use std::fmt;

use thiserror::Error;
use zosmf_client::ClientError;
use zosmf_core::{DatasetName, DatasetRecord, DatasetState};

/// A result type using `LifecycleError`.
pub type Result<T> = std::result::Result<T, LifecycleError>;

/// The remote step a lifecycle operation was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Reading content.
    FetchContent,
    /// Allocating the dataset.
    Allocate,
    /// Writing content.
    ReplaceContent,
    /// Deleting the dataset.
    Delete,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FetchContent => "fetch",
            Self::Allocate => "allocation",
            Self::ReplaceContent => "content write",
            Self::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Errors that can occur in lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A step failed and the dataset is still in its last confirmed state.
    #[error("{step} of dataset {name} failed: {source}")]
    Halted {
        /// The dataset being operated on.
        name: DatasetName,
        /// The step that failed.
        step: Step,
        /// State confirmed before the failure, `None` when the operation
        /// does not establish one (reads).
        last_confirmed: Option<DatasetState>,
        /// The underlying client failure.
        #[source]
        source: ClientError,
    },

    /// The dataset was allocated but its content could not be written.
    ///
    /// The dataset now exists remotely with empty or unknown content. The
    /// caller should persist [`LifecycleError::record`] and reconcile with an
    /// update rather than retrying the allocation.
    #[error("dataset {} was allocated but its content write failed: {source}", .record.name)]
    PartialLifecycle {
        /// Record describing the allocated dataset with unknown content.
        record: Box<DatasetRecord>,
        /// The underlying client failure.
        #[source]
        source: ClientError,
    },

    /// The requested operation is not valid from the dataset's current state.
    #[error("invalid state transition for dataset {name}: cannot transition from {from} to {to}")]
    InvalidTransition {
        /// The dataset being operated on.
        name: DatasetName,
        /// The current state.
        from: DatasetState,
        /// The requested target state.
        to: DatasetState,
    },
}

impl LifecycleError {
    /// The last state confirmed by the remote system, if known.
    #[must_use]
    pub fn last_confirmed(&self) -> Option<DatasetState> {
        match self {
            Self::Halted { last_confirmed, .. } => *last_confirmed,
            Self::PartialLifecycle { record, .. } => Some(record.state),
            Self::InvalidTransition { from, .. } => Some(*from),
        }
    }

    /// The underlying client error, if a remote call failed.
    #[must_use]
    pub const fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Halted { source, .. } | Self::PartialLifecycle { source, .. } => Some(source),
            Self::InvalidTransition { .. } => None,
        }
    }

    /// The record to persist after a partial success.
    #[must_use]
    pub fn record(&self) -> Option<&DatasetRecord> {
        match self {
            Self::PartialLifecycle { record, .. } => Some(&**record),
            _ => None,
        }
    }

    /// Returns true if the remote system was left in an intermediate state.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::PartialLifecycle { .. })
    }
}
