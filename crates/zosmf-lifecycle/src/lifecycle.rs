//! Dataset lifecycle state machine.
//!
//! This module defines the valid state transitions for a managed dataset.
//! Operations that start from a stored record validate its state here before
//! any remote call is made.
//!
//! # State Machine
//!
//! ```text
//!     ┌──────────┐   allocate    ┌───────────┐  replace content  ┌──────────────┐
//!     │  Absent  │──────────────▶│ Allocated │──────────────────▶│ Materialized │◀──┐
//!     └──────────┘               └───────────┘                   └──────────────┘   │
//!          ▲                           │                            │     │         │
//!          │          delete           │           delete           │     └─────────┘
//!          └───────────────────────────┴────────────────────────────┘  replace content
//! ```

use zosmf_core::{DatasetName, DatasetState};

use crate::error::{LifecycleError, Result};

/// Validates a state transition and returns the target state if valid.
///
/// # Errors
///
/// Returns `LifecycleError::InvalidTransition` if the transition is not allowed.
pub fn validate_transition(
    name: &DatasetName,
    from: DatasetState,
    to: DatasetState,
) -> Result<DatasetState> {
    if is_valid_transition(from, to) {
        Ok(to)
    } else {
        Err(LifecycleError::InvalidTransition {
            name: name.clone(),
            from,
            to,
        })
    }
}

/// Check if a state transition is valid according to the state machine.
#[must_use]
pub const fn is_valid_transition(from: DatasetState, to: DatasetState) -> bool {
    use DatasetState::{Absent, Allocated, Materialized};

    matches!(
        (from, to),
        (Absent, Allocated)
            // Content is written to a fresh allocation, or replaced wholesale
            | (Allocated | Materialized, Materialized)
            | (Allocated | Materialized, Absent)
    )
}
