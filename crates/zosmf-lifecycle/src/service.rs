//! Lifecycle service implementation.
//!
//! This module provides the `DatasetLifecycle` trait and the
//! `LifecycleService` implementation that sequences dataset client calls
//! into create, read, update and delete intents.

use std::sync::Arc;

use async_trait::async_trait;
use zosmf_client::DatasetClient;
use zosmf_core::{DatasetAttributes, DatasetContent, DatasetName, DatasetRecord, DatasetState};

use crate::error::{LifecycleError, Result, Step};
use crate::lifecycle;

/// Trait defining the dataset lifecycle operations.
///
/// Each operation issues its remote calls one after another and reports the
/// last confirmed state on failure. Concurrent operations on different
/// datasets are independent; concurrent operations on the same dataset are
/// not serialized and must be avoided by the caller.
#[async_trait]
pub trait DatasetLifecycle: Send + Sync {
    /// Allocate a dataset and write its initial content.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Halted` with last confirmed state `Absent` if
    /// allocation fails; content is not written in that case. Returns
    /// `LifecycleError::PartialLifecycle` if allocation succeeded but the
    /// content write failed.
    async fn ensure_created(
        &self,
        name: &DatasetName,
        attributes: &DatasetAttributes,
        content: &DatasetContent,
    ) -> Result<DatasetRecord>;

    /// Read the current content of a dataset.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Halted` if the fetch fails.
    async fn read(&self, name: &DatasetName) -> Result<DatasetContent>;

    /// Replace the content of an existing dataset.
    ///
    /// Allocation attributes are carried over from `current`; the dataset is
    /// never re-allocated.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if `current` is `Absent`,
    /// and `LifecycleError::Halted` if the write fails.
    async fn update(&self, current: &DatasetRecord, content: &DatasetContent)
        -> Result<DatasetRecord>;

    /// Delete an existing dataset.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if `current` is `Absent`,
    /// and `LifecycleError::Halted` if the delete fails.
    async fn delete(&self, current: &DatasetRecord) -> Result<()>;
}

/// The dataset lifecycle service.
pub struct LifecycleService<C: DatasetClient> {
    client: Arc<C>,
}

impl<C: DatasetClient> LifecycleService<C> {
    /// Create a new lifecycle service on top of a dataset client.
    #[must_use]
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Get a reference to the dataset client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: DatasetClient> Clone for LifecycleService<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

#[async_trait]
impl<C: DatasetClient + 'static> DatasetLifecycle for LifecycleService<C> {
    async fn ensure_created(
        &self,
        name: &DatasetName,
        attributes: &DatasetAttributes,
        content: &DatasetContent,
    ) -> Result<DatasetRecord> {
        if let Err(source) = self.client.allocate(name, attributes).await {
            tracing::warn!(dataset = %name, error = %source, "Dataset allocation failed");
            return Err(LifecycleError::Halted {
                name: name.clone(),
                step: Step::Allocate,
                last_confirmed: Some(DatasetState::Absent),
                source,
            });
        }

        tracing::info!(dataset = %name, "Allocated dataset");

        let allocated = DatasetRecord::allocated(name.clone(), attributes.clone());

        if let Err(source) = self.client.replace_content(name, content).await {
            tracing::error!(
                dataset = %name,
                error = %source,
                "Dataset allocated but content write failed"
            );
            return Err(LifecycleError::PartialLifecycle {
                record: Box::new(allocated),
                source,
            });
        }

        tracing::info!(dataset = %name, bytes = content.len(), "Created dataset");

        Ok(DatasetRecord::materialized(
            allocated.name,
            allocated.attributes,
            content.clone(),
        ))
    }

    async fn read(&self, name: &DatasetName) -> Result<DatasetContent> {
        self.client
            .fetch_content(name)
            .await
            .map_err(|source| LifecycleError::Halted {
                name: name.clone(),
                step: Step::FetchContent,
                last_confirmed: None,
                source,
            })
    }

    async fn update(
        &self,
        current: &DatasetRecord,
        content: &DatasetContent,
    ) -> Result<DatasetRecord> {
        let name = &current.name;
        lifecycle::validate_transition(name, current.state, DatasetState::Materialized)?;

        if let Err(source) = self.client.replace_content(name, content).await {
            tracing::warn!(dataset = %name, error = %source, "Dataset content write failed");
            return Err(LifecycleError::Halted {
                name: name.clone(),
                step: Step::ReplaceContent,
                last_confirmed: Some(current.state),
                source,
            });
        }

        tracing::info!(
            dataset = %name,
            from = %current.state,
            bytes = content.len(),
            "Updated dataset content"
        );

        Ok(DatasetRecord::materialized(
            name.clone(),
            current.attributes.clone(),
            content.clone(),
        ))
    }

    async fn delete(&self, current: &DatasetRecord) -> Result<()> {
        let name = &current.name;
        lifecycle::validate_transition(name, current.state, DatasetState::Absent)?;

        self.client
            .delete(name)
            .await
            .map_err(|source| LifecycleError::Halted {
                name: name.clone(),
                step: Step::Delete,
                last_confirmed: Some(current.state),
                source,
            })?;

        tracing::info!(dataset = %name, "Deleted dataset");
        Ok(())
    }
}
