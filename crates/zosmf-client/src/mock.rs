//! In-memory [`DatasetClient`] for tests.
//!
//! Records every call in order and answers from scripted failures. With no
//! failure scripted, every operation succeeds and `fetch_content` returns the
//! content most recently written (or the content set with
//! [`MockDatasetClient::with_content`]).

use async_trait::async_trait;
use parking_lot::Mutex;
use zosmf_core::{DatasetAttributes, DatasetContent, DatasetName};

use crate::dataset::DatasetClient;
use crate::error::{ClientError, Result};

/// A call observed by [`MockDatasetClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `fetch_content(name)`
    FetchContent(DatasetName),
    /// `allocate(name, attributes)`
    Allocate(DatasetName, DatasetAttributes),
    /// `replace_content(name, content)`
    ReplaceContent(DatasetName, DatasetContent),
    /// `delete(name)`
    Delete(DatasetName),
}

/// Operation selector for scripting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `fetch_content`
    FetchContent,
    /// `allocate`
    Allocate,
    /// `replace_content`
    ReplaceContent,
    /// `delete`
    Delete,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    failures: Vec<(Operation, u16, Vec<u8>)>,
    content: Option<DatasetContent>,
}

/// A scripted, call-recording dataset client.
#[derive(Debug, Default)]
pub struct MockDatasetClient {
    state: Mutex<MockState>,
}

impl MockDatasetClient {
    /// Create a mock where every operation succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `fetch_content` return this content.
    #[must_use]
    pub fn with_content(self, content: impl Into<DatasetContent>) -> Self {
        self.state.lock().content = Some(content.into());
        self
    }

    /// Make every call to `operation` fail with a remote error.
    #[must_use]
    pub fn failing(self, operation: Operation, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.state
            .lock()
            .failures
            .push((operation, status, body.into()));
        self
    }

    /// All calls observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    /// Number of calls made to `operation`.
    #[must_use]
    pub fn call_count(&self, operation: Operation) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    fn record(&self, call: RecordedCall) -> Result<()> {
        let mut state = self.state.lock();
        let operation = call.operation();
        state.calls.push(call);

        match state.failures.iter().find(|(op, _, _)| *op == operation) {
            Some((_, status, body)) => Err(ClientError::Remote {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl RecordedCall {
    /// The operation this call belongs to.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::FetchContent(_) => Operation::FetchContent,
            Self::Allocate(..) => Operation::Allocate,
            Self::ReplaceContent(..) => Operation::ReplaceContent,
            Self::Delete(_) => Operation::Delete,
        }
    }
}

#[async_trait]
impl DatasetClient for MockDatasetClient {
    async fn fetch_content(&self, name: &DatasetName) -> Result<DatasetContent> {
        self.record(RecordedCall::FetchContent(name.clone()))?;
        Ok(self.state.lock().content.clone().unwrap_or_default())
    }

    async fn allocate(&self, name: &DatasetName, attributes: &DatasetAttributes) -> Result<()> {
        self.record(RecordedCall::Allocate(name.clone(), attributes.clone()))
    }

    async fn replace_content(&self, name: &DatasetName, content: &DatasetContent) -> Result<()> {
        self.record(RecordedCall::ReplaceContent(name.clone(), content.clone()))?;
        self.state.lock().content = Some(content.clone());
        Ok(())
    }

    async fn delete(&self, name: &DatasetName) -> Result<()> {
        self.record(RecordedCall::Delete(name.clone()))?;
        self.state.lock().content = None;
        Ok(())
    }
}
