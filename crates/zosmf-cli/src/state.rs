//! Local state persistence.
//!
//! The CLI keeps one JSON document with the last confirmed record of every
//! dataset it manages, keyed by dataset name.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use zosmf_core::{DatasetName, DatasetRecord};

/// Persisted records, keyed by dataset name.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    datasets: BTreeMap<String, DatasetRecord>,
}

impl StateFile {
    /// Load the state file, or start empty if it does not exist yet.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("failed to parse state file {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read state file {}", path.display()))
            }
        }
    }

    /// Write the state file, replacing any previous content.
    ///
    /// The document is written to a temporary file next to `path` and renamed
    /// over it, so a reader sees either the old or the new state.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let text = serde_json::to_vec_pretty(self)?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
        file.write_all(&text)
            .and_then(|()| file.as_file().sync_all())
            .with_context(|| format!("failed to write state file {}", path.display()))?;
        file.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to replace state file {}", path.display()))?;
        Ok(())
    }

    /// The record for a dataset, if managed.
    pub fn get(&self, name: &DatasetName) -> Option<&DatasetRecord> {
        self.datasets.get(name.as_str())
    }

    /// Insert or replace the record for its dataset.
    pub fn put(&mut self, record: DatasetRecord) {
        self.datasets.insert(record.name.to_string(), record);
    }

    /// Stop managing a dataset.
    pub fn remove(&mut self, name: &DatasetName) -> Option<DatasetRecord> {
        self.datasets.remove(name.as_str())
    }
}
