//! Subcommand execution.
//!
//! Each command loads the state file, runs one lifecycle operation and
//! persists whatever the remote system confirmed, including the
//! allocated-but-content-unknown record of a partial create.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Args, Subcommand};
use zosmf_core::{DatasetAttributes, DatasetContent, DatasetName, DatasetRecord};
use zosmf_lifecycle::DatasetLifecycle;

use crate::state::StateFile;

/// Dataset lifecycle commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Allocate a dataset and write its initial content.
    Create {
        /// Dataset name, e.g. IBMUSER.TEST.DATA.
        name: DatasetName,

        /// JSON file with allocation attributes (volser, dsorg, recfm, lrecl, ...).
        #[arg(long)]
        attributes: Option<PathBuf>,

        #[command(flatten)]
        input: ContentInput,
    },

    /// Print the current content of a dataset.
    Read {
        /// Dataset name.
        name: DatasetName,
    },

    /// Replace the content of a managed dataset.
    Update {
        /// Dataset name.
        name: DatasetName,

        #[command(flatten)]
        input: ContentInput,
    },

    /// Delete a managed dataset.
    Delete {
        /// Dataset name.
        name: DatasetName,
    },

    /// Start managing a dataset that already exists.
    Import {
        /// Dataset name.
        name: DatasetName,

        /// JSON file with the attributes the dataset was allocated with.
        #[arg(long)]
        attributes: Option<PathBuf>,
    },
}

/// Where the dataset content comes from.
#[derive(Args, Debug, Default)]
pub struct ContentInput {
    /// Content given inline.
    #[arg(long, conflicts_with = "content_file")]
    content: Option<String>,

    /// File whose bytes become the content.
    #[arg(long)]
    content_file: Option<PathBuf>,
}

impl ContentInput {
    fn read(self) -> anyhow::Result<DatasetContent> {
        match (self.content, self.content_file) {
            (Some(text), _) => Ok(text.into()),
            (None, Some(path)) => std::fs::read(&path)
                .map(DatasetContent::from)
                .with_context(|| format!("failed to read content file {}", path.display())),
            (None, None) => Ok(DatasetContent::default()),
        }
    }
}

fn load_attributes(path: Option<&Path>) -> anyhow::Result<DatasetAttributes> {
    let Some(path) = path else {
        return Ok(DatasetAttributes::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read attributes file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse attributes file {}", path.display()))
}

fn ensure_unmanaged(state: &StateFile, name: &DatasetName, hint: &str) -> anyhow::Result<()> {
    match state.get(name) {
        Some(existing) if existing.state.exists() => bail!(
            "dataset {name} is already managed ({}); {hint}",
            existing.state
        ),
        _ => Ok(()),
    }
}

/// Run one command against the lifecycle service.
pub async fn run<L, W>(
    service: &L,
    state_path: &Path,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()>
where
    L: DatasetLifecycle + ?Sized,
    W: Write,
{
    let mut state = StateFile::load(state_path)?;

    match command {
        Command::Create {
            name,
            attributes,
            input,
        } => {
            ensure_unmanaged(&state, &name, "use update instead")?;

            let attributes = load_attributes(attributes.as_deref())?;
            let content = input.read()?;

            match service.ensure_created(&name, &attributes, &content).await {
                Ok(record) => {
                    state.put(record.clone());
                    state.save(state_path)?;
                    writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
                }
                Err(err) => {
                    if let Some(record) = err.record() {
                        state.put(record.clone());
                        state.save(state_path)?;
                        tracing::warn!(
                            dataset = %name,
                            state = %record.state,
                            "Recorded dataset as allocated with unknown content"
                        );
                    }
                    return Err(err.into());
                }
            }
        }

        Command::Read { name } => {
            let content = service.read(&name).await?;
            out.write_all(content.as_bytes())?;
        }

        Command::Update { name, input } => {
            let current = state
                .get(&name)
                .cloned()
                .ok_or_else(|| anyhow!("dataset {name} is not managed; create it first"))?;
            let content = input.read()?;

            let record = service.update(&current, &content).await?;
            state.put(record.clone());
            state.save(state_path)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }

        Command::Delete { name } => {
            let current = state
                .get(&name)
                .cloned()
                .ok_or_else(|| anyhow!("dataset {name} is not managed"))?;

            service.delete(&current).await?;
            state.remove(&name);
            state.save(state_path)?;
            tracing::info!(dataset = %name, "Dataset deleted and removed from state");
        }

        Command::Import { name, attributes } => {
            ensure_unmanaged(&state, &name, "nothing to import")?;
            let attributes = load_attributes(attributes.as_deref())?;

            let content = service.read(&name).await?;
            let record = DatasetRecord::materialized(name, attributes, content);
            state.put(record.clone());
            state.save(state_path)?;
            tracing::info!(dataset = %record.name, "Imported existing dataset");
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }
    }

    Ok(())
}
