use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::dataset::{DatasetImportError, DatasetImporter, ScorecardDataset};

/// Where the dashboard reads its records from, so routes can be exercised
/// against in-memory data.
pub trait DatasetSource: Send + Sync {
    fn snapshot(&self) -> Result<ScorecardDataset, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("dataset unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Import(#[from] DatasetImportError),
}

/// Dataset loaded once and served from memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    dataset: Arc<ScorecardDataset>,
}

impl InMemorySource {
    pub fn new(dataset: ScorecardDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }

    pub fn dataset(&self) -> &ScorecardDataset {
        &self.dataset
    }
}

impl DatasetSource for InMemorySource {
    fn snapshot(&self) -> Result<ScorecardDataset, SourceError> {
        Ok(ScorecardDataset::clone(&self.dataset))
    }
}

/// Re-reads the CSV exports on every snapshot. Reads are blocking; the
/// dashboard router runs snapshots on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DatasetSource for DirectorySource {
    fn snapshot(&self) -> Result<ScorecardDataset, SourceError> {
        if !self.dir.is_dir() {
            return Err(SourceError::Unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }

        debug!(dir = %self.dir.display(), "reloading dataset exports");
        Ok(DatasetImporter::from_dir(&self.dir)?)
    }
}
