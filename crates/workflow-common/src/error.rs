use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{marker} not found in or above {}", start.display())]
    MarkerNotFound { marker: String, start: PathBuf },
    #[error("no candidate directories to search for {marker}")]
    NoCandidates { marker: String },
    #[error("invalid variable assignment (expected KEY=VALUE): {0}")]
    InvalidVariable(String),
}

impl WorkflowError {
    /// True for the recoverable "marker file not found" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MarkerNotFound { .. } | Self::NoCandidates { .. })
    }
}
