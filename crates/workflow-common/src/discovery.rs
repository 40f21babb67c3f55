use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::WorkflowError;

pub fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

/// Searches `start_dir` and its ancestors for `filename`.
///
/// The filesystem root itself is not probed.
pub fn find_file(filename: &str, start_dir: &Path) -> Result<PathBuf, WorkflowError> {
    for dir in start_dir.ancestors() {
        if dir.parent().is_none() || dir.as_os_str().is_empty() {
            break;
        }

        let candidate = dir.join(filename);
        if exists(&candidate) {
            return Ok(candidate);
        }
    }

    Err(WorkflowError::MarkerNotFound {
        marker: filename.to_string(),
        start: start_dir.to_path_buf(),
    })
}

/// Directory containing `marker`, searched from the current working
/// directory and then from the running executable's directory.
pub fn workflow_root(marker: &str) -> Result<PathBuf, WorkflowError> {
    let mut candidates = Vec::new();

    match env::current_dir() {
        Ok(cwd) => {
            debug!(cwd = %cwd.display(), "workflow root candidate");
            candidates.push(cwd);
        }
        Err(error) => debug!(%error, "current directory unavailable"),
    }

    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        debug!(exe_dir = %exe_dir.display(), "workflow root candidate");
        candidates.push(exe_dir);
    }

    workflow_root_from(&candidates, marker)
}

pub fn workflow_root_from(candidates: &[PathBuf], marker: &str) -> Result<PathBuf, WorkflowError> {
    let mut last_error = None;

    for candidate in candidates {
        let start = absolute(candidate);
        match find_file(marker, &start) {
            Ok(found) => {
                let Some(root) = found.parent() else {
                    continue;
                };
                debug!(root = %root.display(), "{marker} found");
                return Ok(root.to_path_buf());
            }
            Err(error) => last_error = Some(error),
        }
    }

    Err(last_error.unwrap_or_else(|| WorkflowError::NoCandidates {
        marker: marker.to_string(),
    }))
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
