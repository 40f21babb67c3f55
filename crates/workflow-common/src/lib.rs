//! Shared workflow helpers around the feedback core.
//!
//! - `config`: environment/default parsing and path expansion.
//! - `discovery`: upward search for the workflow root marker file.
//! - `feedback`: file-item and error feedback assembly.

pub mod config;
pub mod discovery;
pub mod error;
pub mod feedback;

pub use config::{DEFAULT_MARKER_FILE, RuntimeConfig, expand_home_tokens};
pub use discovery::{exists, find_file, workflow_root, workflow_root_from};
pub use error::WorkflowError;
pub use feedback::{error_feedback, file_items_feedback, parse_assignment};
