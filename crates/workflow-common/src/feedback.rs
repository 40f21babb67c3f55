use std::path::PathBuf;

use alfred_core::{Feedback, Item};

use crate::config::RuntimeConfig;
use crate::error::WorkflowError;

const ERROR_TITLE_PREFIX: &str = "Error";
const NO_FILES_TITLE: &str = "No files given";
const NO_FILES_SUBTITLE: &str = "Pass one or more paths to list";

/// One feedback item per path, with feedback-level `variables` inherited
/// by every item.
pub fn file_items_feedback(
    paths: &[PathBuf],
    variables: &[(String, String)],
    config: &RuntimeConfig,
) -> Feedback {
    let mut feedback = Feedback::new();
    for (key, value) in variables {
        feedback.set_var(key.as_str(), value.as_str());
    }

    if paths.is_empty() {
        feedback
            .new_item(NO_FILES_TITLE)
            .set_subtitle(NO_FILES_SUBTITLE)
            .set_valid(false);
        return feedback;
    }

    for path in paths {
        feedback.new_file_item(path, config.home.as_deref());
    }

    feedback
}

/// Single invalid item reporting an error back to Alfred.
pub fn error_feedback(code: &str, message: &str) -> Feedback {
    let mut feedback = Feedback::new();
    feedback.push(error_item(code, message));
    feedback
}

fn error_item(code: &str, message: &str) -> Item {
    let mut item = Item::new(format!("{ERROR_TITLE_PREFIX} [{code}]"));
    item.set_subtitle(message).set_valid(false);
    item
}

/// Parses a `KEY=VALUE` argument. The value may be empty or contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), WorkflowError> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(WorkflowError::InvalidVariable(raw.to_string()));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(WorkflowError::InvalidVariable(raw.to_string()));
    }

    Ok((key.to_string(), value.to_string()))
}
