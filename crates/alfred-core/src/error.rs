use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("item {index} has an empty title")]
    EmptyTitle { index: usize },
    #[error("failed to encode feedback: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write feedback: {0}")]
    Io(#[from] std::io::Error),
}
