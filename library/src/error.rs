use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate id: {0}")]
    DuplicateId(Uuid),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("A connection drag is already in progress")]
    DragInProgress,
    #[error("Runtime error: {0}")]
    Runtime(String),
}
