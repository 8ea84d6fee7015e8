use thiserror::Error;

/// Errors surfaced by the intake flow and its storage layer
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;
