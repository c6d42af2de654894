//! Error types for board operations
//!
//! Failures come in two layers: [`GatewayError`] says what went wrong talking
//! to the remote task store, and [`BoardError`] wraps that in the board
//! operation that failed. Both are cheap to clone so the store can publish the
//! most recent failure inside its state snapshots.

use crate::types::TaskId;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Result type for remote gateway calls
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Errors raised while talking to the remote task store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The remote has no task with the requested id
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote answered with a non-success status code
    #[error("remote error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request never completed (connection refused, timeout, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote answered success but the body did not parse
    #[error("malformed response: {0}")]
    Decode(String),

    /// The remote URL is not usable
    #[error("invalid remote url: {0}")]
    Url(String),
}

impl GatewayError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        GatewayError::NotFound(message.into())
    }

    /// Create an API error from a status code and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        GatewayError::Transport(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        GatewayError::Decode(message.into())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

/// Errors surfaced to board hosts, one variant per failed operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Loading the task list failed; the board is unavailable
    #[error("failed to load tasks: {source}")]
    Load { source: GatewayError },

    /// Creating a task failed; nothing was added to the board
    #[error("failed to create task: {source}")]
    Create { source: GatewayError },

    /// Updating a task failed; the local copy is unchanged
    #[error("failed to update task: {source}")]
    Edit { source: GatewayError },

    /// Deleting a task failed; the task stays on the board
    #[error("failed to delete task: {source}")]
    Delete { source: GatewayError },

    /// A status move failed and the task was put back in its previous lane
    #[error("failed to move task {id}: {source}")]
    Move { id: TaskId, source: GatewayError },

    /// A draft was submitted without a title
    #[error("task title must not be empty")]
    EmptyTitle,
}

impl BoardError {
    /// Create a load error
    pub fn load(source: GatewayError) -> Self {
        BoardError::Load { source }
    }

    /// Create a create error
    pub fn create(source: GatewayError) -> Self {
        BoardError::Create { source }
    }

    /// Create an edit error
    pub fn edit(source: GatewayError) -> Self {
        BoardError::Edit { source }
    }

    /// Create a delete error
    pub fn delete(source: GatewayError) -> Self {
        BoardError::Delete { source }
    }

    /// Create a move error
    pub fn move_failed(id: impl Into<TaskId>, source: GatewayError) -> Self {
        BoardError::Move {
            id: id.into(),
            source,
        }
    }

    /// The gateway failure behind this error, if any
    pub fn gateway(&self) -> Option<&GatewayError> {
        match self {
            BoardError::Load { source }
            | BoardError::Create { source }
            | BoardError::Edit { source }
            | BoardError::Delete { source }
            | BoardError::Move { source, .. } => Some(source),
            BoardError::EmptyTitle => None,
        }
    }
}
