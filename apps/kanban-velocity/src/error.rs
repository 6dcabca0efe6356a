//! Error taxonomy for a velocity run. Every variant is fatal to the run.

use crate::status::OutOfRange;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VelocityError {
    #[error("lane '{lane}': {source}")]
    StatusOutOfRange {
        lane: String,
        #[source]
        source: OutOfRange,
    },

    #[error("lane '{lane}', column {column}, card {card}: missing field '{field}'")]
    MissingCardField {
        lane: String,
        column: usize,
        card: usize,
        field: &'static str,
    },

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("board source {}: {reason}", .path.display())]
    Board { path: PathBuf, reason: String },

    #[error("credentials file {}: {reason}", .path.display())]
    Credentials { path: PathBuf, reason: String },

    #[error("failed to write report {}: {reason}", .path.display())]
    SinkWrite { path: PathBuf, reason: String },

    #[error("failed to start extraction workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl VelocityError {
    /// Problems the user fixes in their setup rather than on the board.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            VelocityError::Credentials { .. } | VelocityError::Authentication(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, VelocityError>;
