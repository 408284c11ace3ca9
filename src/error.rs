//! Error types for untextract library.

use std::io;
use thiserror::Error;

/// Result type alias for untextract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing analyzer output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON or does not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A relationship refers to a block id that is not in the index.
    #[error("Unresolved block reference: {id}")]
    UnresolvedReference {
        /// The dangling block id
        id: String,
    },

    /// A block is missing a required field or carries one of the wrong type.
    #[error("Malformed block {id}: {reason}")]
    MalformedBlock {
        /// Id of the offending block (or its position when the id is unreadable)
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// The document-analysis collaborator failed.
    #[error("Analyzer error: {0}")]
    Analyzer(String),

    /// Error during rendering (table text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build an [`Error::MalformedBlock`].
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedBlock {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`Error::UnresolvedReference`].
    pub fn unresolved(id: impl Into<String>) -> Self {
        Error::UnresolvedReference { id: id.into() }
    }
}
