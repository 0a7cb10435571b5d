//! Error types for level loading

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a level description into a [`crate::Level`]
#[derive(Debug, Error)]
pub enum LevelError {
    /// The description is structurally invalid (header, row lengths, entities)
    #[error("malformed level: {reason}")]
    Malformed { reason: String },

    /// The level file could not be read
    #[error("could not read level file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LevelError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        LevelError::Malformed {
            reason: reason.into(),
        }
    }
}
