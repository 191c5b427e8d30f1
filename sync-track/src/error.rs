//! Track conversion error types

use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while reading, encoding or writing sync tracks
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// Track source could not be parsed (malformed XML, missing or non-numeric attribute)
    #[error("Failed to parse {origin}: {message}")]
    InputParse { origin: String, message: String },

    /// A keyframe field does not fit its binary width
    #[error("Track '{track}': {field} {value} does not fit in {width}")]
    Encoding {
        track: String,
        field: &'static str,
        value: String,
        width: &'static str,
    },

    /// Encoded track data is truncated or carries trailing bytes
    #[error("Invalid track data: {0}")]
    Decode(String),

    /// Input, output or marker file could not be accessed
    #[error("Failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TrackError {
    /// Build an [`TrackError::InputParse`] for the given source label
    pub fn parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InputParse {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Build a [`TrackError::Filesystem`] for an I/O failure on `path`
    pub fn filesystem(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error came from the input rather than the output side
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InputParse { .. } | Self::Encoding { .. })
    }
}
