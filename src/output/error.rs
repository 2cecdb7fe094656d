//! Errors a single sink write can produce.

use std::path::PathBuf;

/// Contained by the router: a failing sink never aborts its siblings.
#[derive(Debug)]
pub enum SinkError {
    /// The destination rejected the write (disk full, permission revoked).
    Io(std::io::Error),
    /// The record could not be encoded.
    Serialize(String),
    /// The sink was closed before this write.
    Closed,
    /// The destination could not be opened at all.
    Unwritable { path: PathBuf, reason: String },
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Serialize(s) => write!(f, "serialization failed: {s}"),
            Self::Closed => write!(f, "sink is closed"),
            Self::Unwritable { path, reason } => {
                write!(f, "cannot write {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialize(_) | Self::Closed | Self::Unwritable { .. } => None,
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
