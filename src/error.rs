//! Unified error type for sentinel operations.

use crate::output::SinkError;
use std::path::PathBuf;

/// Error type for sentinel operations.
///
/// Only construction-time failures surface to callers; once a [`crate::Sentinel`]
/// exists, logging failures are reduced to a `false` return.
#[derive(Debug)]
pub enum Error {
    /// I/O error outside of a sink write (reading config files, etc.).
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// A log destination cannot be created or is not writable.
    Configuration { path: PathBuf, reason: String },
    /// A permission mode that is not a valid octal string.
    InvalidFileMode(String),
    /// Level string that is not part of the severity vocabulary.
    InvalidLevel(String),
    /// A sink failed outside of the router (closing, direct writes).
    Sink(SinkError),
}

impl Error {
    pub(crate) fn configuration(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// The `source()` chain below `error`, one `caused by:` line per cause.
pub(crate) fn source_trace(error: &dyn std::error::Error) -> String {
    let mut trace = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        trace.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    trace.join("\n")
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::Configuration { path, reason } => {
                write!(f, "configuration error for {}: {reason}", path.display())
            }
            Self::InvalidFileMode(mode) => write!(f, "invalid file mode: {mode}"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
            Self::Sink(e) => write!(f, "sink error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::Sink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<SinkError> for Error {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}
