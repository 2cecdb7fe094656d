//! Sinks are the destinations a record fans out to. Each sink owns its destination
//! handle and delegates rendering to a [`Serializer`], so the text and JSON sinks
//! differ only in framing, never in how a record is turned into bytes.

mod error;
mod json;
mod record;
mod serializer;
mod text;

pub use error::SinkError;
pub use json::JsonArraySink;
pub use record::LogRecord;
pub use serializer::{LineSerializer, PrettyJsonSerializer};
pub use text::TextSink;

use std::fs::{File, OpenOptions};
use std::path::Path;

/// Permission bits for newly created log files.
pub const DEFAULT_FILE_MODE: u32 = 0o664;

/// Permission bits for newly created log directories.
pub const DEFAULT_DIR_MODE: u32 = 0o775;

/// Turns one record into the bytes a sink writes, without any framing.
pub trait Serializer: Send + Sync {
    /// # Errors
    /// `SinkError::Serialize` when the record's context cannot be encoded.
    fn serialize(&self, record: &LogRecord) -> Result<String, SinkError>;
}

/// `Send + Sync` because one sentinel is shared between application threads and the panic hook.
pub trait Sink: Send + Sync {
    /// Short label used when reporting this sink's failures on the diagnostic channel.
    fn name(&self) -> &str;

    /// Appends one record. Must not mutate or retain the record.
    ///
    /// # Errors
    /// `SinkError` when the destination cannot be opened or written.
    fn write(&self, record: &LogRecord) -> Result<(), SinkError>;

    /// Finalizes any structural envelope and releases the destination.
    /// Writes after `close` fail with `SinkError::Closed`.
    ///
    /// # Errors
    /// `SinkError` when the envelope cannot be written.
    fn close(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Opens `path` for appending, creating it with `mode` when missing. Never truncates.
pub(crate) fn open_append(path: &Path, mode: u32, read: bool) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true).read(read);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    options.open(path)
}
