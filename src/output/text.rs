//! Line-oriented sink for files and stderr.

use super::{LogRecord, Serializer, Sink, SinkError, open_append};
use crate::internal;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

enum Destination {
    /// `None` once the sink has been closed.
    File { path: PathBuf, handle: Mutex<Option<File>> },
    Stderr,
}

/// Appends one serialized line per record. File writes hold an exclusive OS lock for the
/// duration of the write so lines from concurrent processes never interleave.
pub struct TextSink {
    name: String,
    destination: Destination,
    serializer: Box<dyn Serializer>,
}

impl TextSink {
    /// Opens (or creates) `path` in append mode right away, so an unwritable destination
    /// is reported at construction instead of on the first record.
    ///
    /// # Errors
    /// `SinkError::Unwritable` when the file cannot be opened for appending.
    pub fn open(
        path: impl Into<PathBuf>,
        mode: u32,
        serializer: impl Serializer + 'static,
    ) -> Result<Self, SinkError> {
        let path = path.into();
        let file = open_append(&path, mode, false).map_err(|e| SinkError::Unwritable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        internal::debug("TEXT", &format!("Opened {}", path.display()));

        Ok(Self {
            name: format!("text:{}", path.display()),
            destination: Destination::File {
                path,
                handle: Mutex::new(Some(file)),
            },
            serializer: Box::new(serializer),
        })
    }

    /// Mirrors records to the process's stderr stream.
    #[must_use]
    pub fn stderr(serializer: impl Serializer + 'static) -> Self {
        Self {
            name: "stderr".to_string(),
            destination: Destination::Stderr,
            serializer: Box::new(serializer),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.destination {
            Destination::File { path, .. } => Some(path),
            Destination::Stderr => None,
        }
    }
}

fn write_locked(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    file.lock()?;
    let result = file.write_all(line).and_then(|()| file.flush());
    let unlocked = file.unlock();
    result.and(unlocked)
}

impl Sink for TextSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        let line = self.serializer.serialize(record)?;

        match &self.destination {
            Destination::File { handle, .. } => {
                let mut guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
                let file = guard.as_mut().ok_or(SinkError::Closed)?;
                write_locked(file, line.as_bytes())?;
            }
            Destination::Stderr => {
                std::io::stderr().lock().write_all(line.as_bytes())?;
            }
        }
        Ok(())
    }

    fn close(&self) -> Result<(), SinkError> {
        if let Destination::File { handle, path } = &self.destination {
            let taken = handle.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(mut file) = taken {
                file.flush()?;
                internal::debug("TEXT", &format!("Closed {}", path.display()));
            }
        }
        Ok(())
    }
}
