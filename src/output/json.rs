//! Sink that keeps its destination a single JSON array.
//!
//! The first element is preceded by `[`, every later one by `,`, and closing the sink
//! appends `]`. A file that already ends in `]` (left by an earlier, cleanly closed run)
//! is continued: the bracket is removed and the new element joins the same array.
//!
//! Known limitation: if the process dies before [`Sink::close`] runs, the file ends
//! without its closing `]`. It stays a readable array prefix and is completed by the next
//! run that writes to and closes it. Records are never buffered to work around this.

use super::{DEFAULT_FILE_MODE, LogRecord, Serializer, Sink, SinkError, open_append};
use crate::internal;
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

const SCAN_CHUNK: u64 = 256;

#[derive(Default)]
struct JsonState {
    file: Option<File>,
    /// Elements this sink appended; `close` only writes `]` when non-zero.
    written: usize,
    closed: bool,
}

pub struct JsonArraySink {
    name: String,
    path: PathBuf,
    mode: u32,
    locking: bool,
    serializer: Box<dyn Serializer>,
    state: Mutex<JsonState>,
}

impl JsonArraySink {
    /// The destination is opened lazily on the first write; missing parent directories
    /// are created then.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, serializer: impl Serializer + 'static) -> Self {
        let path = path.into();
        Self {
            name: format!("json:{}", path.display()),
            path,
            mode: DEFAULT_FILE_MODE,
            locking: true,
            serializer: Box::new(serializer),
            state: Mutex::new(JsonState::default()),
        }
    }

    /// Whether every write holds an exclusive OS lock on the file.
    #[must_use]
    pub const fn locking(mut self, enabled: bool) -> Self {
        self.locking = enabled;
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File, SinkError> {
        let unwritable = |e: std::io::Error| SinkError::Unwritable {
            path: self.path.clone(),
            reason: e.to_string(),
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(unwritable)?;
            internal::debug("JSON", &format!("Created directory: {}", parent.display()));
        }

        open_append(&self.path, self.mode, true).map_err(unwritable)
    }

    fn with_lock<T>(
        &self,
        file: &mut File,
        f: impl FnOnce(&mut File) -> std::io::Result<T>,
    ) -> std::io::Result<T> {
        if !self.locking {
            return f(file);
        }
        file.lock()?;
        let result = f(file);
        let unlocked = file.unlock();
        result.and_then(|value| unlocked.map(|()| value))
    }
}

/// Offset and value of the last non-whitespace byte, scanning backwards from the end.
fn last_significant_byte(file: &mut File) -> std::io::Result<Option<(u64, u8)>> {
    let mut end = file.seek(SeekFrom::End(0))?;
    let mut chunk = Vec::with_capacity(SCAN_CHUNK as usize);

    while end > 0 {
        let start = end.saturating_sub(SCAN_CHUNK);
        file.seek(SeekFrom::Start(start))?;
        chunk.clear();
        Read::by_ref(file).take(end - start).read_to_end(&mut chunk)?;

        if let Some(pos) = chunk.iter().rposition(|b| !b.is_ascii_whitespace()) {
            return Ok(Some((start + pos as u64, chunk[pos])));
        }
        end = start;
    }
    Ok(None)
}

/// Frames one element according to what the file currently ends with.
fn append_element(file: &mut File, body: &str) -> std::io::Result<()> {
    let opener = match last_significant_byte(file)? {
        None => "[\n",
        Some((offset, b']')) => {
            file.set_len(offset)?;
            ",\n"
        }
        Some((_, b'[')) => "",
        Some(_) => ",\n",
    };

    // Append mode places the write at the (possibly shortened) end.
    file.write_all(format!("{opener}{body}\n").as_bytes())?;
    file.flush()
}

fn finish_array(file: &mut File) -> std::io::Result<()> {
    match last_significant_byte(file)? {
        Some((_, b']')) | None => Ok(()),
        Some(_) => {
            file.write_all(b"]\n")?;
            file.flush()
        }
    }
}

impl Sink for JsonArraySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        let body = self.serializer.serialize(record)?;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.closed {
            return Err(SinkError::Closed);
        }

        if state.file.is_none() {
            state.file = Some(self.open()?);
            internal::debug("JSON", &format!("Opened {}", self.path.display()));
        }
        let Some(file) = state.file.as_mut() else {
            return Err(SinkError::Closed);
        };

        self.with_lock(file, |f| append_element(f, &body))?;
        state.written += 1;
        Ok(())
    }

    fn close(&self) -> Result<(), SinkError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.closed {
            return Ok(());
        }
        state.closed = true;

        let written = state.written;
        let Some(mut file) = state.file.take() else {
            return Ok(());
        };
        if written == 0 {
            return Ok(());
        }

        self.with_lock(&mut file, finish_array)?;
        internal::debug(
            "JSON",
            &format!("Closed {} after {written} records", self.path.display()),
        );
        Ok(())
    }
}

impl Drop for JsonArraySink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            internal::warn("JSON", &format!("Closing {} failed: {e}", self.path.display()));
        }
    }
}
