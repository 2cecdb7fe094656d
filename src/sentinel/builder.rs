//! Stepwise construction of a [`Sentinel`]. Sinks are registered in call order;
//! the first one becomes the router's primary sink.

use super::{Sentinel, bootstrap};
use crate::guard::RecursionGuard;
use crate::internal;
use crate::level::Level;
use crate::output::{
    DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, JsonArraySink, LineSerializer, PrettyJsonSerializer, Sink,
    TextSink,
};
use crate::router::LogRouter;
use serde_json::json;
use std::path::PathBuf;

enum PendingSink {
    Text {
        path: PathBuf,
        serializer: LineSerializer,
        file_mode: u32,
        dir_mode: u32,
    },
    Json {
        path: PathBuf,
        locking: bool,
        file_mode: u32,
    },
    Stderr(LineSerializer),
    Custom(Box<dyn Sink>),
}

pub struct SentinelBuilder {
    default_module: String,
    min_level: Level,
    debug: bool,
    pending: Vec<PendingSink>,
}

impl Default for SentinelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SentinelBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_module: "app".to_string(),
            min_level: Level::Debug,
            debug: false,
            pending: Vec::new(),
        }
    }

    /// Module used when a call passes none. An empty string yields bare `LEVEL` prefixes.
    #[must_use]
    pub fn default_module(mut self, module: impl Into<String>) -> Self {
        self.default_module = module.into().trim().to_lowercase();
        self
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Verbose diagnostics on stderr plus a `Logger initialized` record after `build`.
    #[must_use]
    pub const fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Plain-text sink appending to `path`. Its destination is checked in `build`.
    #[must_use]
    pub fn text(self, path: impl Into<PathBuf>) -> TextBuilder {
        TextBuilder {
            parent: self,
            path: path.into(),
            serializer: LineSerializer::new(),
            file_mode: DEFAULT_FILE_MODE,
            dir_mode: DEFAULT_DIR_MODE,
        }
    }

    /// JSON-array sink writing to `path`, opened on its first record.
    #[must_use]
    pub fn json(self, path: impl Into<PathBuf>) -> JsonBuilder {
        JsonBuilder {
            parent: self,
            path: path.into(),
            locking: true,
            file_mode: DEFAULT_FILE_MODE,
        }
    }

    /// Mirrors records to stderr with the given line layout.
    #[must_use]
    pub fn stderr(mut self, serializer: LineSerializer) -> Self {
        self.pending.push(PendingSink::Stderr(serializer));
        self
    }

    /// Registers any other sink implementation.
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.pending.push(PendingSink::Custom(Box::new(sink)));
        self
    }

    /// Checks and opens every destination, then wires the router.
    ///
    /// # Errors
    /// `Error::Configuration` when a text destination's directory cannot be created or its
    /// file cannot be opened for appending. A logger that cannot write refuses to start.
    pub fn build(self) -> Result<Sentinel, crate::Error> {
        internal::set_debug(self.debug);
        let mut router = LogRouter::new();
        let mut text_path = None;
        let mut json_path = None;

        for pending in self.pending {
            match pending {
                PendingSink::Text {
                    path,
                    serializer,
                    file_mode,
                    dir_mode,
                } => {
                    bootstrap::ensure_destination(&path, file_mode, dir_mode)?;
                    let sink = TextSink::open(&path, file_mode, serializer)
                        .map_err(|e| crate::Error::configuration(&path, e.to_string()))?;
                    text_path.get_or_insert(path);
                    router.push(sink);
                }
                PendingSink::Json {
                    path,
                    locking,
                    file_mode,
                } => {
                    let sink = JsonArraySink::new(&path, PrettyJsonSerializer::new())
                        .locking(locking)
                        .mode(file_mode);
                    json_path.get_or_insert(path);
                    router.push(sink);
                }
                PendingSink::Stderr(serializer) => router.push(TextSink::stderr(serializer)),
                PendingSink::Custom(sink) => router.push_boxed(sink),
            }
        }

        if router.is_empty() {
            internal::warn("SENTINEL", "No sinks registered; every log call will return false");
        } else {
            let names: Vec<&str> = router.sink_names().collect();
            internal::debug("SENTINEL", &format!("Sinks: [{}]", names.join(", ")));
        }

        let sentinel = Sentinel {
            router,
            guard: RecursionGuard::new(),
            default_module: self.default_module,
            min_level: self.min_level,
            text_path,
            json_path,
        };

        if self.debug {
            sentinel.log(
                Some("sentinel"),
                Level::Debug.as_str(),
                "Logger initialized",
                Some(json!({
                    "log_file": sentinel.text_path().map(|p| p.display().to_string()),
                    "json_file": sentinel.json_path().map(|p| p.display().to_string()),
                    "writable": sentinel.text_path().is_some(),
                })),
            );
        }

        Ok(sentinel)
    }
}

/// Text-sink options kept off the main builder.
pub struct TextBuilder {
    parent: SentinelBuilder,
    path: PathBuf,
    serializer: LineSerializer,
    file_mode: u32,
    dir_mode: u32,
}

impl TextBuilder {
    /// Template with `{timestamp}`, `{prefix}`, `{module}`, `{level}`, `{msg}`, `{context}`.
    #[must_use]
    pub fn line_format(mut self, template: &str) -> Self {
        self.serializer = self.serializer.template(template);
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.serializer = self.serializer.timestamp_format(format);
        self
    }

    #[must_use]
    pub const fn file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    #[must_use]
    pub const fn dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    #[must_use]
    pub fn done(mut self) -> SentinelBuilder {
        self.parent.pending.push(PendingSink::Text {
            path: self.path,
            serializer: self.serializer,
            file_mode: self.file_mode,
            dir_mode: self.dir_mode,
        });
        self.parent
    }
}

/// JSON-sink options kept off the main builder.
pub struct JsonBuilder {
    parent: SentinelBuilder,
    path: PathBuf,
    locking: bool,
    file_mode: u32,
}

impl JsonBuilder {
    /// Exclusive OS lock around each element write (on by default).
    #[must_use]
    pub const fn locking(mut self, enabled: bool) -> Self {
        self.locking = enabled;
        self
    }

    #[must_use]
    pub const fn file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    #[must_use]
    pub fn done(mut self) -> SentinelBuilder {
        self.parent.pending.push(PendingSink::Json {
            path: self.path,
            locking: self.locking,
            file_mode: self.file_mode,
        });
        self.parent
    }
}
