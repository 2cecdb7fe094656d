//! The process-wide logging entry point. Normalizes each call into a [`LogRecord`],
//! passes it through the [`RecursionGuard`], and hands it to the [`LogRouter`].

mod bootstrap;
mod builder;
mod from_config;

pub use bootstrap::ensure_destination;
pub use builder::{JsonBuilder, SentinelBuilder, TextBuilder};

use crate::error::source_trace;
use crate::guard::RecursionGuard;
use crate::internal;
use crate::level::Level;
use crate::output::LogRecord;
use crate::router::LogRouter;
use serde_json::{Value, json};
use std::panic::{self, AssertUnwindSafe, Location};
use std::path::{Path, PathBuf};

/// Shared (usually behind an `Arc`) between application code and the error bridge.
///
/// Logging never fails the caller: every entry point returns a `bool` that is `false`
/// when the record was filtered, suppressed as a recursive call, or rejected by the
/// primary sink.
pub struct Sentinel {
    router: LogRouter,
    guard: RecursionGuard,
    default_module: String,
    min_level: Level,
    text_path: Option<PathBuf>,
    json_path: Option<PathBuf>,
}

impl Sentinel {
    #[must_use]
    pub fn builder() -> SentinelBuilder {
        SentinelBuilder::new()
    }

    /// Logs one record.
    ///
    /// `module` is trimmed and lowercased; `None` or blank falls back to the default module.
    /// `level` is matched case-insensitively; names outside the vocabulary are written as
    /// given (uppercased) and routed at `INFO`.
    pub fn log(
        &self,
        module: Option<&str>,
        level: &str,
        message: &str,
        context: Option<Value>,
    ) -> bool {
        let module = module
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_module.as_str());
        let record = LogRecord::new(module, level, message, context);
        self.submit(&record)
    }

    /// Routes an already built record.
    pub fn submit(&self, record: &LogRecord) -> bool {
        if record.level() < self.min_level {
            return false;
        }

        let Some(_token) = self.guard.enter() else {
            internal::warn(
                "SENTINEL",
                &format!("Prevented recursive logging: {}", record.message()),
            );
            return false;
        };

        // A panicking sink must not unwind into the caller's business logic.
        panic::catch_unwind(AssertUnwindSafe(|| self.router.write(record))).unwrap_or_else(|_| {
            internal::error("SENTINEL", "A sink panicked while writing a record");
            false
        })
    }

    /// Whether the calling thread is currently inside the logging critical section.
    #[must_use]
    pub fn is_logging(&self) -> bool {
        self.guard.is_held_by_current_thread()
    }

    pub fn debug(&self, module: &str, message: &str) -> bool {
        self.log(Some(module), Level::Debug.as_str(), message, None)
    }

    pub fn info(&self, module: &str, message: &str) -> bool {
        self.log(Some(module), Level::Info.as_str(), message, None)
    }

    pub fn notice(&self, module: &str, message: &str) -> bool {
        self.log(Some(module), Level::Notice.as_str(), message, None)
    }

    pub fn warning(&self, module: &str, message: &str) -> bool {
        self.log(Some(module), Level::Warning.as_str(), message, None)
    }

    pub fn error(&self, module: &str, message: &str) -> bool {
        self.log(Some(module), Level::Error.as_str(), message, None)
    }

    pub fn critical(&self, module: &str, message: &str) -> bool {
        self.log(Some(module), Level::Critical.as_str(), message, None)
    }

    pub fn alert(&self, module: &str, message: &str) -> bool {
        self.log(Some(module), Level::Alert.as_str(), message, None)
    }

    pub fn emergency(&self, module: &str, message: &str) -> bool {
        self.log(Some(module), Level::Emergency.as_str(), message, None)
    }

    /// Logs a caught error under the `exception` module with the caller's `file` and
    /// `line` and the `source()` chain as `trace`.
    #[track_caller]
    pub fn exception(&self, error: &dyn std::error::Error) -> bool {
        let location = Location::caller();
        self.log(
            Some("exception"),
            Level::Error.as_str(),
            &error.to_string(),
            Some(json!({
                "file": location.file(),
                "line": location.line(),
                "trace": source_trace(error),
            })),
        )
    }

    /// Closes every sink, finalizing the JSON array. Later calls return `false`.
    pub fn close(&self) {
        // Wait for any in-flight record on another thread.
        let _token = self.guard.enter();
        self.router.close();
    }

    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    #[must_use]
    pub fn default_module(&self) -> &str {
        &self.default_module
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.router.len()
    }

    /// Path of the primary text log, when one is configured.
    #[must_use]
    pub fn text_path(&self) -> Option<&Path> {
        self.text_path.as_deref()
    }

    #[must_use]
    pub fn json_path(&self) -> Option<&Path> {
        self.json_path.as_deref()
    }
}
