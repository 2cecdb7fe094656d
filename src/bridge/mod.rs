//! Funnels runtime errors, uncaught panics, and fatal shutdown conditions into a
//! [`Sentinel`].
//!
//! The bridge is handed its sentinel explicitly; nothing looks one up globally. The only
//! process-wide piece is the panic hook itself, which [`ErrorBridge::install`] sets and
//! a later install replaces. Hooks stay installed for the rest of the process.
//!
//! - runtime-error hook: [`ErrorBridge::handle_error`], called by whatever layer surfaces
//!   classified platform errors. Every code is logged; fatal-class codes are also kept
//!   for the shutdown hook, since a fatal failure may end the process before anything
//!   else runs.
//! - uncaught-exception hook: the panic hook, see [`ErrorBridge::handle_exception`].
//! - shutdown hook: [`ErrorBridge::handle_shutdown`], run when the [`BridgeHandle`] is
//!   dropped, on `shutdown()`, or after an uncaught panic. It runs once.

pub mod level_map;
mod panic;
mod view;

pub use level_map::{ErrorCode, classify, classify_fatal, is_fatal};
pub use view::{ErrorView, Responder, StaticErrorPage, escape_html};

use crate::config::BridgeConfig;
use crate::error::source_trace;
use crate::internal;
use crate::level::Level;
use crate::sentinel::Sentinel;
use serde_json::{Map, Value, json};
use std::ops::Deref;
use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};
use ulid::Ulid;

/// Behavior switches, usually taken from the `[bridge]` config section.
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    /// Value returned by the runtime-error hook: whether the platform's own reporting
    /// should also run. Also chains the previous panic hook after logging.
    pub pass_through: bool,
    /// Exit with status 1 once an uncaught panic has been logged.
    pub exit_on_panic: bool,
    /// Generic text shown to end users instead of any detail.
    pub user_message: String,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::from(&BridgeConfig::default())
    }
}

impl From<&BridgeConfig> for BridgeOptions {
    fn from(config: &BridgeConfig) -> Self {
        Self {
            pass_through: config.pass_through,
            exit_on_panic: config.exit_on_panic,
            user_message: config.user_message.clone(),
        }
    }
}

/// The most recent error passed to the runtime-error hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    pub code: u32,
    pub message: String,
    pub file: String,
    pub line: u32,
}

/// An error nobody handled: a panic, or an error that escaped `main`.
#[derive(Debug, Clone, Default)]
pub struct UncaughtError {
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub thread: Option<String>,
    pub trace: String,
}

impl UncaughtError {
    /// Uses the `source()` chain as the trace and the caller's location as file and line.
    #[must_use]
    #[track_caller]
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        let location = Location::caller();
        Self {
            message: error.to_string(),
            file: Some(location.file().to_string()),
            line: Some(location.line()),
            thread: std::thread::current().name().map(ToString::to_string),
            trace: source_trace(error),
        }
    }
}

pub struct ErrorBridge {
    sentinel: Arc<Sentinel>,
    options: BridgeOptions,
    last_error: Mutex<Option<PlatformError>>,
    /// Most recent fatal-class error. Later non-fatal errors never replace it.
    last_fatal: Mutex<Option<PlatformError>>,
    view: Option<Box<dyn ErrorView>>,
    responder: Option<Box<dyn Responder>>,
    /// Held for the whole shutdown so concurrent callers wait for it to finish.
    shut_down: Mutex<bool>,
}

impl ErrorBridge {
    #[must_use]
    pub fn new(sentinel: Arc<Sentinel>, options: BridgeOptions) -> Self {
        Self {
            sentinel,
            options,
            last_error: Mutex::new(None),
            last_fatal: Mutex::new(None),
            view: None,
            responder: None,
            shut_down: Mutex::new(false),
        }
    }

    /// Page rendered for end users after an uncaught failure.
    #[must_use]
    pub fn view(mut self, view: impl ErrorView + 'static) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    /// Response that receives the 500 status and the rendered page.
    #[must_use]
    pub fn responder(mut self, responder: impl Responder + 'static) -> Self {
        self.responder = Some(Box::new(responder));
        self
    }

    /// Installs the panic hook and returns the handle that owns the shutdown hook.
    #[must_use]
    pub fn install(self) -> BridgeHandle {
        let bridge = Arc::new(self);
        panic::install(Arc::clone(&bridge));
        BridgeHandle { bridge }
    }

    #[must_use]
    pub fn sentinel(&self) -> &Sentinel {
        &self.sentinel
    }

    #[must_use]
    pub const fn options(&self) -> &BridgeOptions {
        &self.options
    }

    /// Runtime-error hook. Logs under `runtime_error` at the mapped severity. Fatal-class
    /// codes are additionally kept for the shutdown hook.
    ///
    /// Returns [`BridgeOptions::pass_through`] for every code.
    pub fn handle_error(&self, code: u32, message: &str, file: &str, line: u32) -> bool {
        let error = PlatformError {
            code,
            message: message.to_string(),
            file: file.to_string(),
            line,
        };
        if is_fatal(code) {
            *self.last_fatal.lock().unwrap_or_else(PoisonError::into_inner) = Some(error.clone());
        }
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);

        self.sentinel.log(
            Some("runtime_error"),
            classify(code).as_str(),
            message,
            Some(json!({ "file": file, "line": line, "code": code })),
        );

        self.options.pass_through
    }

    /// Logs an uncaught error under `exception`, sets status 500 on an unsent response,
    /// and renders the error view. Returns the error id shown to the user.
    pub fn handle_exception(&self, error: &UncaughtError) -> String {
        let error_id = Ulid::new().to_string();

        let mut context = Map::new();
        context.insert("file".into(), json!(error.file));
        context.insert("line".into(), json!(error.line));
        context.insert("trace".into(), Value::String(error.trace.clone()));
        if let Some(thread) = &error.thread {
            context.insert("thread".into(), Value::String(thread.clone()));
        }
        context.insert("error_id".into(), Value::String(error_id.clone()));

        if !self.sentinel.log(
            Some("exception"),
            Level::Error.as_str(),
            &error.message,
            Some(Value::Object(context)),
        ) {
            internal::error(
                "BRIDGE",
                &format!("Uncaught error {error_id} was not logged: {}", error.message),
            );
        }

        if let Some(responder) = &self.responder
            && !responder.headers_sent()
        {
            responder.set_status(500);
            if let Some(view) = &self.view {
                responder.send_body(view.render(&error_id, &self.options.user_message));
            }
        }

        error_id
    }

    /// Shutdown hook. Reports a recorded fatal-class error under `fatal_error`, then
    /// closes the sentinel's sinks. Does nothing after the first call; a caller arriving
    /// while another thread is shutting down waits until the sinks are closed.
    pub fn handle_shutdown(&self) {
        let mut done = self.shut_down.lock().unwrap_or_else(PoisonError::into_inner);
        if *done {
            return;
        }
        *done = true;

        let fatal = self.last_fatal.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(err) = fatal {
            self.sentinel.log(
                Some("fatal_error"),
                classify_fatal(err.code).as_str(),
                &err.message,
                Some(json!({ "file": err.file, "line": err.line })),
            );
        }

        self.sentinel.close();
        internal::debug("BRIDGE", "Shutdown hook finished");
    }

    /// The error most recently passed to [`Self::handle_error`], fatal or not.
    #[must_use]
    pub fn last_error(&self) -> Option<PlatformError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        *self.shut_down.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps the bridge alive for the process lifetime. Dropping it runs the shutdown hook,
/// so holding it in `main` makes shutdown the last hook to fire.
pub struct BridgeHandle {
    bridge: Arc<ErrorBridge>,
}

impl BridgeHandle {
    /// Runs the shutdown hook now instead of on drop.
    pub fn shutdown(&self) {
        self.bridge.handle_shutdown();
    }
}

impl Deref for BridgeHandle {
    type Target = ErrorBridge;

    fn deref(&self) -> &ErrorBridge {
        &self.bridge
    }
}

impl Drop for BridgeHandle {
    fn drop(&mut self) {
        self.bridge.handle_shutdown();
    }
}
