//! The uncaught-exception hook, implemented as the process panic hook.

use super::{ErrorBridge, UncaughtError};
use crate::internal;
use std::backtrace::Backtrace;
use std::panic::{self, PanicHookInfo};
use std::sync::{Arc, OnceLock};

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// The hook that was active before the first bridge was installed.
static PREVIOUS_HOOK: OnceLock<PanicHook> = OnceLock::new();

/// Replaces the process panic hook with one bound to `bridge`. Installing again replaces
/// the earlier bridge's hook instead of stacking on it.
pub(super) fn install(bridge: Arc<ErrorBridge>) {
    let previous = panic::take_hook();
    if PREVIOUS_HOOK.get().is_none() {
        let _ = PREVIOUS_HOOK.set(previous);
    }

    panic::set_hook(Box::new(move |info| on_panic(&bridge, info)));
    internal::info("BRIDGE", "Panic hook installed");
}

fn on_panic(bridge: &ErrorBridge, info: &PanicHookInfo<'_>) {
    let report = UncaughtError::from_panic(info);

    // The sentinel catches this unwind itself; logging here would only be suppressed.
    if bridge.sentinel().is_logging() {
        internal::error(
            "BRIDGE",
            &format!("Panic while writing a record: {}", report.message),
        );
        return;
    }

    bridge.handle_exception(&report);

    if bridge.options().pass_through
        && let Some(previous) = PREVIOUS_HOOK.get()
    {
        previous(info);
    }

    if bridge.options().exit_on_panic {
        bridge.handle_shutdown();
        std::process::exit(1);
    }
}

impl UncaughtError {
    /// Captures message, location, thread, and a forced backtrace from a panic.
    #[must_use]
    pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());

        Self {
            message,
            file: info.location().map(|l| l.file().to_string()),
            line: info.location().map(|l| l.line()),
            thread: std::thread::current().name().map(ToString::to_string),
            trace: Backtrace::force_capture().to_string(),
        }
    }
}
