//! Sentinel's own diagnostic channel.
//!
//! Failures inside the pipeline (a broken JSON sink, a suppressed recursive call)
//! cannot be reported through the pipeline itself, so they go straight to stderr.
//! Nothing here touches a sink, which keeps this path free of recursion.

use crate::level::Level;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};

static THRESHOLD: AtomicU8 = AtomicU8::new(Level::Warning as u8);

/// Lowers the threshold to `Debug` when the facade runs in debug mode.
pub fn set_debug(enabled: bool) {
    let level = if enabled { Level::Debug } else { Level::Warning };
    set_level(level);
}

pub fn set_level(level: Level) {
    THRESHOLD.store(level as u8, Ordering::Relaxed);
}

#[must_use]
pub fn enabled(level: Level) -> bool {
    level as u8 >= THRESHOLD.load(Ordering::Relaxed)
}

fn log(level: Level, scope: &str, msg: &str) {
    if !enabled(level) {
        return;
    }
    // A closed stderr leaves nowhere else to report to.
    let _ = writeln!(std::io::stderr().lock(), "sentinel: {level} [{scope}] {msg}");
}

/// Bootstrap steps and per-write confirmations.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Suppressed recursive calls and secondary sink failures.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warning, scope, msg);
}

/// Primary sink failures and hook failures.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
