//! `sentinel` - process-wide structured logging and error capture.
//!
//! Every record goes through one pipeline:
//! - [`Sentinel`] normalizes module, level, message, and context into a [`LogRecord`]
//! - a per-instance recursion guard refuses re-entrant calls from the same thread
//! - [`LogRouter`] fans the record out to every sink, isolating sink failures
//! - sinks ([`TextSink`], [`JsonArraySink`]) append it to their destinations
//!
//! [`ErrorBridge`] feeds runtime errors, uncaught panics, and fatal shutdown conditions
//! into the same pipeline.
//!
//! # Example
//!
//! ```no_run
//! use sentinel::Sentinel;
//! use serde_json::json;
//!
//! let sentinel = Sentinel::builder()
//!     .text("storage/logs/app.log")
//!         .done()
//!     .json("storage/logs/app.json")
//!         .done()
//!     .build()?;
//!
//! sentinel.log(Some("auth"), "info", "login", Some(json!({ "user": "alice" })));
//! sentinel.close();
//! # Ok::<(), sentinel::Error>(())
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `sentinel` binary

pub mod bridge;
pub mod config;
mod error;
pub mod fmt;
pub mod guard;
pub mod internal;
pub mod level;
pub mod output;
pub mod router;
pub mod sentinel;

#[cfg(feature = "cli")]
pub mod cli;

pub use bridge::{
    BridgeHandle, BridgeOptions, ErrorBridge, ErrorCode, ErrorView, PlatformError, Responder,
    StaticErrorPage, UncaughtError,
};
pub use config::Config;
pub use error::Error;
pub use guard::RecursionGuard;
pub use level::Level;
pub use output::{
    JsonArraySink, LineSerializer, LogRecord, PrettyJsonSerializer, Serializer, Sink, SinkError,
    TextSink,
};
pub use router::{LogRouter, RouteReport};
pub use sentinel::{Sentinel, SentinelBuilder};
