//! The installed panic hook. The hook is process-wide, so these tests run one at a time
//! and never let it exit the process.

use sentinel::Sentinel;
use sentinel::bridge::{BridgeOptions, ErrorBridge, Responder};
use sentinel::output::{LogRecord, Sink, SinkError};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use tempfile::TempDir;

static HOOK: Mutex<()> = Mutex::new(());

fn no_exit() -> BridgeOptions {
    BridgeOptions {
        exit_on_panic: false,
        ..BridgeOptions::default()
    }
}

fn text_sentinel(path: &Path) -> Arc<Sentinel> {
    Arc::new(Sentinel::builder().text(path).done().build().unwrap())
}

fn exception_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| l.contains(" exception.ERROR "))
        .map(ToString::to_string)
        .collect()
}

fn panic_in_thread(message: &'static str) {
    let result = thread::Builder::new()
        .name("worker".to_string())
        .spawn(move || {
            panic!("{message}");
        })
        .unwrap()
        .join();
    assert!(result.is_err());
}

#[derive(Clone, Default)]
struct StatusOnly(Arc<Mutex<Option<u16>>>);

impl Responder for StatusOnly {
    fn headers_sent(&self) -> bool {
        false
    }

    fn set_status(&self, status: u16) {
        *self.0.lock().unwrap() = Some(status);
    }

    fn send_body(&self, _body: String) {}
}

struct Exploding;

impl Sink for Exploding {
    fn name(&self) -> &str {
        "exploding"
    }

    fn write(&self, _record: &LogRecord) -> Result<(), SinkError> {
        panic!("sink blew up");
    }
}

#[test]
fn uncaught_panic_is_logged_with_error_id() {
    let _serial = HOOK.lock().unwrap_or_else(PoisonError::into_inner);
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("app.log");

    let handle = ErrorBridge::new(text_sentinel(&log), no_exit()).install();
    panic_in_thread("worker exploded");

    let lines = exception_lines(&log);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" exception.ERROR worker exploded {"), "{}", lines[0]);
    assert!(lines[0].contains("\"error_id\":\""), "{}", lines[0]);
    assert!(lines[0].contains("panic_hook.rs"), "{}", lines[0]);
    assert!(lines[0].contains("\"thread\":\"worker\""), "{}", lines[0]);
    assert!(!handle.is_shut_down());
}

#[test]
fn reinstalling_replaces_the_previous_hook() {
    let _serial = HOOK.lock().unwrap_or_else(PoisonError::into_inner);
    let tmp = TempDir::new().unwrap();
    let first_log = tmp.path().join("first.log");
    let second_log = tmp.path().join("second.log");

    let _first = ErrorBridge::new(text_sentinel(&first_log), no_exit()).install();
    let _second = ErrorBridge::new(text_sentinel(&second_log), no_exit()).install();

    panic_in_thread("one");
    panic_in_thread("two");

    assert!(exception_lines(&first_log).is_empty());
    assert_eq!(exception_lines(&second_log).len(), 2);
}

#[test]
fn panic_inside_a_sink_is_left_to_the_sentinel() {
    let _serial = HOOK.lock().unwrap_or_else(PoisonError::into_inner);
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("app.log");

    let sentinel = Arc::new(
        Sentinel::builder()
            .text(&log)
            .done()
            .sink(Exploding)
            .build()
            .unwrap(),
    );
    let responder = StatusOnly::default();
    let _handle = ErrorBridge::new(Arc::clone(&sentinel), no_exit())
        .responder(responder.clone())
        .install();

    assert!(!sentinel.info("app", "hello"));

    // The hook returned before reporting anything.
    assert_eq!(*responder.0.lock().unwrap(), None);
    assert!(exception_lines(&log).is_empty());
    assert_eq!(fs::read_to_string(&log).unwrap().lines().count(), 1);
}
