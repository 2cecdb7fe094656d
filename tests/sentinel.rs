use sentinel::{Config, Error, Level, Sentinel};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn build(dir: &Path) -> Sentinel {
    Sentinel::builder()
        .text(dir.join("logs").join("app.log"))
        .done()
        .json(dir.join("logs").join("app.json"))
        .done()
        .build()
        .unwrap()
}

fn text_lines(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("logs").join("app.log"))
        .unwrap()
        .lines()
        .map(ToString::to_string)
        .collect()
}

fn json_items(dir: &Path) -> Vec<Value> {
    let content = fs::read_to_string(dir.join("logs").join("app.json")).unwrap();
    serde_json::from_str::<Value>(&content)
        .unwrap()
        .as_array()
        .unwrap()
        .clone()
}

#[test]
fn end_to_end_text_and_json() {
    let tmp = TempDir::new().unwrap();
    let sentinel = build(tmp.path());

    assert!(sentinel.log(Some("auth"), "info", "login", Some(json!({ "user": "alice" }))));
    sentinel.close();

    let lines = text_lines(tmp.path());
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].ends_with(" auth.INFO login {\"user\":\"alice\"}"),
        "{}",
        lines[0]
    );

    let items = json_items(tmp.path());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["channel"], "auth");
    assert_eq!(items[0]["level_name"], "INFO");
    assert_eq!(items[0]["context"]["user"], "alice");
}

#[test]
fn module_and_level_are_normalized() {
    let tmp = TempDir::new().unwrap();
    let sentinel = build(tmp.path());

    assert!(sentinel.log(Some("auth"), "critical", "a", None));
    assert!(sentinel.log(Some("AUTH"), "CRITICAL", "b", None));
    sentinel.close();

    let lines = text_lines(tmp.path());
    assert!(lines[0].ends_with(" auth.CRITICAL a"), "{}", lines[0]);
    assert!(lines[1].ends_with(" auth.CRITICAL b"), "{}", lines[1]);

    let items = json_items(tmp.path());
    assert_eq!(items[0]["channel"], items[1]["channel"]);
    assert_eq!(items[0]["level"], 500);
    assert_eq!(items[1]["level"], 500);
}

#[test]
fn missing_module_uses_default() {
    let tmp = TempDir::new().unwrap();
    let sentinel = build(tmp.path());

    assert!(sentinel.log(None, "info", "no module", None));
    assert!(sentinel.log(Some("   "), "info", "blank module", None));
    sentinel.close();

    let lines = text_lines(tmp.path());
    assert!(lines[0].ends_with(" app.INFO no module"), "{}", lines[0]);
    assert!(lines[1].ends_with(" app.INFO blank module"), "{}", lines[1]);
}

#[test]
fn empty_default_module_gives_bare_level() {
    let tmp = TempDir::new().unwrap();
    let sentinel = Sentinel::builder()
        .default_module("")
        .text(tmp.path().join("logs").join("app.log"))
        .done()
        .build()
        .unwrap();

    assert!(sentinel.log(None, "warning", "bare", None));
    sentinel.close();

    let lines = text_lines(tmp.path());
    assert!(lines[0].ends_with(" WARNING bare"), "{}", lines[0]);
}

#[test]
fn unknown_level_is_kept_and_routed_at_info() {
    let tmp = TempDir::new().unwrap();
    let sentinel = build(tmp.path());

    assert!(sentinel.log(Some("jobs"), "verbose", "custom level", None));
    sentinel.close();

    let lines = text_lines(tmp.path());
    assert!(lines[0].ends_with(" jobs.VERBOSE custom level"), "{}", lines[0]);

    let items = json_items(tmp.path());
    assert_eq!(items[0]["level_name"], "VERBOSE");
    assert_eq!(items[0]["level"], Level::Info.code());
}

#[test]
fn records_below_minimum_are_dropped() {
    let tmp = TempDir::new().unwrap();
    let sentinel = Sentinel::builder()
        .level(Level::Warning)
        .text(tmp.path().join("logs").join("app.log"))
        .done()
        .build()
        .unwrap();

    assert!(!sentinel.debug("app", "too quiet"));
    assert!(!sentinel.info("app", "still too quiet"));
    assert!(sentinel.warning("app", "loud enough"));
    assert!(sentinel.emergency("app", "very loud"));
    sentinel.close();

    let lines = text_lines(tmp.path());
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" app.WARNING loud enough"));
}

#[test]
fn convenience_methods_use_their_level() {
    let tmp = TempDir::new().unwrap();
    let sentinel = build(tmp.path());

    sentinel.debug("m", "x");
    sentinel.info("m", "x");
    sentinel.notice("m", "x");
    sentinel.warning("m", "x");
    sentinel.error("m", "x");
    sentinel.critical("m", "x");
    sentinel.alert("m", "x");
    sentinel.emergency("m", "x");
    sentinel.close();

    let names: Vec<String> = json_items(tmp.path())
        .iter()
        .map(|e| e["level_name"].as_str().unwrap().to_string())
        .collect();
    let expected: Vec<String> = Level::all().iter().map(ToString::to_string).collect();
    assert_eq!(names, expected);
}

#[test]
fn exception_records_cause_chain() {
    let tmp = TempDir::new().unwrap();
    let sentinel = build(tmp.path());

    let inner = std::io::Error::other("disk full");
    let outer = Error::Io(inner);
    assert!(sentinel.exception(&outer));
    sentinel.close();

    let items = json_items(tmp.path());
    assert_eq!(items[0]["channel"], "exception");
    assert_eq!(items[0]["level_name"], "ERROR");
    assert_eq!(items[0]["context"]["trace"], "caused by: disk full");
    assert!(
        items[0]["context"]["file"]
            .as_str()
            .unwrap()
            .ends_with("sentinel.rs")
    );
    assert!(items[0]["context"]["line"].as_u64().is_some());
}

#[test]
fn bootstrap_creates_directory_and_file() {
    let tmp = TempDir::new().unwrap();
    let sentinel = build(tmp.path());

    let path = tmp.path().join("logs").join("app.log");
    assert!(path.is_file());
    assert_eq!(sentinel.text_path(), Some(path.as_path()));
    assert_eq!(sentinel.sink_count(), 2);
}

#[test]
fn bootstrap_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    {
        let sentinel = build(tmp.path());
        sentinel.info("run", "first");
        sentinel.close();
    }
    {
        let sentinel = build(tmp.path());
        sentinel.info("run", "second");
        sentinel.close();
    }

    let lines = text_lines(tmp.path());
    assert_eq!(lines.len(), 2);
    assert_eq!(json_items(tmp.path()).len(), 2);
}

#[test]
fn unwritable_destination_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let result = Sentinel::builder()
        .text(blocker.join("app.log"))
        .done()
        .build();
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn directory_destination_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    let result = Sentinel::builder().text(tmp.path()).done().build();
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn failing_json_sink_does_not_fail_the_call() {
    let tmp = TempDir::new().unwrap();
    let json_dir = tmp.path().join("json-is-a-dir");
    fs::create_dir(&json_dir).unwrap();

    let sentinel = Sentinel::builder()
        .text(tmp.path().join("logs").join("app.log"))
        .done()
        .json(&json_dir)
        .done()
        .build()
        .unwrap();

    assert!(sentinel.info("app", "text still works"));
    sentinel.close();
    assert_eq!(text_lines(tmp.path()).len(), 1);
}

#[test]
fn logging_after_close_returns_false() {
    let tmp = TempDir::new().unwrap();
    let sentinel = build(tmp.path());
    sentinel.close();
    assert!(!sentinel.info("app", "too late"));
}

#[test]
fn debug_mode_logs_initialization() {
    let tmp = TempDir::new().unwrap();
    let sentinel = Sentinel::builder()
        .debug(true)
        .text(tmp.path().join("logs").join("app.log"))
        .done()
        .build()
        .unwrap();
    sentinel.close();

    let lines = text_lines(tmp.path());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" sentinel.DEBUG Logger initialized "), "{}", lines[0]);
}

#[test]
fn from_config_registers_text_then_json() {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.text.path = tmp.path().join("logs").join("app.log").display().to_string();
    config.json.path = tmp.path().join("logs").join("app.json").display().to_string();
    config.general.default_module = "Billing".to_string();
    config.text.line_format = "{prefix}|{msg}".to_string();

    let sentinel = Sentinel::from_config(&config).unwrap();
    assert_eq!(sentinel.sink_count(), 2);
    assert_eq!(sentinel.default_module(), "billing");

    assert!(sentinel.log(None, "notice", "invoice sent", None));
    sentinel.close();

    assert_eq!(text_lines(tmp.path()), vec!["billing.NOTICE|invoice sent"]);
    assert_eq!(json_items(tmp.path()).len(), 1);
}

#[test]
fn from_config_without_json() {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.text.path = tmp.path().join("logs").join("app.log").display().to_string();
    config.json.enabled = false;

    let sentinel = Sentinel::from_config(&config).unwrap();
    assert_eq!(sentinel.sink_count(), 1);
    assert!(sentinel.json_path().is_none());
}
