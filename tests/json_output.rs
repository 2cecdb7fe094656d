use sentinel::output::{JsonArraySink, LogRecord, PrettyJsonSerializer, Serializer, Sink, SinkError};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn read_array(path: &Path) -> Vec<Value> {
    let content = fs::read_to_string(path).unwrap();
    match serde_json::from_str::<Value>(&content).unwrap() {
        Value::Array(items) => items,
        other => panic!("expected array, got {other}"),
    }
}

#[test]
fn closed_sink_leaves_valid_array() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.json");
    let sink = JsonArraySink::new(&path, PrettyJsonSerializer::new());

    for i in 0..5 {
        sink.write(&LogRecord::new("batch", "info", format!("record {i}"), None))
            .unwrap();
    }
    sink.close().unwrap();

    let items = read_array(&path);
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["message"], "record 0");
    assert_eq!(items[4]["message"], "record 4");
}

#[test]
fn element_shape() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.json");
    let sink = JsonArraySink::new(&path, PrettyJsonSerializer::new());

    sink.write(&LogRecord::new(
        "auth",
        "critical",
        "login",
        Some(json!({ "user": "alice", "attempts": 3 })),
    ))
    .unwrap();
    sink.close().unwrap();

    let items = read_array(&path);
    let entry = &items[0];
    assert_eq!(entry["channel"], "auth");
    assert_eq!(entry["level"], 500);
    assert_eq!(entry["level_name"], "CRITICAL");
    assert_eq!(entry["message"], "login");
    assert_eq!(entry["context"], json!({ "user": "alice", "attempts": 3 }));
    assert!(entry["datetime"].as_str().is_some());
    assert_eq!(entry["extra"]["id"].as_str().unwrap().len(), 26);
}

#[test]
fn missing_context_is_empty_object() {
    let body = PrettyJsonSerializer::new()
        .serialize(&LogRecord::new("a", "info", "m", None))
        .unwrap();
    let entry: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(entry["context"], json!({}));
}

#[test]
fn pretty_output_uses_four_space_indent() {
    let body = PrettyJsonSerializer::new()
        .serialize(&LogRecord::new("a", "info", "see /tmp/ü", None))
        .unwrap();
    assert!(body.contains("\n    \"channel\": \"a\""), "{body}");
    assert!(body.contains("see /tmp/ü"), "{body}");
}

#[test]
fn reopening_continues_the_same_array() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.json");

    let first = JsonArraySink::new(&path, PrettyJsonSerializer::new());
    first.write(&LogRecord::new("run", "info", "one", None)).unwrap();
    first.close().unwrap();

    let second = JsonArraySink::new(&path, PrettyJsonSerializer::new());
    second.write(&LogRecord::new("run", "info", "two", None)).unwrap();
    second.write(&LogRecord::new("run", "info", "three", None)).unwrap();
    second.close().unwrap();

    let messages: Vec<String> = read_array(&path)
        .iter()
        .map(|e| e["message"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages, vec!["one", "two", "three"]);
}

#[test]
fn unclosed_file_is_completed_by_next_run() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.json");
    let body = PrettyJsonSerializer::new()
        .serialize(&LogRecord::new("run", "info", "crashed", None))
        .unwrap();
    fs::write(&path, format!("[\n{body}\n")).unwrap();

    let sink = JsonArraySink::new(&path, PrettyJsonSerializer::new());
    sink.write(&LogRecord::new("run", "info", "recovered", None)).unwrap();
    sink.close().unwrap();

    let items = read_array(&path);
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["message"], "recovered");
}

#[test]
fn drop_closes_the_array() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.json");
    {
        let sink = JsonArraySink::new(&path, PrettyJsonSerializer::new()).locking(false);
        sink.write(&LogRecord::new("a", "info", "m", None)).unwrap();
    }
    assert_eq!(read_array(&path).len(), 1);
}

#[test]
fn no_file_without_records() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("app.json");
    let sink = JsonArraySink::new(&path, PrettyJsonSerializer::new());
    sink.close().unwrap();
    assert!(!path.exists());
}

#[test]
fn creates_missing_parent_directories() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("deep").join("er").join("app.json");
    let sink = JsonArraySink::new(&path, PrettyJsonSerializer::new());
    sink.write(&LogRecord::new("a", "info", "m", None)).unwrap();
    sink.close().unwrap();
    assert_eq!(read_array(&path).len(), 1);
}

#[test]
fn writes_after_close_fail() {
    let tmp = TempDir::new().unwrap();
    let sink = JsonArraySink::new(tmp.path().join("app.json"), PrettyJsonSerializer::new());
    sink.write(&LogRecord::new("a", "info", "m", None)).unwrap();
    sink.close().unwrap();

    let err = sink.write(&LogRecord::new("a", "info", "late", None)).unwrap_err();
    assert!(matches!(err, SinkError::Closed));
}

#[test]
fn directory_destination_is_unwritable() {
    let tmp = TempDir::new().unwrap();
    let sink = JsonArraySink::new(tmp.path(), PrettyJsonSerializer::new());
    let err = sink.write(&LogRecord::new("a", "info", "m", None)).unwrap_err();
    assert!(matches!(err, SinkError::Unwritable { .. }));
}
