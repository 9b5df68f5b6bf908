use std::fs;

use laporte_core::{DashboardError, MetricPath, MetricValue};
use laporte_payload::{
    decode_event_batch_str, decode_event_str, decode_log_batch_str, decode_log_str,
    decode_snapshot_str,
};
use serde_json::Value;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("cannot read {path}: {err}"))
}

#[test]
fn raw_snapshot_matches_golden() {
    let snapshot = decode_snapshot_str(&fixture("snapshot_raw.json")).expect("raw snapshot");

    let actual = serde_json::to_value(&snapshot).expect("serialize snapshot");
    let expected: Value =
        serde_json::from_str(&fixture("snapshot_golden.json")).expect("golden is valid JSON");

    assert_eq!(actual, expected);
}

#[test]
fn envelope_and_raw_snapshots_decode_identically() {
    let raw = decode_snapshot_str(&fixture("snapshot_raw.json")).expect("raw snapshot");
    let wrapped =
        decode_snapshot_str(&fixture("snapshot_envelope.json")).expect("enveloped snapshot");

    assert_eq!(raw, wrapped);
}

#[test]
fn snapshot_keeps_payload_order() {
    let snapshot = decode_snapshot_str(&fixture("snapshot_raw.json")).expect("raw snapshot");
    let metrics: Vec<&str> = snapshot
        .iter()
        .map(|sample| sample.path.metric.as_str())
        .collect();

    assert_eq!(
        metrics,
        [
            "value",
            "hit_timestamp",
            "exp_timestamp",
            "value",
            "label",
            "hits_total",
            "history",
            "cron_timestamp"
        ]
    );
}

#[test]
fn node_named_data_is_not_an_envelope() {
    let snapshot =
        decode_snapshot_str(r#"{"data": {"probe": {"value": 3}}}"#).expect("node snapshot");

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.samples[0].path, MetricPath::new("data", "probe", "value"));
    assert_eq!(snapshot.samples[0].value, MetricValue::Number(3.0));
}

#[test]
fn malformed_levels_are_skipped() {
    let snapshot = decode_snapshot_str(r#"{"gw": 1, "hub": {"pump": "off", "fan": {"rpm": 900}}}"#)
        .expect("partial snapshot");

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.samples[0].path, MetricPath::new("hub", "fan", "rpm"));
}

#[test]
fn invalid_json_is_a_parse_error() {
    assert!(matches!(
        decode_snapshot_str("{not json"),
        Err(DashboardError::Parse(_))
    ));
    assert!(matches!(
        decode_snapshot_str("[1, 2]"),
        Err(DashboardError::UnexpectedShape(_))
    ));
}

#[test]
fn log_history_decodes_every_record() {
    let logs = decode_log_batch_str(&fixture("log_history.json")).expect("log history");

    assert_eq!(logs.len(), 3);
    assert_eq!(logs[1].levelname, "ERROR");
    assert_eq!(logs[1].fileno, Some(45));
    assert_eq!(logs[1].msg, "job <expire> failed & retried");
    assert_eq!(logs[2].event_id, None);
    assert_eq!(logs[2].msg, "");

    assert!(decode_log_batch_str("null").expect("null history").is_empty());
    assert!(decode_log_batch_str(r#"{"msg": "x"}"#).is_err());
}

#[test]
fn single_log_record_decodes() {
    let log = decode_log_str(
        r#"{"time": 1.5, "levelname": "DEBUG", "msg": "hi", "event_id": "x", "funcname": "f", "filename": "a.py", "fileno": 3}"#,
    )
    .expect("log record");

    assert_eq!(log.time, 1.5);
    assert_eq!(log.event_id.as_deref(), Some("x"));
}

#[test]
fn event_history_decodes_nested_data() {
    let events = decode_event_batch_str(&fixture("event_history.json")).expect("event history");

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_id, "000010");
    assert_eq!(events[0].data.len(), 3);
    assert_eq!(events[1].event_id, "17");
    assert_eq!(events[1].data.samples[0].value, MetricValue::Null);

    let single = decode_event_str(r#"{"time": 2, "event_id": "a", "data": null}"#)
        .expect("event without data");
    assert!(single.data.is_empty());
}
