//! Decoders for the JSON payloads pushed on the dashboard channels.
//!
//! Snapshots arrive either raw (`{node: {sensor: {metric: value}}}`) or wrapped in an
//! envelope (`{data: ...}`, optionally next to `time`/`event_id`). Log and event
//! streams carry single records or, for history replays, arrays of records.

use laporte_core::{DashboardError, EventRecord, LogRecord, MetricPath, MetricValue, Snapshot};
use serde_json::{Map, Value};

/// Decode a snapshot from JSON text.
pub fn decode_snapshot_str(payload: &str) -> Result<Snapshot, DashboardError> {
    decode_snapshot_value(&parse(payload)?)
}

/// Decode a snapshot from an already parsed value, unwrapping an envelope if present.
pub fn decode_snapshot_value(payload: &Value) -> Result<Snapshot, DashboardError> {
    let map = payload
        .as_object()
        .ok_or_else(|| shape_error("snapshot", payload))?;

    let mut snapshot = Snapshot::default();
    match envelope_data(map) {
        Some(data) => flatten_into(&mut snapshot, data),
        None => flatten_into(&mut snapshot, map),
    }
    Ok(snapshot)
}

/// Decode one log record.
pub fn decode_log_str(payload: &str) -> Result<LogRecord, DashboardError> {
    decode_log_value(parse(payload)?)
}

pub fn decode_log_value(payload: Value) -> Result<LogRecord, DashboardError> {
    serde_json::from_value(payload).map_err(|err| DashboardError::Parse(err.to_string()))
}

/// Decode a history batch of log records. `null` is an empty batch.
pub fn decode_log_batch_str(payload: &str) -> Result<Vec<LogRecord>, DashboardError> {
    decode_log_batch_value(parse(payload)?)
}

pub fn decode_log_batch_value(payload: Value) -> Result<Vec<LogRecord>, DashboardError> {
    batch_items(payload, "log batch")?
        .into_iter()
        .map(decode_log_value)
        .collect()
}

/// Decode one `{time, event_id, data}` event record.
pub fn decode_event_str(payload: &str) -> Result<EventRecord, DashboardError> {
    decode_event_value(&parse(payload)?)
}

pub fn decode_event_value(payload: &Value) -> Result<EventRecord, DashboardError> {
    let map = payload
        .as_object()
        .ok_or_else(|| shape_error("event", payload))?;

    let mut data = Snapshot::default();
    if let Some(Value::Object(nodes)) = map.get("data") {
        flatten_into(&mut data, nodes);
    }

    Ok(EventRecord {
        time: map.get("time").and_then(Value::as_f64).unwrap_or_default(),
        event_id: map.get("event_id").map(scalar_text).unwrap_or_default(),
        data,
    })
}

/// Decode a history batch of event records. `null` is an empty batch.
pub fn decode_event_batch_str(payload: &str) -> Result<Vec<EventRecord>, DashboardError> {
    decode_event_batch_value(parse(payload)?)
}

pub fn decode_event_batch_value(payload: Value) -> Result<Vec<EventRecord>, DashboardError> {
    batch_items(payload, "event batch")?
        .iter()
        .map(decode_event_value)
        .collect()
}

/// Map a JSON leaf onto the dynamically typed metric value.
pub fn metric_value(value: &Value) -> MetricValue {
    match value {
        Value::Null => MetricValue::Null,
        Value::Bool(flag) => MetricValue::Bool(*flag),
        Value::Number(number) => number
            .as_f64()
            .map(MetricValue::Number)
            .unwrap_or(MetricValue::Unsupported),
        Value::String(text) => MetricValue::Text(text.clone()),
        Value::Array(_) | Value::Object(_) => MetricValue::Unsupported,
    }
}

fn parse(payload: &str) -> Result<Value, DashboardError> {
    serde_json::from_str(payload).map_err(|err| DashboardError::Parse(err.to_string()))
}

/// An envelope is a top-level `data` object holding nodes. A node that happens to be
/// named `data` holds sensors whose members are metric leaves, so it is told apart by
/// finding a non-object two levels down.
fn envelope_data(map: &Map<String, Value>) -> Option<&Map<String, Value>> {
    let data = map.get("data")?.as_object()?;
    let holds_metric_leaves = data.values().any(|sensor| {
        sensor
            .as_object()
            .is_some_and(|members| members.values().any(|member| !member.is_object()))
    });
    (!holds_metric_leaves).then_some(data)
}

/// Walk `node -> sensor -> metric` in payload order; levels that are not objects are skipped.
fn flatten_into(snapshot: &mut Snapshot, nodes: &Map<String, Value>) {
    for (node_id, sensors) in nodes {
        let Some(sensors) = sensors.as_object() else {
            continue;
        };
        for (sensor_id, metrics) in sensors {
            let Some(metrics) = metrics.as_object() else {
                continue;
            };
            for (metric, value) in metrics {
                snapshot.push(
                    MetricPath::new(node_id.as_str(), sensor_id.as_str(), metric.as_str()),
                    metric_value(value),
                );
            }
        }
    }
}

fn batch_items(payload: Value, what: &str) -> Result<Vec<Value>, DashboardError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        other => Err(shape_error(what, &other)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn shape_error(what: &str, value: &Value) -> DashboardError {
    let found = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    DashboardError::UnexpectedShape(format!("expected {what}, received {found}"))
}
