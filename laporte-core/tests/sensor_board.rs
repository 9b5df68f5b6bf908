use chrono::{DateTime, FixedOffset, TimeZone};
use laporte_core::{
    MetricPath, MetricValue, RecordingSink, RenderContext, RenderProfile, SensorBoard,
    SensorLabel, Snapshot, Target, TimeStyle, ZonedClock,
};

fn clock() -> ZonedClock<FixedOffset> {
    ZonedClock::new(*now().offset(), TimeStyle::default())
}

fn now_seconds() -> f64 {
    now().timestamp() as f64
}

fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 10, 8, 30, 0)
        .unwrap()
}

fn snapshot(entries: &[(&str, &str, &str, MetricValue)]) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for (node, sensor, metric, value) in entries {
        snapshot.push(MetricPath::new(*node, *sensor, *metric), value.clone());
    }
    snapshot
}

#[test]
fn sensor_labels_replace_dots_with_hyphens() {
    let path = MetricPath::new("gw.kitchen", "temp.1", "value");
    assert_eq!(path.sensor_label().as_str(), "gw-kitchen_temp-1");
    assert_eq!(path.dom_id(), "gw-kitchen_temp-1_value");
    assert_eq!(
        Target::Expiry(SensorLabel::new("gw.kitchen", "temp.1")).dom_id(),
        "gw-kitchen_temp-1_ttl"
    );
}

#[test]
fn writes_rendered_metrics_to_their_cells() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut board = SensorBoard::new(RenderProfile::sensor());
    let mut sink = RecordingSink::default();

    board.apply(
        &snapshot(&[
            ("gw", "door", "value", MetricValue::Bool(true)),
            ("gw", "door", "hits_total", MetricValue::Number(4.0)),
            ("gw", "door", "duration_seconds", MetricValue::Number(0.0)),
            ("gw", "door", "note", MetricValue::Text("a & b".into())),
        ]),
        &ctx,
        &mut sink,
    );

    assert_eq!(sink.last("gw_door_value"), Some("true"));
    assert_eq!(sink.last("gw_door_hits_total"), Some("4×"));
    assert_eq!(sink.last("gw_door_duration_seconds"), Some(""));
    assert_eq!(sink.last("gw_door_note"), Some("a &amp; b"));
}

#[test]
fn countdown_expires_after_its_initial_value_in_ticks() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut board = SensorBoard::default();
    let mut sink = RecordingSink::default();
    let expires_at = now().timestamp() as f64 + 3.0;

    board.apply(
        &snapshot(&[("gw.1", "lamp", "exp_timestamp", MetricValue::Number(expires_at))]),
        &ctx,
        &mut sink,
    );
    let label = SensorLabel::new("gw.1", "lamp");
    assert_eq!(board.countdowns().get(&label), Some(3));
    assert!(sink.writes().is_empty(), "expiry is only drawn by the ticker");

    board.tick(&mut sink);
    assert_eq!(sink.last("gw-1_lamp_ttl"), Some("(exp 0:02)"));
    board.tick(&mut sink);
    assert_eq!(sink.last("gw-1_lamp_ttl"), Some("(exp 0:01)"));
    board.tick(&mut sink);
    assert_eq!(sink.last("gw-1_lamp_ttl"), Some(""));
    assert!(board.countdowns().is_empty());

    sink.clear();
    board.tick(&mut sink);
    assert!(sink.writes().is_empty());
}

#[test]
fn long_countdowns_render_minutes() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut board = SensorBoard::default();
    let mut sink = RecordingSink::default();

    board.apply(
        &snapshot(&[(
            "gw",
            "fan",
            "exp_timestamp",
            MetricValue::Number(now().timestamp() as f64 + 66.4),
        )]),
        &ctx,
        &mut sink,
    );
    board.tick(&mut sink);

    assert_eq!(sink.last("gw_fan_ttl"), Some("(exp 1:05)"));
}

#[test]
fn null_expiry_clears_countdown_and_label() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut board = SensorBoard::default();
    let mut sink = RecordingSink::default();
    let label = SensorLabel::new("gw", "fan");

    board.apply(
        &snapshot(&[(
            "gw",
            "fan",
            "exp_timestamp",
            MetricValue::Number(now().timestamp() as f64 + 120.0),
        )]),
        &ctx,
        &mut sink,
    );
    assert_eq!(board.countdowns().get(&label), Some(120));

    board.apply(
        &snapshot(&[("gw", "fan", "exp_timestamp", MetricValue::Null)]),
        &ctx,
        &mut sink,
    );
    assert_eq!(board.countdowns().get(&label), None);
    assert_eq!(sink.last("gw_fan_ttl"), Some(""));
    assert_eq!(sink.last("gw_fan_exp_timestamp"), None);
}

#[test]
fn cron_timestamps_are_not_rendered_inline_but_null_blanks_cell() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut board = SensorBoard::default();
    let mut sink = RecordingSink::default();

    board.apply(
        &snapshot(&[("gw", "pump", "cron_timestamp", MetricValue::Number(1.0e9))]),
        &ctx,
        &mut sink,
    );
    assert!(sink.writes().is_empty());

    board.apply(
        &snapshot(&[("gw", "pump", "value", MetricValue::Null)]),
        &ctx,
        &mut sink,
    );
    assert_eq!(sink.last("gw_pump_value"), Some(""));
}

#[test]
fn already_expired_countdowns_are_dropped_on_next_tick() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut board = SensorBoard::default();
    let mut sink = RecordingSink::default();

    board.apply(
        &snapshot(&[(
            "gw",
            "old",
            "exp_timestamp",
            MetricValue::Number(now().timestamp() as f64 - 30.0),
        )]),
        &ctx,
        &mut sink,
    );
    board.tick(&mut sink);

    assert!(board.countdowns().is_empty());
    assert_eq!(sink.last("gw_old_ttl"), Some(""));
}

#[test]
fn first_tick_shows_one_second_less_than_the_stored_value() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut board = SensorBoard::default();
    let mut sink = RecordingSink::default();

    board.apply(
        &snapshot(&[(
            "gw",
            "valve",
            "exp_timestamp",
            MetricValue::Number(now_seconds() + 65.0),
        )]),
        &ctx,
        &mut sink,
    );
    assert_eq!(board.countdowns().get(&SensorLabel::new("gw", "valve")), Some(65));

    board.tick(&mut sink);
    assert_eq!(sink.last("gw_valve_ttl"), Some("(exp 1:04)"));
    assert_eq!(board.countdowns().get(&SensorLabel::new("gw", "valve")), Some(64));
}
