use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use laporte_core::{
    log_tr_class, render_exposition, EventRecord, EventTable, JobBoard, JobKey, JobKind,
    LogRecord, MessageLog, MetricPath, MetricValue, RenderContext, Snapshot, SpanCell, TimeStyle,
    ZonedClock,
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
        .with_ymd_and_hms(2024, 5, 10, 9, 0, 0)
        .unwrap()
}

fn ts(offset: Duration) -> f64 {
    (now() + offset).timestamp() as f64
}

fn snapshot(entries: &[(&str, &str, &str, MetricValue)]) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for (node, sensor, metric, value) in entries {
        snapshot.push(MetricPath::new(*node, *sensor, *metric), value.clone());
    }
    snapshot
}

#[test]
fn job_list_is_sorted_newest_first() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut board = JobBoard::default();

    board.merge(&snapshot(&[
        ("gw", "lamp", "exp_timestamp", MetricValue::Number(ts(Duration::minutes(5)))),
        ("gw", "pump", "cron_timestamp", MetricValue::Number(ts(Duration::hours(2)))),
        ("gw", "pump", "value", MetricValue::Number(1.0)),
    ]));
    board.merge(&snapshot(&[(
        "hub.2",
        "fan",
        "exp_timestamp",
        MetricValue::Number(ts(Duration::minutes(30))),
    )]));

    let rows = board.rows(&ctx);
    let order: Vec<(&str, &str, JobKind)> = rows
        .iter()
        .map(|row| (row.node.as_str(), row.sensor.as_str(), row.kind))
        .collect();
    assert_eq!(
        order,
        vec![
            ("gw", "pump", JobKind::Cron),
            ("hub.2", "fan", JobKind::Expire),
            ("gw", "lamp", JobKind::Expire),
        ]
    );
    assert_eq!(rows[0].time, "2024-05-10 11:00:00");
    assert_eq!(rows[0].kind.as_str(), "cron");
}

#[test]
fn null_job_timestamps_remove_the_job() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut board = JobBoard::default();

    board.merge(&snapshot(&[
        ("gw", "lamp", "exp_timestamp", MetricValue::Number(ts(Duration::minutes(5)))),
        ("gw", "lamp", "cron_timestamp", MetricValue::Number(ts(Duration::minutes(1)))),
    ]));
    board.merge(&snapshot(&[("gw", "lamp", "exp_timestamp", MetricValue::Null)]));

    let key = JobKey {
        node: "gw".into(),
        sensor: "lamp".into(),
        kind: JobKind::Expire,
    };
    assert_eq!(board.get(&key), None);
    assert_eq!(board.len(), 1);
    let rows = board.rows(&ctx);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, JobKind::Cron);
}

#[test]
fn severities_map_to_row_classes() {
    assert_eq!(log_tr_class("DEBUG"), "table-light");
    assert_eq!(log_tr_class("INFO"), "table-info");
    assert_eq!(log_tr_class("WARNING"), "table-warning");
    assert_eq!(log_tr_class("ERROR"), "table-danger");
    assert_eq!(log_tr_class("CRITICAL"), "table-danger");
    assert_eq!(log_tr_class("TRACE"), "table-info");
    assert_eq!(log_tr_class(""), "table-info");
}

#[test]
fn log_rows_carry_location_and_truncation_flag() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let record = LogRecord {
        time: ts(-Duration::minutes(2)),
        levelname: "WARNING".into(),
        msg: "x".repeat(321),
        event_id: Some("00002a".into()),
        funcname: "update".into(),
        filename: "sensors.py".into(),
        fileno: Some(88),
    };

    let row = record.to_row(&ctx, 320);
    assert_eq!(row.class, "table-warning");
    assert_eq!(row.time, "08:58:00");
    assert_eq!(row.event_id, "00002a");
    assert_eq!(row.location, "(sensors.py:88)");
    assert!(row.long);

    let short = LogRecord {
        msg: "x".repeat(320),
        ..record
    };
    assert!(!short.to_row(&ctx, 320).long);
}

#[test]
fn message_log_numbers_rows() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut log = MessageLog::default();

    let first = log.record("hello", &ctx);
    let second = log.record("world", &ctx);
    assert_eq!((first.id, second.id), (0, 1));
    assert_eq!(first.time, "09:00:00");
    assert_eq!(second.text, "world");
}

#[test]
fn event_rows_group_leading_cells_by_rowspan() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut table = EventTable::default();
    let record = EventRecord {
        time: ts(Duration::zero()),
        event_id: "00000f".into(),
        data: snapshot(&[
            ("a", "s1", "value", MetricValue::Number(1.0)),
            ("a", "s1", "hits_total", MetricValue::Number(2.0)),
            ("a", "s2", "value", MetricValue::Bool(false)),
            ("b", "s1", "exp_timestamp", MetricValue::Null),
        ]),
    };

    let rows = table.rows(&record, &ctx);
    assert_eq!(rows.len(), 4);

    let header = rows[0].header.as_ref().expect("first row carries the header");
    assert_eq!(header.rowspan, 4);
    assert_eq!(header.time, "09:00:00");
    assert!(rows[1..].iter().all(|row| row.header.is_none()));

    let span = |text: &str, rowspan| Some(SpanCell { text: text.into(), rowspan });
    assert_eq!(rows[0].node, span("a", 3));
    assert_eq!(rows[1].node, None);
    assert_eq!(rows[2].node, None);
    assert_eq!(rows[3].node, span("b", 1));

    assert_eq!(rows[0].sensor, span("s1", 2));
    assert_eq!(rows[1].sensor, None);
    assert_eq!(rows[2].sensor, span("s2", 1));
    assert_eq!(rows[3].sensor, span("s1", 1));

    assert_eq!(rows[1].value.to_string(), "2×");
    assert_eq!(rows[3].value.to_html(), "<i>expired</i>");
}

#[test]
fn event_records_alternate_stripes() {
    let clock = clock();
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut table = EventTable::default();
    let record = EventRecord {
        time: ts(Duration::zero()),
        event_id: "1".into(),
        data: snapshot(&[("a", "s", "value", MetricValue::Number(1.0))]),
    };

    assert!(!table.rows(&record, &ctx)[0].striped);
    assert!(table.rows(&record, &ctx)[0].striped);
    assert!(!table.rows(&record, &ctx)[0].striped);

    table.reset();
    assert!(!table.rows(&record, &ctx)[0].striped);

    let empty = EventRecord {
        data: Snapshot::default(),
        ..record
    };
    assert!(table.rows(&empty, &ctx).is_empty());
}

#[test]
fn exposition_comments_are_muted() {
    let lines = render_exposition("# HELP up Up\nup 1\n");
    assert_eq!(lines.len(), 2);
    assert!(lines[0].comment);
    assert_eq!(
        lines[0].to_html(),
        "<span class=\"text-secondary\"># HELP up Up</span><br/>"
    );
    assert_eq!(lines[1].to_html(), "up 1<br/>");

    let labelled = render_exposition("hits{path=\"/\"} 3");
    assert_eq!(labelled[0].to_html(), "hits{path=&#34;/&#34;} 3<br/>");
}
