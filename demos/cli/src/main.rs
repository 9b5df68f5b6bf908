use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, ValueEnum};
use laporte_core::{
    epoch_to_local, DashboardConfig, EventTable, JobBoard, RecordingSink, RenderContext,
    RenderProfile, SensorBoard, ZonedClock,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum View {
    Sensors,
    Jobs,
    Logs,
    Events,
}

#[derive(Parser, Debug)]
#[command(
    name = "laporte-cli",
    about = "Dựng lại bảng dashboard Laporte từ payload đã ghi."
)]
struct Args {
    /// Đường dẫn tới file JSON payload.
    #[arg(short, long)]
    input: PathBuf,

    /// Bảng cần dựng.
    #[arg(short, long, value_enum, default_value = "sensors")]
    view: View,

    /// Thời điểm hiện tại (epoch giây); mặc định là giờ máy.
    #[arg(long)]
    now: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Không đọc được file {:?}", args.input))?;

    let config = DashboardConfig::default();
    let now = resolve_now(args.now)?;
    let clock = ZonedClock::new(Local, config.time_style.clone());
    let ctx = RenderContext::new(now, &clock);

    match args.view {
        View::Sensors => {
            let snapshot = laporte_payload::decode_snapshot_str(&data)?;
            let mut board = SensorBoard::new(RenderProfile::sensor());
            let mut sink = RecordingSink::default();
            board.apply(&snapshot, &ctx, &mut sink);
            for (id, html) in sink.writes() {
                println!("{id}\t{html}");
            }
            println!("Countdowns: {}", board.countdowns().len());
        }
        View::Jobs => {
            let snapshot = laporte_payload::decode_snapshot_str(&data)?;
            let mut board = JobBoard::default();
            board.merge(&snapshot);
            for row in board.rows(&ctx) {
                println!("{}\t{}\t{}\t{}", row.time, row.node, row.sensor, row.kind);
            }
        }
        View::Logs => {
            let records = laporte_payload::decode_log_batch_str(&data)?;
            for row in records
                .iter()
                .map(|record| record.to_row(&ctx, config.truncate_chars))
            {
                println!(
                    "{}\t{}\t{}\t{} {}\t{}",
                    row.class, row.time, row.level, row.function, row.location, row.message
                );
            }
        }
        View::Events => {
            let records = laporte_payload::decode_event_batch_str(&data)?;
            let mut table = EventTable::default();
            for row in records.iter().flat_map(|record| table.rows(record, &ctx)) {
                let header = row
                    .header
                    .map(|header| format!("{} {}", header.time, header.event_id))
                    .unwrap_or_default();
                let node = row.node.map(|cell| cell.text).unwrap_or_default();
                let sensor = row.sensor.map(|cell| cell.text).unwrap_or_default();
                println!("{header}\t{node}\t{sensor}\t{}\t{}", row.metric, row.value);
            }
        }
    }

    Ok(())
}

/// Mỗi mốc thời gian sau đó được đổi theo offset `Local` của chính nó.
fn resolve_now(epoch_seconds: Option<f64>) -> anyhow::Result<f64> {
    match epoch_seconds {
        Some(seconds) => epoch_to_local(seconds, &Local)
            .map(|_| seconds)
            .with_context(|| format!("Epoch ngoài phạm vi: {seconds}")),
        None => Ok(Local::now().timestamp_millis() as f64 / 1000.0),
    }
}
