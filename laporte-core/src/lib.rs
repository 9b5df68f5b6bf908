//! Logic lõi dựng giao diện dashboard Laporte: phân loại metric, định dạng giá trị,
//! trạng thái đếm ngược, danh sách job, dòng log và bảng sự kiện.
//!
//! Crate này không biết gì về DOM hay JSON; lớp giao diện cung cấp một [`TargetSink`]
//! để nhận các đoạn HTML đã định dạng.

mod buffer;
mod clock;
mod config;
mod events;
mod exposition;
mod format;
mod html;
mod jobs;
mod logs;
mod metric;
mod sensor;

pub use buffer::RowBuffer;
pub use clock::{LocalClock, ZonedClock};
pub use config::{DashboardConfig, TimeStyle};
pub use events::{EventHeader, EventRecord, EventRow, EventTable, SpanCell};
pub use exposition::{render_exposition, ExpositionLine};
pub use format::{epoch_to_local, fmt_mss, js_round, render_number};
pub use html::{html_decode, html_encode, EncodeMode};
pub use jobs::{JobBoard, JobKey, JobKind, JobRow};
pub use logs::{log_tr_class, LogRecord, LogRow, MessageLog, MessageRow};
pub use metric::{
    render_value, CellValue, MetricKind, MetricPath, MetricSample, MetricValue, RenderContext,
    RenderProfile, SensorLabel, Snapshot,
};
pub use sensor::{Countdowns, RecordingSink, SensorBoard, Target, TargetSink};

/// Lỗi chung của dashboard.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DashboardError {
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Dữ liệu không đúng cấu trúc mong đợi: {0}")]
    UnexpectedShape(String),
    #[error("Không tìm thấy phần tử đích: {0}")]
    MissingTarget(String),
}
