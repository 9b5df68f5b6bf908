use std::fmt;

use serde::Serialize;

use crate::clock::LocalClock;
use crate::format::{js_round, render_number};
use crate::html::{html_encode, EncodeMode};

/// Nhãn sensor `node_sensor`, dấu chấm thay bằng gạch ngang để dùng làm id DOM.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SensorLabel(String);

impl SensorLabel {
    pub fn new(node: &str, sensor: &str) -> Self {
        Self(format!("{node}_{sensor}").replace('.', "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id của ô hiển thị thời gian hết hạn.
    pub fn ttl_id(&self) -> String {
        format!("{}_ttl", self.0)
    }
}

impl fmt::Display for SensorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Đường dẫn ba cấp tới một giá trị lá.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MetricPath {
    pub node: String,
    pub sensor: String,
    pub metric: String,
}

impl MetricPath {
    pub fn new(
        node: impl Into<String>,
        sensor: impl Into<String>,
        metric: impl Into<String>,
    ) -> Self {
        Self {
            node: node.into(),
            sensor: sensor.into(),
            metric: metric.into(),
        }
    }

    pub fn sensor_label(&self) -> SensorLabel {
        SensorLabel::new(&self.node, &self.sensor)
    }

    /// `<sensor_label>_<metric>`; phần metric giữ nguyên.
    pub fn dom_id(&self) -> String {
        format!("{}_{}", self.sensor_label(), self.metric)
    }

    pub fn kind(&self) -> MetricKind {
        MetricKind::classify(&self.metric)
    }
}

/// Giá trị metric kiểu động nhận từ server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Chưa đặt hoặc đã hết hạn.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Object/array lồng nhau, không hiển thị.
    Unsupported,
}

/// Phân loại metric theo tên, xác định một lần cho mỗi giá trị.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// `*_seconds`
    Duration,
    /// `*_total`
    Count,
    /// `exp_timestamp`
    Expiry,
    /// `cron_timestamp`
    Cron,
    /// `hit_timestamp`
    LastSeen,
    /// `*_timestamp`
    Timestamp,
    Generic,
}

impl MetricKind {
    pub fn classify(name: &str) -> Self {
        if name.contains("_seconds") {
            Self::Duration
        } else if name.contains("_total") {
            Self::Count
        } else if name == "exp_timestamp" {
            Self::Expiry
        } else if name == "cron_timestamp" {
            Self::Cron
        } else if name == "hit_timestamp" {
            Self::LastSeen
        } else if name.contains("_timestamp") {
            Self::Timestamp
        } else {
            Self::Generic
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    pub path: MetricPath,
    pub value: MetricValue,
}

/// Ảnh chụp `{node: {sensor: {metric: value}}}` đã làm phẳng, giữ thứ tự payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub samples: Vec<MetricSample>,
}

impl Snapshot {
    pub fn push(&mut self, path: MetricPath, value: MetricValue) {
        self.samples.push(MetricSample { path, value });
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Nội dung một ô sau khi định dạng.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum CellValue {
    Blank,
    Text(String),
    /// `exp_timestamp` đã hết hạn trong bảng sự kiện.
    Expired,
}

impl CellValue {
    /// Đoạn HTML an toàn để gán vào `innerHTML`.
    pub fn to_html(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Text(text) => html_encode(text, EncodeMode::Basic),
            Self::Expired => "<i>expired</i>".to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Expired => f.write_str("expired"),
        }
    }
}

/// Thiết lập trình bày riêng cho từng loại bảng.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderProfile {
    pub seconds_decimals: u32,
    pub number_decimals: u32,
    /// Ẩn thời lượng/bộ đếm bằng 0.
    pub blank_zero: bool,
    /// Bọc `hit_timestamp` thành `(last …)`.
    pub last_seen_wrapper: bool,
    /// Hiển thị dấu "expired" khi `exp_timestamp` là null.
    pub mark_expired: bool,
}

impl RenderProfile {
    /// Bảng sensor/metric điền sẵn theo id.
    pub fn sensor() -> Self {
        Self {
            seconds_decimals: 1,
            number_decimals: 2,
            blank_zero: true,
            last_seen_wrapper: true,
            mark_expired: false,
        }
    }

    /// Bảng sự kiện gộp rowspan.
    pub fn event_log() -> Self {
        Self {
            seconds_decimals: 3,
            number_decimals: 4,
            blank_zero: false,
            last_seen_wrapper: false,
            mark_expired: true,
        }
    }
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self::sensor()
    }
}

/// Thời điểm hiện tại và đồng hồ địa phương dùng khi định dạng.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    now_seconds: f64,
    clock: &'a dyn LocalClock,
}

impl<'a> RenderContext<'a> {
    pub fn new(now_seconds: f64, clock: &'a dyn LocalClock) -> Self {
        Self { now_seconds, clock }
    }

    pub fn now_seconds(&self) -> f64 {
        self.now_seconds
    }

    /// Epoch (giây) → chuỗi thời gian, bỏ phần ngày nếu là hôm nay.
    pub fn render_epoch(&self, epoch_seconds: f64) -> Option<String> {
        self.clock.render_time(epoch_seconds, self.now_seconds)
    }

    /// Epoch (giây) → ngày kèm giờ.
    pub fn render_date_time(&self, epoch_seconds: f64) -> Option<String> {
        self.clock.date_time_string(epoch_seconds)
    }

    /// Giờ hiện tại, không kèm ngày.
    pub fn now_time(&self) -> String {
        self.clock.time_string(self.now_seconds).unwrap_or_default()
    }
}

/// Định dạng một giá trị theo loại metric và profile; không có hiệu ứng phụ.
pub fn render_value(
    kind: MetricKind,
    value: &MetricValue,
    profile: &RenderProfile,
    ctx: &RenderContext<'_>,
) -> CellValue {
    match value {
        MetricValue::Null if kind == MetricKind::Expiry && profile.mark_expired => {
            CellValue::Expired
        }
        MetricValue::Null | MetricValue::Unsupported => CellValue::Blank,
        MetricValue::Bool(flag) => CellValue::Text(flag.to_string()),
        MetricValue::Text(text) => CellValue::Text(text.clone()),
        MetricValue::Number(number) => render_numeric(kind, *number, profile, ctx),
    }
}

fn render_numeric(
    kind: MetricKind,
    value: f64,
    profile: &RenderProfile,
    ctx: &RenderContext<'_>,
) -> CellValue {
    match kind {
        MetricKind::Duration => {
            let rounded = js_round(value, profile.seconds_decimals);
            if profile.blank_zero && rounded == 0.0 {
                CellValue::Blank
            } else {
                CellValue::Text(format!("{}s", render_number(rounded)))
            }
        }
        MetricKind::Count => {
            if profile.blank_zero && value == 0.0 {
                CellValue::Blank
            } else {
                CellValue::Text(format!("{}×", render_number(value)))
            }
        }
        MetricKind::LastSeen => match ctx.render_epoch(value) {
            Some(time) if profile.last_seen_wrapper => CellValue::Text(format!("(last {time})")),
            Some(time) => CellValue::Text(time),
            None => CellValue::Blank,
        },
        MetricKind::Expiry | MetricKind::Cron | MetricKind::Timestamp => ctx
            .render_epoch(value)
            .map(CellValue::Text)
            .unwrap_or(CellValue::Blank),
        MetricKind::Generic => {
            CellValue::Text(render_number(js_round(value, profile.number_decimals)))
        }
    }
}
