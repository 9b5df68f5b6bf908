use std::collections::BTreeMap;

use crate::format::{fmt_mss, js_round};
use crate::metric::{
    render_value, MetricKind, MetricPath, MetricValue, RenderContext, RenderProfile, SensorLabel,
    Snapshot,
};

/// Ô đích mà lớp giao diện phải ghi vào.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Metric(MetricPath),
    /// Nhãn `(exp MM:SS)` của một sensor.
    Expiry(SensorLabel),
}

impl Target {
    pub fn dom_id(&self) -> String {
        match self {
            Self::Metric(path) => path.dom_id(),
            Self::Expiry(label) => label.ttl_id(),
        }
    }
}

/// Nơi nhận các đoạn HTML đã định dạng.
///
/// Đích không tồn tại thì bỏ qua im lặng; client không bao giờ tự tạo ô mới.
pub trait TargetSink {
    fn write(&mut self, target: &Target, html: &str);
}

/// Sink ghi lại mọi lần ghi theo id, dùng cho CLI và kiểm thử.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    writes: Vec<(String, String)>,
}

impl RecordingSink {
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    /// Nội dung ghi gần nhất vào `dom_id`.
    pub fn last(&self, dom_id: &str) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|(id, _)| id == dom_id)
            .map(|(_, html)| html.as_str())
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl TargetSink for RecordingSink {
    fn write(&mut self, target: &Target, html: &str) {
        self.writes.push((target.dom_id(), html.to_string()));
    }
}

/// Số giây còn lại trước khi giá trị của mỗi sensor hết hạn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Countdowns {
    entries: BTreeMap<SensorLabel, i64>,
}

impl Countdowns {
    pub fn set(&mut self, label: SensorLabel, remaining: i64) {
        self.entries.insert(label, remaining);
    }

    pub fn clear(&mut self, label: &SensorLabel) -> bool {
        self.entries.remove(label).is_some()
    }

    pub fn get(&self, label: &SensorLabel) -> Option<i64> {
        self.entries.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Một nhịp đồng hồ: giảm mỗi mục một giây, hiển thị phần còn lại
    /// hoặc xoá mục và làm trống nhãn khi về 0.
    ///
    /// Giảm trước rồi mới hiển thị: mục bắt đầu từ `v` biến mất sau đúng `v` nhịp,
    /// nhưng nhãn chậm một giây so với cách hiển thị rồi mới giảm. Hạn còn 65 giây
    /// thì nhịp đầu hiện `(exp 1:04)`, không phải `(exp 1:05)`.
    pub fn tick(&mut self, sink: &mut dyn TargetSink) {
        self.entries.retain(|label, remaining| {
            *remaining -= 1;
            let target = Target::Expiry(label.clone());
            if *remaining > 0 {
                sink.write(&target, &format!("(exp {})", fmt_mss(*remaining)));
                true
            } else {
                sink.write(&target, "");
                false
            }
        });
    }
}

/// Trạng thái của bảng sensor: profile hiển thị và các bộ đếm ngược.
#[derive(Debug, Clone, Default)]
pub struct SensorBoard {
    countdowns: Countdowns,
    profile: RenderProfile,
}

impl SensorBoard {
    pub fn new(profile: RenderProfile) -> Self {
        Self {
            countdowns: Countdowns::default(),
            profile,
        }
    }

    pub fn countdowns(&self) -> &Countdowns {
        &self.countdowns
    }

    /// Điền toàn bộ snapshot vào các ô đích.
    pub fn apply(
        &mut self,
        snapshot: &Snapshot,
        ctx: &RenderContext<'_>,
        sink: &mut dyn TargetSink,
    ) {
        let now_seconds = ctx.now_seconds();

        for sample in snapshot.iter() {
            let kind = sample.path.kind();
            match (kind, &sample.value) {
                (MetricKind::Expiry, MetricValue::Null) => {
                    let label = sample.path.sensor_label();
                    self.countdowns.clear(&label);
                    sink.write(&Target::Expiry(label), "");
                }
                (MetricKind::Expiry, MetricValue::Number(expires_at)) => {
                    let remaining = js_round(expires_at - now_seconds, 0) as i64;
                    self.countdowns.set(sample.path.sensor_label(), remaining);
                }
                // thuộc về danh sách job
                (MetricKind::Cron, MetricValue::Number(_)) => {}
                _ => {
                    let cell = render_value(kind, &sample.value, &self.profile, ctx);
                    sink.write(&Target::Metric(sample.path.clone()), &cell.to_html());
                }
            }
        }
    }

    pub fn tick(&mut self, sink: &mut dyn TargetSink) {
        self.countdowns.tick(sink);
    }
}
