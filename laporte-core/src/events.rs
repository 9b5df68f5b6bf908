use serde::Serialize;

use crate::metric::{render_value, CellValue, MetricSample, RenderContext, RenderProfile, Snapshot};

/// Sự kiện cập nhật sensor: thời điểm, id và các metric thay đổi.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub time: f64,
    pub event_id: String,
    pub data: Snapshot,
}

/// Hai ô đầu (thời gian, id sự kiện) trải qua mọi dòng của sự kiện.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventHeader {
    pub time: String,
    pub event_id: String,
    pub rowspan: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanCell {
    pub text: String,
    pub rowspan: usize,
}

/// Một dòng metric; các ô đầu chỉ có ở dòng đầu tiên của nhóm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRow {
    pub striped: bool,
    pub header: Option<EventHeader>,
    pub node: Option<SpanCell>,
    pub sensor: Option<SpanCell>,
    pub metric: String,
    pub value: CellValue,
}

/// Bảng sự kiện gộp rowspan; xen kẽ sọc giữa các sự kiện.
#[derive(Debug, Clone)]
pub struct EventTable {
    odd: bool,
    profile: RenderProfile,
}

impl Default for EventTable {
    fn default() -> Self {
        Self {
            odd: false,
            profile: RenderProfile::event_log(),
        }
    }
}

impl EventTable {
    /// Bắt đầu lại xen kẽ sọc, dùng khi nạp lại lịch sử.
    pub fn reset(&mut self) {
        self.odd = false;
    }

    pub fn rows(&mut self, record: &EventRecord, ctx: &RenderContext<'_>) -> Vec<EventRow> {
        self.odd = !self.odd;
        let striped = !self.odd;

        let samples = &record.data.samples;
        let header = EventHeader {
            time: ctx.render_epoch(record.time).unwrap_or_default(),
            event_id: record.event_id.clone(),
            rowspan: samples.len(),
        };

        let mut rows = Vec::with_capacity(samples.len());
        for (index, sample) in samples.iter().enumerate() {
            let previous = index.checked_sub(1).map(|prev| &samples[prev]);

            let node = match previous {
                Some(prev) if prev.path.node == sample.path.node => None,
                _ => Some(SpanCell {
                    text: sample.path.node.clone(),
                    rowspan: run_length(&samples[index..], same_node),
                }),
            };
            let sensor = match previous {
                Some(prev) if same_sensor(prev, sample) => None,
                _ => Some(SpanCell {
                    text: sample.path.sensor.clone(),
                    rowspan: run_length(&samples[index..], same_sensor),
                }),
            };

            rows.push(EventRow {
                striped,
                header: (index == 0).then(|| header.clone()),
                node,
                sensor,
                metric: sample.path.metric.clone(),
                value: render_value(sample.path.kind(), &sample.value, &self.profile, ctx),
            });
        }
        rows
    }
}

fn same_node(a: &MetricSample, b: &MetricSample) -> bool {
    a.path.node == b.path.node
}

fn same_sensor(a: &MetricSample, b: &MetricSample) -> bool {
    same_node(a, b) && a.path.sensor == b.path.sensor
}

/// Số mẫu liên tiếp từ đầu `samples` cùng nhóm với mẫu đầu tiên.
fn run_length(samples: &[MetricSample], same: fn(&MetricSample, &MetricSample) -> bool) -> usize {
    match samples.first() {
        Some(first) => samples.iter().take_while(|s| same(first, s)).count(),
        None => 0,
    }
}
