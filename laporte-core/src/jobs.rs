use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::metric::{MetricValue, RenderContext, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Expire,
    Cron,
}

impl JobKind {
    pub fn from_metric(metric: &str) -> Option<Self> {
        match metric {
            "exp_timestamp" => Some(Self::Expire),
            "cron_timestamp" => Some(Self::Cron),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expire => "expire",
            Self::Cron => "cron",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobKey {
    pub node: String,
    pub sensor: String,
    pub kind: JobKind,
}

/// Một dòng của bảng job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRow {
    pub time: String,
    pub node: String,
    pub sensor: String,
    pub kind: JobKind,
    pub timestamp: f64,
}

/// Các job đã lên lịch (hết hạn/cron), giữ qua nhiều lần cập nhật.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobBoard {
    jobs: BTreeMap<JobKey, f64>,
}

impl JobBoard {
    /// Gộp `exp_timestamp`/`cron_timestamp` của snapshot; null thì xoá job.
    pub fn merge(&mut self, snapshot: &Snapshot) {
        for sample in snapshot.iter() {
            let Some(kind) = JobKind::from_metric(&sample.path.metric) else {
                continue;
            };
            let key = JobKey {
                node: sample.path.node.clone(),
                sensor: sample.path.sensor.clone(),
                kind,
            };
            match sample.value {
                MetricValue::Number(timestamp) => {
                    self.jobs.insert(key, timestamp);
                }
                MetricValue::Null => {
                    self.jobs.remove(&key);
                }
                _ => {}
            }
        }
    }

    pub fn get(&self, key: &JobKey) -> Option<f64> {
        self.jobs.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Toàn bộ bảng, mới nhất trước; cùng thời điểm thì theo node, sensor, loại.
    pub fn rows(&self, ctx: &RenderContext<'_>) -> Vec<JobRow> {
        let mut entries: Vec<(&JobKey, f64)> =
            self.jobs.iter().map(|(key, ts)| (key, *ts)).collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));

        entries
            .into_iter()
            .map(|(key, timestamp)| JobRow {
                time: ctx.render_date_time(timestamp).unwrap_or_default(),
                node: key.node.clone(),
                sensor: key.sensor.clone(),
                kind: key.kind,
                timestamp,
            })
            .collect()
    }
}
