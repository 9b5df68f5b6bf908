use serde::{Deserialize, Serialize};

use crate::metric::RenderContext;

/// Một bản ghi log server đẩy qua namespace `/logs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub levelname: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub funcname: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub fileno: Option<u64>,
}

/// Dòng log đã định dạng, chưa escape; lớp hiển thị chịu trách nhiệm escape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRow {
    pub class: &'static str,
    pub time: String,
    pub level: String,
    pub event_id: String,
    pub function: String,
    pub location: String,
    pub message: String,
    /// Dài hơn ngưỡng, hiển thị thu gọn cho tới khi người dùng bấm vào.
    pub long: bool,
}

impl LogRecord {
    pub fn to_row(&self, ctx: &RenderContext<'_>, truncate_chars: usize) -> LogRow {
        let fileno = self.fileno.map(|line| line.to_string()).unwrap_or_default();
        LogRow {
            class: log_tr_class(&self.levelname),
            time: ctx.render_epoch(self.time).unwrap_or_default(),
            level: self.levelname.clone(),
            event_id: self.event_id.clone().unwrap_or_default(),
            function: self.funcname.clone(),
            location: format!("({}:{})", self.filename, fileno),
            message: self.msg.clone(),
            long: self.msg.chars().count() > truncate_chars,
        }
    }
}

/// Lớp CSS của dòng bảng theo mức log.
pub fn log_tr_class(level: &str) -> &'static str {
    match level {
        "DEBUG" => "table-light",
        "WARNING" => "table-warning",
        "ERROR" | "CRITICAL" => "table-danger",
        _ => "table-info",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRow {
    pub id: u64,
    pub time: String,
    pub text: String,
}

/// Nhật ký thô các message nhận được, đánh số tăng dần.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    next_id: u64,
}

impl MessageLog {
    pub fn record(&mut self, text: impl Into<String>, ctx: &RenderContext<'_>) -> MessageRow {
        let row = MessageRow {
            id: self.next_id,
            time: ctx.now_time(),
            text: text.into(),
        };
        self.next_id += 1;
        row
    }
}
