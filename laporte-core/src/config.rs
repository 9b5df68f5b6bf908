use serde::{Deserialize, Serialize};

/// Mẫu strftime dùng để hiển thị thời gian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeStyle {
    /// Dùng khi mốc thời gian thuộc ngày hôm nay.
    pub time_format: String,
    /// Dùng cho các ngày khác và cho danh sách job.
    pub date_time_format: String,
}

impl Default for TimeStyle {
    fn default() -> Self {
        Self {
            time_format: "%H:%M:%S".to_string(),
            date_time_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

/// Cấu hình một view dashboard: kênh, các selector đích và ngưỡng hiển thị.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Namespace của kênh publish/subscribe (`/events` hoặc `/logs`).
    pub namespace: String,
    pub status_selector: String,
    pub url_selector: String,
    pub jobs_selector: String,
    pub log_selector: String,
    pub log_end_selector: String,
    pub follow_selector: String,
    pub metrics_selector: String,
    /// Đường dẫn HTTP trả về định dạng exposition của Prometheus.
    pub metrics_path: String,
    /// Chu kỳ bộ đếm ngược (ms).
    pub tick_ms: u32,
    /// Số ký tự tối đa trước khi thu gọn nội dung log.
    pub truncate_chars: usize,
    /// Số dòng tối đa giữ trong các bảng log, sự kiện và message.
    pub max_rows: usize,
    /// Thẻ ngôn ngữ BCP 47 cho giờ hiển thị; `None` lấy theo trình duyệt.
    pub locale: Option<String>,
    /// Mẫu strftime khi không định dạng qua trình duyệt (CLI, kiểm thử).
    pub time_style: TimeStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            namespace: "/events".to_string(),
            status_selector: "#status".to_string(),
            url_selector: "#url".to_string(),
            jobs_selector: "#jobs".to_string(),
            log_selector: "#log".to_string(),
            log_end_selector: "#log-end".to_string(),
            follow_selector: "#followLogs".to_string(),
            metrics_selector: "#metrics".to_string(),
            metrics_path: "/metrics".to_string(),
            tick_ms: 1000,
            truncate_chars: 320,
            max_rows: 2048,
            locale: None,
            time_style: TimeStyle::default(),
        }
    }
}

impl DashboardConfig {
    /// Cấu hình mặc định cho trang log (namespace `/logs`).
    pub fn logs() -> Self {
        Self {
            namespace: "/logs".to_string(),
            ..Self::default()
        }
    }
}
