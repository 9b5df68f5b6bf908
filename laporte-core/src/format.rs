//! Các hàm định dạng dùng chung: số, thời gian, đếm ngược.

use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone};

/// Làm tròn như `Math.round` của trình duyệt (nửa làm tròn lên phía +∞).
pub fn js_round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}

/// In số không kèm phần thập phân thừa (`2` thay vì `2.0`).
pub fn render_number(value: f64) -> String {
    if value == 0.0 {
        // gộp cả -0
        return "0".to_string();
    }
    value.to_string()
}

/// `MM:SS`, phút không đệm, giây đệm 2 chữ số.
pub fn fmt_mss(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Đổi epoch (giây, có thể lẻ) sang giờ của `zone`, với offset áp dụng tại chính thời điểm đó.
pub fn epoch_to_local<Tz: TimeZone>(epoch_seconds: f64, zone: &Tz) -> Option<DateTime<Tz>> {
    if !epoch_seconds.is_finite() {
        return None;
    }
    let millis = (epoch_seconds * 1000.0).round() as i64;
    zone.timestamp_millis_opt(millis).single()
}

/// Định dạng theo mẫu strftime; mẫu lỗi thì trả về RFC 3339.
pub(crate) fn format_with<Tz: TimeZone>(time: &DateTime<Tz>, pattern: &str) -> String
where
    Tz::Offset: Display,
{
    let mut out = String::new();
    if write!(out, "{}", time.format(pattern)).is_err() {
        return time.to_rfc3339();
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn invalid_pattern_falls_back_to_rfc3339() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let time = epoch_to_local(0.0, &offset).unwrap();
        assert_eq!(format_with(&time, "%Q"), "1970-01-01T00:00:00+00:00");
    }
}
