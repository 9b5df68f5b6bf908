//! Đổi epoch sang giờ địa phương. Mỗi mốc thời gian dùng offset của chính nó,
//! nên các mốc nằm hai bên một lần đổi giờ mùa hè vẫn hiển thị đúng.

use std::fmt::Display;

use chrono::{NaiveDate, TimeZone};

use crate::format::{epoch_to_local, format_with};
use crate::TimeStyle;

/// Nguồn giờ địa phương: múi giờ và cách trình bày.
pub trait LocalClock {
    /// Ngày lịch địa phương chứa `epoch_seconds`.
    fn local_date(&self, epoch_seconds: f64) -> Option<NaiveDate>;

    /// Chỉ phần giờ.
    fn time_string(&self, epoch_seconds: f64) -> Option<String>;

    /// Ngày kèm giờ.
    fn date_time_string(&self, epoch_seconds: f64) -> Option<String>;

    /// Chỉ giờ nếu cùng ngày địa phương với `now_seconds`, ngược lại kèm cả ngày.
    fn render_time(&self, epoch_seconds: f64, now_seconds: f64) -> Option<String> {
        let day = self.local_date(epoch_seconds)?;
        if Some(day) == self.local_date(now_seconds) {
            self.time_string(epoch_seconds)
        } else {
            self.date_time_string(epoch_seconds)
        }
    }
}

/// Đồng hồ theo một múi giờ chrono, trình bày bằng mẫu strftime.
///
/// Dùng `Local` ngoài trình duyệt; trong kiểm thử có thể truyền `FixedOffset`
/// hoặc một múi giờ có giờ mùa hè.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonedClock<Tz> {
    zone: Tz,
    style: TimeStyle,
}

impl<Tz: TimeZone> ZonedClock<Tz> {
    pub fn new(zone: Tz, style: TimeStyle) -> Self {
        Self { zone, style }
    }
}

impl<Tz: TimeZone> LocalClock for ZonedClock<Tz>
where
    Tz::Offset: Display,
{
    fn local_date(&self, epoch_seconds: f64) -> Option<NaiveDate> {
        epoch_to_local(epoch_seconds, &self.zone).map(|time| time.date_naive())
    }

    fn time_string(&self, epoch_seconds: f64) -> Option<String> {
        epoch_to_local(epoch_seconds, &self.zone)
            .map(|time| format_with(&time, &self.style.time_format))
    }

    fn date_time_string(&self, epoch_seconds: f64) -> Option<String> {
        epoch_to_local(epoch_seconds, &self.zone)
            .map(|time| format_with(&time, &self.style.date_time_format))
    }
}
