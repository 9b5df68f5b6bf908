//! Bridge WASM <-> JavaScript trung lập framework cho các hàm định dạng dashboard.

use chrono::NaiveDate;
use js_sys::{Date, Reflect};
use laporte_core::{
    DashboardConfig, DashboardError, EncodeMode, EventTable, JobBoard, LocalClock, MetricKind,
    RenderContext, RenderProfile,
};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Cấu hình một phần do JavaScript truyền vào; trường thiếu lấy giá trị mặc định.
#[derive(Deserialize, Default)]
struct JsDashboardConfig {
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    status_selector: Option<String>,
    #[serde(default)]
    url_selector: Option<String>,
    #[serde(default)]
    jobs_selector: Option<String>,
    #[serde(default)]
    log_selector: Option<String>,
    #[serde(default)]
    log_end_selector: Option<String>,
    #[serde(default)]
    follow_selector: Option<String>,
    #[serde(default)]
    metrics_selector: Option<String>,
    #[serde(default)]
    metrics_path: Option<String>,
    #[serde(default)]
    tick_ms: Option<u32>,
    #[serde(default)]
    truncate_chars: Option<usize>,
    #[serde(default)]
    max_rows: Option<usize>,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    time_format: Option<String>,
    #[serde(default)]
    date_time_format: Option<String>,
}

impl JsDashboardConfig {
    fn apply(self, mut base: DashboardConfig) -> DashboardConfig {
        let overrides = [
            (self.namespace, &mut base.namespace),
            (self.status_selector, &mut base.status_selector),
            (self.url_selector, &mut base.url_selector),
            (self.jobs_selector, &mut base.jobs_selector),
            (self.log_selector, &mut base.log_selector),
            (self.log_end_selector, &mut base.log_end_selector),
            (self.follow_selector, &mut base.follow_selector),
            (self.metrics_selector, &mut base.metrics_selector),
            (self.metrics_path, &mut base.metrics_path),
            (self.time_format, &mut base.time_style.time_format),
            (self.date_time_format, &mut base.time_style.date_time_format),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(tick_ms) = self.tick_ms {
            base.tick_ms = tick_ms.max(1);
        }
        if let Some(chars) = self.truncate_chars {
            base.truncate_chars = chars;
        }
        if let Some(max_rows) = self.max_rows {
            base.max_rows = max_rows.max(1);
        }
        if self.locale.is_some() {
            base.locale = self.locale;
        }
        base
    }
}

/// Gộp cấu hình JavaScript (nếu có) lên trên `base`.
pub fn config_from_js(
    config: Option<JsValue>,
    base: DashboardConfig,
) -> Result<DashboardConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsDashboardConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(cfg.apply(base))
        }
        _ => Ok(base),
    }
}

/// Payload của kênh có thể là chuỗi JSON hoặc object đã parse sẵn.
pub fn payload_value(payload: JsValue) -> Result<serde_json::Value, JsValue> {
    match payload.as_string() {
        Some(text) => serde_json::from_str(&text)
            .map_err(|err| js_error(DashboardError::Parse(err.to_string()))),
        None => from_value(payload)
            .map_err(|err| js_error(DashboardError::Parse(err.to_string()))),
    }
}

/// Epoch hiện tại (giây) theo đồng hồ trình duyệt.
pub fn now_seconds() -> f64 {
    Date::now() / 1000.0
}

/// Giờ địa phương của trình duyệt, trình bày theo locale của trang.
///
/// Mỗi mốc đi qua `Date` của JavaScript nên dùng đúng múi giờ và offset
/// tại thời điểm đó, như `toLocaleString`.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserClock {
    locale: String,
}

impl BrowserClock {
    /// `locale` là thẻ BCP 47; thiếu thì lấy `navigator.language`.
    pub fn new(locale: Option<&str>) -> Self {
        let locale = locale
            .map(str::to_owned)
            .or_else(navigator_language)
            .unwrap_or_else(|| "en-US".to_string());
        Self { locale }
    }

    pub fn for_config(config: &DashboardConfig) -> Self {
        Self::new(config.locale.as_deref())
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn date(epoch_seconds: f64) -> Option<Date> {
        if !epoch_seconds.is_finite() {
            return None;
        }
        let date = Date::new(&JsValue::from_f64(epoch_seconds * 1000.0));
        (!date.get_time().is_nan()).then_some(date)
    }
}

impl LocalClock for BrowserClock {
    fn local_date(&self, epoch_seconds: f64) -> Option<NaiveDate> {
        let date = Self::date(epoch_seconds)?;
        NaiveDate::from_ymd_opt(
            i32::try_from(date.get_full_year()).ok()?,
            date.get_month() + 1,
            date.get_date(),
        )
    }

    fn time_string(&self, epoch_seconds: f64) -> Option<String> {
        Self::date(epoch_seconds).map(|date| date.to_locale_time_string(&self.locale).into())
    }

    fn date_time_string(&self, epoch_seconds: f64) -> Option<String> {
        Self::date(epoch_seconds)
            .map(|date| date.to_locale_string(&self.locale, &JsValue::UNDEFINED).into())
    }
}

fn navigator_language() -> Option<String> {
    let navigator = Reflect::get(&js_sys::global(), &JsValue::from_str("navigator")).ok()?;
    Reflect::get(&navigator, &JsValue::from_str("language"))
        .ok()?
        .as_string()
}

pub fn js_error(err: DashboardError) -> JsValue {
    JsValue::from_str(&format!("Dashboard error: {err}"))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|err| JsValue::from_str(&format!("Không serialize kết quả: {err}")))
}

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Định dạng một giá trị metric thành HTML. `profile` là `"sensor"` (mặc định) hoặc `"events"`.
#[wasm_bindgen]
pub fn render_metric(
    metric: &str,
    value: JsValue,
    profile: Option<String>,
) -> Result<String, JsValue> {
    let json: serde_json::Value = if value.is_undefined() {
        serde_json::Value::Null
    } else {
        from_value(value)
            .map_err(|err| JsValue::from_str(&format!("Giá trị không hợp lệ: {err}")))?
    };
    let profile = match profile.as_deref() {
        Some("events") => RenderProfile::event_log(),
        _ => RenderProfile::sensor(),
    };
    let clock = BrowserClock::new(None);
    let ctx = RenderContext::new(now_seconds(), &clock);
    let cell = laporte_core::render_value(
        MetricKind::classify(metric),
        &laporte_payload::metric_value(&json),
        &profile,
        &ctx,
    );
    Ok(cell.to_html())
}

#[wasm_bindgen]
pub fn html_encode(text: &str, extended: Option<bool>) -> String {
    let mode = if extended.unwrap_or(false) {
        EncodeMode::Extended
    } else {
        EncodeMode::Basic
    };
    laporte_core::html_encode(text, mode)
}

#[wasm_bindgen]
pub fn html_decode(text: &str) -> String {
    laporte_core::html_decode(text)
}

#[wasm_bindgen]
pub fn log_tr_class(level: &str) -> String {
    laporte_core::log_tr_class(level).to_string()
}

#[wasm_bindgen]
pub fn fmt_mss(seconds: f64) -> String {
    laporte_core::fmt_mss(seconds as i64)
}

/// Epoch (giây) → giờ địa phương theo locale của trình duyệt, bỏ phần ngày nếu là hôm nay.
#[wasm_bindgen]
pub fn render_time(epoch_seconds: f64) -> String {
    let clock = BrowserClock::new(None);
    RenderContext::new(now_seconds(), &clock)
        .render_epoch(epoch_seconds)
        .unwrap_or_default()
}

/// Giải mã snapshot (thô hoặc có envelope) thành danh sách mẫu phẳng.
#[wasm_bindgen]
pub fn decode_snapshot(payload: JsValue) -> Result<JsValue, JsValue> {
    let value = payload_value(payload)?;
    let snapshot = laporte_payload::decode_snapshot_value(&value).map_err(js_error)?;
    to_js(&snapshot)
}

/// Dòng log đã định dạng cho một bản ghi hoặc một mảng bản ghi.
#[wasm_bindgen]
pub fn log_rows(payload: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let cfg = config_from_js(config, DashboardConfig::logs())?;
    let value = payload_value(payload)?;
    let records = if value.is_array() {
        laporte_payload::decode_log_batch_value(value)
    } else {
        laporte_payload::decode_log_value(value).map(|record| vec![record])
    }
    .map_err(js_error)?;

    let clock = BrowserClock::for_config(&cfg);
    let ctx = RenderContext::new(now_seconds(), &clock);
    let rows: Vec<_> = records
        .iter()
        .map(|record| record.to_row(&ctx, cfg.truncate_chars))
        .collect();
    to_js(&rows)
}

/// Dòng bảng sự kiện gộp rowspan cho một mảng bản ghi `{time, event_id, data}`.
#[wasm_bindgen]
pub fn event_rows(payload: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let cfg = config_from_js(config, DashboardConfig::default())?;
    let value = payload_value(payload)?;
    let records = if value.is_array() {
        laporte_payload::decode_event_batch_value(value)
    } else {
        laporte_payload::decode_event_value(&value).map(|record| vec![record])
    }
    .map_err(js_error)?;

    let clock = BrowserClock::for_config(&cfg);
    let ctx = RenderContext::new(now_seconds(), &clock);
    let mut table = EventTable::default();
    let rows: Vec<_> = records
        .iter()
        .flat_map(|record| table.rows(record, &ctx))
        .collect();
    to_js(&rows)
}

/// Danh sách job giữ trạng thái giữa các lần cập nhật.
#[wasm_bindgen]
pub struct JobSchedule {
    board: JobBoard,
    config: DashboardConfig,
}

#[wasm_bindgen]
impl JobSchedule {
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsValue>) -> Result<JobSchedule, JsValue> {
        Ok(Self {
            board: JobBoard::default(),
            config: config_from_js(config, DashboardConfig::default())?,
        })
    }

    /// Gộp một snapshot và trả về toàn bộ bảng đã sắp xếp.
    pub fn merge(&mut self, payload: JsValue) -> Result<JsValue, JsValue> {
        let value = payload_value(payload)?;
        let snapshot = laporte_payload::decode_snapshot_value(&value).map_err(js_error)?;
        self.board.merge(&snapshot);
        let clock = BrowserClock::for_config(&self.config);
        let ctx = RenderContext::new(now_seconds(), &clock);
        to_js(&self.board.rows(&ctx))
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.board.len()
    }
}
