//! Lớp giao diện WebAssembly cho các dashboard Laporte.
//!
//! Bảng sensor được điền trực tiếp vào các ô có sẵn trong trang; các bảng job, log,
//! sự kiện, metrics và nhật ký message được dựng bằng yew trên phần tử gốc tương ứng.

#[cfg(target_arch = "wasm32")]
mod channel;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod jobs;
#[cfg(target_arch = "wasm32")]
mod logs;
#[cfg(target_arch = "wasm32")]
mod messages;
#[cfg(target_arch = "wasm32")]
mod metrics;
#[cfg(target_arch = "wasm32")]
mod sensors;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod view {
    use laporte_core::DashboardConfig;
    use yew::Properties;

    #[derive(Properties, PartialEq)]
    pub struct ViewProps {
        pub config: DashboardConfig,
    }
}

#[cfg(target_arch = "wasm32")]
pub use events::mount_event_view;
#[cfg(target_arch = "wasm32")]
pub use jobs::mount_jobs_view;
#[cfg(target_arch = "wasm32")]
pub use logs::mount_log_view;
#[cfg(target_arch = "wasm32")]
pub use messages::mount_message_view;
#[cfg(target_arch = "wasm32")]
pub use metrics::mount_metrics_view;
#[cfg(target_arch = "wasm32")]
pub use sensors::mount_sensor_view;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use wasm_bindgen::JsValue;

    fn unsupported() -> Result<(), JsValue> {
        Err(JsValue::from_str("laporte-ui chỉ hỗ trợ biên dịch target wasm32"))
    }

    pub fn mount_sensor_view(_: Option<JsValue>) -> Result<(), JsValue> {
        unsupported()
    }

    pub fn mount_jobs_view(_: Option<JsValue>) -> Result<(), JsValue> {
        unsupported()
    }

    pub fn mount_log_view(_: Option<JsValue>) -> Result<(), JsValue> {
        unsupported()
    }

    pub fn mount_event_view(_: Option<JsValue>) -> Result<(), JsValue> {
        unsupported()
    }

    pub fn mount_metrics_view(_: Option<JsValue>) -> Result<(), JsValue> {
        unsupported()
    }

    pub fn mount_message_view(_: Option<JsValue>) -> Result<(), JsValue> {
        unsupported()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::*;
