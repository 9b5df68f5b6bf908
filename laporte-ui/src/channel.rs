//! Kênh publish/subscribe qua thư viện Socket.IO client có sẵn trong trang (`io`).

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom;

#[wasm_bindgen]
extern "C" {
    type Socket;

    #[wasm_bindgen(catch, js_namespace = io, js_name = connect)]
    fn io_connect(url: &str, options: &JsValue) -> Result<Socket, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Socket, event: &str, callback: &Function);

    #[wasm_bindgen(method)]
    fn off(this: &Socket, event: &str, callback: &Function);

    #[wasm_bindgen(method)]
    fn disconnect(this: &Socket);
}

/// Một kết nối riêng tới namespace trên origin của trang, sống cùng view.
///
/// Khi huỷ, các handler được gỡ và kết nối bị đóng.
pub struct Channel {
    socket: Socket,
    handlers: Vec<(&'static str, Closure<dyn FnMut(JsValue)>)>,
}

impl Channel {
    /// Kết nối và cập nhật nhãn trạng thái khi connect/disconnect.
    pub fn connect(namespace: &str, status_selector: &str) -> Result<Self, JsValue> {
        let origin = dom::window()?.location().origin()?;
        let url = format!("{origin}{namespace}");
        let socket = io_connect(&url, &connect_options()?)?;

        let mut channel = Self {
            socket,
            handlers: Vec::new(),
        };

        let status = status_selector.to_string();
        channel.on_event("connect", move |_| {
            dom::log(&format!("connected to {url}"));
            dom::set_text(&status, "connected");
        });

        let status = status_selector.to_string();
        channel.on_event("disconnect", move |_| {
            dom::warn("disconnected");
            dom::set_text(&status, "not connected");
        });

        Ok(channel)
    }

    pub fn on_event(&mut self, event: &'static str, handler: impl FnMut(JsValue) + 'static) {
        let closure = Closure::<dyn FnMut(JsValue)>::new(handler);
        self.socket.on(event, closure.as_ref().unchecked_ref());
        self.handlers.push((event, closure));
    }

    /// Như [`Channel::on_event`], payload được parse thành JSON trước.
    /// Payload hỏng chỉ được ghi ra console.
    pub fn on_payload(
        &mut self,
        event: &'static str,
        mut handler: impl FnMut(serde_json::Value) + 'static,
    ) {
        self.on_event(event, move |payload| {
            match laporte_wasm::payload_value(payload) {
                Ok(value) => handler(value),
                Err(err) => dom::report(event, &err),
            }
        });
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        for (event, closure) in &self.handlers {
            self.socket.off(event, closure.as_ref().unchecked_ref());
        }
        self.socket.disconnect();
    }
}

/// `forceNew`: Socket.IO mặc định dùng lại socket theo namespace.
fn connect_options() -> Result<JsValue, JsValue> {
    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("forceNew"), &JsValue::TRUE)?;
    Ok(options.into())
}
