use laporte_core::{DashboardError, Target, TargetSink};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    console, Document, Element, HtmlElement, HtmlInputElement, ScrollBehavior,
    ScrollIntoViewOptions, Window,
};

use crate::styles;

const LOG_PREFIX: &str = "[laporte]";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("Không truy cập được document"))
}

pub fn query(selector: &str) -> Result<Element, JsValue> {
    document()?
        .query_selector(selector)
        .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
        .ok_or_else(|| {
            laporte_wasm::js_error(DashboardError::MissingTarget(selector.to_string()))
        })
}

/// Phần tử gốc cho một view yew; nội dung dựng sẵn phía server bị thay thế.
pub fn mount_root(selector: &str) -> Result<Element, JsValue> {
    if let Err(err) = styles::ensure_styles(&document()?) {
        report("styles", &err);
    }
    let root = query(selector)?;
    root.set_inner_html("");
    Ok(root)
}

/// Ghi text vào phần tử; không tìm thấy thì bỏ qua.
pub fn set_text(selector: &str, text: &str) {
    if let Ok(element) = query(selector) {
        element.set_text_content(Some(text));
    }
}

pub fn set_html(selector: &str, html: &str) {
    if let Ok(element) = query(selector) {
        element.set_inner_html(html);
    }
}

pub fn log(message: &str) {
    console::log_1(&JsValue::from_str(&format!("{LOG_PREFIX} {message}")));
}

pub fn warn(message: &str) {
    console::warn_1(&JsValue::from_str(&format!("{LOG_PREFIX} {message}")));
}

pub fn report(context: &str, err: &JsValue) {
    console::error_2(&JsValue::from_str(&format!("{LOG_PREFIX} {context}:")), err);
}

/// Ghi các ô sensor theo id có sẵn trong trang.
pub struct DomTargets {
    document: Document,
}

impl DomTargets {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl TargetSink for DomTargets {
    fn write(&mut self, target: &Target, html: &str) {
        if let Some(element) = self.document.get_element_by_id(&target.dom_id()) {
            element.set_inner_html(html);
        }
    }
}

/// Trạng thái checkbox; thiếu phần tử coi như chưa chọn.
pub fn is_checked(selector: &str) -> bool {
    query(selector)
        .ok()
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        .is_some_and(|input| input.checked())
}

pub fn scroll_to(selector: &str, smooth: bool) {
    let Ok(element) = query(selector) else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Instant
    });
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// So chiều cao nội dung với khung chứa để bật/tắt trạng thái thu gọn.
pub fn check_truncated(container: &HtmlElement) {
    let Some(content) = container
        .first_element_child()
        .and_then(|child| child.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let classes = container.class_list();
    let _ = classes.add_1("truncate-overflow");
    if content.offset_height() > container.client_height() {
        let _ = classes.add_1("long");
    } else {
        let _ = classes.remove_2("truncate-overflow", "long");
    }
}

/// Kiểm tra mọi khung thu gọn trong `root_selector`.
pub fn check_all_truncated(root_selector: &str) {
    let Ok(root) = query(root_selector) else {
        return;
    };
    let Ok(nodes) = root.query_selector_all("div.truncate-overflow") else {
        return;
    };
    for index in 0..nodes.length() {
        if let Some(container) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        {
            check_truncated(&container);
        }
    }
}
