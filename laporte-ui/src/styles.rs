use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-laporte-ui]";

/// CSS tối thiểu cho các bảng; phần còn lại lấy từ Bootstrap của trang.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --laporte-truncate-lines: 4;
  --laporte-line-height: 1.4em;
  --laporte-stripe: rgba(0, 0, 0, 0.05);
}

.truncate-overflow {
  position: relative;
  max-height: calc(var(--laporte-line-height) * var(--laporte-truncate-lines));
  line-height: var(--laporte-line-height);
  overflow: hidden;
}

.truncate-overflow.long {
  cursor: pointer;
}

.truncate-overflow.long::after {
  content: "\2026";
  position: absolute;
  right: 0;
  bottom: 0;
  padding-left: 0.5em;
  background: inherit;
}

.odd-row {
  background-color: var(--laporte-stripe);
}

samp {
  white-space: pre-wrap;
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-laporte-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.dyn_into::<Node>()?)?;

    Ok(())
}
