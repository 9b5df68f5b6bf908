use serde::Serialize;

use crate::html::{html_encode, EncodeMode};

/// Một dòng văn bản exposition của Prometheus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpositionLine {
    /// Dòng `# HELP` / `# TYPE`, hiển thị mờ.
    pub comment: bool,
    pub text: String,
}

impl ExpositionLine {
    pub fn to_html(&self) -> String {
        let text = html_encode(&self.text, EncodeMode::Basic);
        if self.comment {
            format!("<span class=\"text-secondary\">{text}</span><br/>")
        } else {
            format!("{text}<br/>")
        }
    }
}

pub fn render_exposition(body: &str) -> Vec<ExpositionLine> {
    body.lines()
        .map(|line| ExpositionLine {
            comment: line.starts_with('#'),
            text: line.to_string(),
        })
        .collect()
}
