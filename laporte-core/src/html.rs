//! Escape/unescape HTML cho nội dung không tin cậy (log, giá trị chuỗi).

/// Tập ký tự được escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeMode {
    /// `& < > ' "`.
    #[default]
    Basic,
    /// Như `Basic`, thêm xuống dòng → `<br/>`, khoảng trắng → `&nbsp;`,
    /// ký tự điều khiển và ngoài ASCII → thực thể số.
    Extended,
}

pub fn html_encode(input: &str, mode: EncodeMode) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            '\n' if mode == EncodeMode::Extended => out.push_str("<br/>"),
            ' ' if mode == EncodeMode::Extended => out.push_str("&nbsp;"),
            c if mode == EncodeMode::Extended && needs_numeric_entity(c) => {
                out.push_str(&format!("&#{};", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

fn needs_numeric_entity(c: char) -> bool {
    c.is_control() || !c.is_ascii()
}

/// Giải mã kết quả của [`html_encode`] ở cả hai chế độ.
///
/// Thực thể không nhận ra được giữ nguyên.
pub fn html_decode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(['&', '<']) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with('<') {
            match ["<br/>", "<br />", "<br>"]
                .iter()
                .find(|tag| rest.starts_with(*tag))
            {
                Some(tag) => {
                    out.push('\n');
                    rest = &rest[tag.len()..];
                }
                None => {
                    out.push('<');
                    rest = &rest[1..];
                }
            }
            continue;
        }

        match rest.find(';').and_then(|end| {
            decode_entity(&rest[1..end]).map(|ch| (ch, end))
        }) {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}
