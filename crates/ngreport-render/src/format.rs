//! String escaping and date/duration formatting shared by the renderers

use chrono::{DateTime, Utc};

/// Escape angle brackets and ampersands for XML text and attribute values.
///
/// Assumes the input does not already contain entities, which would be
/// escaped again.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    let mut buffer = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '<' => buffer.push_str("&lt;"),
            '>' => buffer.push_str("&gt;"),
            '&' => buffer.push_str("&amp;"),
            '"' => buffer.push_str("&quot;"),
            _ => buffer.push(ch),
        }
    }
    buffer
}

/// Escape for HTML display: like [`escape_xml`] but also replaces line
/// breaks with `<br/>` and keeps runs of spaces visible by converting all
/// but the last space of a run to `&nbsp;`, so significant whitespace
/// survives without prohibiting wrapping.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let escaped = escape_xml(s);
    let mut buffer = String::with_capacity(escaped.len());
    let chars: Vec<char> = escaped.chars().collect();
    for (i, ch) in chars.iter().enumerate() {
        match ch {
            ' ' => {
                let next_is_space = chars.get(i + 1) == Some(&' ');
                buffer.push_str(if next_is_space { "&nbsp;" } else { " " });
            }
            '\n' => buffer.push_str("<br/>"),
            _ => buffer.push(*ch),
        }
    }
    buffer
}

/// Long date, e.g. `Friday 07 August 2026`
#[must_use]
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.format("%A %d %B %Y").to_string()
}

/// 24-hour clock time with zone, e.g. `14:03 UTC`
#[must_use]
pub fn format_time(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M UTC").to_string()
}

/// Reverse-order date and time, e.g. `2026/08/07 14:03:22`
#[must_use]
pub fn format_date_time(instant: DateTime<Utc>) -> String {
    instant.format("%Y/%m/%d %H:%M:%S").to_string()
}

/// Milliseconds as seconds with three decimals, e.g. `1.234s`
#[must_use]
pub fn format_duration_millis(millis: i64) -> String {
    format!("{:.3}s", millis as f64 / 1000.0)
}
