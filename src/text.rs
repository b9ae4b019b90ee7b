// Display-width helpers for terminal text.
// - Widths are measured in terminal cells, not chars, so wide glyphs line up.
// - Used by tab captions in the UI and by column/label layout in the visuals.
use serde::Deserialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

pub fn display_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

pub fn truncate_to_width(value: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if ch_width > 0 && width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn truncate_middle_with_ellipsis(value: &str, max_width: usize) -> String {
    if display_width(value) <= max_width {
        return value.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let keep_total = max_width - 3;
    let keep_left = keep_total / 2;
    let keep_right = keep_total - keep_left;
    let left = truncate_to_width(value, keep_left);
    let right = take_suffix_width(value, keep_right);

    truncate_to_width(&format!("{left}...{right}"), max_width)
}

/// Pads with spaces to exactly `width` cells, truncating when the value is wider.
pub fn pad_to_width(value: &str, width: usize, align: Align) -> String {
    let value = truncate_to_width(value, width);
    let fill = width.saturating_sub(display_width(&value));
    match align {
        Align::Left => format!("{value}{}", " ".repeat(fill)),
        Align::Right => format!("{}{value}", " ".repeat(fill)),
        Align::Center => {
            let left = fill / 2;
            format!("{}{value}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}

fn take_suffix_width(value: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut suffix = Vec::new();
    let mut width = 0;
    for ch in value.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if ch_width > 0 && width + ch_width > max_width {
            break;
        }
        suffix.push(ch);
        width += ch_width;
    }
    suffix.into_iter().rev().collect()
}
