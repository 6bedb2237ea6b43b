//! Shared formatting utilities for metric display and console output

use console::Emoji;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static EMOJI_ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn console emoji on or off for the whole process (`--no-emoji`)
pub fn set_emoji_enabled(enabled: bool) {
    EMOJI_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Console emoji with a plain-text fallback
#[derive(Debug, Clone, Copy)]
pub struct Icon(pub &'static str, pub &'static str);

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if EMOJI_ENABLED.load(Ordering::Relaxed) {
            write!(f, "{}", Emoji(self.0, self.1))
        } else {
            f.write_str(self.1)
        }
    }
}

/// Receipt emoji for summary titles
pub const RECEIPT: Icon = Icon("🧾 ", "");

/// Pointing-down emoji for expandable sections
pub const POINT_DOWN: Icon = Icon(" 👇", ":");

/// Inbox emoji for loading reports
pub const INBOX: Icon = Icon("📥 ", "> ");

/// Outbox emoji for storing reports
pub const OUTBOX: Icon = Icon("📤 ", "< ");

/// Warning emoji for caution/alerts
pub const WARNING: Icon = Icon("⚠️ ", "! ");

/// Sparkles emoji for completion/success
pub const SPARKLES: Icon = Icon("✨ ", "* ");

/// Text alignment of a Markdown table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Left aligned
    Left,
    /// Right aligned
    Right,
    /// Centered
    Center,
}

impl TextAlign {
    /// Markdown header separator pattern for this alignment
    pub fn pattern(self) -> &'static str {
        match self {
            TextAlign::Left => ":-",
            TextAlign::Right => "-:",
            TextAlign::Center => ":-:",
        }
    }
}

/// `"+"` for strictly positive values, empty otherwise
pub fn plus_sign(value: f64) -> &'static str {
    if value > 0.0 {
        "+"
    } else {
        ""
    }
}

/// Wrap text in parentheses
pub fn parenthesized(input: &str) -> String {
    format!("({})", input)
}

/// Center text within `width` characters
///
/// Text longer than `width` is returned unchanged.
///
/// # Examples
///
/// ```
/// use gates_diff::fmt::center;
///
/// assert_eq!(center("ab", 6), "  ab  ");
/// assert_eq!(center("abc", 6), " abc  ");
/// assert_eq!(center("", 0), "");
/// ```
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = (len + width) / 2;
    format!("{:>left$}", text, left = left)
        .chars()
        .chain(std::iter::repeat(' '))
        .take(width.max(left.max(len)))
        .collect()
}

/// Format an integer with `,` thousands separators
///
/// Takes any integer up to `i128`, so both metric values (`u64`) and
/// deltas (`i128`) go through it.
///
/// # Examples
///
/// ```
/// use gates_diff::fmt::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(-4096), "-4,096");
/// ```
pub fn format_count(value: impl Into<i128>) -> String {
    let value: i128 = value.into();
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Format a delta with an explicit `+` for increases
pub fn format_delta(delta: i128) -> String {
    format!("{}{}", plus_sign(delta as f64), format_count(delta))
}

/// Format a percentage with two decimals, `+` for increases and `∞` for
/// infinite changes
///
/// # Examples
///
/// ```
/// use gates_diff::fmt::format_percentage;
///
/// assert_eq!(format_percentage(300.0), "+300.00%");
/// assert_eq!(format_percentage(-20.0), "-20.00%");
/// assert_eq!(format_percentage(0.0), "0.00%");
/// assert_eq!(format_percentage(f64::INFINITY), "+∞%");
/// ```
pub fn format_percentage(percentage: f64) -> String {
    let value = if percentage == f64::INFINITY {
        "∞".to_string()
    } else {
        format!("{:.2}", percentage)
    };
    format!("{}{}%", plus_sign(percentage), value)
}
