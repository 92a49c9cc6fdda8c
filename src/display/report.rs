//! Report formatting utilities for terminal output
//!
//! Small helpers shared by the summary and coverage views.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Format a 0..=1 ratio as a percentage with appropriate precision
pub fn format_percentage(ratio: Decimal) -> String {
    let pct = ratio.to_f64().unwrap_or(0.0) * 100.0;
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar for a 0..=1 ratio
pub fn format_bar(ratio: Decimal, width: usize) -> String {
    let value = ratio.to_f64().unwrap_or(0.0);
    if value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = (value * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a date with a user-configured strftime pattern
///
/// Falls back to `YYYY-MM-DD` when the pattern is not valid.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return date.format("%Y-%m-%d").to_string();
    }
    date.format(pattern).to_string()
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
