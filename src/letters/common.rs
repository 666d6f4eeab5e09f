//! Common utilities for document generation.
//!
//! Shared sanitizers applied at the form mutation boundary, date helpers and
//! filename building.

use chrono::{Local, NaiveDate};
use std::path::Path;

/// Today's date on the server clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !last_dash && !result.is_empty() {
            result.push('-');
            last_dash = true;
        }
    }

    let result = result.trim_matches('-');
    if result.is_empty() {
        return fallback.to_string();
    }
    result.to_string()
}

/// Keeps digits and the first decimal point; everything else is dropped.
pub fn sanitize_amount(raw: &str) -> String {
    let mut seen_point = false;
    raw.chars()
        .filter(|&c| {
            if c == '.' {
                !std::mem::replace(&mut seen_point, true)
            } else {
                c.is_ascii_digit()
            }
        })
        .collect()
}

/// Sanitizes `raw` and keeps at most `max_digits` digits.
pub fn limit_amount(raw: &str, max_digits: usize) -> String {
    let mut digits = 0;
    sanitize_amount(raw)
        .chars()
        .filter(|c| {
            if c.is_ascii_digit() {
                digits += 1;
                digits <= max_digits
            } else {
                true
            }
        })
        .collect()
}

/// Number of digits in an amount string.
pub fn amount_digits(amount: &str) -> usize {
    amount.chars().filter(char::is_ascii_digit).count()
}

/// Truncates `value` to at most `max` characters.
pub fn limit_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((end, _)) => value[..end].to_string(),
        None => value.to_string(),
    }
}

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}
