//! Sort helpers for list views.
//!
//! Bed and room numbers are strings like "B-12" or "West 3"; ordering them
//! lexicographically puts "B-10" before "B-2". These helpers compare by the
//! embedded number instead. All helpers are tie-stable: equal keys keep
//! their incoming order (callers use `sort_by`, which is stable).

use std::cmp::Ordering;

/// Extract the digits of a numbered label as one integer ("B-12" -> 12,
/// "Ward 3 Bay 2" -> 32, no digits -> 0).
pub fn numeric_key(label: &str) -> u64 {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Compare two numbered labels by their numeric key.
pub fn compare_numbered(a: &str, b: &str) -> Ordering {
    numeric_key(a).cmp(&numeric_key(b))
}

/// Case-insensitive comparison for resolved display names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
