//! Grouped-integer formatting and parsing.
//!
//! Sizes are printed with a comma between every group of three digits
//! (`1234567` becomes `"1,234,567"`) so that long byte counts stay readable in
//! a terminal, and the same text must be accepted back when rows are totalled.

use std::num::ParseIntError;

/// Separator inserted between groups of three digits.
pub const GROUP_SEPARATOR: char = ',';

/// Render an integer with thousands-separator grouping.
///
/// # Examples
///
/// ```
/// # use fork_sizes::utils::group_digits;
/// assert_eq!(group_digits(0), "0");
/// assert_eq!(group_digits(999), "999");
/// assert_eq!(group_digits(1_000), "1,000");
/// assert_eq!(group_digits(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let lead = digits.len() % 3;

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    grouped
}

/// Parse an integer that may contain thousands separators.
///
/// Surrounding whitespace (including the `\r` of CRLF input) is ignored and
/// every [`GROUP_SEPARATOR`] is stripped before parsing, so both `"1,000"` and
/// `"1000"` yield `1000`.
///
/// # Errors
///
/// Returns the underlying [`ParseIntError`] when the remaining text is empty,
/// negative, out of range for `u64`, or contains anything but digits.
pub fn parse_grouped(text: &str) -> Result<u64, ParseIntError> {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| *c != GROUP_SEPARATOR)
        .collect();

    digits.parse()
}
