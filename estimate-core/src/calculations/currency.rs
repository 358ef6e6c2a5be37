//! Display formatting for amounts and areas.
//!
//! Output follows Vietnamese conventions: `.` groups thousands, `,` marks the
//! decimal part, and the dong sign trails the amount after a non-breaking
//! space. Rounding happens here only; the amounts stored in an
//! [`crate::EstimateResult`] keep full precision.

use rust_decimal::Decimal;

use crate::calculations::common::{round_half_up, round_whole};

const NBSP: char = '\u{a0}';

/// Formats an amount as Vietnamese dong, rounded to whole dong.
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::calculations::format_vnd;
///
/// assert_eq!(format_vnd(dec!(833280000)), "833.280.000\u{a0}₫");
/// assert_eq!(format_vnd(dec!(1499.5)), "1.500\u{a0}₫");
/// ```
pub fn format_vnd(amount: Decimal) -> String {
    let rounded = round_whole(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{}{NBSP}₫",
        group_thousands(&rounded.abs().to_string())
    )
}

/// Formats an area in square metres with at most two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::calculations::format_area;
///
/// assert_eq!(format_area(dec!(48.0)), "48 m²");
/// assert_eq!(format_area(dec!(1234.5)), "1.234,5 m²");
/// ```
pub fn format_area(area: Decimal) -> String {
    let rounded = round_half_up(area).normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    match fraction {
        Some(fraction) => format!("{sign}{},{fraction} m²", group_thousands(whole)),
        None => format!("{sign}{} m²", group_thousands(whole)),
    }
}

/// Inserts `.` between groups of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
