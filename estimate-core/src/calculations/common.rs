//! Common rounding helpers shared by the calculator and the formatters.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to a whole number, halves away from zero.
pub fn round_whole(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Expresses a ratio as a whole percentage, e.g. `0.6` becomes `60`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::calculations::common::whole_percent;
///
/// assert_eq!(whole_percent(dec!(0.6)).to_string(), "60");
/// assert_eq!(whole_percent(dec!(1.5)).to_string(), "150");
/// ```
pub fn whole_percent(ratio: Decimal) -> Decimal {
    round_whole(ratio * Decimal::ONE_HUNDRED)
}
