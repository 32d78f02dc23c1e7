//! Integer minor-unit money helpers.
//!
//! Every amount handled by the pricing and reporting code is an integer count
//! of minor currency units (cents). Percent factors are carried as [`Decimal`]
//! and the product is rounded back to a whole minor unit, half-up.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Amount in minor currency units (e.g. centavos)
pub type MinorUnits = i64;

/// Clamp an incoming amount so negative values count as zero
pub fn non_negative(amount: MinorUnits) -> MinorUnits {
    amount.max(0)
}

/// Round a decimal amount to the nearest whole minor unit, half-up
///
/// Values that do not fit in [`MinorUnits`] saturate.
pub fn round_half_up(value: Decimal) -> MinorUnits {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        MinorUnits::MIN
    } else {
        MinorUnits::MAX
    })
}

/// `amount * factor`, rounded half-up to a whole minor unit
pub fn mul_round(amount: MinorUnits, factor: Decimal) -> MinorUnits {
    match Decimal::from(amount).checked_mul(factor) {
        Some(product) => round_half_up(product),
        None if factor.is_sign_negative() == (amount < 0) => MinorUnits::MAX,
        None => MinorUnits::MIN,
    }
}

/// Ratio `part / whole` as a fraction rounded to four decimal places
///
/// Returns zero when `whole` is zero.
pub fn ratio(part: u64, whole: u64) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) / Decimal::from(whole))
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}
