//! Money helpers for display totals
//!
//! Prices travel as `f64`. Sums shown to the user are computed with
//! `Decimal` so that adding many lines never drifts, then formatted as
//! Indonesian rupiah.

use rust_decimal::prelude::*;

/// Convert a wire amount to `Decimal`; non-finite values become zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert back to `f64`, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `unit_price * quantity`
pub fn line_total(unit_price: f64, quantity: u32) -> Decimal {
    to_decimal(unit_price) * Decimal::from(quantity)
}

/// Sum of amounts
pub fn sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().map(to_decimal).sum()
}

/// Format as rupiah without fraction digits: `Rp 35.000`
pub fn format_idr(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .to_string();

    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, c) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if amount.is_sign_negative() && !grouped.chars().all(|c| c == '0') {
        "-"
    } else {
        ""
    };
    format!("{sign}Rp {grouped}")
}

/// [`format_idr`] for a wire amount
pub fn format_idr_f64(amount: f64) -> String {
    format_idr(to_decimal(amount))
}
