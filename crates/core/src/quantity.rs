//! Boundary conversions for string-encoded numeric fields.
//!
//! Quantities and costs are stored as display strings so the UI can show
//! fractional text like "1/2". Every component that needs arithmetic goes
//! through these two functions and works in [`Decimal`] internally.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a display quantity. Accepts plain decimal text ("1.86", "2") and
/// simple fractions ("1/2", "3/4"). Returns `None` for anything else,
/// including division by zero.
pub fn parse_quantity(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some((num, den)) = s.split_once('/') {
        let num = Decimal::from_str(num.trim()).ok()?;
        let den = Decimal::from_str(den.trim()).ok()?;
        if den.is_zero() {
            return None;
        }
        return Some(num / den);
    }

    Decimal::from_str(s).ok()
}

/// Render a quantity without trailing zeros: 2.00 → "2", 1.860 → "1.86".
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Render a cost with exactly two decimal places.
pub fn format_cost(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
