//! Money display helpers.
//!
//! Amounts are carried as integer paise everywhere; this module only renders
//! them for people.

use std::num::TryFromIntError;

use rusty_money::{Money, iso};

/// Render an amount in paise as a rupee string, e.g. `1260` as `₹12.60`.
///
/// # Errors
///
/// Returns an error when the amount does not fit a signed 64-bit integer.
pub fn format_inr(amount: u64) -> Result<String, TryFromIntError> {
    let minor = i64::try_from(amount)?;

    Ok(Money::from_minor(minor, iso::INR).to_string())
}

/// Whole-percent discount, rounded down. Zero for free items.
pub fn discount_percent(base_price: u64, discount: u64) -> u64 {
    if base_price == 0 {
        return 0;
    }

    discount.saturating_mul(100) / base_price
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn formats_paise_as_rupees() -> TestResult {
        let formatted = format_inr(1_260)?;

        assert!(formatted.contains('₹'), "expected rupee symbol in {formatted}");
        assert!(formatted.contains("12.60"), "expected 12.60 in {formatted}");

        Ok(())
    }

    #[test]
    fn rejects_amounts_beyond_i64() {
        assert!(format_inr(u64::MAX).is_err());
    }

    #[test]
    fn discount_percent_rounds_down() {
        assert_eq!(discount_percent(500, 50), 10);
        assert_eq!(discount_percent(300, 100), 33);
        assert_eq!(discount_percent(120, 0), 0);
        assert_eq!(discount_percent(0, 0), 0);
    }
}
