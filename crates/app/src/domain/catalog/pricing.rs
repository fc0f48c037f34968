//! Price resolution.
//!
//! The effective price of a catalog item is always derived from its base
//! price and discount at read time. Amounts are integer paise, and every
//! multiplication and sum is checked.

use thiserror::Error;

/// Catalog pricing that cannot be turned into a sellable amount.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("base price {0} is negative")]
    NegativeBasePrice(i64),

    #[error("discount {0} is negative")]
    NegativeDiscount(i64),

    #[error("discount {discount} exceeds base price {base_price}")]
    DiscountExceedsBase { base_price: i64, discount: i64 },

    #[error("amount overflowed")]
    Overflow,
}

/// Effective unit price: `base_price - discount`.
///
/// # Errors
///
/// Fails when either value is negative or the discount is larger than the
/// base price. Nothing is clamped.
pub fn resolve(base_price: i64, discount: i64) -> Result<u64, PricingError> {
    if base_price < 0 {
        return Err(PricingError::NegativeBasePrice(base_price));
    }

    if discount < 0 {
        return Err(PricingError::NegativeDiscount(discount));
    }

    if discount > base_price {
        return Err(PricingError::DiscountExceedsBase {
            base_price,
            discount,
        });
    }

    u64::try_from(base_price - discount).map_err(|_overflow| PricingError::Overflow)
}

/// Resolve pricing given as unsigned input, e.g. from an operator command.
///
/// # Errors
///
/// Fails like [`resolve`], or with `Overflow` when a value exceeds `i64`.
pub fn resolve_unsigned(base_price: u64, discount: u64) -> Result<u64, PricingError> {
    let base_price = i64::try_from(base_price).map_err(|_overflow| PricingError::Overflow)?;
    let discount = i64::try_from(discount).map_err(|_overflow| PricingError::Overflow)?;

    resolve(base_price, discount)
}

/// `unit_price × quantity`.
///
/// # Errors
///
/// Fails with `Overflow` when the product does not fit.
pub fn line_total(unit_price: u64, quantity: u32) -> Result<u64, PricingError> {
    unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Checked sum of line totals.
///
/// # Errors
///
/// Fails with `Overflow` when the sum does not fit.
pub fn sum<I>(amounts: I) -> Result<u64, PricingError>
where
    I: IntoIterator<Item = u64>,
{
    amounts
        .into_iter()
        .try_fold(0_u64, |total, amount| total.checked_add(amount))
        .ok_or(PricingError::Overflow)
}
