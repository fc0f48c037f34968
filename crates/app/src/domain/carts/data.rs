//! Cart Data

use std::str::FromStr;

use thiserror::Error;

use crate::domain::{
    carts::records::CartLineRecord,
    catalog::records::{CatalogItemUuid, ItemKind},
};

/// Largest quantity a single cart line may hold. Mirrored by the
/// `cart_lines_quantity_max` constraint.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// New Cart Line Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub item_kind: ItemKind,
    pub item_uuid: CatalogItemUuid,
    pub quantity: u32,
}

/// Change applied to a single cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityAction {
    Increase,
    Decrease,
    Remove,
}

impl QuantityAction {
    /// New quantity after the action, or `None` when the line goes away.
    ///
    /// Decreasing stops at 1; only `Remove` deletes a line.
    #[must_use]
    pub const fn apply(self, quantity: u32) -> Option<u32> {
        match self {
            Self::Increase => Some(quantity.saturating_add(1)),
            Self::Decrease => {
                if quantity > 1 {
                    Some(quantity - 1)
                } else {
                    Some(1)
                }
            }
            Self::Remove => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown cart action: {0}")]
pub struct UnknownQuantityAction(pub String);

impl FromStr for QuantityAction {
    type Err = UnknownQuantityAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            "remove" => Ok(Self::Remove),
            other => Err(UnknownQuantityAction(other.to_string())),
        }
    }
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, PartialEq)]
pub enum CartLineUpdate {
    Updated(CartLineRecord),
    Removed,
}

/// A line added to the cart, with the new number of lines for the badge.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedCartLine {
    pub line: CartLineRecord,
    pub cart_lines: u64,
}
