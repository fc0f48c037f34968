//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        carts::errors::CartsServiceError,
        catalog::{
            pricing::{self, PricingError},
            records::{CatalogItemRecord, CatalogItemUuid, ItemKind},
        },
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLineRecord>;

/// Cart Line Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineRecord {
    pub uuid: CartLineUuid,
    pub user_uuid: UserUuid,
    pub item_kind: ItemKind,
    pub item_uuid: CatalogItemUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartLineRecord {
    /// Capability check required before any mutation of this line.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the line belongs to someone else, so callers
    /// cannot tell foreign lines from missing ones.
    pub fn ensure_owned_by(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        if self.user_uuid == user {
            Ok(())
        } else {
            Err(CartsServiceError::NotFound)
        }
    }
}

/// A cart line joined with its catalog item as currently stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineWithItem {
    pub line: CartLineRecord,
    pub item: CatalogItemRecord,
}

/// One priced line of a cart view.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub line: CartLineRecord,
    pub item: CatalogItemRecord,
    pub unit_price: u64,
    pub line_total: u64,
    pub available: bool,
}

/// A user's cart, most recently added first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    pub entries: Vec<CartEntry>,

    /// Sum over available lines only.
    pub total: u64,
}

impl Cart {
    /// Price every line as of `point_in_time`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] when any item carries inconsistent pricing.
    pub fn price(
        lines: Vec<CartLineWithItem>,
        point_in_time: Timestamp,
    ) -> Result<Self, PricingError> {
        let mut entries = Vec::with_capacity(lines.len());

        for CartLineWithItem { line, item } in lines {
            let unit_price = item.final_price()?;
            let line_total = pricing::line_total(unit_price, line.quantity)?;
            let available = item.is_orderable_at(point_in_time);

            entries.push(CartEntry {
                line,
                item,
                unit_price,
                line_total,
                available,
            });
        }

        let total = pricing::sum(
            entries
                .iter()
                .filter(|entry| entry.available)
                .map(|entry| entry.line_total),
        )?;

        Ok(Self { entries, total })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::domain::catalog::records::AvailabilityWindow;

    use super::*;

    fn line_with_item(
        kind: ItemKind,
        base_price: i64,
        discount: i64,
        quantity: u32,
    ) -> CartLineWithItem {
        let item = CatalogItemRecord {
            uuid: CatalogItemUuid::new(),
            kind,
            name: "Item".to_string(),
            category: None,
            description: None,
            image_url: None,
            base_price,
            discount,
            serial_number: None,
            availability: AvailabilityWindow::default(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        };

        CartLineWithItem {
            line: CartLineRecord {
                uuid: CartLineUuid::new(),
                user_uuid: UserUuid::new(),
                item_kind: kind,
                item_uuid: item.uuid,
                quantity,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            item,
        }
    }

    #[test]
    fn ownership_check_rejects_other_users() {
        let line = line_with_item(ItemKind::Menu, 100, 0, 1).line;

        assert!(line.ensure_owned_by(line.user_uuid).is_ok());
        assert!(matches!(
            line.ensure_owned_by(UserUuid::new()),
            Err(CartsServiceError::NotFound)
        ));
    }

    #[test]
    fn prices_each_line_and_totals() -> TestResult {
        let cart = Cart::price(
            vec![
                line_with_item(ItemKind::Service, 500, 50, 2),
                line_with_item(ItemKind::Menu, 120, 0, 3),
            ],
            Timestamp::now(),
        )?;

        let totals: Vec<u64> = cart.entries.iter().map(|entry| entry.line_total).collect();

        assert_eq!(totals, vec![900, 360]);
        assert_eq!(cart.total, 1_260);

        Ok(())
    }

    #[test]
    fn unavailable_lines_are_listed_but_not_totalled() -> TestResult {
        let mut stale = line_with_item(ItemKind::Menu, 300, 0, 1);
        stale.item.deleted_at = Some(Timestamp::UNIX_EPOCH);

        let cart = Cart::price(
            vec![stale, line_with_item(ItemKind::Menu, 120, 20, 1)],
            Timestamp::now(),
        )?;

        assert_eq!(cart.entries.len(), 2);
        assert!(!cart.entries.first().is_some_and(|entry| entry.available));
        assert_eq!(cart.total, 100);

        Ok(())
    }

    #[test]
    fn bad_pricing_is_an_error_not_an_empty_cart() {
        let result = Cart::price(
            vec![line_with_item(ItemKind::Menu, 10, 20, 1)],
            Timestamp::now(),
        );

        assert!(matches!(
            result,
            Err(PricingError::DiscountExceedsBase { .. })
        ));
    }
}
