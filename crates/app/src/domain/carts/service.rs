//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{AddedCartLine, CartLineUpdate, MAX_LINE_QUANTITY, NewCartLine, QuantityAction},
            errors::CartsServiceError,
            records::{Cart, CartLineUuid},
            repository::PgCartLinesRepository,
        },
        catalog::{pricing, repository::PgCatalogRepository},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    lines: PgCartLinesRepository,
    catalog: PgCatalogRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            lines: PgCartLinesRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<AddedCartLine, CartsServiceError> {
        if !(1..=MAX_LINE_QUANTITY).contains(&line.quantity) {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_user_transaction(user).await?;

        let item = self
            .catalog
            .get_item(&mut tx, line.item_uuid, Some(line.item_kind))
            .await?;

        if !item.is_orderable_at(Timestamp::now()) {
            return Err(CartsServiceError::NotFound);
        }

        // A quantity the customer asked for must never make the cart unpriceable.
        pricing::line_total(item.final_price()?, line.quantity)
            .map_err(|_overflow| CartsServiceError::InvalidQuantity)?;

        // Merging past the cap trips `cart_lines_quantity_max`.
        let line = self.lines.upsert_line(&mut tx, user, line).await?;
        let cart_lines = self.lines.count_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(AddedCartLine { line, cart_lines })
    }

    async fn update_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        action: QuantityAction,
    ) -> Result<CartLineUpdate, CartsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let current = self
            .lines
            .get_line_for_update(&mut tx, line)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        current.ensure_owned_by(user)?;

        let update = match action.apply(current.quantity) {
            Some(quantity) if quantity > MAX_LINE_QUANTITY => {
                return Err(CartsServiceError::InvalidQuantity);
            }
            Some(quantity) if quantity == current.quantity => CartLineUpdate::Updated(current),
            Some(quantity) => {
                CartLineUpdate::Updated(self.lines.set_quantity(&mut tx, line, quantity).await?)
            }
            None => {
                if self.lines.delete_line(&mut tx, line).await? == 0 {
                    return Err(CartsServiceError::NotFound);
                }

                CartLineUpdate::Removed
            }
        };

        tx.commit().await?;

        Ok(update)
    }

    async fn list_for_user(
        &self,
        user: UserUuid,
        point_in_time: Timestamp,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let lines = self.lines.list_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(Cart::price(lines, point_in_time)?)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add `line.quantity` of an orderable catalog item, merging with any
    /// existing line for the same item.
    async fn add_item(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<AddedCartLine, CartsServiceError>;

    /// Apply an action to one of the user's own lines.
    async fn update_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        action: QuantityAction,
    ) -> Result<CartLineUpdate, CartsServiceError>;

    /// The user's cart priced as of `point_in_time`.
    async fn list_for_user(
        &self,
        user: UserUuid,
        point_in_time: Timestamp,
    ) -> Result<Cart, CartsServiceError>;
}
