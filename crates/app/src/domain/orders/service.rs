//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{error, info};

use crate::{
    database::Db,
    domain::{
        carts::repository::PgCartLinesRepository,
        messages::repository::PgMessagesRepository,
        orders::{
            checkout::{self, CheckoutPlan},
            data::{Checkout, OrderFilter},
            errors::OrdersServiceError,
            records::{
                OrderHistory, OrderRecord, OrderStatus, OrderUuid, OrderWithItems, PlacedOrder,
            },
            repositories::{NewOrder, PgOrderItemsRepository, PgOrdersRepository},
        },
        users::{records::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    lines: PgCartLinesRepository,
    users: PgUsersRepository,
    messages: PgMessagesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            lines: PgCartLinesRepository::new(),
            users: PgUsersRepository::new(),
            messages: PgMessagesRepository::new(),
        }
    }

    /// All writes of a planned checkout. The caller owns the commit.
    async fn write_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        plan: &CheckoutPlan,
    ) -> Result<(), sqlx::Error> {
        self.orders
            .create_order(
                tx,
                NewOrder {
                    uuid: plan.order_uuid,
                    user,
                    total_amount: plan.total,
                    payment_method: &plan.payment_method,
                    delivery_address: &plan.delivery_address,
                    delivery_lat: plan.delivery_lat,
                    delivery_lng: plan.delivery_lng,
                },
            )
            .await?;

        for line in &plan.lines {
            self.items.create_item(tx, plan.order_uuid, line).await?;
        }

        self.lines.clear(tx, user).await?;

        self.messages
            .create_message(tx, user, &plan.confirmation, None)
            .await?;

        Ok(())
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderWithItems>, sqlx::Error> {
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();
        let mut items = self.items.list_items_for_orders(tx, &uuids).await?;

        Ok(orders
            .into_iter()
            .map(|order| OrderWithItems {
                items: items.remove(&order.uuid).unwrap_or_default(),
                order,
            })
            .collect())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        user: UserUuid,
        request: Checkout,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let mut tx = self
            .db
            .begin_user_transaction(user)
            .await
            .map_err(OrdersServiceError::CheckoutFailed)?;

        // Serializes concurrent checkouts by the same user.
        let account = self
            .users
            .lock_user(&mut tx, user)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::NotFound,
                other => OrdersServiceError::CheckoutFailed(other),
            })?;

        let lines = self
            .lines
            .lock_lines(&mut tx, user)
            .await
            .map_err(OrdersServiceError::CheckoutFailed)?;

        let plan = match checkout::plan(lines, &account, &request, Timestamp::now()) {
            Ok(plan) => plan,
            Err(OrdersServiceError::InvalidPricing(pricing)) => {
                error!(user = %user, error = %pricing, "cart holds an item with invalid pricing");

                return Err(OrdersServiceError::InvalidPricing(pricing));
            }
            Err(other) => return Err(other),
        };

        self.write_order(&mut tx, user, &plan)
            .await
            .map_err(OrdersServiceError::CheckoutFailed)?;

        tx.commit().await.map_err(OrdersServiceError::CheckoutFailed)?;

        info!(
            user = %user,
            order = %plan.order_uuid,
            total = plan.total,
            lines = plan.lines.len(),
            "order placed"
        );

        Ok(PlacedOrder {
            uuid: plan.order_uuid,
            total: plan.total,
        })
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        filter: OrderFilter,
    ) -> Result<OrderHistory, OrdersServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let mut history = OrderHistory::default();

        if filter.includes_active() {
            let orders = self
                .orders
                .list_orders(&mut tx, user, &OrderStatus::ACTIVE)
                .await?;

            history.active = self.attach_items(&mut tx, orders).await?;
        }

        if filter.includes_historical() {
            let orders = self
                .orders
                .list_orders(&mut tx, user, &OrderStatus::HISTORICAL)
                .await?;

            history.historical = self.attach_items(&mut tx, orders).await?;
        }

        tx.commit().await?;

        Ok(history)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderWithItems, OrdersServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let record = self
            .orders
            .get_order(&mut tx, order)
            .await?
            .filter(|record| record.user_uuid == user)
            .ok_or(OrdersServiceError::NotFound)?;

        let mut with_items = self.attach_items(&mut tx, vec![record]).await?;

        tx.commit().await?;

        with_items.pop().ok_or(OrdersServiceError::NotFound)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .orders
            .get_order_for_update(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if !current.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidStatusTransition {
                from: current.status,
                to: status,
            });
        }

        let updated = self.orders.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        info!(order = %order, from = %current.status, to = %status, "order status updated");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart into an order.
    ///
    /// The order, its items, the emptied cart and the confirmation message
    /// are committed together or not at all.
    async fn checkout(
        &self,
        user: UserUuid,
        request: Checkout,
    ) -> Result<PlacedOrder, OrdersServiceError>;

    async fn list_orders(
        &self,
        user: UserUuid,
        filter: OrderFilter,
    ) -> Result<OrderHistory, OrdersServiceError>;

    /// One of the user's own orders.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderWithItems, OrdersServiceError>;

    /// Operator status change. Requires a connection that is not subject to
    /// row-level security.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
