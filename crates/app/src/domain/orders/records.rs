//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        catalog::{
            pricing::{self, PricingError},
            records::{CatalogItemUuid, ItemKind},
        },
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Fulfillment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Delivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Statuses shown under current orders.
    pub const ACTIVE: [Self; 3] = [Self::Pending, Self::Preparing, Self::Delivery];

    /// Statuses shown under past orders.
    pub const HISTORICAL: [Self; 2] = [Self::Delivered, Self::Cancelled];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Delivery => "delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Preparing | Self::Delivery)
    }

    /// Delivered and cancelled orders are final.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        self.is_active() || self as u8 == next as u8
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "delivery" => Ok(Self::Delivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub total_amount: u64,
    pub status: OrderStatus,
    pub payment_method: String,
    pub payment_status: String,
    pub delivery_address: String,
    pub delivery_lat: Option<f64>,
    pub delivery_lng: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
///
/// `price_at_time` and `name` are frozen at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub item_kind: ItemKind,
    pub item_uuid: CatalogItemUuid,
    pub name: String,
    pub quantity: u32,
    pub price_at_time: u64,
}

impl OrderItemRecord {
    /// # Errors
    ///
    /// Returns `Overflow` when the line total does not fit.
    pub fn line_total(&self) -> Result<u64, PricingError> {
        pricing::line_total(self.price_at_time, self.quantity)
    }
}

/// An order together with its items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithItems {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

/// A user's orders split into current and past, newest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderHistory {
    pub active: Vec<OrderWithItems>,
    pub historical: Vec<OrderWithItems>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    pub uuid: OrderUuid,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn statuses_round_trip_through_strings() -> TestResult {
        for status in OrderStatus::ACTIVE.into_iter().chain(OrderStatus::HISTORICAL) {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        assert!("shipped".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn active_and_historical_partition_all_statuses() {
        assert!(OrderStatus::ACTIVE.iter().all(|status| status.is_active()));
        assert!(OrderStatus::HISTORICAL.iter().all(|status| !status.is_active()));
    }

    #[test]
    fn final_statuses_cannot_move() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Preparing));
        assert!(OrderStatus::Delivery.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Delivery));
        assert!(OrderStatus::Delivered.can_transition_to(OrderStatus::Delivered));
    }
}
