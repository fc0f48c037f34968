//! Order Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bitebuddy_app::domain::orders::records::{OrderItemRecord, OrderWithItems};

use crate::extensions::*;

/// Order Response
///
/// Amounts are in paise and fixed at checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// `pending`, `preparing`, `delivery`, `delivered` or `cancelled`
    pub status: String,

    pub total_amount: u64,
    pub total_display: String,
    pub payment_method: String,
    pub payment_status: String,
    pub delivery_address: String,
    pub delivery_lat: Option<f64>,
    pub delivery_lng: Option<f64>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub item_kind: String,
    pub item_uuid: Uuid,

    /// Name at the time of ordering
    pub name: String,

    pub quantity: u32,

    /// Unit price at the time of ordering
    pub price_at_time: u64,

    pub line_total: u64,
}

impl OrderItemResponse {
    fn try_from_record(item: OrderItemRecord) -> Result<Self, StatusError> {
        let line_total = item.line_total().or_500("order item total overflowed")?;

        Ok(Self {
            uuid: item.uuid.into_uuid(),
            item_kind: item.item_kind.to_string(),
            item_uuid: item.item_uuid.into_uuid(),
            name: item.name,
            quantity: item.quantity,
            price_at_time: item.price_at_time,
            line_total,
        })
    }
}

impl OrderResponse {
    pub(crate) fn try_from_order(order: OrderWithItems) -> Result<Self, StatusError> {
        let OrderWithItems { order, items } = order;

        Ok(Self {
            uuid: order.uuid.into_uuid(),
            status: order.status.to_string(),
            total_amount: order.total_amount,
            total_display: order.total_amount.to_inr_or_500()?,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            delivery_address: order.delivery_address,
            delivery_lat: order.delivery_lat,
            delivery_lng: order.delivery_lng,
            items: items
                .into_iter()
                .map(OrderItemResponse::try_from_record)
                .collect::<Result<_, _>>()?,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        })
    }

    pub(crate) fn try_from_orders(orders: Vec<OrderWithItems>) -> Result<Vec<Self>, StatusError> {
        orders.into_iter().map(Self::try_from_order).collect()
    }
}
