//! Checkout planning.
//!
//! Turns a locked cart into the rows a checkout writes. Nothing here touches
//! the database, so every rejection happens before the first write.

use jiff::Timestamp;

use crate::{
    domain::{
        carts::records::CartLineWithItem,
        catalog::{
            pricing::{self, PricingError},
            records::{CatalogItemUuid, ItemKind},
        },
        orders::{
            data::{Checkout, DEFAULT_PAYMENT_METHOD},
            errors::OrdersServiceError,
            records::OrderUuid,
        },
        users::records::UserRecord,
    },
    money,
};

/// A cart line with its price frozen for the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PricedLine {
    pub item_kind: ItemKind,
    pub item_uuid: CatalogItemUuid,
    pub name: String,
    pub quantity: u32,
    pub price_at_time: u64,
}

/// Everything checkout writes, computed up front.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CheckoutPlan {
    pub order_uuid: OrderUuid,
    pub lines: Vec<PricedLine>,
    pub total: u64,
    pub payment_method: String,
    pub delivery_address: String,
    pub delivery_lat: Option<f64>,
    pub delivery_lng: Option<f64>,
    pub confirmation: String,
}

/// Validate and price a locked cart.
///
/// # Errors
///
/// - `EmptyCart` when there are no lines.
/// - `StaleItem` for the first line whose item was deleted or is outside
///   its availability window.
/// - `InvalidPricing` for inconsistent prices or overflowing totals.
/// - `MissingDeliveryAddress` when neither the request nor the profile has one.
/// - `InvalidDeliveryLocation` for out of range coordinates.
pub(crate) fn plan(
    lines: Vec<CartLineWithItem>,
    user: &UserRecord,
    request: &Checkout,
    point_in_time: Timestamp,
) -> Result<CheckoutPlan, OrdersServiceError> {
    if lines.is_empty() {
        return Err(OrdersServiceError::EmptyCart);
    }

    let mut priced = Vec::with_capacity(lines.len());
    let mut line_totals = Vec::with_capacity(lines.len());

    for CartLineWithItem { line, item } in lines {
        if !item.is_orderable_at(point_in_time) {
            return Err(OrdersServiceError::StaleItem {
                item_kind: line.item_kind,
                item_uuid: line.item_uuid,
            });
        }

        let price_at_time = item.final_price()?;
        line_totals.push(pricing::line_total(price_at_time, line.quantity)?);

        priced.push(PricedLine {
            item_kind: line.item_kind,
            item_uuid: line.item_uuid,
            name: item.name,
            quantity: line.quantity,
            price_at_time,
        });
    }

    let total = pricing::sum(line_totals)?;

    let delivery_address = non_blank(request.delivery_address.as_deref())
        .or_else(|| non_blank(user.location.as_deref()))
        .ok_or(OrdersServiceError::MissingDeliveryAddress)?
        .to_string();

    validate_coordinates(request.delivery_lat, request.delivery_lng)?;

    let payment_method = non_blank(request.payment_method.as_deref())
        .unwrap_or(DEFAULT_PAYMENT_METHOD)
        .to_string();

    let order_uuid = OrderUuid::new();
    let formatted_total =
        money::format_inr(total).map_err(|_overflow| PricingError::Overflow)?;

    Ok(CheckoutPlan {
        order_uuid,
        lines: priced,
        total,
        payment_method,
        delivery_address,
        delivery_lat: request.delivery_lat,
        delivery_lng: request.delivery_lng,
        confirmation: format!("Order #{order_uuid} confirmed! Total: {formatted_total}"),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn validate_coordinates(lat: Option<f64>, lng: Option<f64>) -> Result<(), OrdersServiceError> {
    let lat_ok = lat.is_none_or(|lat| lat.is_finite() && (-90.0..=90.0).contains(&lat));
    let lng_ok = lng.is_none_or(|lng| lng.is_finite() && (-180.0..=180.0).contains(&lng));

    if lat_ok && lng_ok {
        Ok(())
    } else {
        Err(OrdersServiceError::InvalidDeliveryLocation)
    }
}
