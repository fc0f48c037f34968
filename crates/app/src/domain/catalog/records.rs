//! Catalog Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::catalog::pricing::{self, PricingError},
    money,
    uuids::TypedUuid,
};

/// Catalog Item UUID
pub type CatalogItemUuid = TypedUuid<CatalogItemRecord>;

/// Which part of the catalog an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Service,
    Menu,
}

impl ItemKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Menu => "menu",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown item kind: {0}")]
pub struct UnknownItemKind(pub String);

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "service" => Ok(Self::Service),
            "menu" => Ok(Self::Menu),
            other => Err(UnknownItemKind(other.to_string())),
        }
    }
}

/// Half-open `[from, until)` range in which an item can be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvailabilityWindow {
    pub from: Option<Timestamp>,
    pub until: Option<Timestamp>,
}

impl AvailabilityWindow {
    #[must_use]
    pub fn contains(&self, at: Timestamp) -> bool {
        self.from.is_none_or(|from| from <= at) && self.until.is_none_or(|until| at < until)
    }
}

/// Catalog Item Record
///
/// Carries the raw pricing columns; the sellable price is derived on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItemRecord {
    pub uuid: CatalogItemUuid,
    pub kind: ItemKind,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub base_price: i64,
    pub discount: i64,
    pub serial_number: Option<i32>,
    pub availability: AvailabilityWindow,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl CatalogItemRecord {
    /// Effective unit price, `base_price - discount`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] for inconsistent catalog data.
    pub fn final_price(&self) -> Result<u64, PricingError> {
        pricing::resolve(self.base_price, self.discount)
    }

    /// Whole-percent discount for display.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] for inconsistent catalog data.
    pub fn discount_percent(&self) -> Result<u64, PricingError> {
        self.final_price()?;

        let base_price = u64::try_from(self.base_price).map_err(|_negative| {
            PricingError::NegativeBasePrice(self.base_price)
        })?;
        let discount = u64::try_from(self.discount)
            .map_err(|_negative| PricingError::NegativeDiscount(self.discount))?;

        Ok(money::discount_percent(base_price, discount))
    }

    /// Not deleted and inside its availability window.
    #[must_use]
    pub fn is_orderable_at(&self, at: Timestamp) -> bool {
        self.deleted_at.is_none() && self.availability.contains(at)
    }
}

/// Service Item UUID
pub type ServiceItemUuid = TypedUuid<ServiceItemRecord>;

/// A dish or option listed under a service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceItemRecord {
    pub uuid: ServiceItemUuid,
    pub service_uuid: CatalogItemUuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: u64,
    pub serial_number: i32,
    pub created_at: Timestamp,
}

/// A service together with its listed items.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDetails {
    pub service: CatalogItemRecord,
    pub items: Vec<ServiceItemRecord>,
}
