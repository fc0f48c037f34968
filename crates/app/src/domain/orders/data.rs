//! Order Data

use std::str::FromStr;

use thiserror::Error;

/// Payment method used when the request leaves it blank.
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";

/// Checkout request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Checkout {
    pub payment_method: Option<String>,

    /// Falls back to the user's saved location when blank.
    pub delivery_address: Option<String>,
    pub delivery_lat: Option<f64>,
    pub delivery_lng: Option<f64>,
}

/// Which part of the order history to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    Active,
    Historical,
    #[default]
    All,
}

impl OrderFilter {
    #[must_use]
    pub const fn includes_active(self) -> bool {
        matches!(self, Self::Active | Self::All)
    }

    #[must_use]
    pub const fn includes_historical(self) -> bool {
        matches!(self, Self::Historical | Self::All)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order filter: {0}")]
pub struct UnknownOrderFilter(pub String);

impl FromStr for OrderFilter {
    type Err = UnknownOrderFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "historical" => Ok(Self::Historical),
            "all" => Ok(Self::All),
            other => Err(UnknownOrderFilter(other.to_string())),
        }
    }
}
