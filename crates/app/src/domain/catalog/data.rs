//! Catalog Data

use jiff::Timestamp;

/// New Catalog Item Data, shared by services and menu items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewCatalogItem {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub base_price: u64,
    pub discount: u64,
    pub serial_number: Option<i32>,
    pub available_from: Option<Timestamp>,
    pub available_until: Option<Timestamp>,
}

/// New Service Item Data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewServiceItem {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: u64,
    pub serial_number: i32,
}

/// Pricing Update Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingUpdate {
    pub base_price: u64,
    pub discount: u64,
}
