//! Test Helpers

use crate::{
    domain::{
        carts::{CartsService, data::NewCartLine, records::CartLineRecord},
        catalog::{
            CatalogService,
            data::NewCatalogItem,
            records::CatalogItemRecord,
        },
        users::{data::NewUser, records::UserUuid},
    },
    test::TestContext,
};

pub(crate) fn new_user(mobile: &str, email: &str) -> NewUser {
    NewUser {
        name: "Asha Rao".to_string(),
        mobile: mobile.to_string(),
        email: email.to_string(),
        password: "secret-pass".to_string(),
        password_confirmation: "secret-pass".to_string(),
        location: Some("12 MG Road, Bengaluru".to_string()),
        profile_pic_url: None,
    }
}

pub(crate) fn catalog_item(name: &str, base_price: u64, discount: u64) -> NewCatalogItem {
    NewCatalogItem {
        name: name.to_string(),
        base_price,
        discount,
        ..NewCatalogItem::default()
    }
}

pub(crate) async fn create_menu_item(
    ctx: &TestContext,
    name: &str,
    base_price: u64,
    discount: u64,
) -> CatalogItemRecord {
    ctx.catalog
        .create_menu_item(catalog_item(name, base_price, discount))
        .await
        .expect("Failed to create menu item")
}

pub(crate) async fn create_service(
    ctx: &TestContext,
    name: &str,
    base_price: u64,
    discount: u64,
) -> CatalogItemRecord {
    ctx.catalog
        .create_service(catalog_item(name, base_price, discount))
        .await
        .expect("Failed to create service")
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    item: &CatalogItemRecord,
    quantity: u32,
) -> CartLineRecord {
    ctx.carts
        .add_item(
            user,
            NewCartLine {
                item_kind: item.kind,
                item_uuid: item.uuid,
                quantity,
            },
        )
        .await
        .expect("Failed to add item to cart")
        .line
}
