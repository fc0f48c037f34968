//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use bitebuddy_app::{
    context::AppContext,
    domain::{
        carts::{MockCartsService, records::CartLineRecord},
        catalog::{
            MockCatalogService,
            records::{AvailabilityWindow, CatalogItemRecord, CatalogItemUuid, ItemKind},
        },
        messages::MockMessagesService,
        orders::{
            MockOrdersService,
            records::{OrderRecord, OrderStatus, OrderUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_TOKEN: &str = "bb_test_token";

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    depot.insert_bearer_token(TEST_TOKEN.to_string());
    ctrl.call_next(req, depot, res).await;
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_register().never();
    users.expect_login().never();
    users.expect_issue_token().never();
    users.expect_authenticate_bearer().never();
    users.expect_logout().never();
    users.expect_profile().never();

    users
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_list_services().never();
    catalog.expect_list_menu().never();
    catalog.expect_get_service().never();
    catalog.expect_get_item().never();
    catalog.expect_create_service().never();
    catalog.expect_create_menu_item().never();
    catalog.expect_add_service_item().never();
    catalog.expect_update_pricing().never();
    catalog.expect_delete_item().never();

    catalog
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_item().never();
    carts.expect_update_quantity().never();
    carts.expect_list_for_user().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_checkout().never();
    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_update_status().never();

    orders
}

fn strict_messages_mock() -> MockMessagesService {
    let mut messages = MockMessagesService::new();

    messages.expect_list_messages().never();
    messages.expect_unread_count().never();

    messages
}

/// Every service is a strict mock unless a test swaps one in.
fn strict_app() -> AppContext {
    AppContext {
        users: Arc::new(strict_users_mock()),
        catalog: Arc::new(strict_catalog_mock()),
        carts: Arc::new(strict_carts_mock()),
        orders: Arc::new(strict_orders_mock()),
        messages: Arc::new(strict_messages_mock()),
    }
}

pub(crate) fn state_with_users(users: MockUsersService) -> Arc<State> {
    State::from_app_context(AppContext {
        users: Arc::new(users),
        ..strict_app()
    })
}

fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    State::from_app_context(AppContext {
        catalog: Arc::new(catalog),
        ..strict_app()
    })
}

fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    State::from_app_context(AppContext {
        carts: Arc::new(carts),
        ..strict_app()
    })
}

fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    State::from_app_context(AppContext {
        orders: Arc::new(orders),
        ..strict_app()
    })
}

fn state_with_messages(messages: MockMessagesService) -> Arc<State> {
    State::from_app_context(AppContext {
        messages: Arc::new(messages),
        ..strict_app()
    })
}

fn authenticated_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

/// Routes that do not go through bearer authentication.
pub(crate) fn public_users_service(users: MockUsersService, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with_users(users))).push(route))
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    authenticated_service(state_with_users(users), route)
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    authenticated_service(state_with_catalog(catalog), route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    authenticated_service(state_with_carts(carts), route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    authenticated_service(state_with_orders(orders), route)
}

pub(crate) fn messages_service(messages: MockMessagesService, route: Router) -> Service {
    authenticated_service(state_with_messages(messages), route)
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        name: "Asha".to_string(),
        mobile: "9876543210".to_string(),
        email: "asha@example.com".to_string(),
        location: Some("12 MG Road, Bengaluru".to_string()),
        profile_pic_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_catalog_item(
    uuid: CatalogItemUuid,
    kind: ItemKind,
    base_price: i64,
    discount: i64,
) -> CatalogItemRecord {
    CatalogItemRecord {
        uuid,
        kind,
        name: "Masala Dosa".to_string(),
        category: Some("South Indian".to_string()),
        description: None,
        image_url: None,
        base_price,
        discount,
        serial_number: Some(1),
        availability: AvailabilityWindow::default(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart_line(item: &CatalogItemRecord, quantity: u32) -> CartLineRecord {
    CartLineRecord {
        uuid: Uuid::now_v7().into(),
        user_uuid: TEST_USER_UUID,
        item_kind: item.kind,
        item_uuid: item.uuid,
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, status: OrderStatus, total_amount: u64) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        total_amount,
        status,
        payment_method: "cash".to_string(),
        payment_status: "pending".to_string(),
        delivery_address: "12 MG Road, Bengaluru".to_string(),
        delivery_lat: None,
        delivery_lng: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
