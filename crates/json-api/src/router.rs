//! App Router

use salvo::Router;

use crate::{auth, carts, catalog, healthcheck, messages, observability, orders, users};

/// Registration, login and probes are public; everything else needs a bearer
/// token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("users").post(users::register::handler))
        .push(Router::with_path("sessions").post(users::login::handler))
        .push(
            Router::new()
                .hoop(auth::require_bearer)
                .push(Router::with_path("sessions").delete(users::logout::handler))
                .push(Router::with_path("profile").get(users::profile::handler))
                .push(
                    Router::with_path("services")
                        .get(catalog::services::handler)
                        .push(Router::with_path("{service}").get(catalog::service::handler)),
                )
                .push(Router::with_path("menu").get(catalog::menu::handler))
                .push(
                    Router::with_path("cart").get(carts::get::handler).push(
                        Router::with_path("items")
                            .post(carts::items::create::handler)
                            .push(
                                Router::with_path("{line}")
                                    .patch(carts::items::update::handler)
                                    .delete(carts::items::delete::handler),
                            ),
                    ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                )
                .push(Router::with_path("messages").get(messages::index::handler)),
        )
}
