//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (pings the database)
//!
//! # Public storefront API
//! GET  /api/products                  - Product listing (q, category, paging)
//! GET  /api/products/{id}             - Product detail
//! GET  /api/categories                - Category listing
//! GET  /api/services                  - Offered service types
//! POST /api/services                  - Request a service booking
//! POST /api/orders                    - Dispatches on "operation":
//!                                       shipping / tax / cod / create
//! GET  /api/orders/{order_number}     - Order confirmation lookup
//!
//! # Auth (rate limited per IP)
//! POST /api/auth/login                - Staff login
//! POST /api/auth/logout               - Logout
//! GET  /api/auth/me                   - Current staff user
//!
//! # Admin API (staff session required)
//! GET/POST       /api/admin/products
//! GET/PUT/DELETE /api/admin/products/{id}
//! GET            /api/admin/orders
//! GET/PUT/DELETE /api/admin/orders/{id}
//! GET/POST       /api/admin/customers
//! GET/PUT/DELETE /api/admin/customers/{id}
//! GET            /api/admin/services
//! GET/PUT/DELETE /api/admin/services/{id}
//! GET/POST       /api/admin/categories
//! GET/PUT/DELETE /api/admin/categories/{id}
//! GET/POST       /api/admin/staff       (super admin)
//! DELETE         /api/admin/staff/{id}  (super admin)
//! ```

pub mod admin;
pub mod auth;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;
pub mod services;

use axum::{
    Json, Router,
    http::{Method, header},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::middleware;
use crate::state::AppState;

/// Wrap a payload in the success envelope.
pub(crate) fn ok<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Create the public storefront API router.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(categories::list))
        .route("/services", get(services::list).post(services::create))
        .route("/orders", post(orders::dispatch))
        .route("/orders/{order_number}", get(orders::show))
}

/// CORS for the public storefront API.
///
/// The storefront endpoints are cookie-free and may be called from any
/// origin; the auth and admin APIs stay same-origin (session cookies are
/// `SameSite=Strict`) and get no CORS headers.
fn storefront_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the auth router. Mounted behind the IP rate limiter.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the admin API router. Handlers enforce roles via extractors.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(admin::products::list).post(admin::products::create),
        )
        .route(
            "/products/{id}",
            get(admin::products::show)
                .put(admin::products::update)
                .delete(admin::products::delete),
        )
        .route("/orders", get(admin::orders::list))
        .route(
            "/orders/{id}",
            get(admin::orders::show)
                .put(admin::orders::update_status)
                .delete(admin::orders::delete),
        )
        .route(
            "/customers",
            get(admin::customers::list).post(admin::customers::create),
        )
        .route(
            "/customers/{id}",
            get(admin::customers::show)
                .put(admin::customers::update)
                .delete(admin::customers::delete),
        )
        .route("/services", get(admin::bookings::list))
        .route(
            "/services/{id}",
            get(admin::bookings::show)
                .put(admin::bookings::update_status)
                .delete(admin::bookings::delete),
        )
        .route(
            "/categories",
            get(admin::categories::list).post(admin::categories::create),
        )
        .route(
            "/categories/{id}",
            get(admin::categories::show)
                .put(admin::categories::update)
                .delete(admin::categories::delete),
        )
        .route("/staff", get(admin::staff::list).post(admin::staff::create))
        .route("/staff/{id}", axum::routing::delete(admin::staff::delete))
}

/// Assemble the full application router.
pub fn create_router(
    state: AppState,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .nest(
            "/api/auth",
            auth_routes().layer(middleware::auth_rate_limiter()),
        )
        .nest("/api/admin", admin_routes())
        .nest("/api", public_routes().layer(storefront_cors()))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
