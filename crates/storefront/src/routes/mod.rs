//! HTTP route handlers for the storefront and back office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Filtered product listing
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add/{id}          - Add one unit (redirects to /cart)
//! POST /cart/update/{id}       - Adjust quantity (action=increase|decrease)
//! POST /cart/remove/{id}       - Remove a line
//! POST /cart/checkout          - Simulated checkout; empties the cart
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action (role-based redirect)
//! POST /auth/logout            - Logout action
//!
//! # Point of sale (requires register role)
//! GET  /pos                    - Register page
//! POST /pos/scan               - Scan a product id into the sale
//! POST /pos/finalize           - Complete the sale (clears it)
//! POST /pos/clear              - Abandon the sale
//! POST /pos/remove/{id}        - Remove a sale line
//!
//! # Back office (requires auth)
//! GET  /admin                  - Staff dashboard
//! GET  /admin/employees        - Staff directory listing
//! GET  /admin/inventory        - Products with aggregate stock
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;
pub mod pos;
pub mod products;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::filters;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/{id}", post(cart::add))
        .route("/update/{id}", post(cart::update))
        .route("/remove/{id}", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the point-of-sale routes router.
pub fn pos_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pos::show))
        .route("/scan", post(pos::scan))
        .route("/finalize", post(pos::finalize))
        .route("/clear", post(pos::clear))
        .route("/remove/{id}", post(pos::remove_line))
}

/// Create the back-office routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/employees", get(admin::employees))
        .route("/inventory", get(admin::inventory))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product listing
        .route("/products", get(products::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Auth routes
        .nest("/auth", auth_routes())
        // Point of sale
        .nest("/pos", pos_routes())
        // Back office
        .nest("/admin", admin_routes())
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub cart_count: u32,
}

/// Fallback handler for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate { cart_count: 0 })
}
