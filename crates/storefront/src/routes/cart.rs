//! Cart route handlers.
//!
//! The cart lives in the session as a typed [`Cart`]; every handler reads
//! it, applies one ledger operation, writes it back, and redirects. Stock
//! is consulted fresh from the inventory table on add and increase.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use voltio_core::ProductId;

use crate::cart::{Cart, CartLine, QuantityAction};
use crate::error::Result;
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: i64,
    pub name: String,
    pub brand: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub image_url: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub total: String,
    pub item_count: u32,
}

/// Format a decimal amount as a price string.
pub(crate) fn format_money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.as_i64(),
            name: line.name.clone(),
            brand: line.brand.clone(),
            quantity: line.quantity,
            price: line.price.to_string(),
            line_total: format_money(line.line_total()),
            image_url: line.image_url.clone(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            subtotal: format_money(cart.subtotal()),
            total: format_money(cart.total()),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, defaulting to empty.
pub(crate) async fn get_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back to the session.
pub(crate) async fn set_cart(
    session: &Session,
    cart: &Cart,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Quantity update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub action: QuantityAction,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
}

/// Simulated-payment confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub cart_count: u32,
}

/// Display the cart page.
#[instrument(skip_all)]
pub async fn show(session: Session) -> CartShowTemplate {
    let cart = get_cart(&session).await;
    CartShowTemplate {
        cart_count: cart.item_count(),
        cart: CartView::from(&cart),
    }
}

/// Add one unit of a product to the cart.
///
/// Missing, unavailable, or out-of-stock products redirect back to the
/// listing without touching the session; a line at its cap is left as-is.
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i64>,
) -> Result<Response> {
    let product_id = ProductId::new(product_id);
    let repo = state.products();

    let Some(product) = repo.get_available(product_id).await? else {
        return Ok(Redirect::to("/products").into_response());
    };

    let stock = repo.aggregate_stock(product_id).await?;
    if stock <= 0 {
        return Ok(Redirect::to("/products").into_response());
    }

    let mut cart = get_cart(&session).await;
    cart.add(&product, stock);
    set_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Adjust the quantity of a cart line.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i64>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let product_id = ProductId::new(product_id);

    // Stock only bounds increases; a decrease needs no inventory read.
    let stock = match form.action {
        QuantityAction::Increase => state.products().aggregate_stock(product_id).await?,
        QuantityAction::Decrease => 0,
    };

    let mut cart = get_cart(&session).await;
    cart.update(product_id, form.action, stock);
    set_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Remove a line from the cart.
#[instrument(skip_all)]
pub async fn remove(session: Session, Path(product_id): Path<i64>) -> Result<Response> {
    let mut cart = get_cart(&session).await;
    cart.remove(ProductId::new(product_id));
    set_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Simulated checkout: no charge is made and no order is persisted; the
/// cart is emptied and a confirmation page rendered.
#[instrument(skip_all)]
pub async fn checkout(session: Session) -> Result<Response> {
    let mut cart = get_cart(&session).await;
    cart.clear();
    set_cart(&session, &cart).await?;

    Ok(CheckoutTemplate { cart_count: 0 }.into_response())
}
