//! Point-of-sale route handlers.
//!
//! Every handler takes [`RequireRegisterStaff`], so the role gate runs
//! before any sale state is read or written. The sale itself lives in the
//! staff member's session, independent of any customer cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use voltio_core::ProductId;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireRegisterStaff;
use crate::models::session_keys;
use crate::pos::{PosSale, SaleLine};
use crate::routes::cart::format_money;
use crate::state::AppState;

/// Sale line display data for templates.
#[derive(Clone)]
pub struct SaleLineView {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Sale display data for templates.
#[derive(Clone)]
pub struct SaleView {
    pub lines: Vec<SaleLineView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&SaleLine> for SaleLineView {
    fn from(line: &SaleLine) -> Self {
        Self {
            product_id: line.product_id.as_i64(),
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price.to_string(),
            line_total: format_money(line.line_total()),
        }
    }
}

impl From<&PosSale> for SaleView {
    fn from(sale: &PosSale) -> Self {
        Self {
            lines: sale.lines().iter().map(SaleLineView::from).collect(),
            total: format_money(sale.total()),
            item_count: sale.item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the in-progress sale from the session, defaulting to empty.
pub(crate) async fn get_sale(session: &Session) -> PosSale {
    session
        .get::<PosSale>(session_keys::POS_SALE)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the sale back to the session.
pub(crate) async fn set_sale(
    session: &Session,
    sale: &PosSale,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::POS_SALE, sale).await
}

/// Scan form data.
#[derive(Debug, Deserialize)]
pub struct ScanForm {
    pub code: String,
}

/// Register page query parameters.
#[derive(Debug, Deserialize)]
pub struct RegisterQuery {
    pub error: Option<String>,
    pub success: Option<String>,
    /// The code that failed to scan, echoed back for the message.
    pub code: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "pos/register.html")]
pub struct RegisterTemplate {
    pub sale: SaleView,
    pub staff_name: String,
    pub error: Option<String>,
    pub success: Option<String>,
    pub failed_code: Option<String>,
    pub cart_count: u32,
}

/// Display the register page.
#[instrument(skip_all)]
pub async fn show(
    RequireRegisterStaff(staff): RequireRegisterStaff,
    session: Session,
    Query(query): Query<RegisterQuery>,
) -> RegisterTemplate {
    let sale = get_sale(&session).await;
    RegisterTemplate {
        sale: SaleView::from(&sale),
        staff_name: staff.display_name,
        error: query.error,
        success: query.success,
        failed_code: query.code,
        cart_count: 0,
    }
}

/// Scan a code into the sale.
///
/// The code is the product id itself; there is no separate barcode mapping.
/// A code that doesn't parse or doesn't match a product reports not-found
/// and leaves the sale unchanged. Matches increment without any stock cap.
#[instrument(skip_all)]
pub async fn scan(
    State(state): State<AppState>,
    RequireRegisterStaff(_staff): RequireRegisterStaff,
    session: Session,
    Form(form): Form<ScanForm>,
) -> Result<Response> {
    let code = form.code.trim();

    let Ok(id) = code.parse::<i64>() else {
        return Ok(not_found_redirect(code));
    };

    let Some(product) = state.products().get(ProductId::new(id)).await? else {
        return Ok(not_found_redirect(code));
    };

    let mut sale = get_sale(&session).await;
    sale.scan(&product);
    set_sale(&session, &sale).await?;

    Ok(Redirect::to("/pos").into_response())
}

fn not_found_redirect(code: &str) -> Response {
    let location = format!("/pos?error=not_found&code={}", urlencoding::encode(code));
    Redirect::to(&location).into_response()
}

/// Complete the sale: clear it and report success.
///
/// No sale record is persisted; the register is a tally, not a journal.
#[instrument(skip_all)]
pub async fn finalize(
    RequireRegisterStaff(_staff): RequireRegisterStaff,
    session: Session,
) -> Result<Response> {
    let mut sale = get_sale(&session).await;
    sale.clear();
    set_sale(&session, &sale).await?;

    Ok(Redirect::to("/pos?success=sale_complete").into_response())
}

/// Abandon the sale without a success report.
#[instrument(skip_all)]
pub async fn clear(
    RequireRegisterStaff(_staff): RequireRegisterStaff,
    session: Session,
) -> Result<Response> {
    let mut sale = get_sale(&session).await;
    sale.clear();
    set_sale(&session, &sale).await?;

    Ok(Redirect::to("/pos").into_response())
}

/// Remove a single line from the sale.
#[instrument(skip_all)]
pub async fn remove_line(
    RequireRegisterStaff(_staff): RequireRegisterStaff,
    session: Session,
    Path(product_id): Path<i64>,
) -> Result<Response> {
    let mut sale = get_sale(&session).await;
    sale.remove_line(ProductId::new(product_id));
    set_sale(&session, &sale).await?;

    Ok(Redirect::to("/pos").into_response())
}
