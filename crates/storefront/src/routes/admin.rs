//! Back-office route handlers: dashboard, employees, inventory.
//!
//! Every page requires an authenticated staff member of any role; only the
//! register (in `routes::pos`) is gated further.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireStaff;
use crate::models::product::StockLevel;
use crate::models::staff::StaffAccount;
use crate::state::AppState;

/// Staff display data for the back-office header.
#[derive(Clone)]
pub struct StaffView {
    pub display_name: String,
    pub username: String,
    pub role: String,
    pub can_use_register: bool,
}

impl From<&crate::models::CurrentStaff> for StaffView {
    fn from(staff: &crate::models::CurrentStaff) -> Self {
        Self {
            display_name: staff.display_name.clone(),
            username: staff.username.clone(),
            role: staff.role.to_string(),
            can_use_register: staff.role.can_use_register(),
        }
    }
}

/// Employee row for the directory listing.
pub struct EmployeeView {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub created_at: String,
}

impl From<&StaffAccount> for EmployeeView {
    fn from(account: &StaffAccount) -> Self {
        Self {
            id: account.id.as_i64(),
            username: account.username.clone(),
            display_name: account.display_name.clone(),
            role: account.role.to_string(),
            created_at: account.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Inventory row: product plus aggregate stock.
pub struct InventoryRowView {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub product_type: String,
    pub price: String,
    pub stock: i64,
    pub available: bool,
}

impl From<&StockLevel> for InventoryRowView {
    fn from(level: &StockLevel) -> Self {
        Self {
            id: level.product.id.as_i64(),
            name: level.product.name.clone(),
            brand: level.product.brand.clone(),
            product_type: level.product.product_type.clone(),
            price: level.product.price.to_string(),
            stock: level.stock,
            available: level.product.available,
        }
    }
}

/// Dashboard query parameters (e.g. the register-access denial message).
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub error: Option<String>,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub staff: StaffView,
    pub error: Option<String>,
    pub cart_count: u32,
}

/// Employees page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/employees.html")]
pub struct EmployeesTemplate {
    pub staff: StaffView,
    pub employees: Vec<EmployeeView>,
    pub cart_count: u32,
}

/// Inventory page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/inventory.html")]
pub struct InventoryTemplate {
    pub staff: StaffView,
    pub rows: Vec<InventoryRowView>,
    pub cart_count: u32,
}

/// Display the staff dashboard.
pub async fn dashboard(
    RequireStaff(staff): RequireStaff,
    Query(query): Query<DashboardQuery>,
) -> DashboardTemplate {
    DashboardTemplate {
        staff: StaffView::from(&staff),
        error: query.error,
        cart_count: 0,
    }
}

/// Display the staff directory.
pub async fn employees(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
) -> Result<EmployeesTemplate> {
    let accounts = state.staff().list_all().await?;

    Ok(EmployeesTemplate {
        staff: StaffView::from(&staff),
        employees: accounts.iter().map(EmployeeView::from).collect(),
        cart_count: 0,
    })
}

/// Display every product with its aggregate stock.
pub async fn inventory(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
) -> Result<InventoryTemplate> {
    let levels = state.products().list_with_stock().await?;

    Ok(InventoryTemplate {
        staff: StaffView::from(&staff),
        rows: levels.iter().map(InventoryRowView::from).collect(),
        cart_count: 0,
    })
}
