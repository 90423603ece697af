//! Catalog domain types.

use serde::{Deserialize, Serialize};

use voltio_core::{Price, ProductId};

/// A catalog product.
///
/// Read-only from the storefront's perspective; rows are written by the
/// CLI's seeding commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    /// Category tag: `phone`, `laptop`, `tablet`, `wearable`, or any
    /// accessory type string (`headphones`, `charger`, ...).
    pub product_type: String,
    /// Price in cents.
    pub price: Price,
    pub description: String,
    pub image_url: String,
    /// Whether the product is visible in the storefront at all.
    pub available: bool,
}

/// A product joined with its aggregate stock, for the inventory page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StockLevel {
    #[sqlx(flatten)]
    pub product: Product,
    /// Sum of all inventory rows for this product.
    pub stock: i64,
}
