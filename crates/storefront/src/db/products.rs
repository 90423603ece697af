//! Catalog repository.
//!
//! All catalog reads go through here. Listing queries are composed by the
//! clause builder in [`super::filter`]; everything else is a fixed
//! parameterized statement.

use sqlx::SqlitePool;

use voltio_core::{Price, ProductId};

use super::RepositoryError;
use super::filter::{self, ProductFilter};
use crate::models::product::{Product, StockLevel};

const PRODUCT_COLUMNS: &str = "id, name, brand, product_type, price, description, image_url, available";

/// Repository for catalog and inventory reads.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List available products matching `filter`, ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available(
        &self,
        product_filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let clauses = filter::listing_clauses(product_filter);
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM product{} ORDER BY id ASC",
            clauses.where_sql()
        );

        let query = sqlx::query_as::<_, Product>(&sql);
        let products = clauses.apply_as(query).fetch_all(self.pool).await?;
        Ok(products)
    }

    /// Get an available product by id.
    ///
    /// Returns `None` when the product does not exist or is not available.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_available(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql =
            format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ? AND available = 1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(product)
    }

    /// Get a product by id regardless of availability.
    ///
    /// The register scans physical items, so it matches on existence alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ?");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(product)
    }

    /// Aggregate stock for a product: the sum of its inventory rows.
    ///
    /// Recomputed on every call; stock is never cached across requests.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn aggregate_stock(&self, id: ProductId) -> Result<i64, RepositoryError> {
        let stock: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(stock), 0) FROM inventory WHERE product_id = ?",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;
        Ok(stock)
    }

    /// Distinct brands among available products, for the filter sidebar.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn distinct_brands(&self) -> Result<Vec<String>, RepositoryError> {
        let brands = sqlx::query_scalar(
            "SELECT DISTINCT brand FROM product WHERE available = 1 ORDER BY brand ASC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(brands)
    }

    /// Maximum price among available products, or `None` for an empty
    /// catalog. The listing handler applies the configured display floor.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn max_price(&self) -> Result<Option<Price>, RepositoryError> {
        let cents: Option<i64> =
            sqlx::query_scalar("SELECT MAX(price) FROM product WHERE available = 1")
                .fetch_one(self.pool)
                .await?;
        Ok(cents.map(Price::from_cents))
    }

    /// Every product joined with its aggregate stock, for the inventory page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_stock(&self) -> Result<Vec<StockLevel>, RepositoryError> {
        let levels = sqlx::query_as::<_, StockLevel>(
            "SELECT p.id, p.name, p.brand, p.product_type, p.price, p.description, \
                    p.image_url, p.available, COALESCE(SUM(i.stock), 0) AS stock \
             FROM product p \
             LEFT JOIN inventory i ON i.product_id = p.id \
             GROUP BY p.id \
             ORDER BY p.id ASC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(levels)
    }
}
