//! End-to-end tests over an in-memory `SQLite` database: repositories,
//! filter semantics, the cart's stock reconciliation, and staff auth.

#![allow(clippy::unwrap_used)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use voltio_core::{Category, Price, ProductId, StaffRole};
use voltio_storefront::cart::{Cart, QuantityAction};
use voltio_storefront::db::{ProductFilter, ProductRepository, StaffRepository};
use voltio_storefront::services::auth::{AuthError, AuthService, hash_password};

/// One connection only: each `SQLite` in-memory connection is its own database.
async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

async fn insert_product(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    brand: &str,
    product_type: &str,
    price_cents: i64,
    available: bool,
) {
    sqlx::query(
        "INSERT INTO product (id, name, brand, product_type, price, available) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(brand)
    .bind(product_type)
    .bind(price_cents)
    .bind(available)
    .execute(pool)
    .await
    .unwrap();
}

async fn insert_stock(pool: &SqlitePool, product_id: i64, location: &str, stock: i64) {
    sqlx::query("INSERT INTO inventory (product_id, location, stock) VALUES (?, ?, ?)")
        .bind(product_id)
        .bind(location)
        .bind(stock)
        .execute(pool)
        .await
        .unwrap();
}

/// The demo catalog shape: three principal types plus two accessory types.
async fn seed_catalog(pool: &SqlitePool) {
    insert_product(pool, 1, "iPhone 15 Pro Max 256GB", "Apple", "phone", 28_999_00, true).await;
    insert_product(pool, 2, "Galaxy S24 Ultra", "Samsung", "phone", 26_999_00, true).await;
    insert_product(pool, 3, "MacBook Air M3", "Apple", "laptop", 32_999_00, true).await;
    insert_product(pool, 4, "iPad Pro 12.9", "Apple", "tablet", 24_999_00, true).await;
    insert_product(pool, 5, "Smartwatch Fit 5", "Samsung", "wearable", 3_999_00, true).await;
    insert_product(pool, 6, "Bluetooth Headphones Pro", "Xiaomi", "headphones", 1_999_00, true).await;
    insert_product(pool, 7, "Fast Charger 30W", "Samsung", "charger", 899_00, true).await;
    insert_product(pool, 8, "Discontinued Dock", "Apple", "charger", 499_00, false).await;
}

fn ids(products: &[voltio_storefront::models::Product]) -> Vec<i64> {
    products.iter().map(|p| p.id.as_i64()).collect()
}

#[tokio::test]
async fn unfiltered_listing_returns_available_products_in_id_order() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let repo = ProductRepository::new(&pool);

    let products = repo.list_available(&ProductFilter::default()).await.unwrap();
    assert_eq!(ids(&products), vec![1, 2, 3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn accessories_filter_selects_the_complement_of_principal_types() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let repo = ProductRepository::new(&pool);

    let filter = ProductFilter {
        categories: vec![Category::Accessories],
        ..ProductFilter::default()
    };
    let products = repo.list_available(&filter).await.unwrap();

    // headphones and charger, but no phone/laptop/tablet/wearable
    assert_eq!(ids(&products), vec![6, 7]);
}

#[tokio::test]
async fn adding_a_principal_category_to_accessories_never_removes_results() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let repo = ProductRepository::new(&pool);

    let accessories_only = ProductFilter {
        categories: vec![Category::Accessories],
        ..ProductFilter::default()
    };
    let widened = ProductFilter {
        categories: vec![Category::Accessories, Category::Phones],
        ..ProductFilter::default()
    };

    let base = ids(&repo.list_available(&accessories_only).await.unwrap());
    let superset = ids(&repo.list_available(&widened).await.unwrap());

    for id in &base {
        assert!(superset.contains(id), "accessories match {id} disappeared");
    }
    // and the phones actually joined the result
    assert!(superset.contains(&1));
    assert!(superset.contains(&2));
}

#[tokio::test]
async fn brand_search_and_price_facets_combine_with_and() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let repo = ProductRepository::new(&pool);

    let filter = ProductFilter {
        brands: vec!["Samsung".to_owned()],
        search: Some("galaxy".to_owned()),
        max_price: Some(Price::from_cents(30_000_00)),
        ..ProductFilter::default()
    };
    let products = repo.list_available(&filter).await.unwrap();

    assert_eq!(ids(&products), vec![2]);
}

#[tokio::test]
async fn search_matches_type_and_is_case_insensitive() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let repo = ProductRepository::new(&pool);

    let filter = ProductFilter {
        search: Some("CHARGER".to_owned()),
        ..ProductFilter::default()
    };
    let products = repo.list_available(&filter).await.unwrap();

    assert_eq!(ids(&products), vec![7]);
}

#[tokio::test]
async fn listing_aggregates_cover_the_filter_ui() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let repo = ProductRepository::new(&pool);

    let brands = repo.distinct_brands().await.unwrap();
    assert_eq!(brands, vec!["Apple", "Samsung", "Xiaomi"]);

    // the unavailable dock's price does not count
    let max = repo.max_price().await.unwrap();
    assert_eq!(max, Some(Price::from_cents(32_999_00)));
}

#[tokio::test]
async fn empty_catalog_has_no_max_price() {
    let pool = setup_pool().await;
    let repo = ProductRepository::new(&pool);

    assert_eq!(repo.max_price().await.unwrap(), None);
    assert!(repo.distinct_brands().await.unwrap().is_empty());
}

#[tokio::test]
async fn aggregate_stock_sums_rows_across_locations() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    insert_stock(&pool, 1, "floor", 2).await;
    insert_stock(&pool, 1, "warehouse", 3).await;

    let repo = ProductRepository::new(&pool);
    assert_eq!(repo.aggregate_stock(ProductId::new(1)).await.unwrap(), 5);
    // no rows at all reads as zero stock
    assert_eq!(repo.aggregate_stock(ProductId::new(2)).await.unwrap(), 0);
}

#[tokio::test]
async fn get_available_hides_unlisted_products_but_get_does_not() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let repo = ProductRepository::new(&pool);

    assert!(repo.get_available(ProductId::new(8)).await.unwrap().is_none());
    // the register still recognizes the physical item
    assert!(repo.get(ProductId::new(8)).await.unwrap().is_some());
    assert!(repo.get(ProductId::new(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn cart_flow_against_live_stock_clamps_at_two() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    insert_stock(&pool, 1, "floor", 2).await;

    let repo = ProductRepository::new(&pool);
    let product = repo.get_available(ProductId::new(1)).await.unwrap().unwrap();

    let mut cart = Cart::default();
    for _ in 0..3 {
        let stock = repo.aggregate_stock(product.id).await.unwrap();
        cart.add(&product, stock);
    }
    assert_eq!(cart.lines()[0].quantity, 2);

    let stock = repo.aggregate_stock(product.id).await.unwrap();
    cart.update(product.id, QuantityAction::Increase, stock);
    assert_eq!(cart.lines()[0].quantity, 2);

    cart.update(product.id, QuantityAction::Decrease, 0);
    assert_eq!(cart.lines()[0].quantity, 1);

    cart.remove(product.id);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn staff_create_and_authenticate_roundtrip() {
    let pool = setup_pool().await;
    let staff = StaffRepository::new(&pool);

    let hash = hash_password("caja1").unwrap();
    let created = staff
        .create("cajero1", &hash, "Counter Clerk 1", StaffRole::Clerk)
        .await
        .unwrap();
    assert_eq!(created.role, StaffRole::Clerk);

    let auth = AuthService::new(&pool);
    let account = auth.authenticate("cajero1", "caja1").await.unwrap();
    assert_eq!(account.username, "cajero1");
    assert_eq!(account.role.landing_path(), "/pos");
}

#[tokio::test]
async fn failed_authentication_reports_one_undifferentiated_error() {
    let pool = setup_pool().await;
    let staff = StaffRepository::new(&pool);

    let hash = hash_password("caja1").unwrap();
    staff
        .create("cajero1", &hash, "Counter Clerk 1", StaffRole::Clerk)
        .await
        .unwrap();

    let auth = AuthService::new(&pool);

    // wrong password and unknown username are indistinguishable
    assert!(matches!(
        auth.authenticate("cajero1", "wrong-password").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        auth.authenticate("nobody", "caja1").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn duplicate_usernames_conflict() {
    let pool = setup_pool().await;
    let staff = StaffRepository::new(&pool);

    let hash = hash_password("pw-one").unwrap();
    staff
        .create("admin", &hash, "Admin One", StaffRole::Admin)
        .await
        .unwrap();

    let again = staff
        .create("admin", &hash, "Admin Two", StaffRole::Admin)
        .await;
    assert!(matches!(
        again,
        Err(voltio_storefront::db::RepositoryError::Conflict(_))
    ));
}

#[tokio::test]
async fn list_with_stock_joins_every_product() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    insert_stock(&pool, 1, "floor", 4).await;

    let repo = ProductRepository::new(&pool);
    let levels = repo.list_with_stock().await.unwrap();

    // includes the unavailable product 8 for the back office
    assert_eq!(levels.len(), 8);
    assert_eq!(levels[0].product.id.as_i64(), 1);
    assert_eq!(levels[0].stock, 4);
    assert_eq!(levels[1].stock, 0);
}
