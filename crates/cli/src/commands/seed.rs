//! Demo data seeding command.
//!
//! Loads the demo catalog with inventory, and (unless skipped) the demo
//! staff accounts. Safe to re-run: a populated catalog is left alone, and
//! staff usernames that already exist are reported and skipped.

use sqlx::SqlitePool;

use voltio_core::StaffRole;
use voltio_storefront::db::{self, RepositoryError, StaffRepository};
use voltio_storefront::services::auth::hash_password;

struct SeedProduct {
    name: &'static str,
    brand: &'static str,
    product_type: &'static str,
    price_cents: i64,
    image_url: &'static str,
    /// (location, stock) rows
    stock: &'static [(&'static str, i64)],
}

const CATALOG: &[SeedProduct] = &[
    SeedProduct {
        name: "iPhone 15 Pro Max 256GB",
        brand: "Apple",
        product_type: "phone",
        price_cents: 28_999_00,
        image_url: "/static/img/products/iphone15.jpg",
        stock: &[("floor", 2), ("warehouse", 6)],
    },
    SeedProduct {
        name: "Samsung Galaxy S24 Ultra",
        brand: "Samsung",
        product_type: "phone",
        price_cents: 26_999_00,
        image_url: "/static/img/products/galaxy-s24.jpg",
        stock: &[("floor", 4)],
    },
    SeedProduct {
        name: "iPad Pro 12.9\" M2",
        brand: "Apple",
        product_type: "tablet",
        price_cents: 24_999_00,
        image_url: "/static/img/products/ipad.jpg",
        stock: &[("floor", 3)],
    },
    SeedProduct {
        name: "MacBook Air M3",
        brand: "Apple",
        product_type: "laptop",
        price_cents: 32_999_00,
        image_url: "/static/img/products/macbook-air.jpg",
        stock: &[("floor", 1), ("warehouse", 2)],
    },
    SeedProduct {
        name: "Apple Watch Series 9",
        brand: "Apple",
        product_type: "wearable",
        price_cents: 9_999_00,
        image_url: "/static/img/products/watch-s9.jpg",
        stock: &[("floor", 5)],
    },
    SeedProduct {
        name: "AirPods Pro 2nd Gen",
        brand: "Apple",
        product_type: "headphones",
        price_cents: 5_999_00,
        image_url: "/static/img/products/airpods.jpg",
        stock: &[("floor", 8)],
    },
    SeedProduct {
        name: "Bluetooth Headphones Pro",
        brand: "Xiaomi",
        product_type: "headphones",
        price_cents: 1_999_00,
        image_url: "/static/img/products/bt-headphones.jpg",
        stock: &[("floor", 10)],
    },
    SeedProduct {
        name: "Fast Charger 30W",
        brand: "Samsung",
        product_type: "charger",
        price_cents: 899_00,
        image_url: "/static/img/products/charger-30w.jpg",
        stock: &[("floor", 20)],
    },
    SeedProduct {
        name: "Smartwatch Fit 5",
        brand: "Samsung",
        product_type: "wearable",
        price_cents: 3_999_00,
        image_url: "/static/img/products/fit5.jpg",
        stock: &[("floor", 7)],
    },
    SeedProduct {
        name: "RGB Mechanical Keyboard",
        brand: "Logitech",
        product_type: "keyboard",
        price_cents: 1_599_00,
        image_url: "/static/img/products/keyboard-rgb.jpg",
        stock: &[("floor", 12)],
    },
];

/// (username, password, display name, role)
const STAFF: &[(&str, &str, &str, StaffRole)] = &[
    ("admin", "admin123", "Super Admin", StaffRole::Admin),
    ("leocruz", "leo123", "Leo Cruz", StaffRole::Admin),
    ("gerente", "gerente123", "General Manager", StaffRole::Manager),
    ("cajero1", "caja1", "Counter Clerk 1", StaffRole::Clerk),
    ("samsung_rep", "sam123", "Samsung Rep", StaffRole::Guest),
];

/// Seed the demo data set.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or an insert fails.
pub async fn run(skip_staff: bool) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url();
    let pool = db::create_pool(&database_url).await?;

    seed_catalog(&pool).await?;
    if !skip_staff {
        seed_staff(&pool).await?;
    }

    tracing::info!("Seeding complete");
    Ok(())
}

async fn seed_catalog(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        tracing::info!("Catalog already has {existing} products, skipping");
        return Ok(());
    }

    for product in CATALOG {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO product (name, brand, product_type, price, image_url) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id",
        )
        .bind(product.name)
        .bind(product.brand)
        .bind(product.product_type)
        .bind(product.price_cents)
        .bind(product.image_url)
        .fetch_one(pool)
        .await?;

        for (location, stock) in product.stock {
            sqlx::query("INSERT INTO inventory (product_id, location, stock) VALUES (?, ?, ?)")
                .bind(id)
                .bind(location)
                .bind(stock)
                .execute(pool)
                .await?;
        }

        tracing::info!("Seeded product '{}' (id {id})", product.name);
    }

    Ok(())
}

async fn seed_staff(pool: &SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
    let repo = StaffRepository::new(pool);

    for (username, password, display_name, role) in STAFF {
        let password_hash = hash_password(password)?;
        match repo.create(username, &password_hash, display_name, *role).await {
            Ok(account) => {
                tracing::info!("Created staff account '{}' ({})", account.username, role);
            }
            Err(RepositoryError::Conflict(_)) => {
                tracing::warn!("Staff account '{username}' already exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
