//! Staff account creation command.
//!
//! The only way accounts enter the directory: the web app itself never
//! writes to the staff table.

use voltio_core::StaffRole;
use voltio_storefront::db::{self, StaffRepository};
use voltio_storefront::services::auth::hash_password;

/// Create a staff account with the given role.
///
/// # Errors
///
/// Returns an error for an unknown role, a duplicate username, or a
/// database failure.
pub async fn create(
    username: &str,
    password: &str,
    display_name: &str,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let role: StaffRole = role.parse()?;

    let database_url = super::database_url();
    let pool = db::create_pool(&database_url).await?;

    let password_hash = hash_password(password)?;
    let account = StaffRepository::new(&pool)
        .create(username, &password_hash, display_name, role)
        .await?;

    tracing::info!(
        "Created staff account '{}' ({}) with id {}",
        account.username,
        account.role,
        account.id
    );
    Ok(())
}
