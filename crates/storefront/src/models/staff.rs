//! Staff directory domain types.

use chrono::{DateTime, Utc};

use voltio_core::{StaffId, StaffRole};

/// A back-office account (domain type).
///
/// Accounts are inserted by `voltio-cli staff create`; the storefront only
/// ever reads them during authentication and on the employees page.
#[derive(Debug, Clone)]
pub struct StaffAccount {
    /// Unique staff ID.
    pub id: StaffId,
    /// Login name, unique across the directory.
    pub username: String,
    /// Argon2id hash in PHC string format.
    pub password_hash: String,
    /// Name shown in the back office.
    pub display_name: String,
    /// Permission level.
    pub role: StaffRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
