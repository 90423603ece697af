//! Session-related types.
//!
//! Everything the application keeps in the session is strongly typed: the
//! cart, the in-progress register sale, and the authenticated staff member.
//! Route handlers go through these types (and the helpers in
//! `middleware::auth` and the route modules) rather than poking at loose
//! session keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use voltio_core::{StaffId, StaffRole};

use crate::models::staff::StaffAccount;

/// Session-stored staff identity.
///
/// Minimal data recorded at login to identify the staff member and gate the
/// back office; the password hash never enters the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStaff {
    /// Staff database ID.
    pub id: StaffId,
    /// Login name.
    pub username: String,
    /// Name shown in the back-office header.
    pub display_name: String,
    /// Permission level, checked by the register gate.
    pub role: StaffRole,
    /// When this session logged in.
    pub logged_in_at: DateTime<Utc>,
}

impl CurrentStaff {
    /// Snapshot a staff account at login time.
    #[must_use]
    pub fn at_login(account: &StaffAccount, now: DateTime<Utc>) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
            logged_in_at: now,
        }
    }
}

/// Session keys for the typed session entries.
pub mod session_keys {
    /// Key for the logged-in staff member.
    pub const CURRENT_STAFF: &str = "current_staff";

    /// Key for the customer cart.
    pub const CART: &str = "cart";

    /// Key for the in-progress register sale.
    pub const POS_SALE: &str = "pos_sale";
}
