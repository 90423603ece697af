//! Staff roles and their permissions.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a role string is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown staff role: {0}")]
pub struct RoleParseError(pub String);

/// Staff role with different permission levels.
///
/// Stored as snake_case text in the `staff.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Full access to the back office and the register.
    Admin,
    /// Store management: dashboard and reports, no register access.
    Manager,
    /// Counter staff operating the register.
    Clerk,
    /// Dedicated cashier operating the register.
    Cashier,
    /// External visitor account (e.g. a brand representative); dashboard only.
    Guest,
}

impl StaffRole {
    /// The snake_case name stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Clerk => "clerk",
            Self::Cashier => "cashier",
            Self::Guest => "guest",
        }
    }

    /// Whether this role may operate the point-of-sale register.
    #[must_use]
    pub const fn can_use_register(&self) -> bool {
        matches!(self, Self::Admin | Self::Clerk | Self::Cashier)
    }

    /// Where this role lands after login: counter staff go straight to the
    /// register, everyone else to the dashboard.
    #[must_use]
    pub const fn landing_path(&self) -> &'static str {
        match self {
            Self::Clerk | Self::Cashier => "/pos",
            Self::Admin | Self::Manager | Self::Guest => "/admin",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "clerk" => Ok(Self::Clerk),
            "cashier" => Ok(Self::Cashier),
            "guest" => Ok(Self::Guest),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for role in [
            StaffRole::Admin,
            StaffRole::Manager,
            StaffRole::Clerk,
            StaffRole::Cashier,
            StaffRole::Guest,
        ] {
            assert_eq!(role.as_str().parse::<StaffRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("superuser".parse::<StaffRole>().is_err());
    }

    #[test]
    fn test_register_access() {
        assert!(StaffRole::Admin.can_use_register());
        assert!(StaffRole::Clerk.can_use_register());
        assert!(StaffRole::Cashier.can_use_register());
        assert!(!StaffRole::Manager.can_use_register());
        assert!(!StaffRole::Guest.can_use_register());
    }

    #[test]
    fn test_landing_path() {
        assert_eq!(StaffRole::Cashier.landing_path(), "/pos");
        assert_eq!(StaffRole::Clerk.landing_path(), "/pos");
        assert_eq!(StaffRole::Admin.landing_path(), "/admin");
        assert_eq!(StaffRole::Guest.landing_path(), "/admin");
    }
}
