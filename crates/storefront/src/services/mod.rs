//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Staff authentication (username + password)

pub mod auth;
