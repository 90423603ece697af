//! Core types for Voltio.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod role;

pub use category::Category;
pub use id::*;
pub use price::Price;
pub use role::{RoleParseError, StaffRole};
