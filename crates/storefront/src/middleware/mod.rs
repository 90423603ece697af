//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions with `SQLite` store)

pub mod auth;
pub mod session;

pub use auth::{
    OptionalStaff, RequireRegisterStaff, RequireStaff, clear_current_staff, set_current_staff,
};
pub use session::create_session_layer;
