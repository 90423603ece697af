//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring staff authentication in route handlers,
//! and the typed helpers for the staff entry in the session.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentStaff, session_keys};

/// Extractor that requires an authenticated staff member.
///
/// If nobody is logged in, the request is redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireStaff(staff): RequireStaff) -> impl IntoResponse {
///     format!("Hello, {}!", staff.display_name)
/// }
/// ```
pub struct RequireStaff(pub CurrentStaff);

/// Extractor that requires a staff member allowed to operate the register.
///
/// Role check happens here, before any handler body runs: a logged-in staff
/// member without register rights is sent back to the dashboard with a
/// message, and nothing in the session is touched.
pub struct RequireRegisterStaff(pub CurrentStaff);

/// Rejection for the staff extractors.
pub enum StaffRejection {
    /// Not logged in at all.
    RedirectToLogin,
    /// Logged in, but the role may not use the register.
    RedirectToDashboard,
}

impl IntoResponse for StaffRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::RedirectToDashboard => {
                Redirect::to("/admin?error=register_access").into_response()
            }
        }
    }
}

async fn staff_from_parts(parts: &mut Parts) -> Option<CurrentStaff> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await
        .ok()
        .flatten()
}

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = StaffRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        staff_from_parts(parts)
            .await
            .map(Self)
            .ok_or(StaffRejection::RedirectToLogin)
    }
}

impl<S> FromRequestParts<S> for RequireRegisterStaff
where
    S: Send + Sync,
{
    type Rejection = StaffRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff = staff_from_parts(parts)
            .await
            .ok_or(StaffRejection::RedirectToLogin)?;

        if !staff.role.can_use_register() {
            return Err(StaffRejection::RedirectToDashboard);
        }

        Ok(Self(staff))
    }
}

/// Extractor that optionally gets the current staff member.
///
/// Unlike `RequireStaff`, this never rejects the request.
pub struct OptionalStaff(pub Option<CurrentStaff>);

impl<S> FromRequestParts<S> for OptionalStaff
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(staff_from_parts(parts).await))
    }
}

/// Helper to set the current staff member in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_STAFF, staff).await
}

/// Helper to clear the current staff member from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_staff(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await?;
    Ok(())
}
