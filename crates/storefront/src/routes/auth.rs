//! Staff authentication route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{clear_current_staff, set_current_staff};
use crate::models::CurrentStaff;
use crate::routes::cart::get_cart;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub cart_count: u32,
}

/// Display the login page.
pub async fn login_page(session: Session, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
        cart_count: get_cart(&session).await.item_count(),
    }
}

/// Handle login form submission.
///
/// On success the staff identity is written to the session and the caller
/// is routed by role: counter staff to the register, everyone else to the
/// dashboard. A failed login reports one undifferentiated message.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match AuthService::new(state.pool())
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(account) => {
            let staff = CurrentStaff::at_login(&account, Utc::now());
            set_current_staff(&session, &staff).await?;

            Ok(Redirect::to(account.role.landing_path()).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "Failed login attempt");
            Ok(Redirect::to("/auth/login?error=credentials").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle logout.
///
/// Clears the staff identity and destroys the session entirely, taking any
/// in-progress register sale with it.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_staff(&session).await?;
    session.flush().await?;

    Ok(Redirect::to("/").into_response())
}
