//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;

use crate::filters;
use crate::routes::cart::get_cart;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub cart_count: u32,
}

/// Display the home page.
pub async fn home(session: Session) -> impl IntoResponse {
    HomeTemplate {
        cart_count: get_cart(&session).await.item_count(),
    }
}
