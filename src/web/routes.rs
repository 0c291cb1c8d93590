//! Route tables of the portal.
//!
//! Rate limiting is applied by [`crate::server::app_router`]; the tables
//! here are plain so tests can drive them without a peer address.

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use crate::web::front_controller::front_controller;
use crate::web::handlers::{admin, auth, bookmarks, events, hadith, health::health_handler};

/// Pages served by the front controller, plus the health check.
///
/// # Endpoints
///
/// - `GET /` and `GET /index.php` - every page, selected by `?page=`
/// - `GET /health` - database liveness
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(front_controller))
        .route("/index.php", get(front_controller))
        .route("/health", get(health_handler))
}

/// Credential endpoints.
///
/// - `POST /login`
/// - `POST /register`
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login_handler))
        .route("/register", post(auth::register_handler))
}

/// Form actions and the backup download. Each handler applies its own
/// login, edit or admin guard.
pub fn action_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", post(auth::logout_handler))
        .route("/events", post(events::create_handler))
        .route("/events/{id}", post(events::update_handler))
        .route("/hadiths", post(hadith::create_handler))
        .route("/hadiths/{id}", post(hadith::update_handler))
        .route("/bookmarks", post(bookmarks::toggle_handler))
        .route("/admin/users/{id}/role", post(admin::update_role_handler))
        .route(
            "/admin/content/{kind}/{id}/delete",
            post(admin::delete_content_handler),
        )
        .route("/admin/badges", post(admin::save_badge_handler))
        .route("/admin/backup", get(admin::backup_handler))
        .route("/admin/restore", post(admin::restore_handler))
}

/// Every route without middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .merge(credential_routes())
        .merge(action_routes())
}
