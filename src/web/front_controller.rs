//! Single entry point for every page of the portal.
//!
//! `GET /` and `GET /index.php` land here. The `page` parameter is resolved
//! into a [`Route`] and dispatched with an exhaustive match; unknown keys
//! render the not-found page without touching the database.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::handlers::{
    admin, auth, bookmarks, events, hadith, home, map, not_found, profile, quran, timeline,
};
use crate::web::route::Route;

/// Raw query parameters of the front controller.
///
/// Everything is kept as text; ids are coerced by the handlers that use them.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub id: Option<String>,
    pub edit_badge_id: Option<String>,
    pub q: Option<String>,
    pub century: Option<String>,
}

impl PageQuery {
    /// The search term, trimmed; `None` when blank.
    pub fn search(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
    }
}

/// Dispatches on `page`.
pub async fn front_controller(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let Some(route) = Route::resolve(query.page.as_deref()) else {
        tracing::debug!(page = ?query.page, "unknown page");
        return not_found::page(&ctx);
    };

    match route {
        Route::Home => home::page(&state, &ctx).await,
        Route::Login => auth::login_page(&ctx),
        Route::Register => auth::register_page(&ctx),
        Route::Events => events::list_page(&state, &ctx, &query).await,
        Route::ViewEvent => events::view_page(&state, &ctx, &query).await,
        Route::AddEvent => events::add_page(&ctx),
        Route::EditEvent => events::edit_page(&state, &ctx, &query).await,
        Route::QuranSearch => quran::search_page(&state, &ctx, &query).await,
        Route::Hadith => hadith::list_page(&state, &ctx, &query).await,
        Route::ViewHadith => hadith::view_page(&state, &ctx, &query).await,
        Route::AddHadith => hadith::add_page(&ctx),
        Route::EditHadith => hadith::edit_page(&state, &ctx, &query).await,
        Route::Bookmarks => bookmarks::page(&state, &ctx).await,
        Route::Profile => profile::page(&state, &ctx).await,
        Route::MapView => map::page(&state, &ctx).await,
        Route::Timeline => timeline::page(&state, &ctx, &query).await,
        Route::AdminDashboard => admin::dashboard_page(&state, &ctx).await,
        Route::AdminUsers => admin::users_page(&state, &ctx).await,
        Route::AdminContent => admin::content_page(&state, &ctx).await,
        Route::AdminBadges => admin::badges_page(&state, &ctx, &query).await,
        Route::AdminBackupRestore => admin::backup_restore_page(&state, &ctx).await,
    }
}
