//! Request guards: login, admin role, and the record edit guards.
//!
//! Every guard returns `Err(Response)` with a flash message and a redirect
//! when the requester may not continue, so handlers can early-return it.

use axum::response::{IntoResponse, Response};
use std::future::Future;

use crate::domain::access::{EditDenial, Owned, authorize_admin, authorize_edit};
use crate::domain::entities::{Badge, SessionUser};
use crate::error::AppError;
use crate::i18n::Message;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::flash::{FlashKind, redirect_with_flash};
use crate::web::route::Route;

/// Coerces a raw `id` parameter to an integer.
///
/// Accepts optional leading whitespace, an optional sign and leading
/// decimal digits, ignoring whatever follows (`"5abc"` is 5). Absent,
/// non-numeric and out-of-range input all become 0, an id no record has.
pub fn coerce_id(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() {
        return 0;
    }

    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

/// Requires an authenticated session; otherwise redirects to the login page.
pub fn require_login(ctx: &RequestContext) -> Result<&SessionUser, Response> {
    ctx.session.as_ref().ok_or_else(|| {
        redirect_with_flash(&Route::Login.url(), FlashKind::Warning, Message::LoginRequired)
    })
}

/// Requires the admin role.
///
/// Anonymous requests go to the login page; authenticated non-admins are
/// sent home.
pub fn require_admin(ctx: &RequestContext) -> Result<&SessionUser, Response> {
    let session = require_login(ctx)?;

    if session.is_admin() {
        Ok(session)
    } else {
        tracing::info!(user_id = session.user_id, "admin page denied");
        Err(redirect_with_flash(
            &Route::Home.url(),
            FlashKind::Danger,
            Message::AccessDenied,
        ))
    }
}

/// [`require_admin`], then confirms the role against the stored account.
///
/// The session cookie carries the role it was issued with; this lookup makes
/// a demotion or deleted account take effect on the next admin request
/// instead of when the cookie expires.
pub async fn require_current_admin<'a>(
    state: &AppState,
    ctx: &'a RequestContext,
) -> Result<&'a SessionUser, Response> {
    let session = require_admin(ctx)?;

    match state.users.find_by_id(session.user_id).await {
        Ok(Some(user)) if user.role.is_admin() => Ok(session),
        Ok(_) => {
            tracing::info!(user_id = session.user_id, "stale admin session refused");
            Err(redirect_with_flash(
                &Route::Home.url(),
                FlashKind::Danger,
                Message::AccessDenied,
            ))
        }
        Err(e) => Err(e.into_response()),
    }
}

/// Loads a record and checks that the requester may edit it.
///
/// `fetch` is the single-row lookup; it runs exactly once. A missing record
/// and a refused requester are indistinguishable to the user: both produce
/// the "not found or access denied" flash and a redirect to `listing`.
/// Database failures render the error page.
pub async fn guard_edit<R, F, Fut>(
    ctx: &RequestContext,
    listing: Route,
    id: i64,
    fetch: F,
) -> Result<R, Response>
where
    R: Owned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<R>, AppError>>,
{
    let record = fetch().await.map_err(IntoResponse::into_response)?;
    let viewer = ctx.viewer();

    authorize_edit(record, &viewer).map_err(|denial| {
        deny(listing, id, ctx.user_id(), denial);
        redirect_with_flash(&listing.url(), FlashKind::Danger, Message::NotFoundOrDenied)
    })
}

/// Admin-only guard for editing a badge from the `admin_badges` page.
///
/// Unlike [`guard_edit`] there is no ownership fallback, and failures
/// redirect back to `admin_badges` itself. The lookup only runs for admins.
pub async fn guard_badge_edit<F, Fut>(
    ctx: &RequestContext,
    id: i64,
    fetch: F,
) -> Result<Badge, Response>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<Badge>, AppError>>,
{
    let target = Route::AdminBadges.url();

    if let Err(denial) = authorize_admin(&ctx.viewer()) {
        deny(Route::AdminBadges, id, ctx.user_id(), denial);
        return Err(redirect_with_flash(
            &target,
            FlashKind::Danger,
            Message::AccessDenied,
        ));
    }

    match fetch().await {
        Ok(Some(badge)) => Ok(badge),
        Ok(None) => {
            deny(Route::AdminBadges, id, ctx.user_id(), EditDenial::NotFound);
            Err(redirect_with_flash(
                &target,
                FlashKind::Danger,
                Message::BadgeNotFound,
            ))
        }
        Err(e) => Err(e.into_response()),
    }
}

fn deny(route: Route, id: i64, user_id: Option<i64>, denial: EditDenial) {
    tracing::info!(
        route = route.key(),
        id,
        user_id = ?user_id,
        reason = denial.as_str(),
        "edit access denied"
    );
    metrics::counter!("edit_access_denied_total", "route" => route.key(), "reason" => denial.as_str())
        .increment(1);
}
