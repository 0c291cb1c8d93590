//! The requester's account page.

use askama::Template;
use axum::response::Response;

use crate::domain::entities::{Badge, User};
use crate::error::AppError;
use crate::i18n::Message;
use crate::state::AppState;
use crate::web::context::{RequestContext, clear_session_cookie};
use crate::web::flash::{Flash, FlashKind, redirect_with_cookies};
use crate::web::guard::require_login;
use crate::web::layout::{Layout, render};
use crate::web::route::Route;

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub layout: Layout,
    pub user: User,
    pub member_since: String,
    pub badges: Vec<Badge>,
}

pub async fn page(state: &AppState, ctx: &RequestContext) -> Result<Response, AppError> {
    let user_id = match require_login(ctx) {
        Ok(session) => session.user_id,
        Err(redirect) => return Ok(redirect),
    };

    // A valid session whose account has since been removed.
    let Some(user) = state.users.find_by_id(user_id).await? else {
        tracing::info!(user_id, "session for missing account");
        return Ok(redirect_with_cookies(
            &Route::Login.url(),
            Flash::new(FlashKind::Warning, Message::LoginRequired),
            &[clear_session_cookie()],
        ));
    };

    let badges = state.badges.for_user(user.id).await?;

    let page = ProfileTemplate {
        layout: Layout::new(ctx, user.username.clone()),
        member_since: user.created_at.format("%Y-%m-%d").to_string(),
        user,
        badges,
    };
    render(ctx, &page)
}
