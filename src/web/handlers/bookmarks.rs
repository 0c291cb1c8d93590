//! The requester's bookmarks, and the toggle action.

use askama::Template;
use axum::{Form, extract::State, response::Response};
use serde::Deserialize;

use super::ListItem;
use crate::domain::entities::{Bookmark, BookmarkKind};
use crate::error::AppError;
use crate::i18n::Message;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::flash::{FlashKind, redirect_with_flash};
use crate::web::guard::{coerce_id, require_login};
use crate::web::layout::{Layout, render};
use crate::web::route::Route;

#[derive(Template)]
#[template(path = "bookmarks.html")]
pub struct BookmarksTemplate {
    pub layout: Layout,
    pub items: Vec<ListItem>,
}

impl From<&Bookmark> for ListItem {
    fn from(bookmark: &Bookmark) -> Self {
        let route = match bookmark.kind {
            BookmarkKind::Event => Route::ViewEvent,
            BookmarkKind::Hadith => Route::ViewHadith,
        };
        Self {
            href: route.url_for_id(bookmark.item_id),
            title: bookmark.title.clone(),
            subtitle: bookmark.kind.to_string(),
        }
    }
}

pub async fn page(state: &AppState, ctx: &RequestContext) -> Result<Response, AppError> {
    let user_id = match require_login(ctx) {
        Ok(session) => session.user_id,
        Err(redirect) => return Ok(redirect),
    };

    let bookmarks = state.bookmarks.list_for_user(user_id).await?;

    let page = BookmarksTemplate {
        layout: Layout::new(ctx, "Bookmarks"),
        items: bookmarks.iter().map(ListItem::from).collect(),
    };
    render(ctx, &page)
}

#[derive(Debug, Deserialize)]
pub struct BookmarkForm {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub item_id: String,
}

/// `POST /bookmarks`: adds the bookmark, or removes it if already present.
pub async fn toggle_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<BookmarkForm>,
) -> Result<Response, AppError> {
    let user_id = match require_login(&ctx) {
        Ok(session) => session.user_id,
        Err(redirect) => return Ok(redirect),
    };

    let target = Route::Bookmarks.url();

    let Ok(kind) = form.kind.parse::<BookmarkKind>() else {
        return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::InvalidForm));
    };
    let item_id = coerce_id(Some(&form.item_id));

    let message = match state.bookmarks.toggle(user_id, kind, item_id).await? {
        Some(true) => Message::BookmarkAdded,
        Some(false) => Message::BookmarkRemoved,
        None => {
            return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::ItemNotFound));
        }
    };

    tracing::debug!(user_id, kind = %kind, item_id, "bookmark toggled");
    Ok(redirect_with_flash(&target, FlashKind::Success, message))
}
