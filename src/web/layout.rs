//! Data shared by every page through `templates/base.html`, and the helper
//! that turns a page template into a response.

use askama::Template;
use axum::http::{StatusCode, header::SET_COOKIE};
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

use crate::error::AppError;
use crate::i18n::Message;
use crate::web::context::RequestContext;
use crate::web::flash::clear_flash_cookie;
use crate::web::route::Route;

/// Navigation and notice data for the base layout.
#[derive(Debug, Clone)]
pub struct Layout {
    pub lang: &'static str,
    pub dir: &'static str,
    pub title: String,
    pub logged_in: bool,
    /// Empty when anonymous.
    pub username: String,
    pub is_admin: bool,
    pub has_flash: bool,
    pub flash_class: &'static str,
    pub flash_text: &'static str,
    pub all_centuries_label: &'static str,
}

impl Layout {
    pub fn new(ctx: &RequestContext, title: impl Into<String>) -> Self {
        Self {
            lang: ctx.locale.code(),
            dir: ctx.locale.dir(),
            title: title.into(),
            logged_in: ctx.session.is_some(),
            username: ctx
                .session
                .as_ref()
                .map(|s| s.username.clone())
                .unwrap_or_default(),
            is_admin: ctx.is_admin(),
            has_flash: ctx.flash.is_some(),
            flash_class: ctx.flash.map_or("info", |f| f.kind.as_str()),
            flash_text: ctx.flash.map_or("", |f| f.message.text(ctx.locale)),
            all_centuries_label: Message::AllCenturies.text(ctx.locale),
        }
    }

    /// Link target for a navigation entry.
    pub fn href(&self, key: &str) -> String {
        Route::resolve(Some(key)).unwrap_or(Route::Home).url()
    }
}

/// Renders `page` with status 200, clearing the flash cookie if one was shown.
pub fn render<T: Template>(ctx: &RequestContext, page: &T) -> Result<Response, AppError> {
    render_with_status(ctx, StatusCode::OK, page)
}

/// Renders `page` with an explicit status code.
pub fn render_with_status<T: Template>(
    ctx: &RequestContext,
    status: StatusCode,
    page: &T,
) -> Result<Response, AppError> {
    let body = page.render().map_err(|e| {
        AppError::internal("Template rendering failed", json!({"error": e.to_string()}))
    })?;

    let mut response = (status, Html(body)).into_response();

    if ctx.flash.is_some()
        && let Ok(value) = clear_flash_cookie().parse()
    {
        response.headers_mut().append(SET_COOKIE, value);
    }

    Ok(response)
}
