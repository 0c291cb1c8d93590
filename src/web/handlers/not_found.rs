//! Fallback for unknown `page` keys.

use askama::Template;
use axum::http::StatusCode;
use axum::response::Response;

use crate::error::AppError;
use crate::web::context::RequestContext;
use crate::web::layout::{Layout, render_with_status};

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

/// Renders the not-found page with status 404. Issues no query.
pub fn page(ctx: &RequestContext) -> Result<Response, AppError> {
    let page = NotFoundTemplate {
        layout: Layout::new(ctx, "Page not found"),
    };
    render_with_status(ctx, StatusCode::NOT_FOUND, &page)
}
