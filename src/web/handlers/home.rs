//! Landing page.

use askama::Template;
use axum::response::Response;

use super::ListItem;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::layout::{Layout, render};

const RECENT_LIMIT: i64 = 5;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub events: Vec<ListItem>,
    pub hadiths: Vec<ListItem>,
}

pub async fn page(state: &AppState, ctx: &RequestContext) -> Result<Response, AppError> {
    let events = state.events.recent(RECENT_LIMIT).await?;
    let hadiths = state.hadiths.recent(RECENT_LIMIT).await?;

    let page = HomeTemplate {
        layout: Layout::new(ctx, "Home"),
        events: events.iter().map(ListItem::from).collect(),
        hadiths: hadiths.iter().map(ListItem::from).collect(),
    };
    render(ctx, &page)
}
