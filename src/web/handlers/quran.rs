//! Quran text search.

use askama::Template;
use axum::response::Response;

use crate::domain::entities::Ayah;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::front_controller::PageQuery;
use crate::web::layout::{Layout, render};

/// Most ayahs shown for one search.
pub const MAX_RESULTS: i64 = 50;

#[derive(Template)]
#[template(path = "quran_search.html")]
pub struct QuranSearchTemplate {
    pub layout: Layout,
    pub search: String,
    pub searched: bool,
    pub results: Vec<Ayah>,
}

/// Searches Arabic and English text. A blank `q` shows the form only.
pub async fn search_page(
    state: &AppState,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Response, AppError> {
    let search = query.search();

    let results = match &search {
        Some(term) => state.quran.search(term, MAX_RESULTS).await?,
        None => Vec::new(),
    };

    let page = QuranSearchTemplate {
        layout: Layout::new(ctx, "Quran search"),
        searched: search.is_some(),
        search: search.unwrap_or_default(),
        results,
    };
    render(ctx, &page)
}
