//! Events placed on a map.

use askama::Template;
use axum::response::Response;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::layout::{Layout, render};
use crate::web::route::Route;

#[derive(Debug, Clone)]
pub struct MapPoint {
    pub title: String,
    pub href: String,
    pub hijri_year: i32,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Template)]
#[template(path = "map_view.html")]
pub struct MapTemplate {
    pub layout: Layout,
    pub points: Vec<MapPoint>,
}

pub async fn page(state: &AppState, ctx: &RequestContext) -> Result<Response, AppError> {
    let events = state.events.with_coordinates().await?;

    let points = events
        .iter()
        .filter_map(|event| {
            let (latitude, longitude) = event.coordinates()?;
            Some(MapPoint {
                title: event.title.clone(),
                href: Route::ViewEvent.url_for_id(event.id),
                hijri_year: event.hijri_year,
                latitude,
                longitude,
            })
        })
        .collect();

    let page = MapTemplate {
        layout: Layout::new(ctx, "Map"),
        points,
    };
    render(ctx, &page)
}
