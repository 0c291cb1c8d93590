//! Chronological timeline of events, optionally narrowed to one century.

use askama::Template;
use axum::response::Response;

use crate::domain::entities::Event;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::front_controller::PageQuery;
use crate::web::layout::{Layout, render};
use crate::web::route::Route;

/// Centuries offered by the filter (1st to 15th AH).
pub const CENTURIES: std::ops::RangeInclusive<i32> = 1..=15;

#[derive(Debug, Clone)]
pub struct CenturyOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct TimelineItem {
    pub href: String,
    pub title: String,
    pub hijri_year: i32,
    pub location: String,
    /// `left` or `right`, alternating down the page.
    pub side: &'static str,
}

#[derive(Template)]
#[template(path = "timeline.html")]
pub struct TimelineTemplate {
    pub layout: Layout,
    /// Caption of the active filter; the page script keys off it.
    pub filter_label: String,
    pub options: Vec<CenturyOption>,
    pub items: Vec<TimelineItem>,
}

/// Parses the `century` parameter. Anything outside [`CENTURIES`] means all.
pub fn parse_century(raw: Option<&str>) -> Option<i32> {
    raw?.trim().parse().ok().filter(|c| CENTURIES.contains(c))
}

fn century_label(century: i32) -> String {
    format!("Century {century} AH")
}

/// Lays events out alternately on the left and right of the spine.
pub fn layout_items(events: &[Event]) -> Vec<TimelineItem> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| TimelineItem {
            href: Route::ViewEvent.url_for_id(event.id),
            title: event.title.clone(),
            hijri_year: event.hijri_year,
            location: event.location_label().to_string(),
            side: if i % 2 == 0 { "left" } else { "right" },
        })
        .collect()
}

pub async fn page(
    state: &AppState,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Response, AppError> {
    let century = parse_century(query.century.as_deref());
    let events = state.events.timeline(century).await?;

    let layout = Layout::new(ctx, "Timeline");

    let mut options = vec![CenturyOption {
        value: String::new(),
        label: layout.all_centuries_label.to_string(),
        selected: century.is_none(),
    }];
    options.extend(CENTURIES.map(|c| CenturyOption {
        value: c.to_string(),
        label: century_label(c),
        selected: century == Some(c),
    }));

    let page = TimelineTemplate {
        filter_label: century.map_or_else(|| layout.all_centuries_label.to_string(), century_label),
        layout,
        options,
        items: layout_items(&events),
    };
    render(ctx, &page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(id: i64, year: i32) -> Event {
        Event {
            id,
            user_id: 1,
            title: format!("event {id}"),
            description: String::new(),
            hijri_year: year,
            location: None,
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_century() {
        assert_eq!(parse_century(None), None);
        assert_eq!(parse_century(Some("")), None);
        assert_eq!(parse_century(Some("3")), Some(3));
        assert_eq!(parse_century(Some("0")), None);
        assert_eq!(parse_century(Some("16")), None);
        assert_eq!(parse_century(Some("third")), None);
    }

    #[test]
    fn test_items_alternate_sides() {
        let items = layout_items(&[event(1, 2), event(2, 8), event(3, 11)]);
        let sides: Vec<_> = items.iter().map(|i| i.side).collect();
        assert_eq!(sides, ["left", "right", "left"]);
        assert_eq!(items[1].href, "/index.php?page=view_event&id=2");
    }
}
