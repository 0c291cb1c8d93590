//! Historical events: listing, detail, add and edit forms, and their POSTs.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use serde::Deserialize;
use validator::Validate;

use super::{ListItem, optional_number, optional_text};
use crate::domain::access::can_edit;
use crate::domain::entities::{BookmarkKind, Event, EventInput};
use crate::error::AppError;
use crate::i18n::Message;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::flash::{FlashKind, redirect_with_flash};
use crate::web::front_controller::PageQuery;
use crate::web::guard::{coerce_id, guard_edit, require_login};
use crate::web::layout::{Layout, render};
use crate::web::route::Route;

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsTemplate {
    pub layout: Layout,
    pub search: String,
    pub items: Vec<ListItem>,
    pub can_add: bool,
}

#[derive(Template)]
#[template(path = "event_view.html")]
pub struct EventViewTemplate {
    pub layout: Layout,
    pub event: Event,
    pub century: String,
    pub has_location: bool,
    pub can_edit: bool,
    pub edit_href: String,
    pub can_bookmark: bool,
    pub bookmark_kind: &'static str,
}

#[derive(Template)]
#[template(path = "event_form.html")]
pub struct EventFormTemplate {
    pub layout: Layout,
    pub action: String,
    pub form: EventForm,
}

/// Raw event form. All fields are text so a malformed submission reaches
/// validation instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EventForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 10000))]
    pub description: String,

    #[serde(default)]
    pub hijri_year: String,

    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: String,

    #[serde(default)]
    pub latitude: String,

    #[serde(default)]
    pub longitude: String,
}

impl EventForm {
    fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            hijri_year: event.hijri_year.to_string(),
            location: event.location.clone().unwrap_or_default(),
            latitude: event.latitude.map(|v| v.to_string()).unwrap_or_default(),
            longitude: event.longitude.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    /// Validates and converts the submission.
    ///
    /// The year must be a positive Hijri year; coordinates must be given
    /// together and lie within range.
    pub fn parse(&self) -> Option<EventInput> {
        self.validate().ok()?;

        let hijri_year: i32 = self.hijri_year.trim().parse().ok()?;
        if !(1..=2000).contains(&hijri_year) {
            return None;
        }

        let latitude: Option<f64> = optional_number(&self.latitude).ok()?;
        let longitude: Option<f64> = optional_number(&self.longitude).ok()?;
        match (latitude, longitude) {
            (Some(lat), Some(lon)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) => {}
            (None, None) => {}
            _ => return None,
        }

        Some(EventInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            hijri_year,
            location: optional_text(&self.location),
            latitude,
            longitude,
        })
    }
}

pub async fn list_page(
    state: &AppState,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Response, AppError> {
    let search = query.search();
    let events = state.events.list(search.clone()).await?;

    let page = EventsTemplate {
        layout: Layout::new(ctx, "Events"),
        search: search.unwrap_or_default(),
        items: events.iter().map(ListItem::from).collect(),
        can_add: ctx.session.is_some(),
    };
    render(ctx, &page)
}

pub async fn view_page(
    state: &AppState,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Response, AppError> {
    let id = coerce_id(query.id.as_deref());

    let Some(event) = state.events.find_by_id(id).await? else {
        return Ok(redirect_with_flash(
            &Route::Events.url(),
            FlashKind::Danger,
            Message::EventNotFound,
        ));
    };

    let page = EventViewTemplate {
        layout: Layout::new(ctx, event.title.clone()),
        century: event.century().map(|c| c.to_string()).unwrap_or_default(),
        has_location: event.location.is_some(),
        can_edit: can_edit(&ctx.viewer(), &event),
        edit_href: Route::EditEvent.url_for_id(event.id),
        can_bookmark: ctx.session.is_some(),
        bookmark_kind: BookmarkKind::Event.as_str(),
        event,
    };
    render(ctx, &page)
}

pub fn add_page(ctx: &RequestContext) -> Result<Response, AppError> {
    if let Err(redirect) = require_login(ctx) {
        return Ok(redirect);
    }

    let page = EventFormTemplate {
        layout: Layout::new(ctx, "Add event"),
        action: "/events".to_string(),
        form: EventForm::default(),
    };
    render(ctx, &page)
}

/// Edit form, behind the record edit guard.
pub async fn edit_page(
    state: &AppState,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Response, AppError> {
    let id = coerce_id(query.id.as_deref());

    let event = match guard_edit(ctx, Route::Events, id, || state.events.find_by_id(id)).await {
        Ok(event) => event,
        Err(redirect) => return Ok(redirect),
    };

    let page = EventFormTemplate {
        layout: Layout::new(ctx, "Edit event"),
        action: format!("/events/{}", event.id),
        form: EventForm::from_event(&event),
    };
    render(ctx, &page)
}

/// `POST /events`
pub async fn create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<EventForm>,
) -> Result<Response, AppError> {
    let owner_id = match require_login(&ctx) {
        Ok(session) => session.user_id,
        Err(redirect) => return Ok(redirect),
    };

    let Some(input) = form.parse() else {
        return Ok(redirect_with_flash(
            &Route::AddEvent.url(),
            FlashKind::Danger,
            Message::InvalidForm,
        ));
    };

    let event = state.events.create(owner_id, input).await?;
    tracing::info!(event_id = event.id, owner_id, "event created");

    Ok(redirect_with_flash(
        &Route::ViewEvent.url_for_id(event.id),
        FlashKind::Success,
        Message::EventSaved,
    ))
}

/// `POST /events/{id}`
pub async fn update_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(raw_id): Path<String>,
    Form(form): Form<EventForm>,
) -> Result<Response, AppError> {
    let id = coerce_id(Some(&raw_id));

    if let Err(redirect) = guard_edit(&ctx, Route::Events, id, || state.events.find_by_id(id)).await {
        return Ok(redirect);
    }

    let Some(input) = form.parse() else {
        return Ok(redirect_with_flash(
            &Route::EditEvent.url_for_id(id),
            FlashKind::Danger,
            Message::InvalidForm,
        ));
    };

    match state.events.update(id, input).await? {
        Some(event) => {
            tracing::info!(event_id = event.id, user_id = ?ctx.user_id(), "event updated");
            Ok(redirect_with_flash(
                &Route::ViewEvent.url_for_id(event.id),
                FlashKind::Success,
                Message::EventSaved,
            ))
        }
        None => Ok(redirect_with_flash(
            &Route::Events.url(),
            FlashKind::Danger,
            Message::EventNotFound,
        )),
    }
}
