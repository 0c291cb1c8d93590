//! Page and form handlers.
//!
//! Page handlers are plain functions called by the front controller; form
//! actions and downloads are axum handlers mounted on their own paths.

pub mod admin;
pub mod auth;
pub mod bookmarks;
pub mod events;
pub mod hadith;
pub mod health;
pub mod home;
pub mod map;
pub mod not_found;
pub mod profile;
pub mod quran;
pub mod timeline;

use crate::domain::entities::{Event, Hadith};
use crate::web::route::Route;

/// One row of a card list: a link with a caption.
#[derive(Debug, Clone)]
pub struct ListItem {
    pub href: String,
    pub title: String,
    pub subtitle: String,
}

impl From<&Event> for ListItem {
    fn from(event: &Event) -> Self {
        Self {
            href: Route::ViewEvent.url_for_id(event.id),
            title: event.title.clone(),
            subtitle: format!("{} AH", event.hijri_year),
        }
    }
}

impl From<&Hadith> for ListItem {
    fn from(hadith: &Hadith) -> Self {
        Self {
            href: Route::ViewHadith.url_for_id(hadith.id),
            title: hadith.excerpt(80),
            subtitle: format!("{} · {}", hadith.narrator, hadith.source),
        }
    }
}

/// Trimmed form text, `None` when blank.
fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parses an optional numeric form field. Blank is `Ok(None)`; anything
/// unparsable is an error.
fn optional_number<T: std::str::FromStr>(raw: &str) -> Result<Option<T>, ()> {
    match optional_text(raw) {
        None => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| ()),
    }
}
