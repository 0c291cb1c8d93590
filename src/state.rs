//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::AuthService;
use crate::domain::repositories::{
    BackupRepository, BadgeRepository, BookmarkRepository, EventRepository, HadithRepository,
    QuranRepository, UserRepository,
};
use crate::i18n::Locale;

/// Read-only handles shared across requests.
///
/// Repositories are trait objects so tests can swap in mocks.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub events: Arc<dyn EventRepository>,
    pub hadiths: Arc<dyn HadithRepository>,
    pub badges: Arc<dyn BadgeRepository>,
    pub bookmarks: Arc<dyn BookmarkRepository>,
    pub quran: Arc<dyn QuranRepository>,
    pub backups: Arc<dyn BackupRepository>,
    pub auth_service: Arc<AuthService>,
    pub locale: Locale,
}
