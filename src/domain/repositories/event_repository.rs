//! Repository trait for historical events.

use crate::domain::entities::{Event, EventInput};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEventRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Fetches one event by primary key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Event))` if found
    /// - `Ok(None)` if no event has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError>;

    /// Lists events ordered by Hijri year, optionally filtered by a
    /// case-insensitive substring of the title or description.
    async fn list(&self, search: Option<String>) -> Result<Vec<Event>, AppError>;

    /// Most recently submitted events.
    async fn recent(&self, limit: i64) -> Result<Vec<Event>, AppError>;

    /// Events ordered by Hijri year, optionally restricted to one century.
    async fn timeline(&self, century: Option<i32>) -> Result<Vec<Event>, AppError>;

    /// Events that carry both a latitude and a longitude.
    async fn with_coordinates(&self) -> Result<Vec<Event>, AppError>;

    /// Creates an event owned by `owner_id`.
    async fn create(&self, owner_id: i64, input: EventInput) -> Result<Event, AppError>;

    /// Replaces the editable fields of an event.
    ///
    /// Returns `Ok(None)` if the event no longer exists.
    async fn update(&self, id: i64, input: EventInput) -> Result<Option<Event>, AppError>;

    /// Deletes an event and any bookmarks pointing at it.
    ///
    /// Returns `Ok(false)` if the event did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts all events.
    async fn count(&self) -> Result<i64, AppError>;
}
