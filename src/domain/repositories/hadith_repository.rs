//! Repository trait for hadiths.

use crate::domain::entities::{Hadith, HadithInput};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for hadiths.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgHadithRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HadithRepository: Send + Sync {
    /// Fetches one hadith by primary key, `Ok(None)` if absent.
    async fn find_by_id(&self, id: i64) -> Result<Option<Hadith>, AppError>;

    /// Lists hadiths, newest first, optionally filtered by a
    /// case-insensitive substring of the text, narrator or source.
    async fn list(&self, search: Option<String>) -> Result<Vec<Hadith>, AppError>;

    /// Most recently submitted hadiths.
    async fn recent(&self, limit: i64) -> Result<Vec<Hadith>, AppError>;

    /// Creates a hadith owned by `owner_id`.
    async fn create(&self, owner_id: i64, input: HadithInput) -> Result<Hadith, AppError>;

    /// Replaces the editable fields; `Ok(None)` if the hadith no longer exists.
    async fn update(&self, id: i64, input: HadithInput) -> Result<Option<Hadith>, AppError>;

    /// Deletes a hadith and any bookmarks pointing at it.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts all hadiths.
    async fn count(&self) -> Result<i64, AppError>;
}
