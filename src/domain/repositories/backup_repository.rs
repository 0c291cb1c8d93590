//! Repository trait for content backup and restore.

use crate::domain::entities::Backup;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackupRepository: Send + Sync {
    /// Reads all events, hadiths and badges into a snapshot.
    async fn export(&self) -> Result<Backup, AppError>;

    /// Replaces all events, hadiths and badges with the snapshot contents
    /// in a single transaction. Bookmarks and badge awards that pointed at
    /// replaced records are dropped.
    ///
    /// Records whose `user_id` matches no account are owned by
    /// `fallback_owner` instead.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] or [`AppError::Conflict`] when the
    /// snapshot violates a table constraint; nothing is written then.
    async fn restore(&self, backup: Backup, fallback_owner: i64) -> Result<(), AppError>;
}
