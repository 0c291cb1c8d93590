//! Repository trait for badges.

use crate::domain::entities::{Badge, BadgeInput};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeRepository: Send + Sync {
    /// Fetches one badge by primary key, `Ok(None)` if absent.
    async fn find_by_id(&self, id: i64) -> Result<Option<Badge>, AppError>;

    /// Lists all badges by name.
    async fn list(&self) -> Result<Vec<Badge>, AppError>;

    /// Creates a badge.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a badge with the same name exists.
    async fn create(&self, input: BadgeInput) -> Result<Badge, AppError>;

    /// Updates a badge; `Ok(None)` if it does not exist.
    async fn update(&self, id: i64, input: BadgeInput) -> Result<Option<Badge>, AppError>;

    /// Badges awarded to a user, most recent award first.
    async fn for_user(&self, user_id: i64) -> Result<Vec<Badge>, AppError>;

    /// Counts all badges.
    async fn count(&self) -> Result<i64, AppError>;
}
