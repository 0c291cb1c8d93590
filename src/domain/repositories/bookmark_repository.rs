//! Repository trait for user bookmarks.

use crate::domain::entities::{Bookmark, BookmarkKind};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Lists a user's bookmarks, newest first, with item titles.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Bookmark>, AppError>;

    /// Adds the bookmark if absent, removes it if present.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(true))` if the item is now bookmarked
    /// - `Ok(Some(false))` if the bookmark was removed
    /// - `Ok(None)` if the referenced item does not exist
    async fn toggle(
        &self,
        user_id: i64,
        kind: BookmarkKind,
        item_id: i64,
    ) -> Result<Option<bool>, AppError>;
}
