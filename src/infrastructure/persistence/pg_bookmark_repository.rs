//! PostgreSQL implementation of the bookmark repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Bookmark, BookmarkKind};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;

/// PostgreSQL repository for bookmarks.
///
/// A bookmark references an event or a hadith by `(kind, item_id)`; titles
/// are joined in when listing.
pub struct PgBookmarkRepository {
    pool: Arc<PgPool>,
}

impl PgBookmarkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookmarkRow {
    id: i64,
    user_id: i64,
    kind: String,
    item_id: i64,
    title: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookmarkRow> for Bookmark {
    type Error = AppError;

    fn try_from(row: BookmarkRow) -> Result<Self, Self::Error> {
        let kind: BookmarkKind = row.kind.parse().map_err(|e: String| {
            AppError::internal("Corrupt bookmark kind", json!({"bookmark_id": row.id, "error": e}))
        })?;

        Ok(Bookmark {
            id: row.id,
            user_id: row.user_id,
            kind,
            item_id: row.item_id,
            title: row.title,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Bookmark>, AppError> {
        let rows = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT b.id, b.user_id, b.kind, b.item_id,
                   COALESCE(e.title, LEFT(h.text, 80)) AS title,
                   b.created_at
            FROM bookmarks b
            LEFT JOIN events e ON b.kind = 'event' AND e.id = b.item_id
            LEFT JOIN hadiths h ON b.kind = 'hadith' AND h.id = b.item_id
            WHERE b.user_id = $1
              AND (e.id IS NOT NULL OR h.id IS NOT NULL)
            ORDER BY b.created_at DESC, b.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Bookmark::try_from).collect()
    }

    async fn toggle(
        &self,
        user_id: i64,
        kind: BookmarkKind,
        item_id: i64,
    ) -> Result<Option<bool>, AppError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM bookmarks WHERE user_id = $1 AND kind = $2 AND item_id = $3",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

        if removed.rows_affected() > 0 {
            tx.commit().await?;
            return Ok(Some(false));
        }

        let exists_query = match kind {
            BookmarkKind::Event => "SELECT EXISTS (SELECT 1 FROM events WHERE id = $1)",
            BookmarkKind::Hadith => "SELECT EXISTS (SELECT 1 FROM hadiths WHERE id = $1)",
        };
        let exists: bool = sqlx::query_scalar(exists_query)
            .bind(item_id)
            .fetch_one(&mut *tx)
            .await?;

        if !exists {
            return Ok(None);
        }

        sqlx::query(
            r#"
            INSERT INTO bookmarks (user_id, kind, item_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, kind, item_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(true))
    }
}
