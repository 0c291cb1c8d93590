//! PostgreSQL implementation of the hadith repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::contains_pattern;
use crate::domain::entities::{Hadith, HadithInput};
use crate::domain::repositories::HadithRepository;
use crate::error::AppError;

/// PostgreSQL repository for hadiths.
pub struct PgHadithRepository {
    pool: Arc<PgPool>,
}

impl PgHadithRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct HadithRow {
    id: i64,
    user_id: i64,
    text: String,
    narrator: String,
    source: String,
    grade: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HadithRow> for Hadith {
    fn from(row: HadithRow) -> Self {
        Hadith {
            id: row.id,
            user_id: row.user_id,
            text: row.text,
            narrator: row.narrator,
            source: row.source,
            grade: row.grade,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl HadithRepository for PgHadithRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Hadith>, AppError> {
        let row = sqlx::query_as::<_, HadithRow>(
            r#"
            SELECT id, user_id, text, narrator, source, grade, created_at, updated_at
            FROM hadiths
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Hadith::from))
    }

    async fn list(&self, search: Option<String>) -> Result<Vec<Hadith>, AppError> {
        let pattern = search.as_deref().map(contains_pattern);

        let rows = sqlx::query_as::<_, HadithRow>(
            r#"
            SELECT id, user_id, text, narrator, source, grade, created_at, updated_at
            FROM hadiths
            WHERE $1::text IS NULL
               OR text ILIKE $1 OR narrator ILIKE $1 OR source ILIKE $1
            ORDER BY id
            "#,
        )
        .bind(pattern)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Hadith::from).collect())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Hadith>, AppError> {
        let rows = sqlx::query_as::<_, HadithRow>(
            r#"
            SELECT id, user_id, text, narrator, source, grade, created_at, updated_at
            FROM hadiths
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Hadith::from).collect())
    }

    async fn create(&self, owner_id: i64, input: HadithInput) -> Result<Hadith, AppError> {
        let row = sqlx::query_as::<_, HadithRow>(
            r#"
            INSERT INTO hadiths (user_id, text, narrator, source, grade)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, text, narrator, source, grade, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&input.text)
        .bind(&input.narrator)
        .bind(&input.source)
        .bind(&input.grade)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, input: HadithInput) -> Result<Option<Hadith>, AppError> {
        let row = sqlx::query_as::<_, HadithRow>(
            r#"
            UPDATE hadiths
            SET text = $2, narrator = $3, source = $4, grade = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, text, narrator, source, grade, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.text)
        .bind(&input.narrator)
        .bind(&input.source)
        .bind(&input.grade)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Hadith::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM bookmarks WHERE kind = 'hadith' AND item_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM hadiths WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hadiths")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
