//! PostgreSQL implementation of the badge repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Badge, BadgeInput};
use crate::domain::repositories::BadgeRepository;
use crate::error::AppError;

/// PostgreSQL repository for badges and their awards.
pub struct PgBadgeRepository {
    pool: Arc<PgPool>,
}

impl PgBadgeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BadgeRow {
    id: i64,
    name: String,
    description: String,
    icon: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BadgeRow> for Badge {
    fn from(row: BadgeRow) -> Self {
        Badge {
            id: row.id,
            name: row.name,
            description: row.description,
            icon: row.icon,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl BadgeRepository for PgBadgeRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Badge>, AppError> {
        let row = sqlx::query_as::<_, BadgeRow>(
            "SELECT id, name, description, icon, created_at FROM badges WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Badge::from))
    }

    async fn list(&self) -> Result<Vec<Badge>, AppError> {
        let rows = sqlx::query_as::<_, BadgeRow>(
            "SELECT id, name, description, icon, created_at FROM badges ORDER BY name",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Badge::from).collect())
    }

    async fn create(&self, input: BadgeInput) -> Result<Badge, AppError> {
        let row = sqlx::query_as::<_, BadgeRow>(
            r#"
            INSERT INTO badges (name, description, icon)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, icon, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.icon)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, input: BadgeInput) -> Result<Option<Badge>, AppError> {
        let row = sqlx::query_as::<_, BadgeRow>(
            r#"
            UPDATE badges
            SET name = $2, description = $3, icon = $4
            WHERE id = $1
            RETURNING id, name, description, icon, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.icon)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Badge::from))
    }

    async fn for_user(&self, user_id: i64) -> Result<Vec<Badge>, AppError> {
        let rows = sqlx::query_as::<_, BadgeRow>(
            r#"
            SELECT b.id, b.name, b.description, b.icon, b.created_at
            FROM badges b
            JOIN user_badges ub ON ub.badge_id = b.id
            WHERE ub.user_id = $1
            ORDER BY ub.awarded_at
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Badge::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM badges")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
