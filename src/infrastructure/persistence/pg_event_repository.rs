//! PostgreSQL implementation of the event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::contains_pattern;
use crate::domain::entities::{Event, EventInput};
use crate::domain::repositories::EventRepository;
use crate::error::AppError;

/// PostgreSQL repository for historical events.
pub struct PgEventRepository {
    pool: Arc<PgPool>,
}

impl PgEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct EventRow {
    id: i64,
    user_id: i64,
    title: String,
    description: String,
    hijri_year: i32,
    location: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            hijri_year: row.hijri_year,
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// First and last Hijri year of a century (`1` covers years 1 to 100).
fn century_bounds(century: i32) -> (i32, i32) {
    ((century - 1) * 100 + 1, century * 100)
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, title, description, hijri_year, location,
                   latitude, longitude, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Event::from))
    }

    async fn list(&self, search: Option<String>) -> Result<Vec<Event>, AppError> {
        let pattern = search.as_deref().map(contains_pattern);

        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, title, description, hijri_year, location,
                   latitude, longitude, created_at, updated_at
            FROM events
            WHERE $1::text IS NULL OR title ILIKE $1 OR description ILIKE $1
            ORDER BY hijri_year, id
            "#,
        )
        .bind(pattern)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, title, description, hijri_year, location,
                   latitude, longitude, created_at, updated_at
            FROM events
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn timeline(&self, century: Option<i32>) -> Result<Vec<Event>, AppError> {
        let (from, to) = match century.map(century_bounds) {
            Some((from, to)) => (Some(from), Some(to)),
            None => (None, None),
        };

        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, title, description, hijri_year, location,
                   latitude, longitude, created_at, updated_at
            FROM events
            WHERE ($1::int IS NULL OR hijri_year >= $1)
              AND ($2::int IS NULL OR hijri_year <= $2)
            ORDER BY hijri_year, id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn with_coordinates(&self) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, title, description, hijri_year, location,
                   latitude, longitude, created_at, updated_at
            FROM events
            WHERE latitude IS NOT NULL AND longitude IS NOT NULL
            ORDER BY hijri_year, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn create(&self, owner_id: i64, input: EventInput) -> Result<Event, AppError> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (user_id, title, description, hijri_year, location, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, title, description, hijri_year, location,
                      latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.hijri_year)
        .bind(&input.location)
        .bind(input.latitude)
        .bind(input.longitude)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, input: EventInput) -> Result<Option<Event>, AppError> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET title = $2, description = $3, hijri_year = $4, location = $5,
                latitude = $6, longitude = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, hijri_year, location,
                      latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.hijri_year)
        .bind(&input.location)
        .bind(input.latitude)
        .bind(input.longitude)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Event::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM bookmarks WHERE kind = 'event' AND item_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
