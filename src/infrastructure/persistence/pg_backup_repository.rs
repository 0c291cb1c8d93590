//! PostgreSQL implementation of content backup and restore.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use super::pg_badge_repository::BadgeRow;
use super::pg_event_repository::EventRow;
use super::pg_hadith_repository::HadithRow;
use crate::domain::entities::{Backup, Badge, Event, Hadith};
use crate::domain::repositories::BackupRepository;
use crate::error::AppError;

/// Exports and restores events, hadiths and badges.
///
/// Accounts are never part of a backup; restored records keep their
/// original `user_id` when that account exists here.
pub struct PgBackupRepository {
    pool: Arc<PgPool>,
}

impl PgBackupRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Moves a table's id sequence past the highest restored id.
async fn reset_sequence(tx: &mut Transaction<'_, Postgres>, table: &str) -> Result<(), AppError> {
    let sql = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), COALESCE((SELECT MAX(id) FROM {table}), 0) + 1, false)"
    );
    sqlx::query(&sql).execute(&mut **tx).await?;
    Ok(())
}

#[async_trait]
impl BackupRepository for PgBackupRepository {
    async fn export(&self) -> Result<Backup, AppError> {
        let mut tx = self.pool.begin().await?;

        // One snapshot for all three tables.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let events = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, user_id, title, description, hijri_year, location,
                   latitude, longitude, created_at, updated_at
            FROM events ORDER BY id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let hadiths = sqlx::query_as::<_, HadithRow>(
            r#"
            SELECT id, user_id, text, narrator, source, grade, created_at, updated_at
            FROM hadiths ORDER BY id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let badges = sqlx::query_as::<_, BadgeRow>(
            "SELECT id, name, description, icon, created_at FROM badges ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Backup::new(
            events.into_iter().map(Event::from).collect(),
            hadiths.into_iter().map(Hadith::from).collect(),
            badges.into_iter().map(Badge::from).collect(),
        ))
    }

    async fn restore(&self, backup: Backup, fallback_owner: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM bookmarks").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM user_badges").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM events").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM hadiths").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM badges").execute(&mut *tx).await?;

        for event in &backup.events {
            sqlx::query(
                r#"
                INSERT INTO events (id, user_id, title, description, hijri_year, location,
                                    latitude, longitude, created_at, updated_at)
                VALUES ($1, COALESCE((SELECT id FROM users WHERE id = $2), $11),
                        $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(event.id)
            .bind(event.user_id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.hijri_year)
            .bind(&event.location)
            .bind(event.latitude)
            .bind(event.longitude)
            .bind(event.created_at)
            .bind(event.updated_at)
            .bind(fallback_owner)
            .execute(&mut *tx)
            .await?;
        }

        for hadith in &backup.hadiths {
            sqlx::query(
                r#"
                INSERT INTO hadiths (id, user_id, text, narrator, source, grade, created_at, updated_at)
                VALUES ($1, COALESCE((SELECT id FROM users WHERE id = $2), $9),
                        $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(hadith.id)
            .bind(hadith.user_id)
            .bind(&hadith.text)
            .bind(&hadith.narrator)
            .bind(&hadith.source)
            .bind(&hadith.grade)
            .bind(hadith.created_at)
            .bind(hadith.updated_at)
            .bind(fallback_owner)
            .execute(&mut *tx)
            .await?;
        }

        for badge in &backup.badges {
            sqlx::query(
                r#"
                INSERT INTO badges (id, name, description, icon, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(badge.id)
            .bind(&badge.name)
            .bind(&badge.description)
            .bind(&badge.icon)
            .bind(badge.created_at)
            .execute(&mut *tx)
            .await?;
        }

        for table in ["events", "hadiths", "badges"] {
            reset_sequence(&mut tx, table).await?;
        }

        tx.commit().await?;

        tracing::info!(
            events = backup.events.len(),
            hadiths = backup.hadiths.len(),
            badges = backup.badges.len(),
            "content restored"
        );
        Ok(())
    }
}
