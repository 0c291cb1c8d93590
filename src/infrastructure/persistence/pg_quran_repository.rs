//! PostgreSQL implementation of Quran search.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::contains_pattern;
use crate::domain::entities::Ayah;
use crate::domain::repositories::QuranRepository;
use crate::error::AppError;

/// Read-only repository over the `quran_ayahs` table.
pub struct PgQuranRepository {
    pool: Arc<PgPool>,
}

impl PgQuranRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AyahRow {
    id: i64,
    surah: i32,
    ayah: i32,
    text_ar: String,
    text_en: String,
}

impl From<AyahRow> for Ayah {
    fn from(row: AyahRow) -> Self {
        Ayah {
            id: row.id,
            surah: row.surah,
            ayah: row.ayah,
            text_ar: row.text_ar,
            text_en: row.text_en,
        }
    }
}

#[async_trait]
impl QuranRepository for PgQuranRepository {
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Ayah>, AppError> {
        let rows = sqlx::query_as::<_, AyahRow>(
            r#"
            SELECT id, surah, ayah, text_ar, text_en
            FROM quran_ayahs
            WHERE text_ar ILIKE $1 OR text_en ILIKE $1
            ORDER BY surah, ayah
            LIMIT $2
            "#,
        )
        .bind(contains_pattern(query))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Ayah::from).collect())
    }
}
