//! Repository trait for Quran text search.

use crate::domain::entities::Ayah;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuranRepository: Send + Sync {
    /// Finds verses whose Arabic or English text contains `query`
    /// (case-insensitive), in mushaf order, at most `limit` rows.
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Ayah>, AppError>;
}
