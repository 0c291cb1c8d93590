//! PostgreSQL repository implementations.
//!
//! Queries are checked at runtime (`query_as` into `FromRow` row structs),
//! and rows are converted into domain entities at the boundary.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Accounts and roles
//! - [`PgEventRepository`] - Historical events
//! - [`PgHadithRepository`] - Hadith collection
//! - [`PgBadgeRepository`] - Badges and awards
//! - [`PgBookmarkRepository`] - User bookmarks
//! - [`PgQuranRepository`] - Quran text search
//! - [`PgBackupRepository`] - Content export and restore

pub mod pg_backup_repository;
pub mod pg_badge_repository;
pub mod pg_bookmark_repository;
pub mod pg_event_repository;
pub mod pg_hadith_repository;
pub mod pg_quran_repository;
pub mod pg_user_repository;

pub use pg_backup_repository::PgBackupRepository;
pub use pg_badge_repository::PgBadgeRepository;
pub use pg_bookmark_repository::PgBookmarkRepository;
pub use pg_event_repository::PgEventRepository;
pub use pg_hadith_repository::PgHadithRepository;
pub use pg_quran_repository::PgQuranRepository;
pub use pg_user_repository::PgUserRepository;

/// Builds an `ILIKE` pattern matching `term` anywhere, with the wildcard
/// characters in `term` taken literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
