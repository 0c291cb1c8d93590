//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by `crate::infrastructure::persistence`. Mock implementations
//! are generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Accounts and roles
//! - [`EventRepository`] - Historical events
//! - [`HadithRepository`] - Hadith narrations
//! - [`BadgeRepository`] - Badges and awards
//! - [`BookmarkRepository`] - Per-user bookmarks
//! - [`QuranRepository`] - Verse search
//! - [`BackupRepository`] - Content export and restore

pub mod backup_repository;
pub mod badge_repository;
pub mod bookmark_repository;
pub mod event_repository;
pub mod hadith_repository;
pub mod quran_repository;
pub mod user_repository;

pub use backup_repository::BackupRepository;
pub use badge_repository::BadgeRepository;
pub use bookmark_repository::BookmarkRepository;
pub use event_repository::EventRepository;
pub use hadith_repository::HadithRepository;
pub use quran_repository::QuranRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use backup_repository::MockBackupRepository;
#[cfg(test)]
pub use badge_repository::MockBadgeRepository;
#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use hadith_repository::MockHadithRepository;
#[cfg(test)]
pub use quran_repository::MockQuranRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
