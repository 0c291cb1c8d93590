//! Core domain entities.
//!
//! Entities are plain data structures; persistence rows live in the
//! infrastructure layer and are converted into these types.
//!
//! # Entity Types
//!
//! - [`User`] / [`Role`] - Accounts and their permissions
//! - [`Event`] - Dated historical events, shown on the timeline and map
//! - [`Hadith`] - Narrations with source references
//! - [`Badge`] - Achievements awarded by admins
//! - [`Bookmark`] - A user's saved events and hadiths
//! - [`Ayah`] - Quran verses, searchable
//! - [`Backup`] - Exportable snapshot of curated content
//! - [`SessionUser`] - Identity carried by a session cookie
//!
//! Creation and edit payloads use separate `*Input` / `New*` structs.

pub mod ayah;
pub mod backup;
pub mod badge;
pub mod bookmark;
pub mod event;
pub mod hadith;
pub mod session;
pub mod user;

pub use ayah::Ayah;
pub use backup::{BACKUP_VERSION, Backup};
pub use badge::{Badge, BadgeInput};
pub use bookmark::{Bookmark, BookmarkKind};
pub use event::{Event, EventInput, century_of};
pub use hadith::{Hadith, HadithInput};
pub use session::SessionUser;
pub use user::{NewUser, Role, User};
