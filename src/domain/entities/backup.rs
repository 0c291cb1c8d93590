//! Portable snapshot of curated content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Badge, Event, Hadith};

/// Current snapshot format version.
pub const BACKUP_VERSION: u32 = 1;

/// Content snapshot produced by the admin backup page and accepted by restore.
///
/// Users and bookmarks are deliberately absent: a restore replaces curated
/// content, never accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub events: Vec<Event>,
    pub hadiths: Vec<Hadith>,
    pub badges: Vec<Badge>,
}

impl Backup {
    pub fn new(events: Vec<Event>, hadiths: Vec<Hadith>, badges: Vec<Badge>) -> Self {
        Self {
            version: BACKUP_VERSION,
            created_at: Utc::now(),
            events,
            hadiths,
            badges,
        }
    }

    /// Returns true if this snapshot was written by a compatible version.
    pub fn is_supported(&self) -> bool {
        self.version == BACKUP_VERSION
    }

    /// Checks the snapshot against the constraints of the content tables.
    ///
    /// Returns a description of the first problem found.
    pub fn check(&self) -> Result<(), String> {
        let mut ids = HashSet::new();
        for event in &self.events {
            if event.id <= 0 || !ids.insert(event.id) {
                return Err(format!("event id {} is invalid or repeated", event.id));
            }
            if event.hijri_year <= 0 {
                return Err(format!("event {} has year {}", event.id, event.hijri_year));
            }
            let latitude_ok = event.latitude.is_none_or(|v| (-90.0..=90.0).contains(&v));
            let longitude_ok = event.longitude.is_none_or(|v| (-180.0..=180.0).contains(&v));
            if !latitude_ok || !longitude_ok {
                return Err(format!("event {} has coordinates out of range", event.id));
            }
        }

        ids.clear();
        for hadith in &self.hadiths {
            if hadith.id <= 0 || !ids.insert(hadith.id) {
                return Err(format!("hadith id {} is invalid or repeated", hadith.id));
            }
        }

        ids.clear();
        let mut names = HashSet::new();
        for badge in &self.badges {
            if badge.id <= 0 || !ids.insert(badge.id) {
                return Err(format!("badge id {} is invalid or repeated", badge.id));
            }
            if !names.insert(badge.name.as_str()) {
                return Err(format!("badge name '{}' is repeated", badge.name));
            }
        }

        Ok(())
    }
}
