//! Historical event entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::access::Owned;

/// A dated event in Islamic history, owned by the user who submitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub hijri_year: i32,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Hijri century the event falls in. Years 1-100 are the first century.
    ///
    /// Returns `None` for non-positive years.
    pub fn century(&self) -> Option<i32> {
        century_of(self.hijri_year)
    }

    /// Returns both coordinates when the event can be placed on a map.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Location text for display, empty when unknown.
    pub fn location_label(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }
}

impl Owned for Event {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Computes the Hijri century of `year`.
pub fn century_of(year: i32) -> Option<i32> {
    (year > 0).then(|| (year - 1) / 100 + 1)
}

/// Fields supplied when creating or editing an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub hijri_year: i32,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
