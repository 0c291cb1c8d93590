//! Achievement badges awarded to users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Badge {
    pub fn icon_label(&self) -> &str {
        self.icon.as_deref().unwrap_or("")
    }
}

/// Fields supplied by the admin badge form.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeInput {
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
}
