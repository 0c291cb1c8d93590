//! Hadith entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::access::Owned;

/// A hadith narration with its chain and source reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hadith {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub narrator: String,
    pub source: String,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hadith {
    pub fn grade_label(&self) -> &str {
        self.grade.as_deref().unwrap_or("")
    }

    /// First characters of the text, for listings.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}…")
        } else {
            head
        }
    }
}

impl Owned for Hadith {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Fields supplied when creating or editing a hadith.
#[derive(Debug, Clone, PartialEq)]
pub struct HadithInput {
    pub text: String,
    pub narrator: String,
    pub source: String,
    pub grade: Option<String>,
}
