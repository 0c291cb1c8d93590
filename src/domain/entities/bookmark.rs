//! Per-user bookmarks on events and hadiths.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Kind of record a bookmark points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkKind {
    Event,
    Hadith,
}

impl BookmarkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BookmarkKind::Event => "event",
            BookmarkKind::Hadith => "hadith",
        }
    }
}

impl FromStr for BookmarkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(BookmarkKind::Event),
            "hadith" => Ok(BookmarkKind::Hadith),
            other => Err(format!("unknown bookmark kind '{other}'")),
        }
    }
}

impl fmt::Display for BookmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookmark joined with a display title of the bookmarked record.
#[derive(Debug, Clone)]
pub struct Bookmark {
    pub id: i64,
    pub user_id: i64,
    pub kind: BookmarkKind,
    pub item_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("event".parse::<BookmarkKind>().unwrap(), BookmarkKind::Event);
        assert_eq!("hadith".parse::<BookmarkKind>().unwrap(), BookmarkKind::Hadith);
        assert!("ayah".parse::<BookmarkKind>().is_err());
    }
}
