use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chapter of a stored manga
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Database identifier (0 until inserted)
    pub id: i64,
    pub manga_id: i64,

    /// Source-relative key
    pub url: String,
    pub name: String,
    pub scanlator: Option<String>,

    pub read: bool,
    pub bookmark: bool,
    pub last_page_read: i32,

    /// Parsed chapter number, -1 when unknown
    pub number: f32,

    /// Position in the source's own chapter list
    pub source_order: i32,

    pub date_fetch: Option<DateTime<Utc>>,
    pub date_upload: Option<DateTime<Utc>>,
}

impl Chapter {
    pub fn new(manga_id: i64, url: String, name: String) -> Self {
        Self {
            id: 0,
            manga_id,
            url,
            name,
            scanlator: None,
            read: false,
            bookmark: false,
            last_page_read: 0,
            number: -1.0,
            source_order: 0,
            date_fetch: None,
            date_upload: None,
        }
    }

    pub fn is_recognized_number(&self) -> bool {
        self.number >= 0.0
    }
}
