use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::category::DEFAULT_CATEGORY_ID;
use crate::domain::manga::Manga;

/// A library manga with its aggregated library metadata.
///
/// This is a read projection computed by a query join. It describes the
/// database state it was read from and is never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryManga {
    pub manga: Manga,

    /// Chapters not yet read
    pub unread_count: u32,

    /// All known chapters
    pub chapter_count: u32,

    /// Most recent chapter upload
    pub latest_upload: Option<DateTime<Utc>>,

    /// Categories the manga belongs to, ascending. Empty when uncategorized.
    pub category_ids: Vec<i64>,
}

impl LibraryManga {
    pub fn id(&self) -> i64 {
        self.manga.id
    }

    pub fn title(&self) -> &str {
        &self.manga.title
    }

    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category_ids.is_empty()
    }

    /// Whether the manga shows under `category_id` (0 is the default category)
    pub fn belongs_to(&self, category_id: i64) -> bool {
        if category_id == DEFAULT_CATEGORY_ID {
            self.is_uncategorized()
        } else {
            self.category_ids.contains(&category_id)
        }
    }
}
