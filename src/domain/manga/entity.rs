use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manga known to the database, in the library or not.
///
/// `favorite` decides library membership. Catalog results are stored
/// with `favorite = false` until the user adds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manga {
    /// Database identifier (0 until inserted)
    pub id: i64,

    /// Id of the catalog source this manga comes from
    pub source: i64,

    /// Source-relative key
    pub url: String,

    pub title: String,

    pub artist: Option<String>,

    pub author: Option<String>,

    pub description: Option<String>,

    pub genres: Vec<String>,

    pub status: MangaStatus,

    pub thumbnail_url: Option<String>,

    /// In the library
    pub favorite: bool,

    /// Last time new chapters were found
    pub last_update: Option<DateTime<Utc>>,

    /// Details have been fetched from the source at least once
    pub initialized: bool,

    /// Reader mode preference
    pub viewer: i32,

    /// Chapter display flags
    pub flags: i32,

    /// When the manga was added to the library
    pub date_added: Option<DateTime<Utc>>,
}

/// Publication status as reported by the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MangaStatus {
    #[default]
    Unknown,
    Ongoing,
    Completed,
    Licensed,
}

impl Manga {
    /// A manga not yet stored and not in the library
    pub fn new(source: i64, url: String, title: String) -> Self {
        Self {
            id: 0,
            source,
            url,
            title,
            artist: None,
            author: None,
            description: None,
            genres: Vec::new(),
            status: MangaStatus::Unknown,
            thumbnail_url: None,
            favorite: false,
            last_update: None,
            initialized: false,
            viewer: 0,
            flags: 0,
            date_added: None,
        }
    }

    /// Add to or remove from the library
    pub fn set_favorite(&mut self, favorite: bool) {
        self.favorite = favorite;
        self.date_added = if favorite { Some(Utc::now()) } else { None };
    }
}

impl MangaStatus {
    /// Stored integer code
    pub fn code(&self) -> i64 {
        match self {
            MangaStatus::Unknown => 0,
            MangaStatus::Ongoing => 1,
            MangaStatus::Completed => 2,
            MangaStatus::Licensed => 3,
        }
    }

    /// Unrecognized codes map to Unknown
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => MangaStatus::Ongoing,
            2 => MangaStatus::Completed,
            3 => MangaStatus::Licensed,
            _ => MangaStatus::Unknown,
        }
    }
}

impl std::fmt::Display for Manga {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl std::fmt::Display for MangaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MangaStatus::Unknown => write!(f, "unknown"),
            MangaStatus::Ongoing => write!(f, "ongoing"),
            MangaStatus::Completed => write!(f, "completed"),
            MangaStatus::Licensed => write!(f, "licensed"),
        }
    }
}
