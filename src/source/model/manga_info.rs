use serde::{Deserialize, Serialize};

use crate::domain::manga::{Manga, MangaStatus};

/// A manga as a catalog source describes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaInfo {
    /// Source-relative key, stored as the manga url
    pub key: String,
    pub title: String,
    pub artist: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub status: MangaStatus,
    pub cover: Option<String>,
}

impl MangaInfo {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            artist: None,
            author: None,
            description: None,
            genres: Vec::new(),
            status: MangaStatus::Unknown,
            cover: None,
        }
    }

    /// An unsaved, non-library manga for `source_id`
    pub fn to_manga(&self, source_id: i64) -> Manga {
        let mut manga = Manga::new(source_id, self.key.clone(), self.title.clone());
        manga.artist = self.artist.clone();
        manga.author = self.author.clone();
        manga.description = self.description.clone();
        manga.genres = self.genres.clone();
        manga.status = self.status;
        manga.thumbnail_url = self.cover.clone();
        manga
    }
}
