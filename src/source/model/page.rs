use serde::{Deserialize, Serialize};

use super::manga_info::MangaInfo;

/// One page of catalog results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MangasPageInfo {
    pub mangas: Vec<MangaInfo>,

    /// Whether the source has a page after this one
    pub has_next_page: bool,
}

impl MangasPageInfo {
    pub fn new(mangas: Vec<MangaInfo>, has_next_page: bool) -> Self {
        Self {
            mangas,
            has_next_page,
        }
    }

    /// A last page without results
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mangas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mangas.is_empty()
    }
}
