// src/services/library_service.rs
//
// Library orchestration: sections, favorite sources and library edits.
// Reads go through the read-only LibraryRepository. Writes go through the
// write repositories, which publish changes to live subscribers.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{validate_category, validate_manga, Category, LibraryManga, DEFAULT_CATEGORY_ID};
use crate::error::{AppError, AppResult};
use crate::repositories::{CategoryRepository, LibraryRepository, LibraryStream, MangaRepository};
use crate::source::{CatalogSource, MangaInfo, SourceManager};

/// One category tab of the library
#[derive(Debug, Clone, Serialize)]
pub struct LibrarySection {
    pub category: Category,
    pub items: Vec<LibraryManga>,
}

pub struct LibraryService {
    library_repo: Arc<dyn LibraryRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    manga_repo: Arc<dyn MangaRepository>,
}

impl LibraryService {
    pub fn new(
        library_repo: Arc<dyn LibraryRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        manga_repo: Arc<dyn MangaRepository>,
    ) -> Self {
        Self {
            library_repo,
            category_repo,
            manga_repo,
        }
    }

    /// The library split by category.
    ///
    /// Uncategorized manga form the Default section, which is only present
    /// when it has items. User categories follow in sort order, empty or not.
    pub async fn sections(&self) -> AppResult<Vec<LibrarySection>> {
        let mut sections = Vec::new();

        let uncategorized = self.library_repo.find_uncategorized().await?;
        if !uncategorized.is_empty() {
            sections.push(LibrarySection {
                category: Category::default_category(),
                items: uncategorized,
            });
        }

        for category in self.category_repo.list_all()? {
            let items = self.library_repo.find_to_category(category.id).await?;
            sections.push(LibrarySection { category, items });
        }

        Ok(sections)
    }

    /// Library manga of one section. The Default category id selects
    /// uncategorized manga.
    pub async fn find_section(&self, category_id: i64) -> AppResult<Vec<LibraryManga>> {
        if category_id == DEFAULT_CATEGORY_ID {
            self.library_repo.find_uncategorized().await
        } else {
            self.library_repo.find_to_category(category_id).await
        }
    }

    /// Live snapshots of one section. The Default category id selects
    /// uncategorized manga.
    pub fn subscribe_section(&self, category_id: i64) -> LibraryStream {
        if category_id == DEFAULT_CATEGORY_ID {
            self.library_repo.subscribe_uncategorized()
        } else {
            self.library_repo.subscribe_to_category(category_id)
        }
    }

    /// Registered sources that have at least one library manga, by id.
    /// Ids with no registered source are skipped.
    pub async fn favorite_sources(
        &self,
        sources: &SourceManager,
    ) -> AppResult<Vec<Arc<dyn CatalogSource>>> {
        let ids = self.library_repo.find_favorite_source_ids().await?;

        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            match sources.get(id) {
                Some(source) => resolved.push(source),
                None => log::warn!("Library references unknown source {}", id),
            }
        }

        Ok(resolved)
    }

    /// Unread chapters across the whole library
    pub async fn unread_total(&self) -> AppResult<u64> {
        let library = self.library_repo.find_all().await?;
        Ok(library.iter().map(|m| u64::from(m.unread_count)).sum())
    }

    /// Add a catalog result to the library and return its manga id.
    ///
    /// A manga already stored for the same source and key is favorited in
    /// place instead of duplicated.
    pub fn add_to_library(&self, source_id: i64, info: &MangaInfo) -> AppResult<i64> {
        if let Some(existing) = self.manga_repo.get_by_source_url(source_id, &info.key)? {
            if !existing.favorite {
                self.manga_repo.set_favorite(existing.id, true)?;
                log::info!("Added '{}' back to the library", existing.title);
            }
            return Ok(existing.id);
        }

        let mut manga = info.to_manga(source_id);
        manga.set_favorite(true);
        validate_manga(&manga)?;

        let id = self.manga_repo.insert(&manga)?;
        log::info!("Added '{}' (source {}) to the library", manga.title, source_id);

        Ok(id)
    }

    /// Create a category at the end of the sort order
    pub fn create_category(&self, name: &str) -> AppResult<Category> {
        let existing = self.category_repo.list_all()?;

        let mut category = Category::new(name.trim().to_string());
        category.order = existing.iter().map(|c| c.order + 1).max().unwrap_or(0);
        validate_category(&category)?;

        category.id = self.category_repo.insert(&category)?;
        log::info!("Created category '{}' ({})", category.name, category.id);

        Ok(category)
    }

    /// Replace the categories of a library manga. The Default category id is
    /// implicit and ignored here; an empty list makes the manga uncategorized.
    pub fn assign_categories(&self, manga_id: i64, category_ids: &[i64]) -> AppResult<()> {
        let manga = self
            .manga_repo
            .get_by_id(manga_id)?
            .filter(|m| m.favorite)
            .ok_or(AppError::NotFound)?;

        let mut ids: Vec<i64> = category_ids
            .iter()
            .copied()
            .filter(|id| *id != DEFAULT_CATEGORY_ID)
            .collect();
        ids.sort_unstable();
        ids.dedup();

        self.category_repo.set_manga_categories(manga.id, &ids)?;
        log::debug!("Manga {} categories set to {:?}", manga.id, ids);

        Ok(())
    }
}
