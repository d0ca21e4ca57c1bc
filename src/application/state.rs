// src/application/state.rs

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::LibraryConfig;
use crate::db::{verify_database_integrity, Database};
use crate::error::AppResult;
use crate::repositories::{
    CategoryRepository, ChapterRepository, LibraryRepository, MangaRepository,
    SqliteCategoryRepository, SqliteChapterRepository, SqliteLibraryRepository,
    SqliteMangaRepository,
};
use crate::services::LibraryService;
use crate::source::{LocalSource, SourceManager};

/// Everything a command needs, opened once per process.
/// All fields are Arc-wrapped so streams and tasks can hold them.
pub struct AppState {
    pub db: Database,
    pub manga_repo: Arc<dyn MangaRepository>,
    pub chapter_repo: Arc<dyn ChapterRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub library_repo: Arc<dyn LibraryRepository>,
    pub library_service: Arc<LibraryService>,
    pub sources: Arc<SourceManager>,
}

impl AppState {
    /// Open the configured database and register the local source when a
    /// directory is given.
    pub fn open(config: &LibraryConfig, local_dir: Option<PathBuf>) -> AppResult<Self> {
        config.ensure_parent_dir()?;
        let db = Database::open(config)?;

        // 1. REPOSITORIES
        let manga_repo: Arc<dyn MangaRepository> = Arc::new(SqliteMangaRepository::new(db.clone()));
        let chapter_repo: Arc<dyn ChapterRepository> =
            Arc::new(SqliteChapterRepository::new(db.clone()));
        let category_repo: Arc<dyn CategoryRepository> =
            Arc::new(SqliteCategoryRepository::new(db.clone()));
        let library_repo: Arc<dyn LibraryRepository> =
            Arc::new(SqliteLibraryRepository::new(db.clone()));

        // 2. SERVICES
        let library_service = Arc::new(LibraryService::new(
            library_repo.clone(),
            category_repo.clone(),
            manga_repo.clone(),
        ));

        // 3. SOURCES
        let mut sources = SourceManager::new();
        if let Some(dir) = local_dir {
            log::info!("Local source at {}", dir.display());
            sources.register(Arc::new(LocalSource::new(dir)));
        }

        log::info!("Library opened at {}", config.database_path().display());

        Ok(Self {
            db,
            manga_repo,
            chapter_repo,
            category_repo,
            library_repo,
            library_service,
            sources: Arc::new(sources),
        })
    }

    /// Run SQLite's integrity check on the library database
    pub fn check_integrity(&self) -> AppResult<()> {
        let conn = self.db.connection()?;
        verify_database_integrity(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LOCAL_SOURCE_ID;

    #[tokio::test]
    async fn test_open_creates_database_and_registers_local_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = LibraryConfig::with_database_path(dir.path().join("data/library.db"));

        let state = AppState::open(&config, Some(dir.path().to_path_buf())).unwrap();

        assert!(config.database_path().is_file());
        assert!(state.sources.get(LOCAL_SOURCE_ID).is_some());
        assert!(state.library_repo.find_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_fresh_library_passes_integrity_check() {
        let dir = tempfile::tempdir().unwrap();
        let config = LibraryConfig::with_database_path(dir.path().join("library.db"));

        let state = AppState::open(&config, None).unwrap();

        state.check_integrity().unwrap();
    }

    #[test]
    fn test_open_without_local_dir_has_no_sources() {
        let dir = tempfile::tempdir().unwrap();
        let config = LibraryConfig::with_database_path(dir.path().join("library.db"));

        let state = AppState::open(&config, None).unwrap();

        assert!(state.sources.is_empty());
    }
}
