// src/lib.rs
// Mangashelf - Local-first manga library
//
// Architecture:
// - Domain: entities, read projections and their invariants
// - Repositories: explicit SQL; writes publish the tables they touched
// - Live queries: library reads re-evaluated after every relevant commit
// - Sources: stateless catalog providers, paged by the caller
// - Presentation: binds library items to pre-allocated rows

pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod presentation;
pub mod repositories;
pub mod services;
pub mod source;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_category, validate_manga, Category, Chapter, LibraryManga, Manga, MangaStatus,
    DEFAULT_CATEGORY_ID,
};

// ============================================================================
// PUBLIC API - Errors and configuration
// ============================================================================

pub use config::LibraryConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{Database, Table};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    CategoryRepository, ChapterRepository, LibraryRepository, LibraryStream, MangaRepository,
    SqliteCategoryRepository, SqliteChapterRepository, SqliteLibraryRepository,
    SqliteMangaRepository,
};

// ============================================================================
// PUBLIC API - Services, sources and presentation
// ============================================================================

pub use application::AppState;
pub use presentation::{LibraryHolder, LibraryItem, TextRowHolder};
pub use services::{LibraryService, LibrarySection};
pub use source::{
    CatalogPager, CatalogSource, Filter, FilterList, Listing, LocalSource, MangaInfo,
    MangasPageInfo, PagerQuery, Source, SourceManager,
};
