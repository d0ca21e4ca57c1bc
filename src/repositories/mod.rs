// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are data mappers
// - NO business logic
// - NO invariant enforcement
// - Writes publish the tables they touched after commit
// - Explicit SQL only

pub mod category_repository;
pub mod chapter_repository;
pub mod library_repository;
pub mod manga_repository;
pub(crate) mod row_mapping;

#[cfg(test)]
mod library_repository_tests;

pub use category_repository::{CategoryRepository, SqliteCategoryRepository};
pub use chapter_repository::{ChapterRepository, SqliteChapterRepository};
pub use library_repository::{LibraryRepository, LibraryStream, SqliteLibraryRepository};
pub use manga_repository::{MangaRepository, SqliteMangaRepository};

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use manga_repository::MockMangaRepository;
#[cfg(test)]
pub use library_repository::MockLibraryRepository;
