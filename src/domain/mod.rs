// src/domain/mod.rs
//
// Domain root: entities, read projections and their invariants.
// All other modules import from `crate::domain::*`

pub mod category;
pub mod chapter;
pub mod library;
pub mod manga;

pub use category::{validate_category, Category, DEFAULT_CATEGORY_ID};
pub use chapter::Chapter;
pub use library::LibraryManga;
pub use manga::{validate_manga, Manga, MangaStatus};

use thiserror::Error;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
