use super::entity::Manga;
use crate::domain::{DomainError, DomainResult};

/// Validates Manga invariants
///
/// 1. Title cannot be empty
/// 2. Source key (url) cannot be empty
/// 3. A library manga has a date_added
pub fn validate_manga(manga: &Manga) -> DomainResult<()> {
    if manga.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Manga title cannot be empty".to_string(),
        ));
    }

    if manga.url.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Manga url cannot be empty".to_string(),
        ));
    }

    if manga.favorite && manga.date_added.is_none() {
        return Err(DomainError::InvariantViolation(format!(
            "Library manga '{}' has no date_added",
            manga.title
        )));
    }

    Ok(())
}
