//! Category invariants:
//!
//! 1. Category name cannot be empty
//! 2. Id 0 and negative orders are reserved for the implicit default category
//! 3. A manga can belong to several categories
//! 4. Deleting a category does NOT delete its manga

pub mod entity;

pub use entity::{Category, DEFAULT_CATEGORY_ID};

use crate::domain::{DomainError, DomainResult};

/// Validates Category invariants
pub fn validate_category(category: &Category) -> DomainResult<()> {
    if category.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Category name cannot be empty".to_string(),
        ));
    }
    if category.order < 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Category '{}' has a negative order, which is reserved for the default category",
            category.name
        )));
    }
    Ok(())
}
