pub mod entity;
pub mod invariants;

pub use entity::{Manga, MangaStatus};
pub use invariants::validate_manga;
