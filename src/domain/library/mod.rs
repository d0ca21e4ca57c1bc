pub mod entity;

pub use entity::LibraryManga;
