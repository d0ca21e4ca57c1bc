// src/presentation/mod.rs
//
// Row rendering for library lists

pub mod holder;

pub use holder::{LibraryHolder, LibraryItem, TextRowHolder};
