// src/source/model/mod.rs
//
// Data exchanged with catalog sources

pub mod filter;
pub mod listing;
pub mod manga_info;
pub mod page;

pub use filter::{Filter, FilterList, SortSelection, TriState};
pub use listing::Listing;
pub use manga_info::MangaInfo;
pub use page::MangasPageInfo;
