// src/source/mod.rs
//
// Catalog sources: the browse/search contract, its data model, a registry,
// caller-side paging and the built-in local directory source.

pub mod catalog;
pub mod local;
pub mod manager;
pub mod model;
pub mod pager;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{CatalogSource, Source, FIRST_PAGE};
pub use local::{LocalSource, LOCAL_SOURCE_ID};
pub use manager::SourceManager;
pub use model::{Filter, FilterList, Listing, MangaInfo, MangasPageInfo, SortSelection, TriState};
pub use pager::{CatalogPager, PagerQuery};
