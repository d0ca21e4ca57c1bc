// src/source/catalog.rs
//
// Catalog source contract
//
// A catalog source is stateless between calls. The caller owns pagination
// (page number and has-next flag); pages start at 1.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::source::model::{FilterList, Listing, MangasPageInfo};

/// First page number accepted by catalog sources
pub const FIRST_PAGE: u32 = 1;

/// Identity of a content provider
pub trait Source: Send + Sync {
    /// Stable id, stored with every manga from this source
    fn id(&self) -> i64;

    fn name(&self) -> &str;

    /// Content language (ISO 639-1, or "other")
    fn lang(&self) -> &str;
}

/// A source whose catalog can be browsed and searched
#[async_trait]
pub trait CatalogSource: Source {
    /// One page of the given listing. `None` selects the source's default listing.
    async fn fetch_manga_list(&self, sort: Option<Listing>, page: u32) -> AppResult<MangasPageInfo>;

    /// One page of results matching `filters`
    async fn fetch_manga_list_with_filters(
        &self,
        filters: FilterList,
        page: u32,
    ) -> AppResult<MangasPageInfo>;

    /// Listings this source offers
    fn listings(&self) -> Vec<Listing>;

    /// Filters this source accepts, in their default state
    fn filters(&self) -> FilterList;
}
