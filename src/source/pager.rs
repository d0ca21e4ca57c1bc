// src/source/pager.rs
//
// Caller-side pagination over a stateless catalog source

use std::sync::Arc;

use crate::error::AppResult;
use crate::source::catalog::{CatalogSource, FIRST_PAGE};
use crate::source::model::{FilterList, Listing, MangasPageInfo};

/// What the pager is browsing
#[derive(Debug, Clone, PartialEq)]
pub enum PagerQuery {
    Listing(Option<Listing>),
    Filters(FilterList),
}

pub struct CatalogPager {
    source: Arc<dyn CatalogSource>,
    query: PagerQuery,
    next_page: u32,
    has_next_page: bool,
}

impl CatalogPager {
    pub fn new(source: Arc<dyn CatalogSource>, query: PagerQuery) -> Self {
        Self {
            source,
            query,
            next_page: FIRST_PAGE,
            has_next_page: true,
        }
    }

    pub fn source(&self) -> &Arc<dyn CatalogSource> {
        &self.source
    }

    pub fn query(&self) -> &PagerQuery {
        &self.query
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Page number the next request will fetch
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Fetch the next page. Returns None once the source reported the end.
    ///
    /// A failed request leaves the pager untouched so it can be retried.
    /// An empty page ends pagination even if the source claims more.
    pub async fn request_next_page(&mut self) -> AppResult<Option<MangasPageInfo>> {
        if !self.has_next_page {
            return Ok(None);
        }

        let page = self.next_page;
        let result = match &self.query {
            PagerQuery::Listing(listing) => {
                self.source.fetch_manga_list(listing.clone(), page).await?
            }
            PagerQuery::Filters(filters) => {
                self.source
                    .fetch_manga_list_with_filters(filters.clone(), page)
                    .await?
            }
        };

        log::debug!(
            "Source {} page {}: {} results, has next: {}",
            self.source.id(),
            page,
            result.len(),
            result.has_next_page
        );

        self.has_next_page = result.has_next_page && !result.is_empty();
        self.next_page += 1;

        Ok(Some(result))
    }

    /// Start over from the first page
    pub fn reset(&mut self) {
        self.next_page = FIRST_PAGE;
        self.has_next_page = true;
    }
}
