// src/source/testing.rs
//
// In-memory catalog source for tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::source::catalog::{CatalogSource, Source};
use crate::source::model::{Filter, FilterList, Listing, MangaInfo, MangasPageInfo};

const PAGE_SIZE: usize = 20;

/// Serves `total` generated entries, 20 per page
pub struct StaticCatalog {
    id: i64,
    name: String,
    lang: String,
    total: usize,
    claim_more: bool,
    fail_next: AtomicBool,
    requested: Mutex<Vec<u32>>,
    last_filters: Mutex<Option<FilterList>>,
}

impl StaticCatalog {
    pub fn new(id: i64, name: &str, lang: &str, total: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            lang: lang.to_string(),
            total,
            claim_more: false,
            fail_next: AtomicBool::new(false),
            requested: Mutex::new(Vec::new()),
            last_filters: Mutex::new(None),
        }
    }

    /// Always report a next page, even past the end
    pub fn claiming_more_pages(mut self) -> Self {
        self.claim_more = true;
        self
    }

    /// Fail the first request
    pub fn failing_once(self) -> Self {
        self.fail_next.store(true, Ordering::SeqCst);
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }

    pub fn last_filters(&self) -> Option<FilterList> {
        self.last_filters.lock().unwrap().clone()
    }

    fn page(&self, page: u32) -> AppResult<MangasPageInfo> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::Source("temporary failure".to_string()));
        }
        self.requested.lock().unwrap().push(page);

        let start = (page as usize - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.total);
        let mangas = (start..end.max(start))
            .map(|i| MangaInfo::new(format!("/manga/{}", i), format!("Manga {}", i)))
            .collect();

        Ok(MangasPageInfo::new(mangas, self.claim_more || end < self.total))
    }
}

impl Source for StaticCatalog {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn lang(&self) -> &str {
        &self.lang
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_manga_list(&self, _sort: Option<Listing>, page: u32) -> AppResult<MangasPageInfo> {
        self.page(page)
    }

    async fn fetch_manga_list_with_filters(
        &self,
        filters: FilterList,
        page: u32,
    ) -> AppResult<MangasPageInfo> {
        *self.last_filters.lock().unwrap() = Some(filters);
        self.page(page)
    }

    fn listings(&self) -> Vec<Listing> {
        vec![Listing::new("All")]
    }

    fn filters(&self) -> FilterList {
        FilterList::new(vec![Filter::Text {
            name: "Title".to_string(),
            state: String::new(),
        }])
    }
}
