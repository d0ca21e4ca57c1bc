// src/source/manager.rs
//
// Registry of catalog sources keyed by source id

use std::collections::HashMap;
use std::sync::Arc;

use crate::source::catalog::CatalogSource;

pub struct SourceManager {
    sources: HashMap<i64, Arc<dyn CatalogSource>>,
}

impl SourceManager {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Register a source, replacing any source with the same id
    pub fn register(&mut self, source: Arc<dyn CatalogSource>) {
        let id = source.id();
        if let Some(previous) = self.sources.insert(id, source) {
            log::warn!("Source {} ({}) replaced", id, previous.name());
        }
    }

    pub fn get(&self, id: i64) -> Option<Arc<dyn CatalogSource>> {
        self.sources.get(&id).cloned()
    }

    /// All sources sorted by name
    pub fn catalog_sources(&self) -> Vec<Arc<dyn CatalogSource>> {
        let mut sources: Vec<_> = self.sources.values().cloned().collect();
        sources.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        sources
    }

    /// Sources in `lang`, sorted by name
    pub fn sources_for_lang(&self, lang: &str) -> Vec<Arc<dyn CatalogSource>> {
        self.catalog_sources()
            .into_iter()
            .filter(|s| s.lang() == lang)
            .collect()
    }

    /// Distinct languages, sorted
    pub fn languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self.sources.values().map(|s| s.lang().to_string()).collect();
        langs.sort();
        langs.dedup();
        langs
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceManager {
    fn default() -> Self {
        Self::new()
    }
}
