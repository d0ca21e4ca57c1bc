// src/source/local.rs
//
// Catalog source over a local directory
//
// Each direct subdirectory of the root is one manga, keyed by its directory
// name. A `cover.{jpg,jpeg,png,webp}` file becomes the cover. An optional
// `details.json` overrides the title and supplies the other details.
// Hidden directories are skipped.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::domain::manga::MangaStatus;
use crate::error::{AppError, AppResult};
use crate::source::catalog::{CatalogSource, Source, FIRST_PAGE};
use crate::source::model::{
    Filter, FilterList, Listing, MangaInfo, MangasPageInfo, SortSelection,
};

pub const LOCAL_SOURCE_ID: i64 = 0;
pub const LOCAL_SOURCE_NAME: &str = "Local source";
pub const LOCAL_SOURCE_LANG: &str = "other";

pub const PAGE_SIZE: usize = 20;

pub const LISTING_POPULAR: &str = "Popular";
pub const LISTING_LATEST: &str = "Latest";

pub const FILTER_TITLE: &str = "Title";
pub const FILTER_SORT: &str = "Sort by";

const SORT_TITLE: usize = 0;
const SORT_MODIFIED: usize = 1;

const COVER_NAMES: &[&str] = &["cover.jpg", "cover.jpeg", "cover.png", "cover.webp"];
const DETAILS_FILE: &str = "details.json";

/// Optional per-manga metadata file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LocalDetails {
    title: Option<String>,
    author: Option<String>,
    artist: Option<String>,
    description: Option<String>,
    genre: Vec<String>,
    status: Option<i64>,
}

/// A scanned manga directory
#[derive(Debug, Clone)]
struct LocalEntry {
    info: MangaInfo,
    modified: SystemTime,
}

pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the root directory on the blocking thread pool
    async fn scan(&self) -> AppResult<Vec<LocalEntry>> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || scan_directory(&root)).await?
    }

    async fn page(
        &self,
        page: u32,
        title: Option<String>,
        sort: SortSelection,
    ) -> AppResult<MangasPageInfo> {
        if page < FIRST_PAGE {
            return Err(AppError::Source(format!("Invalid page number {}", page)));
        }

        let mut entries = self.scan().await?;

        if let Some(query) = title {
            let query = query.to_lowercase();
            entries.retain(|e| e.info.title.to_lowercase().contains(&query));
        }

        sort_entries(&mut entries, sort);

        Ok(paginate(entries, page))
    }
}

fn scan_directory(root: &Path) -> AppResult<Vec<LocalEntry>> {
    if !root.is_dir() {
        return Err(AppError::Source(format!(
            "Local source directory not found: {}",
            root.display()
        )));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir_name = entry.file_name().to_string_lossy().to_string();
        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let mut info = MangaInfo::new(dir_name.clone(), dir_name);
        info.cover = find_cover(entry.path());

        if let Some(details) = read_details(entry.path()) {
            apply_details(&mut info, details);
        }

        entries.push(LocalEntry { info, modified });
    }

    log::debug!("Scanned {} local manga in {}", entries.len(), root.display());

    Ok(entries)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn find_cover(dir: &Path) -> Option<String> {
    COVER_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .map(|path| path.to_string_lossy().to_string())
}

/// Unreadable or malformed details are ignored
fn read_details(dir: &Path) -> Option<LocalDetails> {
    let path = dir.join(DETAILS_FILE);
    if !path.is_file() {
        return None;
    }

    let parsed = std::fs::read_to_string(&path)
        .map_err(AppError::from)
        .and_then(|content| serde_json::from_str::<LocalDetails>(&content).map_err(AppError::from));

    match parsed {
        Ok(details) => Some(details),
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            None
        }
    }
}

fn apply_details(info: &mut MangaInfo, details: LocalDetails) {
    if let Some(title) = details.title.filter(|t| !t.trim().is_empty()) {
        info.title = title;
    }
    info.author = details.author;
    info.artist = details.artist;
    info.description = details.description;
    info.genres = details.genre;
    if let Some(code) = details.status {
        info.status = MangaStatus::from_code(code);
    }
}

fn sort_entries(entries: &mut [LocalEntry], sort: SortSelection) {
    match sort.index {
        SORT_MODIFIED => entries.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.info.key.cmp(&b.info.key))
        }),
        _ => entries.sort_by(|a, b| {
            a.info
                .title
                .to_lowercase()
                .cmp(&b.info.title.to_lowercase())
                .then_with(|| a.info.key.cmp(&b.info.key))
        }),
    }
    if !sort.ascending {
        entries.reverse();
    }
}

fn paginate(entries: Vec<LocalEntry>, page: u32) -> MangasPageInfo {
    let start = (page - FIRST_PAGE) as usize * PAGE_SIZE;
    let has_next_page = start + PAGE_SIZE < entries.len();

    let mangas = entries
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|e| e.info)
        .collect();

    MangasPageInfo::new(mangas, has_next_page)
}

fn listing_sort(listing: Option<&Listing>) -> AppResult<SortSelection> {
    match listing.map(|l| l.name.as_str()) {
        None | Some(LISTING_POPULAR) => Ok(SortSelection {
            index: SORT_TITLE,
            ascending: true,
        }),
        Some(LISTING_LATEST) => Ok(SortSelection {
            index: SORT_MODIFIED,
            ascending: false,
        }),
        Some(other) => Err(AppError::Source(format!("Unknown listing: {}", other))),
    }
}

impl Source for LocalSource {
    fn id(&self) -> i64 {
        LOCAL_SOURCE_ID
    }

    fn name(&self) -> &str {
        LOCAL_SOURCE_NAME
    }

    fn lang(&self) -> &str {
        LOCAL_SOURCE_LANG
    }
}

#[async_trait]
impl CatalogSource for LocalSource {
    async fn fetch_manga_list(&self, sort: Option<Listing>, page: u32) -> AppResult<MangasPageInfo> {
        let selection = listing_sort(sort.as_ref())?;
        self.page(page, None, selection).await
    }

    async fn fetch_manga_list_with_filters(
        &self,
        filters: FilterList,
        page: u32,
    ) -> AppResult<MangasPageInfo> {
        let title = filters.text(FILTER_TITLE).map(str::to_string);
        let sort = filters.sort(FILTER_SORT).unwrap_or(SortSelection {
            index: SORT_TITLE,
            ascending: true,
        });
        self.page(page, title, sort).await
    }

    fn listings(&self) -> Vec<Listing> {
        vec![Listing::new(LISTING_POPULAR), Listing::new(LISTING_LATEST)]
    }

    fn filters(&self) -> FilterList {
        FilterList::new(vec![
            Filter::Text {
                name: FILTER_TITLE.to_string(),
                state: String::new(),
            },
            Filter::Sort {
                name: FILTER_SORT.to_string(),
                values: vec!["Title".to_string(), "Last modified".to_string()],
                state: Some(SortSelection {
                    index: SORT_TITLE,
                    ascending: true,
                }),
            },
        ])
    }
}
