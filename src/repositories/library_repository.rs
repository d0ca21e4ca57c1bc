// src/repositories/library_repository.rs
//
// Library read model
//
// Read-only. Every query exists in two forms sharing the same SQL:
// - find_*:      one-shot async fetch
// - subscribe_*: live stream re-evaluated after each change to an observed table
//
// Storage errors propagate unchanged. No retries.

use async_trait::async_trait;
use futures::stream::BoxStream;
use rusqlite::{params, Connection, Row};

use crate::db::{observe, Database, Table};
use crate::domain::library::LibraryManga;
use crate::error::AppResult;
use crate::repositories::manga_repository::SqliteMangaRepository;
use crate::repositories::row_mapping::{id_list, timestamp_from_millis};

/// Live library snapshots
pub type LibraryStream = BoxStream<'static, AppResult<Vec<LibraryManga>>>;

/// The projection carries unread counts and category membership, so every
/// library query depends on all three tables.
const LIBRARY_TABLES: &[Table] = &[Table::Manga, Table::Chapter, Table::MangaCategory];

const LIBRARY_SELECT: &str = "
    SELECT M.*,
           COALESCE(C.unread, 0) AS unread_count,
           COALESCE(C.total, 0) AS chapter_count,
           C.latest_upload AS latest_upload,
           (SELECT GROUP_CONCAT(MC.category_id)
              FROM manga_categories MC
             WHERE MC.manga_id = M.id) AS category_ids
    FROM manga M
    LEFT JOIN (
        SELECT manga_id,
               SUM(CASE WHEN read = 0 THEN 1 ELSE 0 END) AS unread,
               COUNT(*) AS total,
               MAX(date_upload) AS latest_upload
        FROM chapters
        GROUP BY manga_id
    ) C ON C.manga_id = M.id
    WHERE M.favorite = 1";

const LIBRARY_ORDER: &str = " ORDER BY M.title COLLATE NOCASE, M.id";

const FAVORITE_SOURCE_IDS: &str =
    "SELECT DISTINCT source FROM manga WHERE favorite = 1 ORDER BY source";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Every library manga
    async fn find_all(&self) -> AppResult<Vec<LibraryManga>>;

    /// Library manga without any category
    async fn find_uncategorized(&self) -> AppResult<Vec<LibraryManga>>;

    /// Library manga in the given category
    async fn find_to_category(&self, category_id: i64) -> AppResult<Vec<LibraryManga>>;

    /// Distinct source ids among library manga, ascending
    async fn find_favorite_source_ids(&self) -> AppResult<Vec<i64>>;

    fn subscribe_all(&self) -> LibraryStream;

    fn subscribe_uncategorized(&self) -> LibraryStream;

    fn subscribe_to_category(&self, category_id: i64) -> LibraryStream;
}

/// The three library selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LibraryQuery {
    All,
    Uncategorized,
    Category(i64),
}

impl LibraryQuery {
    fn sql(&self) -> String {
        let filter = match self {
            LibraryQuery::All => "",
            LibraryQuery::Uncategorized => {
                " AND NOT EXISTS (SELECT 1 FROM manga_categories MC WHERE MC.manga_id = M.id)"
            }
            LibraryQuery::Category(_) => {
                " AND EXISTS (SELECT 1 FROM manga_categories MC \
                   WHERE MC.manga_id = M.id AND MC.category_id = ?1)"
            }
        };
        format!("{}{}{}", LIBRARY_SELECT, filter, LIBRARY_ORDER)
    }

    fn observed_tables(&self) -> &'static [Table] {
        LIBRARY_TABLES
    }

    fn run(&self, conn: &Connection) -> AppResult<Vec<LibraryManga>> {
        let mut stmt = conn.prepare(&self.sql())?;

        let rows = match self {
            LibraryQuery::Category(category_id) => {
                stmt.query_map(params![category_id], row_to_library_manga)?
            }
            _ => stmt.query_map([], row_to_library_manga)?,
        };

        let library: Vec<LibraryManga> = rows.collect::<Result<Vec<_>, _>>()?;

        log::debug!("{:?} library query returned {} manga", self, library.len());

        Ok(library)
    }
}

fn row_to_library_manga(row: &Row) -> Result<LibraryManga, rusqlite::Error> {
    let unread_count: i64 = row.get("unread_count")?;
    let chapter_count: i64 = row.get("chapter_count")?;

    Ok(LibraryManga {
        manga: SqliteMangaRepository::row_to_manga(row)?,
        unread_count: unread_count.max(0) as u32,
        chapter_count: chapter_count.max(0) as u32,
        latest_upload: timestamp_from_millis(row.get("latest_upload")?),
        category_ids: id_list(row.get("category_ids")?)?,
    })
}

pub struct SqliteLibraryRepository {
    db: Database,
}

impl SqliteLibraryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn find(&self, query: LibraryQuery) -> AppResult<Vec<LibraryManga>> {
        self.db.read(move |conn| query.run(conn)).await
    }

    fn subscribe(&self, query: LibraryQuery) -> LibraryStream {
        observe(self.db.clone(), query.observed_tables(), move |conn| {
            query.run(conn)
        })
    }
}

#[async_trait]
impl LibraryRepository for SqliteLibraryRepository {
    async fn find_all(&self) -> AppResult<Vec<LibraryManga>> {
        self.find(LibraryQuery::All).await
    }

    async fn find_uncategorized(&self) -> AppResult<Vec<LibraryManga>> {
        self.find(LibraryQuery::Uncategorized).await
    }

    async fn find_to_category(&self, category_id: i64) -> AppResult<Vec<LibraryManga>> {
        self.find(LibraryQuery::Category(category_id)).await
    }

    async fn find_favorite_source_ids(&self) -> AppResult<Vec<i64>> {
        self.db
            .read(|conn| {
                let mut stmt = conn.prepare(FAVORITE_SOURCE_IDS)?;
                let ids: Vec<i64> = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ids)
            })
            .await
    }

    fn subscribe_all(&self) -> LibraryStream {
        self.subscribe(LibraryQuery::All)
    }

    fn subscribe_uncategorized(&self) -> LibraryStream {
        self.subscribe(LibraryQuery::Uncategorized)
    }

    fn subscribe_to_category(&self, category_id: i64) -> LibraryStream {
        self.subscribe(LibraryQuery::Category(category_id))
    }
}
