// src/repositories/chapter_repository.rs
//
// Chapter persistence

use rusqlite::{params, Row};

use crate::db::{Database, Table};
use crate::domain::chapter::Chapter;
use crate::error::{AppError, AppResult};
use crate::repositories::row_mapping::{timestamp_from_millis, timestamp_to_millis};

pub trait ChapterRepository: Send + Sync {
    /// Insert and return the new id
    fn insert(&self, chapter: &Chapter) -> AppResult<i64>;
    /// Chapters of a manga in source order
    fn list_by_manga(&self, manga_id: i64) -> AppResult<Vec<Chapter>>;
    fn set_read(&self, chapter_id: i64, read: bool) -> AppResult<()>;
    /// Returns the number of chapters that changed
    fn mark_all_read(&self, manga_id: i64) -> AppResult<usize>;
    fn delete(&self, chapter_id: i64) -> AppResult<()>;
}

pub struct SqliteChapterRepository {
    db: Database,
}

impl SqliteChapterRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_chapter(row: &Row) -> Result<Chapter, rusqlite::Error> {
        let number: f64 = row.get("number")?;

        Ok(Chapter {
            id: row.get("id")?,
            manga_id: row.get("manga_id")?,
            url: row.get("url")?,
            name: row.get("name")?,
            scanlator: row.get("scanlator")?,
            read: row.get("read")?,
            bookmark: row.get("bookmark")?,
            last_page_read: row.get("last_page_read")?,
            number: number as f32,
            source_order: row.get("source_order")?,
            date_fetch: timestamp_from_millis(row.get("date_fetch")?),
            date_upload: timestamp_from_millis(row.get("date_upload")?),
        })
    }
}

impl ChapterRepository for SqliteChapterRepository {
    fn insert(&self, chapter: &Chapter) -> AppResult<i64> {
        self.db.write(&[Table::Chapter], |conn| {
            conn.execute(
                "INSERT INTO chapters (
                    manga_id, url, name, scanlator, read, bookmark, last_page_read,
                    number, source_order, date_fetch, date_upload
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    chapter.manga_id,
                    chapter.url,
                    chapter.name,
                    chapter.scanlator,
                    chapter.read,
                    chapter.bookmark,
                    chapter.last_page_read,
                    chapter.number as f64,
                    chapter.source_order,
                    timestamp_to_millis(chapter.date_fetch),
                    timestamp_to_millis(chapter.date_upload),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn list_by_manga(&self, manga_id: i64) -> AppResult<Vec<Chapter>> {
        let conn = self.db.connection()?;

        let mut stmt = conn.prepare(
            "SELECT id, manga_id, url, name, scanlator, read, bookmark, last_page_read,
                    number, source_order, date_fetch, date_upload
             FROM chapters
             WHERE manga_id = ?1
             ORDER BY source_order, id",
        )?;

        let chapters: Vec<Chapter> = stmt
            .query_map(params![manga_id], Self::row_to_chapter)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(chapters)
    }

    fn set_read(&self, chapter_id: i64, read: bool) -> AppResult<()> {
        self.db.write(&[Table::Chapter], |conn| {
            let rows_affected = conn.execute(
                "UPDATE chapters SET read = ?2 WHERE id = ?1",
                params![chapter_id, read],
            )?;

            if rows_affected == 0 {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
    }

    fn mark_all_read(&self, manga_id: i64) -> AppResult<usize> {
        self.db.write(&[Table::Chapter], |conn| {
            let changed = conn.execute(
                "UPDATE chapters SET read = 1 WHERE manga_id = ?1 AND read = 0",
                params![manga_id],
            )?;
            Ok(changed)
        })
    }

    fn delete(&self, chapter_id: i64) -> AppResult<()> {
        self.db.write(&[Table::Chapter], |conn| {
            let rows_affected =
                conn.execute("DELETE FROM chapters WHERE id = ?1", params![chapter_id])?;

            if rows_affected == 0 {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
    }
}
