// src/repositories/manga_repository.rs
//
// Manga persistence

use rusqlite::{params, OptionalExtension, Row};

use crate::db::{Database, Table};
use crate::domain::manga::{Manga, MangaStatus};
use crate::error::{AppError, AppResult};
use crate::repositories::row_mapping::{
    genres_from_json, genres_to_json, timestamp_from_millis, timestamp_to_millis,
};

pub(crate) const MANGA_COLUMNS: &str = "id, source, url, title, artist, author, description, genres, \
     status, thumbnail_url, favorite, last_update, initialized, viewer, flags, date_added";

/// Deleting a manga cascades to its chapters and category memberships
const DELETE_TABLES: &[Table] = &[Table::Manga, Table::Chapter, Table::MangaCategory];

#[cfg_attr(test, mockall::automock)]
pub trait MangaRepository: Send + Sync {
    /// Insert and return the new id
    fn insert(&self, manga: &Manga) -> AppResult<i64>;
    fn update(&self, manga: &Manga) -> AppResult<()>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Manga>>;
    fn get_by_source_url(&self, source: i64, url: &str) -> AppResult<Option<Manga>>;
    fn set_favorite(&self, id: i64, favorite: bool) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteMangaRepository {
    db: Database,
}

impl SqliteMangaRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Map database row to Manga. Also used for library projections, which
    /// select the same columns.
    pub(crate) fn row_to_manga(row: &Row) -> Result<Manga, rusqlite::Error> {
        let genres_json: String = row.get("genres")?;
        let status: i64 = row.get("status")?;

        Ok(Manga {
            id: row.get("id")?,
            source: row.get("source")?,
            url: row.get("url")?,
            title: row.get("title")?,
            artist: row.get("artist")?,
            author: row.get("author")?,
            description: row.get("description")?,
            genres: genres_from_json(&genres_json)?,
            status: MangaStatus::from_code(status),
            thumbnail_url: row.get("thumbnail_url")?,
            favorite: row.get("favorite")?,
            last_update: timestamp_from_millis(row.get("last_update")?),
            initialized: row.get("initialized")?,
            viewer: row.get("viewer")?,
            flags: row.get("flags")?,
            date_added: timestamp_from_millis(row.get("date_added")?),
        })
    }
}

impl MangaRepository for SqliteMangaRepository {
    fn insert(&self, manga: &Manga) -> AppResult<i64> {
        let genres_json = genres_to_json(&manga.genres)?;

        self.db.write(&[Table::Manga], |conn| {
            conn.execute(
                "INSERT INTO manga (
                    source, url, title, artist, author, description, genres, status,
                    thumbnail_url, favorite, last_update, initialized, viewer, flags, date_added
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                params![
                    manga.source,
                    manga.url,
                    manga.title,
                    manga.artist,
                    manga.author,
                    manga.description,
                    genres_json,
                    manga.status.code(),
                    manga.thumbnail_url,
                    manga.favorite,
                    timestamp_to_millis(manga.last_update),
                    manga.initialized,
                    manga.viewer,
                    manga.flags,
                    timestamp_to_millis(manga.date_added),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn update(&self, manga: &Manga) -> AppResult<()> {
        let genres_json = genres_to_json(&manga.genres)?;

        self.db.write(&[Table::Manga], |conn| {
            let rows_affected = conn.execute(
                "UPDATE manga SET
                    source = ?2, url = ?3, title = ?4, artist = ?5, author = ?6,
                    description = ?7, genres = ?8, status = ?9, thumbnail_url = ?10,
                    favorite = ?11, last_update = ?12, initialized = ?13, viewer = ?14,
                    flags = ?15, date_added = ?16
                 WHERE id = ?1",
                params![
                    manga.id,
                    manga.source,
                    manga.url,
                    manga.title,
                    manga.artist,
                    manga.author,
                    manga.description,
                    genres_json,
                    manga.status.code(),
                    manga.thumbnail_url,
                    manga.favorite,
                    timestamp_to_millis(manga.last_update),
                    manga.initialized,
                    manga.viewer,
                    manga.flags,
                    timestamp_to_millis(manga.date_added),
                ],
            )?;

            if rows_affected == 0 {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Manga>> {
        let conn = self.db.connection()?;

        let manga = conn
            .query_row(
                &format!("SELECT {} FROM manga WHERE id = ?1", MANGA_COLUMNS),
                params![id],
                Self::row_to_manga,
            )
            .optional()?;

        Ok(manga)
    }

    fn get_by_source_url(&self, source: i64, url: &str) -> AppResult<Option<Manga>> {
        let conn = self.db.connection()?;

        let manga = conn
            .query_row(
                &format!(
                    "SELECT {} FROM manga WHERE source = ?1 AND url = ?2",
                    MANGA_COLUMNS
                ),
                params![source, url],
                Self::row_to_manga,
            )
            .optional()?;

        Ok(manga)
    }

    fn set_favorite(&self, id: i64, favorite: bool) -> AppResult<()> {
        let date_added = favorite.then(|| chrono::Utc::now().timestamp_millis());

        self.db.write(&[Table::Manga], |conn| {
            let rows_affected = conn.execute(
                "UPDATE manga SET favorite = ?2, date_added = ?3 WHERE id = ?1",
                params![id, favorite, date_added],
            )?;

            if rows_affected == 0 {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        self.db.write(DELETE_TABLES, |conn| {
            let rows_affected = conn.execute("DELETE FROM manga WHERE id = ?1", params![id])?;

            if rows_affected == 0 {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
    }
}
