// src/repositories/category_repository.rs

use rusqlite::{params, Row};

use crate::db::{Database, Table};
use crate::domain::category::Category;
use crate::error::{AppError, AppResult};

/// Deleting a category cascades to its memberships
const DELETE_TABLES: &[Table] = &[Table::Category, Table::MangaCategory];

#[cfg_attr(test, mockall::automock)]
pub trait CategoryRepository: Send + Sync {
    /// Insert and return the new id
    fn insert(&self, category: &Category) -> AppResult<i64>;
    /// All user categories by order
    fn list_all(&self) -> AppResult<Vec<Category>>;
    fn delete(&self, id: i64) -> AppResult<()>;
    /// Replace the categories a manga belongs to
    fn set_manga_categories(&self, manga_id: i64, category_ids: &[i64]) -> AppResult<()>;
    fn list_for_manga(&self, manga_id: i64) -> AppResult<Vec<Category>>;
}

pub struct SqliteCategoryRepository {
    db: Database,
}

impl SqliteCategoryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
        Ok(Category {
            id: row.get("id")?,
            name: row.get("name")?,
            order: row.get("sort_order")?,
            flags: row.get("flags")?,
        })
    }
}

impl CategoryRepository for SqliteCategoryRepository {
    fn insert(&self, category: &Category) -> AppResult<i64> {
        self.db.write(&[Table::Category], |conn| {
            conn.execute(
                "INSERT INTO categories (name, sort_order, flags) VALUES (?1, ?2, ?3)",
                params![category.name, category.order, category.flags],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn list_all(&self) -> AppResult<Vec<Category>> {
        let conn = self.db.connection()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, sort_order, flags FROM categories ORDER BY sort_order, id",
        )?;

        let categories: Vec<Category> = stmt
            .query_map([], Self::row_to_category)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        self.db.write(DELETE_TABLES, |conn| {
            let rows_affected =
                conn.execute("DELETE FROM categories WHERE id = ?1", params![id])?;

            if rows_affected == 0 {
                return Err(AppError::NotFound);
            }
            Ok(())
        })
    }

    fn set_manga_categories(&self, manga_id: i64, category_ids: &[i64]) -> AppResult<()> {
        self.db.write(&[Table::MangaCategory], |conn| {
            conn.execute(
                "DELETE FROM manga_categories WHERE manga_id = ?1",
                params![manga_id],
            )?;

            let mut stmt = conn.prepare(
                "INSERT OR IGNORE INTO manga_categories (manga_id, category_id) VALUES (?1, ?2)",
            )?;
            for category_id in category_ids {
                stmt.execute(params![manga_id, category_id])?;
            }

            Ok(())
        })
    }

    fn list_for_manga(&self, manga_id: i64) -> AppResult<Vec<Category>> {
        let conn = self.db.connection()?;

        let mut stmt = conn.prepare(
            "SELECT C.id, C.name, C.sort_order, C.flags
             FROM categories C
             JOIN manga_categories MC ON MC.category_id = C.id
             WHERE MC.manga_id = ?1
             ORDER BY C.sort_order, C.id",
        )?;

        let categories: Vec<Category> = stmt
            .query_map(params![manga_id], Self::row_to_category)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::database::test_support::temp_database;
    use crate::domain::Manga;
    use crate::repositories::{MangaRepository, SqliteMangaRepository};

    fn category(name: &str, order: i32) -> Category {
        let mut category = Category::new(name.to_string());
        category.order = order;
        category
    }

    #[test]
    fn test_insert_and_list_by_order() {
        let (_dir, db) = temp_database();
        let repo = SqliteCategoryRepository::new(db);

        repo.insert(&category("Later", 2)).unwrap();
        repo.insert(&category("Reading", 1)).unwrap();

        let names: Vec<String> = repo.list_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Reading", "Later"]);
    }

    #[test]
    fn test_names_are_unique() {
        let (_dir, db) = temp_database();
        let repo = SqliteCategoryRepository::new(db);

        repo.insert(&category("Reading", 0)).unwrap();
        assert!(matches!(
            repo.insert(&category("Reading", 1)),
            Err(AppError::Database(_))
        ));
    }

    #[test]
    fn test_set_manga_categories_replaces_membership() {
        let (_dir, db) = temp_database();
        let manga_id = SqliteMangaRepository::new(db.clone())
            .insert(&Manga::new(1, "/m".to_string(), "Monster".to_string()))
            .unwrap();
        let repo = SqliteCategoryRepository::new(db);
        let a = repo.insert(&category("A", 0)).unwrap();
        let b = repo.insert(&category("B", 1)).unwrap();

        repo.set_manga_categories(manga_id, &[a, b]).unwrap();
        assert_eq!(repo.list_for_manga(manga_id).unwrap().len(), 2);

        repo.set_manga_categories(manga_id, &[b]).unwrap();
        let categories = repo.list_for_manga(manga_id).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, b);

        repo.set_manga_categories(manga_id, &[]).unwrap();
        assert!(repo.list_for_manga(manga_id).unwrap().is_empty());
    }

    #[test]
    fn test_delete_category_keeps_manga() {
        let (_dir, db) = temp_database();
        let manga_repo = SqliteMangaRepository::new(db.clone());
        let manga_id = manga_repo
            .insert(&Manga::new(1, "/m".to_string(), "Monster".to_string()))
            .unwrap();
        let repo = SqliteCategoryRepository::new(db);
        let a = repo.insert(&category("A", 0)).unwrap();
        repo.set_manga_categories(manga_id, &[a]).unwrap();

        repo.delete(a).unwrap();

        assert!(repo.list_for_manga(manga_id).unwrap().is_empty());
        assert!(manga_repo.get_by_id(manga_id).unwrap().is_some());
        assert!(matches!(repo.delete(a), Err(AppError::NotFound)));
    }

    #[test]
    fn test_failed_membership_write_is_rolled_back() {
        let (_dir, db) = temp_database();
        let manga_id = SqliteMangaRepository::new(db.clone())
            .insert(&Manga::new(1, "/m".to_string(), "Monster".to_string()))
            .unwrap();
        let repo = SqliteCategoryRepository::new(db);
        let a = repo.insert(&category("A", 0)).unwrap();
        repo.set_manga_categories(manga_id, &[a]).unwrap();

        // Unknown category violates the foreign key
        assert!(repo.set_manga_categories(manga_id, &[999]).is_err());

        let categories = repo.list_for_manga(manga_id).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, a);
    }
}
