// src/repositories/library_repository_tests.rs
//
// Library read model against a real database:
// - selections return exactly the matching library manga
// - aggregated counts reflect chapter state
// - subscriptions stay live across manga, chapter and membership writes

#[cfg(test)]
mod library_repository_tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use futures::StreamExt;

    use crate::db::database::test_support::temp_database;
    use crate::db::{Database, Table};
    use crate::domain::{Category, Chapter, Manga};
    use crate::repositories::{
        CategoryRepository, ChapterRepository, LibraryRepository, MangaRepository,
        SqliteCategoryRepository, SqliteChapterRepository, SqliteLibraryRepository,
        SqliteMangaRepository,
    };

    struct Fixture {
        _dir: tempfile::TempDir,
        db: Database,
        manga: SqliteMangaRepository,
        chapters: SqliteChapterRepository,
        categories: SqliteCategoryRepository,
        library: SqliteLibraryRepository,
    }

    impl Fixture {
        fn new() -> Self {
            let (dir, db) = temp_database();
            Self {
                _dir: dir,
                manga: SqliteMangaRepository::new(db.clone()),
                chapters: SqliteChapterRepository::new(db.clone()),
                categories: SqliteCategoryRepository::new(db.clone()),
                library: SqliteLibraryRepository::new(db.clone()),
                db,
            }
        }

        fn add_manga(&self, source: i64, title: &str, favorite: bool) -> i64 {
            let mut manga = Manga::new(source, format!("/{}", title), title.to_string());
            manga.set_favorite(favorite);
            self.manga.insert(&manga).unwrap()
        }

        fn add_chapter(&self, manga_id: i64, order: i32, read: bool) -> i64 {
            let mut chapter = Chapter::new(
                manga_id,
                format!("/{}/{}", manga_id, order),
                format!("Chapter {}", order),
            );
            chapter.source_order = order;
            chapter.read = read;
            chapter.date_upload = Some(Utc.timestamp_millis_opt(1_000 * order as i64).unwrap());
            self.chapters.insert(&chapter).unwrap()
        }

        fn add_category(&self, name: &str) -> i64 {
            self.categories.insert(&Category::new(name.to_string())).unwrap()
        }
    }

    fn titles(library: &[crate::domain::LibraryManga]) -> Vec<&str> {
        library.iter().map(|m| m.title()).collect()
    }

    #[tokio::test]
    async fn test_find_all_returns_only_favorites_sorted_by_title() {
        let fx = Fixture::new();
        fx.add_manga(1, "monster", true);
        fx.add_manga(1, "Akira", true);
        fx.add_manga(2, "Not In Library", false);

        let library = fx.library.find_all().await.unwrap();

        assert_eq!(titles(&library), vec!["Akira", "monster"]);
    }

    #[tokio::test]
    async fn test_find_all_aggregates_chapters() {
        let fx = Fixture::new();
        let id = fx.add_manga(1, "Akira", true);
        fx.add_chapter(id, 1, true);
        fx.add_chapter(id, 2, false);
        fx.add_chapter(id, 3, false);
        fx.add_manga(1, "Berserk", true);

        let library = fx.library.find_all().await.unwrap();

        assert_eq!(library[0].unread_count, 2);
        assert_eq!(library[0].chapter_count, 3);
        assert_eq!(
            library[0].latest_upload.map(|d| d.timestamp_millis()),
            Some(3_000)
        );
        assert_eq!(library[1].unread_count, 0);
        assert_eq!(library[1].chapter_count, 0);
        assert!(library[1].latest_upload.is_none());
    }

    #[tokio::test]
    async fn test_find_all_includes_category_membership() {
        let fx = Fixture::new();
        let id = fx.add_manga(1, "Akira", true);
        let b = fx.add_category("B");
        let a = fx.add_category("A");
        fx.categories.set_manga_categories(id, &[a, b]).unwrap();

        let library = fx.library.find_all().await.unwrap();

        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(library[0].category_ids, expected);
    }

    #[tokio::test]
    async fn test_find_uncategorized() {
        let fx = Fixture::new();
        let categorized = fx.add_manga(1, "Akira", true);
        fx.add_manga(1, "Berserk", true);
        fx.add_manga(1, "Claymore", false);
        let category = fx.add_category("Reading");
        fx.categories
            .set_manga_categories(categorized, &[category])
            .unwrap();

        let library = fx.library.find_uncategorized().await.unwrap();

        assert_eq!(titles(&library), vec!["Berserk"]);
        assert!(library[0].is_uncategorized());
    }

    #[tokio::test]
    async fn test_find_to_category() {
        let fx = Fixture::new();
        let akira = fx.add_manga(1, "Akira", true);
        let berserk = fx.add_manga(1, "Berserk", true);
        let claymore = fx.add_manga(1, "Claymore", false);
        let reading = fx.add_category("Reading");
        let later = fx.add_category("Later");
        fx.categories.set_manga_categories(akira, &[reading]).unwrap();
        fx.categories
            .set_manga_categories(berserk, &[reading, later])
            .unwrap();
        fx.categories.set_manga_categories(claymore, &[reading]).unwrap();

        let reading_library = fx.library.find_to_category(reading).await.unwrap();
        let later_library = fx.library.find_to_category(later).await.unwrap();
        let unknown = fx.library.find_to_category(999).await.unwrap();

        assert_eq!(titles(&reading_library), vec!["Akira", "Berserk"]);
        assert_eq!(titles(&later_library), vec!["Berserk"]);
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_find_favorite_source_ids_is_distinct() {
        let fx = Fixture::new();
        fx.add_manga(5, "A", true);
        fx.add_manga(5, "B", true);
        fx.add_manga(2, "C", true);
        fx.add_manga(9, "D", false);

        let ids = fx.library.find_favorite_source_ids().await.unwrap();

        assert_eq!(ids, vec![2, 5]);
    }

    #[tokio::test]
    async fn test_empty_library() {
        let fx = Fixture::new();

        assert!(fx.library.find_all().await.unwrap().is_empty());
        assert!(fx.library.find_uncategorized().await.unwrap().is_empty());
        assert!(fx.library.find_favorite_source_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_all_follows_manga_and_chapter_writes() {
        let fx = Fixture::new();
        let mut stream = fx.library.subscribe_all();

        assert!(stream.next().await.unwrap().unwrap().is_empty());

        let id = fx.add_manga(1, "Akira", true);
        let snapshot = stream.next().await.unwrap().unwrap();
        assert_eq!(titles(&snapshot), vec!["Akira"]);
        assert_eq!(snapshot[0].unread_count, 0);

        fx.add_chapter(id, 1, false);
        let snapshot = stream.next().await.unwrap().unwrap();
        assert_eq!(snapshot[0].unread_count, 1);

        fx.manga.set_favorite(id, false).unwrap();
        assert!(stream.next().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_uncategorized_follows_membership_writes() {
        let fx = Fixture::new();
        let id = fx.add_manga(1, "Akira", true);
        let category = fx.add_category("Reading");
        let mut stream = fx.library.subscribe_uncategorized();

        assert_eq!(stream.next().await.unwrap().unwrap().len(), 1);

        fx.categories.set_manga_categories(id, &[category]).unwrap();
        assert!(stream.next().await.unwrap().unwrap().is_empty());

        fx.categories.delete(category).unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_subscribe_to_category() {
        let fx = Fixture::new();
        let id = fx.add_manga(1, "Akira", true);
        let category = fx.add_category("Reading");
        let mut stream = fx.library.subscribe_to_category(category);

        assert!(stream.next().await.unwrap().unwrap().is_empty());

        fx.categories.set_manga_categories(id, &[category]).unwrap();
        let snapshot = stream.next().await.unwrap().unwrap();
        assert_eq!(titles(&snapshot), vec!["Akira"]);
    }

    #[tokio::test]
    async fn test_subscription_ignores_category_table_only_writes() {
        let fx = Fixture::new();
        fx.add_manga(1, "Akira", true);
        let mut stream = fx.library.subscribe_all();
        stream.next().await.unwrap().unwrap();

        fx.add_category("Unused");

        let next = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
        assert!(next.is_err());
    }

    #[tokio::test]
    async fn test_subscription_collapses_rapid_writes() {
        let fx = Fixture::new();
        let id = fx.add_manga(1, "Akira", true);
        let mut stream = fx.library.subscribe_all();
        stream.next().await.unwrap().unwrap();

        for order in 1..=5 {
            fx.add_chapter(id, order, false);
        }

        let snapshot = stream.next().await.unwrap().unwrap();
        assert_eq!(snapshot[0].unread_count, 5);

        let next = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
        assert!(next.is_err());
    }

    #[tokio::test]
    async fn test_each_subscription_is_independent() {
        let fx = Fixture::new();
        let mut first = fx.library.subscribe_all();
        let mut second = fx.library.subscribe_all();
        first.next().await.unwrap().unwrap();
        second.next().await.unwrap().unwrap();
        assert_eq!(fx.db.changes().subscriber_count(), 2);

        fx.db.changes().notify(&[Table::Manga]);

        assert!(first.next().await.unwrap().is_ok());
        assert!(second.next().await.unwrap().is_ok());

        drop(first);
        assert_eq!(fx.db.changes().subscriber_count(), 1);
    }
}
