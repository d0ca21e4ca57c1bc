// src/commands.rs
//
// Subcommand handlers for the mangashelf binary

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use futures::StreamExt;

use mangashelf::db::{get_database_stats, get_schema_version};
use mangashelf::source::local::FILTER_TITLE;
use mangashelf::{
    AppState, CatalogPager, CatalogSource, Filter, LibraryConfig, LibraryHolder, LibraryItem,
    LibraryManga, Listing, LocalSource, MangaInfo, PagerQuery, TextRowHolder,
    DEFAULT_CATEGORY_ID,
};

const ROW_WIDTH: usize = 60;

fn print_rows(library: &[LibraryManga]) {
    if library.is_empty() {
        println!("(empty)");
        return;
    }

    let mut holder = TextRowHolder::new(ROW_WIDTH);
    for manga in library {
        holder.on_set_values(&LibraryItem::new(manga.clone()));
        println!("{:>5}  {}", manga.id(), holder.line());
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn init(state: &AppState, config: &LibraryConfig) -> Result<()> {
    let conn = state.db.connection()?;
    let version = get_schema_version(&conn)?;
    state.check_integrity().context("Library database failed its integrity check")?;
    println!(
        "Library ready at {} (schema version {})",
        config.database_path().display(),
        version
    );
    Ok(())
}

pub async fn list(state: &AppState, matches: &ArgMatches) -> Result<()> {
    let result = match (matches.get_flag("uncategorized"), matches.get_one::<i64>("category")) {
        (true, _) => state.library_repo.find_uncategorized().await,
        (false, Some(category_id)) => state.library_service.find_section(*category_id).await,
        (false, None) => state.library_repo.find_all().await,
    };
    let library = result.context("Failed to read the library")?;

    if matches.get_flag("json") {
        return print_json(&library);
    }

    print_rows(&library);
    Ok(())
}

pub async fn sections(state: &AppState, matches: &ArgMatches) -> Result<()> {
    let sections = state
        .library_service
        .sections()
        .await
        .context("Failed to read the library")?;

    if matches.get_flag("json") {
        return print_json(&sections);
    }

    for section in &sections {
        println!(
            "\n== {} [{}] ({}) ==",
            section.category.name,
            section.category.id,
            section.items.len()
        );
        print_rows(&section.items);
    }
    Ok(())
}

pub async fn sources(state: &AppState) -> Result<()> {
    println!("Registered sources:");
    for source in state.sources.catalog_sources() {
        let listings: Vec<String> = source.listings().iter().map(Listing::to_string).collect();
        println!(
            "  {:>4}  {} ({}) listings: {}",
            source.id(),
            source.name(),
            source.lang(),
            listings.join(", ")
        );
    }

    let used = state.library_service.favorite_sources(&state.sources).await?;
    println!("Sources with library manga: {}", used.len());
    for source in used {
        println!("  {:>4}  {}", source.id(), source.name());
    }
    Ok(())
}

pub async fn stats(state: &AppState) -> Result<()> {
    let conn = state.db.connection()?;
    let stats = get_database_stats(&conn)?;
    let unread = state.library_service.unread_total().await?;

    print_json(&serde_json::json!({
        "database": stats,
        "unread_chapters": unread,
    }))
}

pub async fn watch(state: &AppState, matches: &ArgMatches) -> Result<()> {
    let mut stream = match matches.get_one::<i64>("category") {
        Some(category_id) => state.library_service.subscribe_section(*category_id),
        None => state.library_repo.subscribe_all(),
    };

    log::info!("Watching the library, press Ctrl-C to stop");

    loop {
        tokio::select! {
            snapshot = stream.next() => match snapshot {
                Some(Ok(library)) => {
                    println!("\n-- {} manga --", library.len());
                    print_rows(&library);
                }
                Some(Err(e)) => return Err(e).context("Library subscription failed"),
                None => return Ok(()),
            },
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

pub async fn browse(state: &AppState, matches: &ArgMatches) -> Result<()> {
    let dir = matches
        .get_one::<String>("dir")
        .ok_or_else(|| anyhow!("Directory is required"))?;
    let source: Arc<dyn CatalogSource> = Arc::new(LocalSource::new(dir));

    let query = match matches.get_one::<String>("query") {
        Some(text) => {
            let mut filters = source.filters();
            if let Some(Filter::Text { state, .. }) = filters.find_mut(FILTER_TITLE) {
                *state = text.clone();
            }
            PagerQuery::Filters(filters)
        }
        None => PagerQuery::Listing(matches.get_one::<String>("listing").map(Listing::new)),
    };

    let results: Vec<MangaInfo> = if matches.get_flag("all") {
        let mut pager = CatalogPager::new(source.clone(), query);
        let mut all = Vec::new();
        while let Some(page) = pager.request_next_page().await? {
            all.extend(page.mangas);
        }
        all
    } else {
        let page = *matches.get_one::<u32>("page").unwrap_or(&1);
        let result = match query {
            PagerQuery::Listing(listing) => source.fetch_manga_list(listing, page).await?,
            PagerQuery::Filters(filters) => {
                source.fetch_manga_list_with_filters(filters, page).await?
            }
        };
        if result.has_next_page {
            log::info!("More results on page {}", page + 1);
        }
        result.mangas
    };

    if matches.get_flag("add") {
        for info in &results {
            let id = state.library_service.add_to_library(source.id(), info)?;
            println!("{:>5}  {}", id, info.title);
        }
        return Ok(());
    }

    if matches.get_flag("json") {
        return print_json(&results);
    }

    for info in &results {
        let cover = if info.cover.is_some() { "[#]" } else { "[ ]" };
        println!("{} {}", cover, info.title);
    }
    Ok(())
}

pub async fn category(state: &AppState, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("list", _)) => {
            let uncategorized = state.library_repo.find_uncategorized().await?;
            println!("{:>5}  Default ({})", DEFAULT_CATEGORY_ID, uncategorized.len());
            for category in state.category_repo.list_all()? {
                println!("{:>5}  {}", category.id, category.name);
            }
            Ok(())
        }
        Some(("add", sub_matches)) => {
            let name = sub_matches
                .get_one::<String>("name")
                .ok_or_else(|| anyhow!("Category name is required"))?;
            let category = state.library_service.create_category(name)?;
            println!("Created category {} ({})", category.name, category.id);
            Ok(())
        }
        Some(("assign", sub_matches)) => {
            let manga_id = *sub_matches
                .get_one::<i64>("manga")
                .ok_or_else(|| anyhow!("Manga id is required"))?;
            let category_ids: Vec<i64> = sub_matches
                .get_many::<i64>("categories")
                .map(|ids| ids.copied().collect())
                .unwrap_or_default();
            state
                .library_service
                .assign_categories(manga_id, &category_ids)
                .with_context(|| format!("Failed to assign categories to manga {}", manga_id))?;
            println!("Manga {} categories: {:?}", manga_id, category_ids);
            Ok(())
        }
        _ => Err(anyhow!("Unknown category command")),
    }
}

pub fn mark_read(state: &AppState, matches: &ArgMatches) -> Result<()> {
    let manga_id = *matches
        .get_one::<i64>("manga")
        .ok_or_else(|| anyhow!("Manga id is required"))?;
    let changed = state.chapter_repo.mark_all_read(manga_id)?;
    println!("Marked {} chapters as read", changed);
    Ok(())
}
