// src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

use mangashelf::{AppState, LibraryConfig};

mod commands;

fn build_cli() -> Command {
    Command::new("mangashelf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Local-first manga library")
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("PATH")
                .help("Path to the library database (defaults to the user data directory)")
                .global(true),
        )
        .arg(
            Arg::new("local-dir")
                .short('l')
                .long("local-dir")
                .value_name("DIR")
                .help("Directory served by the local source")
                .global(true),
        )
        .subcommand(Command::new("init").about("Create or upgrade the library database"))
        .subcommand(
            Command::new("list")
                .about("List library manga")
                .arg(
                    Arg::new("category")
                        .short('c')
                        .long("category")
                        .value_name("ID")
                        .value_parser(clap::value_parser!(i64))
                        .help("Only manga in this category (0 for uncategorized)"),
                )
                .arg(
                    Arg::new("uncategorized")
                        .short('u')
                        .long("uncategorized")
                        .help("Only manga without a category")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("category"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("sections")
                .about("Show the library grouped by category")
                .arg(json_arg()),
        )
        .subcommand(Command::new("sources").about("List sources and those used by the library"))
        .subcommand(Command::new("stats").about("Show library statistics"))
        .subcommand(
            Command::new("watch")
                .about("Print the library again after every change, until Ctrl-C")
                .arg(
                    Arg::new("category")
                        .short('c')
                        .long("category")
                        .value_name("ID")
                        .value_parser(clap::value_parser!(i64))
                        .help("Watch one category (0 for uncategorized)"),
                ),
        )
        .subcommand(
            Command::new("browse")
                .about("Browse a directory through the local source")
                .arg(Arg::new("dir").required(true).value_name("DIR").help("Library directory"))
                .arg(
                    Arg::new("listing")
                        .long("listing")
                        .value_name("NAME")
                        .help("Listing to browse (Popular, Latest)")
                        .conflicts_with("query"),
                )
                .arg(
                    Arg::new("query")
                        .short('q')
                        .long("query")
                        .value_name("TEXT")
                        .help("Search titles"),
                )
                .arg(
                    Arg::new("page")
                        .short('p')
                        .long("page")
                        .value_name("N")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("1")
                        .help("Page to show"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Fetch every page")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("page"),
                )
                .arg(
                    Arg::new("add")
                        .long("add")
                        .help("Add the results to the library")
                        .action(ArgAction::SetTrue),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List categories"))
                .subcommand(
                    Command::new("add")
                        .about("Create a category")
                        .arg(Arg::new("name").required(true).value_name("NAME")),
                )
                .subcommand(
                    Command::new("assign")
                        .about("Set the categories of a library manga (none to uncategorize)")
                        .arg(
                            Arg::new("manga")
                                .required(true)
                                .value_name("MANGA_ID")
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("categories")
                                .value_name("CATEGORY_ID")
                                .num_args(0..)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("mark-read")
                .about("Mark every chapter of a manga as read")
                .arg(
                    Arg::new("manga")
                        .required(true)
                        .value_name("MANGA_ID")
                        .value_parser(clap::value_parser!(i64)),
                ),
        )
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print JSON instead of rows")
        .action(ArgAction::SetTrue)
}

fn load_config(matches: &clap::ArgMatches) -> Result<LibraryConfig> {
    match matches.get_one::<String>("database") {
        Some(path) => Ok(LibraryConfig::with_database_path(path)),
        None => LibraryConfig::default_location().context("Failed to locate the library database"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = build_cli().get_matches();
    let config = load_config(&matches)?;
    let local_dir = matches.get_one::<String>("local-dir").map(PathBuf::from);

    let state = AppState::open(&config, local_dir).context("Failed to open the library")?;

    match matches.subcommand() {
        Some(("init", _)) => commands::init(&state, &config),
        Some(("list", sub_matches)) => commands::list(&state, sub_matches).await,
        Some(("sections", sub_matches)) => commands::sections(&state, sub_matches).await,
        Some(("sources", _)) => commands::sources(&state).await,
        Some(("stats", _)) => commands::stats(&state).await,
        Some(("watch", sub_matches)) => commands::watch(&state, sub_matches).await,
        Some(("browse", sub_matches)) => commands::browse(&state, sub_matches).await,
        Some(("category", sub_matches)) => commands::category(&state, sub_matches).await,
        Some(("mark-read", sub_matches)) => commands::mark_read(&state, sub_matches),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
