use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use cinemigrate_etl::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "cinemigrate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the legacy SQLite database (default: db.sqlite)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Session time zone for the target (default: Europe/Moscow)
    #[arg(long, global = true)]
    time_zone: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Migrate the legacy movie database into the catalog
    ///
    /// Reads every movie from the legacy SQLite store, normalizes it into
    /// film works, persons, genres and their links, and writes all of it
    /// to the target in a single transaction:
    ///
    /// - Persons are deduplicated by full name across actors, directors
    ///   and writers
    /// - Genres are deduplicated by trimmed title
    /// - "N/A" placeholders are dropped or mapped to empty values
    /// - Non-numeric ratings are stored as 0.0
    ///
    /// Either every row is written or none is. The run is not resumable:
    /// run it once against an empty catalog.
    Migrate {
        /// Extract and print the batch summary without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Load into this SQLite file instead of PostgreSQL
        #[arg(long, conflicts_with = "dry_run")]
        sqlite_target: Option<PathBuf>,
    },
    /// Create the catalog schema and tables in PostgreSQL
    InitTarget {
        /// Print the DDL instead of executing it
        #[arg(long)]
        print: bool,
    },
    /// Inspect or scaffold the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it does not exist
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(source) = cli.source {
        config = config.with_source_path(source);
    }
    if let Some(zone) = cli.time_zone {
        config = config.with_time_zone(zone);
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    match cli.command {
        Commands::Migrate {
            dry_run,
            sqlite_target,
        } => {
            if dry_run {
                commands::run_dry_run(&config)?;
            } else if let Some(path) = sqlite_target {
                commands::run_migrate_sqlite(&config, &path)?;
            } else {
                commands::run_migrate(&config)?;
            }
        }
        Commands::InitTarget { print } => {
            commands::init_target(&config, print)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config),
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
