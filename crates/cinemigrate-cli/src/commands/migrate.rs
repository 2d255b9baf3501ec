use anyhow::{Context, Result};
use std::path::Path;

use cinemigrate_etl::{extract, migrate, run, Config, LoadReport, SourceStore, SqliteTarget};

/// Migrate into the configured PostgreSQL catalog.
pub fn run_migrate(config: &Config) -> Result<()> {
    println!("\n🎬 Cinemigrate\n");
    println!("  Source: {}", config.source_path.display());
    println!(
        "  Target: {}:{}/{} (schema {})",
        config.postgres_host, config.postgres_port, config.postgres_db, config.target_schema
    );
    println!("  Time zone: {}\n", config.time_zone);

    let report = run(config).context("Migration failed; the target was left unchanged")?;
    print_report(&report);
    Ok(())
}

/// Migrate into a local SQLite catalog file.
pub fn run_migrate_sqlite(config: &Config, target_path: &Path) -> Result<()> {
    println!("\n🎬 Cinemigrate (SQLite target)\n");
    println!("  Source: {}", config.source_path.display());
    println!("  Target: {}\n", target_path.display());

    let source = SourceStore::open(&config.source_path).context("Failed to open source")?;
    let mut target = SqliteTarget::open(target_path).context("Failed to open SQLite target")?;

    let report = migrate(&source, &mut target, &config.time_zone)
        .context("Migration failed; the target was left unchanged")?;
    print_report(&report);
    Ok(())
}

/// Extract and normalize without loading; prints the batch summary as JSON.
pub fn run_dry_run(config: &Config) -> Result<()> {
    let source = SourceStore::open(&config.source_path).context("Failed to open source")?;
    let batch = extract(&source).context("Extraction failed")?;

    log::info!("Dry run: {}", batch.summary());
    println!("{}", serde_json::to_string_pretty(&batch.summary())?);
    Ok(())
}

fn print_report(report: &LoadReport) {
    println!("✓ Loaded {} rows", report.total());
    println!("  film_work:          {}", report.movies);
    println!("  persons:            {}", report.persons);
    println!("  genres:             {}", report.genres);
    println!("  film_works_persons: {}", report.movie_persons);
    println!("  film_works_genres:  {}", report.movie_genres);
}
