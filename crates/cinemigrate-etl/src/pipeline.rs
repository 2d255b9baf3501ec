use cinemigrate_core::model::MigrationBatch;

use crate::config::Config;
use crate::error::MigrateResult;
use crate::load::{load, LoadReport, PostgresTarget, TargetStore};
use crate::registry::IdentityRegistry;
use crate::source::SourceStore;
use crate::transform::Transformer;

/// Read the legacy store and normalize it into one batch.
///
/// # Errors
/// Fails if either source query fails.
pub fn extract(source: &SourceStore) -> MigrateResult<MigrationBatch> {
    let writers = source.fetch_writers()?;
    let rows = source.fetch_movies()?;
    Ok(Transformer::new(IdentityRegistry::new()).transform(rows, &writers))
}

/// Extract from `source` and load the batch into `target`.
///
/// # Errors
/// Fails on any source or target error; the target is left unchanged.
pub fn migrate<S: TargetStore>(
    source: &SourceStore,
    target: &mut S,
    time_zone: &str,
) -> MigrateResult<LoadReport> {
    let batch = extract(source)?;
    if batch.is_empty() {
        log::warn!("Source store holds no movies; loading an empty batch");
    }
    load(target, &batch, time_zone)
}

/// Run the full migration described by `config` into PostgreSQL.
///
/// Both connections are closed when this returns, on success or error.
///
/// # Errors
/// Fails if a store cannot be opened or the migration fails.
pub fn run(config: &Config) -> MigrateResult<LoadReport> {
    log::info!(
        "Migrating {} into {}/{}",
        config.source_path.display(),
        config.postgres_host,
        config.postgres_db
    );

    let source = SourceStore::open(&config.source_path)?;
    let mut target = PostgresTarget::connect(&config.postgres(), config.target_schema.as_str())?;

    let report = migrate(&source, &mut target, &config.time_zone)?;
    log::info!("Migration complete: {report}");
    Ok(report)
}
