use anyhow::{Context, Result};

use cinemigrate_core::schema::postgres_schema;
use cinemigrate_etl::{Config, PostgresTarget};

/// Create (or print) the catalog schema in the target database.
pub fn init_target(config: &Config, print: bool) -> Result<()> {
    if print {
        print!("{}", postgres_schema(&config.target_schema));
        return Ok(());
    }

    let mut target = PostgresTarget::connect(&config.postgres(), config.target_schema.as_str())
        .context("Failed to connect to target")?;
    target
        .create_schema()
        .context("Failed to create catalog schema")?;

    println!(
        "✓ Catalog tables ready in {}/{} (schema {})",
        config.postgres_host, config.postgres_db, config.target_schema
    );
    Ok(())
}
