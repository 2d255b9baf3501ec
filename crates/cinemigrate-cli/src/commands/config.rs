use anyhow::Result;
use cinemigrate_etl::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  source_path: {}", config.source_path.display());
    println!("  postgres_host: {}", config.postgres_host);
    println!("  postgres_port: {}", config.postgres_port);
    println!("  postgres_db: {}", config.postgres_db);
    println!("  postgres_user: {}", config.postgres_user);
    println!("  postgres_password: <redacted>");
    println!("  target_schema: {}", config.target_schema);
    println!("  time_zone: {}", config.time_zone);
    println!("  log_level: {}", config.log_level);

    println!("\nPriority: CLI args > ENV vars (CINEMIGRATE_*) > Config file > Defaults");
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure cinemigrate.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
