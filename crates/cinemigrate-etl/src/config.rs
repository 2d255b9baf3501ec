use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Configuration for cinemigrate.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CINEMIGRATE_* prefix)
/// 3. Config file (~/.config/cinemigrate/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the legacy SQLite movie database.
    ///
    /// Can be set via:
    /// - CLI: --source /path/to/db.sqlite
    /// - ENV: CINEMIGRATE_SOURCE_PATH
    /// - Config: source_path = "/path/to/db.sqlite"
    /// - Default: db.sqlite in the working directory
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,

    /// Target PostgreSQL host.
    #[serde(default = "default_postgres_host")]
    pub postgres_host: String,

    /// Target PostgreSQL port.
    #[serde(default = "default_postgres_port")]
    pub postgres_port: u16,

    /// Target database name.
    #[serde(default = "default_postgres_db")]
    pub postgres_db: String,

    #[serde(default = "default_postgres_user")]
    pub postgres_user: String,

    #[serde(default = "default_postgres_password")]
    pub postgres_password: String,

    /// Schema holding the catalog tables.
    #[serde(default = "default_target_schema")]
    pub target_schema: String,

    /// Session time zone set before any row is written.
    ///
    /// Can be set via:
    /// - CLI: --time-zone Europe/Moscow
    /// - ENV: CINEMIGRATE_TIME_ZONE
    /// - Config: time_zone = "Europe/Moscow"
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            postgres_host: default_postgres_host(),
            postgres_port: default_postgres_port(),
            postgres_db: default_postgres_db(),
            postgres_user: default_postgres_user(),
            postgres_password: default_postgres_password(),
            target_schema: default_target_schema(),
            time_zone: default_time_zone(),
            log_level: default_log_level(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("source_path", &self.source_path)
            .field("postgres_host", &self.postgres_host)
            .field("postgres_port", &self.postgres_port)
            .field("postgres_db", &self.postgres_db)
            .field("postgres_user", &self.postgres_user)
            .field("postgres_password", &"<redacted>")
            .field("target_schema", &self.target_schema)
            .field("time_zone", &self.time_zone)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/cinemigrate/config.toml
    /// Reads environment variables with CINEMIGRATE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("cinemigrate");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Override the source database path (the --source CLI flag).
    #[must_use]
    pub fn with_source_path(mut self, path: PathBuf) -> Self {
        self.source_path = path;
        self
    }

    /// Override the session time zone (the --time-zone CLI flag).
    #[must_use]
    pub fn with_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = zone.into();
        self
    }

    /// Connection parameters for the target store.
    #[must_use]
    pub fn postgres(&self) -> postgres::Config {
        let mut pg = postgres::Config::new();
        pg.host(&self.postgres_host)
            .port(self.postgres_port)
            .dbname(&self.postgres_db)
            .user(&self.postgres_user)
            .password(&self.postgres_password)
            .application_name("cinemigrate");
        pg
    }
}

fn default_source_path() -> PathBuf {
    PathBuf::from("db.sqlite")
}

fn default_postgres_host() -> String {
    String::from("127.0.0.1")
}

const fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_db() -> String {
    String::from("movies")
}

fn default_postgres_user() -> String {
    String::from("postgres")
}

fn default_postgres_password() -> String {
    String::from("postgres")
}

fn default_target_schema() -> String {
    String::from("content")
}

fn default_time_zone() -> String {
    String::from("Europe/Moscow")
}

fn default_log_level() -> String {
    String::from("info")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/cinemigrate/config.toml
/// - macOS: ~/Library/Application Support/cinemigrate/config.toml
/// - Windows: %APPDATA%\cinemigrate\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinemigrate")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Cinemigrate Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CINEMIGRATE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Legacy SQLite movie database
#
# Can also be set via:
# - CLI: cinemigrate migrate --source /path/to/db.sqlite
# - Environment: CINEMIGRATE_SOURCE_PATH=/path/to/db.sqlite
source_path = "db.sqlite"

# Target PostgreSQL connection
#
# Environment: CINEMIGRATE_POSTGRES_HOST, CINEMIGRATE_POSTGRES_PORT, ...
postgres_host = "127.0.0.1"
postgres_port = 5432
postgres_db = "movies"
postgres_user = "postgres"
postgres_password = "postgres"

# Schema holding film_work, persons, genres and the link tables
target_schema = "content"

# Session time zone applied before loading; created/modified
# timestamps are recorded in this zone
time_zone = "Europe/Moscow"

# Log filter (RUST_LOG takes precedence)
log_level = "info"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
