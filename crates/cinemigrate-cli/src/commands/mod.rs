pub mod config;
pub mod migrate;
pub mod target;

pub use migrate::{run_dry_run, run_migrate, run_migrate_sqlite};
pub use target::init_target;
