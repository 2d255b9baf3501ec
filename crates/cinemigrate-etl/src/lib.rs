//! Migration stages for cinemigrate.
//!
//! Reads the denormalized legacy movie store, normalizes each row into
//! movies, persons, genres and link records with stable surrogate ids,
//! and bulk-loads the result into the relational target in one
//! transaction.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod registry;
pub mod source;
pub mod transform;

pub use config::Config;
pub use error::{MigrateError, MigrateResult};
pub use load::{load, LoadReport, PostgresTarget, SqliteTarget, TargetStore, TargetTransaction};
pub use pipeline::{extract, migrate, run};
pub use registry::{IdentityRegistry, Registry};
pub use source::{RawMovie, SourceStore, WriterRef};
pub use transform::Transformer;
