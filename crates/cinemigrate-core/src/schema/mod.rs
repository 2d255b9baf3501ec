//! Description of the relational target the normalized records load into.

pub mod ddl;
pub mod tables;

pub use ddl::{postgres_schema, quote_ident, SQLITE_SCHEMA};
pub use tables::{Table, LOAD_ORDER};
