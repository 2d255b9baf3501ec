//! Core domain model for cinemigrate.
//!
//! This crate defines the normalized movie catalog records (movies,
//! persons, genres and the two link kinds), their surrogate identifiers,
//! and the description of the relational target the records are loaded
//! into.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod model;
pub mod schema;
