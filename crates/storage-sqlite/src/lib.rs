//! SQLite storage implementation for category enrichment.
//!
//! This crate implements the term store lookups defined in
//! `categoryinfo-core` using Diesel ORM with SQLite. It contains:
//! - Database connection pooling and management
//! - Diesel migrations for the three term tables
//! - The `TermRepository` implementation of `TermRepositoryTrait`
//!
//! ```text
//! term_relationships ──► term_taxonomy ──► terms
//!   (object → entry)     (entry → term,     (term → name, slug)
//!                          by taxonomy)
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod taxonomies;
pub mod utils;

pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};
pub use errors::{IntoCore, StorageError};
pub use taxonomies::TermRepository;

pub use categoryinfo_core::errors::{DatabaseError, Error, Result};
