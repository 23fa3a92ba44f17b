//! SQLite storage implementation for the term tables.

mod model;
mod repository;

pub use model::{TermDB, TermRelationshipDB, TermTaxonomyDB};
pub use repository::TermRepository;
