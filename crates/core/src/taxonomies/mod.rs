//! Taxonomies module - term store records and the data-access trait.
//!
//! Products reach categories through two levels of indirection: a generic
//! object-to-entry relationship and a generic classification entry, of which
//! only the category-typed ones matter here.

mod taxonomy_model;
mod taxonomy_traits;

pub use taxonomy_model::{
    Category, CategoryId, ClassificationEntry, EntryId, ObjectId, RelationshipTuple,
};
pub use taxonomy_traits::TermRepositoryTrait;
