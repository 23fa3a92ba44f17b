//! Data-access trait for the term store.

use std::collections::HashMap;

use crate::Result;

use super::{Category, CategoryId, EntryId, ObjectId, RelationshipTuple};

/// Repository trait for the three bulk lookups behind category enrichment.
///
/// Every method takes the full identifier set at once and must resolve it
/// with an IN-style predicate, never one query per id. An empty input returns
/// an empty result without touching the store. Ids may repeat in the input;
/// repeats must not change the result.
pub trait TermRepositoryTrait: Send + Sync {
    /// All relationship tuples whose object is one of `object_ids`.
    fn find_relationships(&self, object_ids: &[ObjectId]) -> Result<Vec<RelationshipTuple>>;

    /// Entry to category mapping, restricted to entries of `classification_type`.
    ///
    /// Entries of another type, or with no category, are absent from the map.
    fn find_category_entries(
        &self,
        entry_ids: &[EntryId],
        classification_type: &str,
    ) -> Result<HashMap<EntryId, CategoryId>>;

    /// Category records for `category_ids`. Unknown ids are absent from the map.
    fn find_categories(&self, category_ids: &[CategoryId]) -> Result<HashMap<CategoryId, Category>>;
}
