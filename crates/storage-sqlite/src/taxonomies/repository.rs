//! Repository implementation for the term tables.

use diesel::prelude::*;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use categoryinfo_core::taxonomies::{
    Category, CategoryId, ClassificationEntry, EntryId, ObjectId, RelationshipTuple,
    TermRepositoryTrait,
};
use categoryinfo_core::Result;

use super::model::{TermDB, TermRelationshipDB, TermTaxonomyDB};
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::{term_relationships, term_taxonomy, terms};
use crate::utils::{chunk_for_sqlite, unique_ids};

pub struct TermRepository {
    pool: Arc<DbPool>,
}

impl TermRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl TermRepositoryTrait for TermRepository {
    fn find_relationships(&self, object_ids: &[ObjectId]) -> Result<Vec<RelationshipTuple>> {
        let ids = unique_ids(object_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = get_connection(&self.pool)?;
        let mut rows = Vec::new();
        for chunk in chunk_for_sqlite(&ids) {
            let batch = term_relationships::table
                .filter(term_relationships::object_id.eq_any(chunk))
                .order((
                    term_relationships::object_id.asc(),
                    term_relationships::term_order.asc(),
                    term_relationships::term_taxonomy_id.asc(),
                ))
                .select(TermRelationshipDB::as_select())
                .load::<TermRelationshipDB>(&mut conn)
                .into_core()?;
            rows.extend(batch);
        }

        debug!("Loaded {} term relationships", rows.len());
        Ok(rows.into_iter().map(RelationshipTuple::from).collect())
    }

    fn find_category_entries(
        &self,
        entry_ids: &[EntryId],
        classification_type: &str,
    ) -> Result<HashMap<EntryId, CategoryId>> {
        let ids = unique_ids(entry_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = get_connection(&self.pool)?;
        let mut entries = HashMap::new();
        for chunk in chunk_for_sqlite(&ids) {
            let batch = term_taxonomy::table
                .filter(term_taxonomy::taxonomy.eq(classification_type))
                .filter(term_taxonomy::term_taxonomy_id.eq_any(chunk))
                .select(TermTaxonomyDB::as_select())
                .load::<TermTaxonomyDB>(&mut conn)
                .into_core()?;

            for row in batch {
                let entry = ClassificationEntry::from(row);
                match entry.category_for(classification_type) {
                    Some(category_id) => {
                        entries.insert(entry.classification_entry_id, category_id);
                    }
                    None => debug!(
                        "Entry {} is '{}' but has no term, skipping",
                        entry.classification_entry_id, classification_type
                    ),
                }
            }
        }

        Ok(entries)
    }

    fn find_categories(&self, category_ids: &[CategoryId]) -> Result<HashMap<CategoryId, Category>> {
        let ids = unique_ids(category_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = get_connection(&self.pool)?;
        let mut categories = HashMap::with_capacity(ids.len());
        for chunk in chunk_for_sqlite(&ids) {
            let batch = terms::table
                .filter(terms::term_id.eq_any(chunk))
                .select(TermDB::as_select())
                .load::<TermDB>(&mut conn)
                .into_core()?;
            categories.extend(batch.into_iter().map(|row| (row.term_id, Category::from(row))));
        }

        Ok(categories)
    }
}
