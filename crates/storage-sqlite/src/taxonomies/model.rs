//! Database models for the term tables.

use diesel::prelude::*;

use categoryinfo_core::taxonomies::{Category, ClassificationEntry, RelationshipTuple};

/// Database model for object-to-entry relationships
#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::term_relationships)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TermRelationshipDB {
    pub object_id: i64,
    pub term_taxonomy_id: i64,
    pub term_order: i32,
}

/// Database model for classification entries
#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::term_taxonomy)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TermTaxonomyDB {
    pub term_taxonomy_id: i64,
    pub term_id: i64, // 0 = no term
    pub taxonomy: String,
    pub description: String,
    pub parent: i64,
    pub count: i64,
}

/// Database model for terms
#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::terms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TermDB {
    pub term_id: i64,
    pub name: String,
    pub slug: String,
    pub term_group: i64,
}

// Conversion to domain models
impl From<TermRelationshipDB> for RelationshipTuple {
    fn from(db: TermRelationshipDB) -> Self {
        RelationshipTuple::new(db.object_id, db.term_taxonomy_id)
    }
}

impl From<TermTaxonomyDB> for ClassificationEntry {
    fn from(db: TermTaxonomyDB) -> Self {
        Self {
            classification_entry_id: db.term_taxonomy_id,
            classification_type: db.taxonomy,
            category_id: (db.term_id > 0).then_some(db.term_id),
        }
    }
}

impl From<TermDB> for Category {
    fn from(db: TermDB) -> Self {
        Self {
            id: db.term_id,
            name: db.name,
            slug: db.slug,
        }
    }
}
