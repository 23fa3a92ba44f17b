//! Domain models for the term store.

use serde::{Deserialize, Serialize};

/// Identifier of an object (a product) in the relationship table.
pub type ObjectId = i64;

/// Identifier of a classification entry.
pub type EntryId = i64;

/// Identifier of a category term.
pub type CategoryId = i64;

/// Many-to-many edge between an object and a classification entry.
///
/// A product usually has several of these, and only some point at category
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTuple {
    pub object_id: ObjectId,
    pub classification_entry_id: EntryId,
}

impl RelationshipTuple {
    pub fn new(object_id: ObjectId, classification_entry_id: EntryId) -> Self {
        Self {
            object_id,
            classification_entry_id,
        }
    }
}

/// A generic taxonomy node.
///
/// `category_id` is only meaningful when `classification_type` is the
/// category discriminator. An entry maps to at most one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationEntry {
    pub classification_entry_id: EntryId,
    pub classification_type: String,
    pub category_id: Option<CategoryId>,
}

impl ClassificationEntry {
    /// Returns the mapped category if this entry is of `category_type`.
    pub fn category_for(&self, category_type: &str) -> Option<CategoryId> {
        if self.classification_type == category_type {
            self.category_id
        } else {
            None
        }
    }
}

/// A product category with its display name and URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_for_matches_discriminator() {
        let entry = ClassificationEntry {
            classification_entry_id: 5001,
            classification_type: "product_cat".to_string(),
            category_id: Some(9),
        };
        assert_eq!(entry.category_for("product_cat"), Some(9));
        assert_eq!(entry.category_for("product_tag"), None);
    }

    #[test]
    fn test_category_for_without_category_id() {
        let entry = ClassificationEntry {
            classification_entry_id: 5003,
            classification_type: "product_cat".to_string(),
            category_id: None,
        };
        assert_eq!(entry.category_for("product_cat"), None);
    }
}
