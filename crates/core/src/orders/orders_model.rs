//! Domain models for order responses.
//!
//! The host owns the payload and may carry any number of fields the pipeline
//! knows nothing about. Typed records keep those in `extra`; raw payloads are
//! read through [`line_item_reference`] and only ever gain a `categories` key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::PRODUCT_ID_FIELD;
use crate::taxonomies::{CategoryId, ObjectId};

/// Product reference carried by a line item.
pub type ProductId = ObjectId;

/// Category payload attached to a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// One purchased product within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Absent until enrichment runs, then always present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryDescriptor>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id: Some(product_id),
            categories: None,
            extra: Map::new(),
        }
    }

    /// The product this item references, if any.
    ///
    /// Removed products are reported with id `0`; those reference nothing.
    pub fn product_reference(&self) -> Option<ProductId> {
        self.product_id.and_then(as_reference)
    }
}

/// Product reference of a raw line item, under the same rules as
/// [`LineItem::product_reference`].
///
/// Anything other than an object with an integer `product_id` references
/// nothing.
pub fn line_item_reference(item: &Value) -> Option<ProductId> {
    item.get(PRODUCT_ID_FIELD)
        .and_then(Value::as_i64)
        .and_then(as_reference)
}

fn as_reference(id: i64) -> Option<ProductId> {
    (id > 0).then_some(id)
}

/// An order serialized for a webhook or API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderResponse {
    pub fn new(line_items: Vec<LineItem>) -> Self {
        Self {
            line_items: Some(line_items),
            extra: Map::new(),
        }
    }

    /// Product references in line item order, duplicates kept.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.line_items
            .iter()
            .flatten()
            .filter_map(LineItem::product_reference)
            .collect()
    }
}
