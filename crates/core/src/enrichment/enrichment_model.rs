//! Options and reporting types for category enrichment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::PRODUCT_CATEGORY_TAXONOMY;
use crate::errors::{Error, ValidationError};

/// How relationship tuples are distributed over line items that share a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionMode {
    /// A tuple is consumed by the first line item referencing its product.
    /// Later line items for the same product receive no categories from it.
    #[default]
    Consume,
    /// Categories are resolved once per product and copied to every line
    /// item referencing it.
    PerProduct,
}

impl fmt::Display for AttributionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributionMode::Consume => write!(f, "consume"),
            AttributionMode::PerProduct => write!(f, "per_product"),
        }
    }
}

impl FromStr for AttributionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consume" => Ok(AttributionMode::Consume),
            "per_product" | "per-product" => Ok(AttributionMode::PerProduct),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown attribution mode '{}'",
                other
            ))
            .into()),
        }
    }
}

/// Pipeline configuration, fixed for the lifetime of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentOptions {
    /// Classification type discriminator that marks category entries.
    pub category_taxonomy: String,
    pub attribution: AttributionMode,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            category_taxonomy: PRODUCT_CATEGORY_TAXONOMY.to_string(),
            attribution: AttributionMode::default(),
        }
    }
}

/// Counts collected by one merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentSummary {
    pub line_items: usize,
    pub relationships: usize,
    pub category_entries: usize,
    pub categories: usize,
    /// Descriptors written across all line items.
    pub attached: usize,
    /// Relationship tuples that did not lead to a category record.
    pub unresolved: usize,
}
