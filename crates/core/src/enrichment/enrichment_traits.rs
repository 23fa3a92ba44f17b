//! Traits for the enrichment service.

use serde_json::Value;

use crate::orders::OrderResponse;
use crate::Result;

/// Service trait for attaching categories to order line items.
pub trait CategoryEnrichmentServiceTrait: Send + Sync {
    /// Runs the pipeline over a typed order response.
    fn enrich(&self, order: OrderResponse) -> Result<OrderResponse>;

    /// Runs the pipeline over a raw host payload.
    ///
    /// Payloads without a usable `line_items` collection come back unchanged.
    fn enrich_value(&self, payload: Value) -> Result<Value>;
}
