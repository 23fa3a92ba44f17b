//! Enrichment module - the category join-and-fan-out pipeline.

mod enrichment_model;
mod enrichment_service;
mod enrichment_traits;


pub use enrichment_model::{AttributionMode, EnrichmentOptions, EnrichmentSummary};
pub use enrichment_service::CategoryEnrichmentService;
pub use enrichment_traits::CategoryEnrichmentServiceTrait;
