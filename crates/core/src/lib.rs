//! Category Info Core - Domain entities, services, and traits.
//!
//! This crate attaches product category metadata to the line items of an
//! order response. It is database-agnostic and defines the data-access trait
//! implemented by the `storage-sqlite` crate.
//!
//! ```text
//! line items ─► relationships ─► category entries ─► categories ─► merge
//!  (extract)      (object→entry)    (entry→category)   (id→name/slug)
//! ```

pub mod constants;
pub mod enrichment;
pub mod errors;
pub mod orders;
pub mod taxonomies;

pub use enrichment::{
    AttributionMode, CategoryEnrichmentService, CategoryEnrichmentServiceTrait,
    EnrichmentOptions, EnrichmentSummary,
};
pub use orders::{CategoryDescriptor, LineItem, OrderResponse};
pub use taxonomies::{Category, ClassificationEntry, RelationshipTuple, TermRepositoryTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
