//! Orders module - the response payload the pipeline reads and mutates.

mod orders_model;

pub use orders_model::{line_item_reference, CategoryDescriptor, LineItem, OrderResponse, ProductId};
