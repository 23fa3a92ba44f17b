/// Taxonomy discriminator for product categories in the term store.
pub const PRODUCT_CATEGORY_TAXONOMY: &str = "product_cat";

/// Field holding the ordered line items of an order response.
pub const LINE_ITEMS_FIELD: &str = "line_items";

/// Product reference of a line item.
pub const PRODUCT_ID_FIELD: &str = "product_id";

/// Field written onto every line item by enrichment.
pub const CATEGORIES_FIELD: &str = "categories";
