//! Category enrichment service implementation.

use log::{debug, warn};
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::constants::{CATEGORIES_FIELD, LINE_ITEMS_FIELD};
use crate::orders::{line_item_reference, CategoryDescriptor, LineItem, OrderResponse, ProductId};
use crate::taxonomies::{Category, CategoryId, EntryId, RelationshipTuple, TermRepositoryTrait};
use crate::Result;

use super::{
    AttributionMode, CategoryEnrichmentServiceTrait, EnrichmentOptions, EnrichmentSummary,
};

/// Maps products to categories through the term store and writes the result
/// onto each line item.
///
/// Every call resolves from scratch; nothing is cached between orders.
pub struct CategoryEnrichmentService {
    repository: Arc<dyn TermRepositoryTrait>,
    options: EnrichmentOptions,
}

impl CategoryEnrichmentService {
    pub fn new(repository: Arc<dyn TermRepositoryTrait>) -> Self {
        Self::with_options(repository, EnrichmentOptions::default())
    }

    pub fn with_options(repository: Arc<dyn TermRepositoryTrait>, options: EnrichmentOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    pub fn options(&self) -> &EnrichmentOptions {
        &self.options
    }

    /// Looks up every relationship tuple for the given products in one call.
    pub fn resolve_relationships(&self, product_ids: &[ProductId]) -> Result<Vec<RelationshipTuple>> {
        let object_ids = dedup_ids(product_ids.iter().copied());
        if object_ids.is_empty() {
            return Ok(Vec::new());
        }
        let tuples = self.repository.find_relationships(&object_ids)?;
        debug!(
            "Resolved {} relationships for {} products",
            tuples.len(),
            object_ids.len()
        );
        Ok(tuples)
    }

    /// Keeps the entries of the category type and maps them to their category.
    pub fn filter_category_entries(
        &self,
        tuples: &[RelationshipTuple],
    ) -> Result<HashMap<EntryId, CategoryId>> {
        let entry_ids = dedup_ids(tuples.iter().map(|t| t.classification_entry_id));
        if entry_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let entries = self
            .repository
            .find_category_entries(&entry_ids, &self.options.category_taxonomy)?;
        debug!(
            "{} of {} classification entries are '{}'",
            entries.len(),
            entry_ids.len(),
            self.options.category_taxonomy
        );
        Ok(entries)
    }

    /// Fetches name and slug for every category reachable from `entry_categories`.
    pub fn fetch_categories(
        &self,
        entry_categories: &HashMap<EntryId, CategoryId>,
    ) -> Result<HashMap<CategoryId, Category>> {
        let mut category_ids = dedup_ids(entry_categories.values().copied());
        if category_ids.is_empty() {
            return Ok(HashMap::new());
        }
        category_ids.sort_unstable();
        let categories = self.repository.find_categories(&category_ids)?;
        if categories.len() < category_ids.len() {
            warn!(
                "{} category ids have no term record",
                category_ids.len() - categories.len()
            );
        }
        Ok(categories)
    }

    /// Writes a `categories` list onto every line item of `order`.
    ///
    /// Line items keep their order and count. A tuple whose entry has no
    /// category, or whose category has no record, is skipped and left in
    /// place. Within one line item a category appears at most once.
    pub fn merge(
        &self,
        order: &mut OrderResponse,
        tuples: Vec<RelationshipTuple>,
        entry_categories: &HashMap<EntryId, CategoryId>,
        categories: &HashMap<CategoryId, Category>,
    ) -> EnrichmentSummary {
        let references: Vec<Option<ProductId>> = order
            .line_items
            .iter()
            .flatten()
            .map(LineItem::product_reference)
            .collect();
        let (attributed, summary) =
            self.attribute(&references, tuples, entry_categories, categories);

        if let Some(line_items) = order.line_items.as_mut() {
            for (item, descriptors) in line_items.iter_mut().zip(attributed) {
                item.categories = Some(descriptors);
            }
        }
        summary
    }

    /// Runs the three lookups for a set of product references.
    fn lookup(&self, product_ids: &[ProductId]) -> Result<Lookup> {
        let tuples = self.resolve_relationships(product_ids)?;
        let entry_categories = self.filter_category_entries(&tuples)?;
        let categories = self.fetch_categories(&entry_categories)?;
        Ok(Lookup {
            tuples,
            entry_categories,
            categories,
        })
    }

    /// Distributes resolved categories over line items, one list per
    /// reference slot, in slot order.
    fn attribute(
        &self,
        references: &[Option<ProductId>],
        tuples: Vec<RelationshipTuple>,
        entry_categories: &HashMap<EntryId, CategoryId>,
        categories: &HashMap<CategoryId, Category>,
    ) -> (Vec<Vec<CategoryDescriptor>>, EnrichmentSummary) {
        let mut summary = EnrichmentSummary {
            line_items: references.len(),
            relationships: tuples.len(),
            category_entries: entry_categories.len(),
            categories: categories.len(),
            unresolved: tuples
                .iter()
                .filter(|t| resolve(t, entry_categories, categories).is_none())
                .count(),
            ..EnrichmentSummary::default()
        };

        let attributed: Vec<Vec<CategoryDescriptor>> = match self.options.attribution {
            AttributionMode::Consume => {
                let mut pool: HashMap<ProductId, VecDeque<RelationshipTuple>> = HashMap::new();
                for tuple in tuples {
                    pool.entry(tuple.object_id).or_default().push_back(tuple);
                }

                references
                    .iter()
                    .map(|reference| {
                        let mut descriptors = Vec::new();
                        if let Some(queue) =
                            reference.and_then(|product_id| pool.get_mut(&product_id))
                        {
                            // Resolved tuples are consumed, unresolved ones stay queued.
                            queue.retain(|tuple| {
                                match resolve(tuple, entry_categories, categories) {
                                    Some(category) => {
                                        push_unique(&mut descriptors, category);
                                        false
                                    }
                                    None => true,
                                }
                            });
                        }
                        descriptors
                    })
                    .collect()
            }
            AttributionMode::PerProduct => {
                let mut by_product: HashMap<ProductId, Vec<CategoryDescriptor>> = HashMap::new();
                for tuple in &tuples {
                    if let Some(category) = resolve(tuple, entry_categories, categories) {
                        push_unique(by_product.entry(tuple.object_id).or_default(), category);
                    }
                }

                references
                    .iter()
                    .map(|reference| {
                        reference
                            .and_then(|product_id| by_product.get(&product_id))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect()
            }
        };

        summary.attached = attributed.iter().map(Vec::len).sum();
        debug!(
            "Attached {} categories across {} line items ({} unresolved relationships)",
            summary.attached, summary.line_items, summary.unresolved
        );
        (attributed, summary)
    }
}

impl CategoryEnrichmentServiceTrait for CategoryEnrichmentService {
    fn enrich(&self, mut order: OrderResponse) -> Result<OrderResponse> {
        let product_ids = order.product_ids();
        if product_ids.is_empty() {
            debug!("Order has no product references, leaving response untouched");
            return Ok(order);
        }

        let Lookup {
            tuples,
            entry_categories,
            categories,
        } = self.lookup(&product_ids)?;
        self.merge(&mut order, tuples, &entry_categories, &categories);
        Ok(order)
    }

    fn enrich_value(&self, mut payload: Value) -> Result<Value> {
        let references: Vec<Option<ProductId>> =
            match payload.get(LINE_ITEMS_FIELD).and_then(Value::as_array) {
                Some(line_items) => line_items.iter().map(line_item_reference).collect(),
                None => {
                    debug!("Payload has no line_items array, leaving response untouched");
                    return Ok(payload);
                }
            };
        let product_ids: Vec<ProductId> = references.iter().flatten().copied().collect();
        if product_ids.is_empty() {
            debug!("Order has no product references, leaving response untouched");
            return Ok(payload);
        }

        let Lookup {
            tuples,
            entry_categories,
            categories,
        } = self.lookup(&product_ids)?;
        let (attributed, _) =
            self.attribute(&references, tuples, &entry_categories, &categories);

        if let Some(line_items) = payload
            .get_mut(LINE_ITEMS_FIELD)
            .and_then(Value::as_array_mut)
        {
            for (item, descriptors) in line_items.iter_mut().zip(attributed) {
                // Items that are not objects have nowhere to hold categories.
                if let Some(fields) = item.as_object_mut() {
                    fields.insert(CATEGORIES_FIELD.to_string(), serde_json::to_value(descriptors)?);
                }
            }
        }
        Ok(payload)
    }
}

/// Output of the three store lookups for one order.
struct Lookup {
    tuples: Vec<RelationshipTuple>,
    entry_categories: HashMap<EntryId, CategoryId>,
    categories: HashMap<CategoryId, Category>,
}

/// Follows a tuple through both mappings. `None` means unresolved.
fn resolve<'a>(
    tuple: &RelationshipTuple,
    entry_categories: &HashMap<EntryId, CategoryId>,
    categories: &'a HashMap<CategoryId, Category>,
) -> Option<&'a Category> {
    let category_id = entry_categories.get(&tuple.classification_entry_id)?;
    categories.get(category_id)
}

fn push_unique(descriptors: &mut Vec<CategoryDescriptor>, category: &Category) {
    if descriptors.iter().any(|d| d.id == category.id) {
        return;
    }
    descriptors.push(CategoryDescriptor {
        id: category.id,
        name: category.name.clone(),
        slug: category.slug.clone(),
    });
}

/// Removes repeated ids, keeping first-seen order.
fn dedup_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
