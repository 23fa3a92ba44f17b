use std::sync::Arc;

use diesel::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use categoryinfo_core::{
    AttributionMode, CategoryEnrichmentService, CategoryEnrichmentServiceTrait, EnrichmentOptions,
};
use categoryinfo_storage_sqlite::db::DEFAULT_CONNECTION_TIMEOUT;
use categoryinfo_storage_sqlite::schema::{term_relationships, term_taxonomy, terms};
use categoryinfo_storage_sqlite::taxonomies::{TermDB, TermRelationshipDB, TermTaxonomyDB};
use categoryinfo_storage_sqlite::{
    create_pool, get_connection, init, run_migrations, DbPool, TermRepository,
};

fn setup() -> (Arc<DbPool>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir
        .path()
        .join("store")
        .join("app.db")
        .to_string_lossy()
        .to_string();

    let db_path = init(&db_path).expect("Failed to init database");
    let pool = create_pool(&db_path, DEFAULT_CONNECTION_TIMEOUT).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    seed(&pool);
    (pool, temp_dir)
}

/// Products 101 and 201 are categorized, 102 has no relationships and 301
/// points at an entry that was deleted.
fn seed(pool: &DbPool) {
    let mut conn = get_connection(pool).expect("Failed to get connection");

    let relationships = vec![
        TermRelationshipDB { object_id: 101, term_taxonomy_id: 5001, term_order: 0 },
        TermRelationshipDB { object_id: 101, term_taxonomy_id: 5002, term_order: 1 },
        TermRelationshipDB { object_id: 201, term_taxonomy_id: 5003, term_order: 0 },
        TermRelationshipDB { object_id: 301, term_taxonomy_id: 5999, term_order: 0 },
    ];
    diesel::insert_into(term_relationships::table)
        .values(&relationships)
        .execute(&mut conn)
        .expect("Failed to seed relationships");

    let entries = vec![
        entry(5001, 9, "product_cat"),
        entry(5002, 14, "product_tag"),
        entry(5003, 10, "product_cat"),
    ];
    diesel::insert_into(term_taxonomy::table)
        .values(&entries)
        .execute(&mut conn)
        .expect("Failed to seed term taxonomy");

    let categories = vec![
        term(9, "Shirts", "shirts"),
        term(10, "Hats", "hats"),
        term(14, "Sale", "sale"),
    ];
    diesel::insert_into(terms::table)
        .values(&categories)
        .execute(&mut conn)
        .expect("Failed to seed terms");
}

fn entry(term_taxonomy_id: i64, term_id: i64, taxonomy: &str) -> TermTaxonomyDB {
    TermTaxonomyDB {
        term_taxonomy_id,
        term_id,
        taxonomy: taxonomy.to_string(),
        description: String::new(),
        parent: 0,
        count: 1,
    }
}

fn term(term_id: i64, name: &str, slug: &str) -> TermDB {
    TermDB {
        term_id,
        name: name.to_string(),
        slug: slug.to_string(),
        term_group: 0,
    }
}

fn service(pool: &Arc<DbPool>, attribution: AttributionMode) -> CategoryEnrichmentService {
    let repository = Arc::new(TermRepository::new(Arc::clone(pool)));
    CategoryEnrichmentService::with_options(
        repository,
        EnrichmentOptions {
            attribution,
            ..EnrichmentOptions::default()
        },
    )
}

#[test]
fn attaches_categories_and_ignores_tags() {
    let (pool, _temp_dir) = setup();
    let service = service(&pool, AttributionMode::Consume);

    let payload = json!({
        "id": 7,
        "status": "processing",
        "line_items": [
            {"id": 1, "product_id": 101, "quantity": 2},
            {"id": 2, "product_id": 102, "quantity": 1}
        ]
    });

    let enriched = service.enrich_value(payload).unwrap();
    assert_eq!(
        enriched,
        json!({
            "id": 7,
            "status": "processing",
            "line_items": [
                {
                    "id": 1,
                    "product_id": 101,
                    "quantity": 2,
                    "categories": [{"id": 9, "name": "Shirts", "slug": "shirts"}]
                },
                {"id": 2, "product_id": 102, "quantity": 1, "categories": []}
            ]
        })
    );
}

#[test]
fn duplicate_product_is_attributed_once_by_default() {
    let (pool, _temp_dir) = setup();
    let service = service(&pool, AttributionMode::Consume);

    let enriched = service
        .enrich_value(json!({
            "line_items": [{"product_id": 201}, {"product_id": 201}]
        }))
        .unwrap();

    assert_eq!(
        enriched["line_items"][0]["categories"],
        json!([{"id": 10, "name": "Hats", "slug": "hats"}])
    );
    assert_eq!(enriched["line_items"][1]["categories"], json!([]));
}

#[test]
fn duplicate_product_fans_out_in_per_product_mode() {
    let (pool, _temp_dir) = setup();
    let service = service(&pool, AttributionMode::PerProduct);

    let enriched = service
        .enrich_value(json!({
            "line_items": [{"product_id": 201}, {"product_id": 201}]
        }))
        .unwrap();

    let hats = json!([{"id": 10, "name": "Hats", "slug": "hats"}]);
    assert_eq!(enriched["line_items"][0]["categories"], hats);
    assert_eq!(enriched["line_items"][1]["categories"], hats);
}

#[test]
fn empty_line_items_leave_payload_untouched() {
    let (pool, _temp_dir) = setup();
    let service = service(&pool, AttributionMode::Consume);

    let payload = json!({"id": 8, "line_items": []});
    assert_eq!(service.enrich_value(payload.clone()).unwrap(), payload);
}

#[test]
fn dangling_entry_yields_no_category() {
    let (pool, _temp_dir) = setup();
    let service = service(&pool, AttributionMode::Consume);

    let enriched = service
        .enrich_value(json!({
            "line_items": [{"product_id": 301}, {"product_id": 101}]
        }))
        .unwrap();

    assert_eq!(enriched["line_items"][0]["categories"], json!([]));
    assert_eq!(
        enriched["line_items"][1]["categories"],
        json!([{"id": 9, "name": "Shirts", "slug": "shirts"}])
    );
}
