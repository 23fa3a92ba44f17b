use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use categoryinfo_core::AttributionMode;
use categoryinfo_server::{api::app_router, build_state, config::Config};
use categoryinfo_storage_sqlite::{create_pool, get_connection};
use diesel::prelude::*;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn test_config(tmp: &TempDir, attribution: AttributionMode) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        db_timeout: Duration::from_secs(5),
        category_taxonomy: "product_cat".to_string(),
        attribution,
    }
}

fn execute(config: &Config, sql: &str) {
    let pool = create_pool(&config.db_path, config.db_timeout).unwrap();
    let mut conn = get_connection(&pool).unwrap();
    diesel::sql_query(sql).execute(&mut conn).unwrap();
}

async fn test_app(tmp: &TempDir, attribution: AttributionMode) -> (Router, Config) {
    let config = test_config(tmp, attribution);
    let state = build_state(&config).await.unwrap();
    execute(
        &config,
        "INSERT INTO term_relationships (object_id, term_taxonomy_id, term_order) VALUES
            (101, 5001, 0), (101, 5002, 1), (201, 5003, 0);",
    );
    execute(
        &config,
        "INSERT INTO term_taxonomy (term_taxonomy_id, term_id, taxonomy, description, parent, count) VALUES
            (5001, 9, 'product_cat', '', 0, 1),
            (5002, 14, 'product_tag', '', 0, 1),
            (5003, 10, 'product_cat', '', 0, 1);",
    );
    execute(
        &config,
        "INSERT INTO terms (term_id, name, slug, term_group) VALUES
            (9, 'Shirts', 'shirts', 0), (10, 'Hats', 'hats', 0), (14, 'Sale', 'sale', 0);",
    );
    (app_router(state, &config), config)
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/orders/enrich")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn healthz_works() {
    let tmp = tempdir().unwrap();
    let (app, _config) = test_app(&tmp, AttributionMode::Consume).await;

    let response = app
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn enrich_attaches_categories() {
    let tmp = tempdir().unwrap();
    let (app, _config) = test_app(&tmp, AttributionMode::Consume).await;

    let (status, body) = post_json(
        app,
        json!({
            "id": 42,
            "currency": "EUR",
            "line_items": [
                {"id": 1, "product_id": 101, "name": "Tee"},
                {"id": 2, "product_id": 102, "name": "Mug"}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 42);
    assert_eq!(body["currency"], "EUR");
    assert_eq!(
        body["line_items"][0]["categories"],
        json!([{"id": 9, "name": "Shirts", "slug": "shirts"}])
    );
    assert_eq!(body["line_items"][0]["name"], "Tee");
    assert_eq!(body["line_items"][1]["categories"], json!([]));
}

#[tokio::test]
async fn enrich_respects_attribution_mode() {
    let payload = json!({"line_items": [{"product_id": 201}, {"product_id": 201}]});
    let hats = json!([{"id": 10, "name": "Hats", "slug": "hats"}]);

    let tmp = tempdir().unwrap();
    let (app, _config) = test_app(&tmp, AttributionMode::Consume).await;
    let (_, consumed) = post_json(app, payload.clone()).await;
    assert_eq!(consumed["line_items"][0]["categories"], hats);
    assert_eq!(consumed["line_items"][1]["categories"], json!([]));

    let tmp = tempdir().unwrap();
    let (app, _config) = test_app(&tmp, AttributionMode::PerProduct).await;
    let (_, fanned) = post_json(app, payload).await;
    assert_eq!(fanned["line_items"][0]["categories"], hats);
    assert_eq!(fanned["line_items"][1]["categories"], hats);
}

#[tokio::test]
async fn enrich_echoes_payload_without_products() {
    let tmp = tempdir().unwrap();
    let (app, _config) = test_app(&tmp, AttributionMode::Consume).await;

    for payload in [
        json!({"id": 1, "line_items": []}),
        json!({"id": 2, "line_items": [{"name": "Gift wrap"}]}),
        json!({"id": 3, "line_items": "not a list"}),
        json!({"id": 4}),
    ] {
        let (status, body) = post_json(app.clone(), payload.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, payload);
    }
}

#[tokio::test]
async fn enrich_replaces_foreign_categories_and_keeps_other_keys() {
    let tmp = tempdir().unwrap();
    let (app, _config) = test_app(&tmp, AttributionMode::Consume).await;

    let (status, body) = post_json(
        app,
        json!({
            "line_items": [
                {"id": 5, "product_id": 101, "categories": ["legacy"]},
                {"id": 6, "product_id": null}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "line_items": [
                {
                    "id": 5,
                    "product_id": 101,
                    "categories": [{"id": 9, "name": "Shirts", "slug": "shirts"}]
                },
                {"id": 6, "product_id": null, "categories": []}
            ]
        })
    );
}

#[tokio::test]
async fn store_failure_aborts_without_partial_payload() {
    let tmp = tempdir().unwrap();
    let (app, config) = test_app(&tmp, AttributionMode::Consume).await;
    execute(&config, "DROP TABLE term_relationships;");

    let (status, body) = post_json(app, json!({"line_items": [{"product_id": 101}]})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert!(body.get("line_items").is_none());
}

#[test]
fn config_reads_environment() {
    std::env::set_var("CI_ATTRIBUTION_MODE", "per_product");
    std::env::set_var("CI_CATEGORY_TAXONOMY", "shop_cat");
    std::env::set_var("CI_DB_TIMEOUT_MS", "1500");
    let config = Config::from_env().unwrap();
    assert_eq!(config.attribution, AttributionMode::PerProduct);
    assert_eq!(config.category_taxonomy, "shop_cat");
    assert_eq!(config.db_timeout, Duration::from_millis(1500));

    std::env::set_var("CI_ATTRIBUTION_MODE", "everywhere");
    assert!(Config::from_env().is_err());

    std::env::remove_var("CI_ATTRIBUTION_MODE");
    std::env::remove_var("CI_CATEGORY_TAXONOMY");
    std::env::remove_var("CI_DB_TIMEOUT_MS");
}
