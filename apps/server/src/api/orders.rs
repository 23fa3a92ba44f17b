use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{extract::State, routing::post, Json, Router};
use serde_json::Value;
use tokio::task;
use tracing::debug;

/// Attaches category descriptors to the line items of an order response.
///
/// The payload is echoed back unchanged when it carries no product references.
async fn enrich_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    debug!("Enriching order response...");
    let service = state.enrichment_service.clone();
    // Term lookups block on the pool, keep them off the async workers.
    let enriched = task::spawn_blocking(move || service.enrich_value(payload))
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to execute enrichment task: {}", e)))??;
    Ok(Json(enriched))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/orders/enrich", post(enrich_order))
}
