use std::sync::Arc;

use crate::config::Config;
use categoryinfo_core::{
    CategoryEnrichmentService, CategoryEnrichmentServiceTrait, EnrichmentOptions,
};
use categoryinfo_storage_sqlite::{db, TermRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub enrichment_service: Arc<dyn CategoryEnrichmentServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("CI_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path, config.db_timeout)?;
    db::run_migrations(&pool)?;

    let term_repository = Arc::new(TermRepository::new(pool));
    let options = EnrichmentOptions {
        category_taxonomy: config.category_taxonomy.clone(),
        attribution: config.attribution,
    };
    let enrichment_service = Arc::new(CategoryEnrichmentService::with_options(
        term_repository,
        options,
    ));
    tracing::info!(
        "Enriching with taxonomy '{}' in {} mode",
        enrichment_service.options().category_taxonomy,
        enrichment_service.options().attribution
    );

    Ok(Arc::new(AppState { enrichment_service }))
}
