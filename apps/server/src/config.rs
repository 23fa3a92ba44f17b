use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use categoryinfo_core::{constants::PRODUCT_CATEGORY_TAXONOMY, AttributionMode};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// How long a lookup waits for a pooled database connection.
    pub db_timeout: Duration,
    pub category_taxonomy: String,
    pub attribution: AttributionMode,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CI_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid CI_LISTEN_ADDR")?;
        let db_path = std::env::var("CI_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("CI_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let category_taxonomy = std::env::var("CI_CATEGORY_TAXONOMY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| PRODUCT_CATEGORY_TAXONOMY.to_string());
        let attribution = match std::env::var("CI_ATTRIBUTION_MODE") {
            Ok(mode) => mode
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid CI_ATTRIBUTION_MODE: {}", e))?,
            Err(_) => AttributionMode::default(),
        };
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: millis_from_env("CI_REQUEST_TIMEOUT_MS"),
            db_timeout: millis_from_env("CI_DB_TIMEOUT_MS"),
            category_taxonomy,
            attribution,
        })
    }
}

fn millis_from_env(key: &str) -> Duration {
    let ms: u64 = std::env::var(key)
        .unwrap_or_else(|_| "30000".into())
        .parse()
        .unwrap_or(30000);
    Duration::from_millis(ms)
}
