use poem_openapi::{payload::Json, ApiResponse, Object, OpenApi};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::business::{ManifestStore, ProviderRegistry};

pub struct HealthApi {
    store: Arc<ManifestStore>,
    providers: Arc<ProviderRegistry>,
}

impl HealthApi {
    pub fn new(store: Arc<ManifestStore>, providers: Arc<ProviderRegistry>) -> Self {
        Self { store, providers }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub open_manifests: u64,
    pub providers: Vec<String>,
}

#[derive(ApiResponse)]
pub enum HealthResponse {
    #[oai(status = 200)]
    Ok(Json<HealthStatus>),
}

#[OpenApi]
impl HealthApi {
    /// Service status with the number of open manifest sessions
    #[oai(path = "/health", method = "get")]
    async fn health(&self) -> HealthResponse {
        let mut providers = self.providers.registered_providers();
        providers.sort();

        HealthResponse::Ok(Json(HealthStatus {
            status: "healthy".to_string(),
            service: "ShipGate".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            open_manifests: self.store.open_manifests().len() as u64,
            providers,
        }))
    }
}
