use crate::business::directory::ManifestPublisher;
use crate::business::provider::ProviderRegistry;
use crate::domain::Manifest;
use crate::error::AppError;
use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of submitting a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Object)]
pub struct SubmittedManifest {
    pub name: String,
    pub service_provider: String,
    /// Carrier shipment ids covered by the manifest, in scan order
    pub shipment_ids: Vec<String>,
    /// Carrier manifest file attached by the host, when one was generated
    pub manifest_url: Option<String>,
}

/// Submits a finished manifest to the host
pub struct ManifestSubmitter {
    publisher: Arc<dyn ManifestPublisher>,
    providers: Arc<ProviderRegistry>,
}

impl ManifestSubmitter {
    pub fn new(publisher: Arc<dyn ManifestPublisher>, providers: Arc<ProviderRegistry>) -> Self {
        Self {
            publisher,
            providers,
        }
    }

    pub async fn submit(&self, manifest: &Manifest) -> Result<SubmittedManifest, AppError> {
        if manifest.manifest_items.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Manifest {} has no packages to submit",
                manifest.name
            )));
        }

        let generates_manifest = self
            .providers
            .generates_carrier_manifest(&manifest.service_provider);
        if generates_manifest {
            let missing = manifest.items_without_shipment_id();
            if !missing.is_empty() {
                return Err(AppError::BadRequest(format!(
                    "Packages without a carrier shipment id: {}",
                    missing.join(", ")
                )));
            }
        }

        let shipment_ids = manifest.shipment_ids();
        self.publisher.submit_manifest(manifest).await?;

        // The document is submitted at this point; a failed attachment lookup
        // only loses the link
        let manifest_url = if generates_manifest {
            match self.publisher.find_manifest_file(&manifest.name).await {
                Ok(url) => url,
                Err(e) => {
                    warn!("Could not look up the carrier manifest of {}: {}", manifest.name, e);
                    None
                }
            }
        } else {
            None
        };

        info!(
            "Submitted manifest {} with {} shipments",
            manifest.name,
            shipment_ids.len()
        );
        Ok(SubmittedManifest {
            name: manifest.name.clone(),
            service_provider: manifest.service_provider.clone(),
            shipment_ids,
            manifest_url,
        })
    }
}
