use crate::business::scan::ScanWorkflow;
use crate::business::session::{ManifestSession, ManifestStore, ScanReport};
use crate::business::submit::{ManifestSubmitter, SubmittedManifest};
use crate::domain::{Manifest, ManifestItem};
use crate::error::AppError;
use anyhow::anyhow;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Manifest state handed over by the host when a manifest form is opened
#[derive(Debug, Clone)]
pub struct ManifestSnapshot {
    pub service_provider: String,
    pub pickup_id: Option<String>,
    pub manifest_items: Vec<ManifestItem>,
}

/// Service that owns open manifests and routes scan events to them
pub struct ManifestService {
    store: Arc<ManifestStore>,
    workflow: Arc<ScanWorkflow>,
    submitter: Option<Arc<ManifestSubmitter>>,
}

impl ManifestService {
    pub fn new(store: Arc<ManifestStore>, workflow: Arc<ScanWorkflow>) -> Self {
        Self {
            store,
            workflow,
            submitter: None,
        }
    }

    pub fn with_submitter(mut self, submitter: Arc<ManifestSubmitter>) -> Self {
        self.submitter = Some(submitter);
        self
    }

    /// Open (or reopen) a manifest from the host's current document state
    pub fn open_manifest(&self, name: &str, snapshot: ManifestSnapshot) -> Result<Manifest, AppError> {
        let name = normalize_name(name)?;
        let service_provider = snapshot.service_provider.trim();
        if service_provider.is_empty() {
            return Err(AppError::BadRequest(
                "Service provider is required".to_string(),
            ));
        }

        {
            let mut seen = HashSet::new();
            for item in &snapshot.manifest_items {
                if !seen.insert(item.awb_number.as_str()) {
                    return Err(AppError::BadRequest(format!(
                        "AWB number {} appears more than once",
                        item.awb_number
                    )));
                }
            }
        }

        let manifest = Manifest {
            name: name.to_string(),
            service_provider: service_provider.to_string(),
            pickup_id: snapshot
                .pickup_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            scan_barcode: String::new(),
            manifest_items: snapshot.manifest_items,
        };
        info!(
            "Opening manifest {} for {} with {} items",
            manifest.name,
            manifest.service_provider,
            manifest.manifest_items.len()
        );
        self.store.open(manifest.clone());
        Ok(manifest)
    }

    pub async fn get_manifest(&self, name: &str) -> Result<Manifest, AppError> {
        Ok(self.session(name)?.snapshot().await)
    }

    pub fn close_manifest(&self, name: &str) -> Result<(), AppError> {
        let name = normalize_name(name)?;
        if !self.store.close(name) {
            return Err(not_open(name));
        }
        debug!("Closed manifest {}", name);
        Ok(())
    }

    /// Route a scan event to the manifest's session
    pub async fn scan(&self, name: &str, code: &str) -> Result<ScanReport, AppError> {
        self.session(name)?.scan(&self.workflow, code).await
    }

    /// Submit the manifest to the host and close its session
    pub async fn submit_manifest(&self, name: &str) -> Result<SubmittedManifest, AppError> {
        let submitter = self
            .submitter
            .as_ref()
            .ok_or_else(|| AppError::Internal(anyhow!("Manifest submission is not configured")))?;
        let session = self.session(name)?;
        let submitted = session.submit(submitter).await?;
        self.store.close(&submitted.name);
        Ok(submitted)
    }

    fn session(&self, name: &str) -> Result<Arc<ManifestSession>, AppError> {
        let name = normalize_name(name)?;
        self.store.get(name).ok_or_else(|| not_open(name))
    }
}

fn normalize_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Manifest name is required".to_string()));
    }
    Ok(name)
}

fn not_open(name: &str) -> AppError {
    AppError::NotFound(format!("Manifest {} is not open", name))
}
