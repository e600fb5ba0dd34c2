use poem_openapi::{param::Path, payload::Json, ApiResponse, Object, OpenApi};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::business::{
    ManifestService, ManifestSnapshot, Notification, ScanOutcome, ScanState, SubmittedManifest,
};
use crate::domain::{Manifest, ManifestItem};

pub struct ManifestsApi {
    service: Arc<ManifestService>,
}

impl ManifestsApi {
    pub fn new(service: Arc<ManifestService>) -> Self {
        Self { service }
    }
}

/// Manifest document state sent when a manifest form is opened
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct OpenManifestRequest {
    pub service_provider: String,
    pub pickup_id: Option<String>,
    #[serde(default)]
    #[oai(default)]
    pub manifest_items: Vec<ManifestItem>,
}

impl From<OpenManifestRequest> for ManifestSnapshot {
    fn from(req: OpenManifestRequest) -> Self {
        Self {
            service_provider: req.service_provider,
            pickup_id: req.pickup_id,
            manifest_items: req.manifest_items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ScanRequest {
    pub scan_barcode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ScanResponse {
    pub scan_id: String,
    pub outcome: ScanOutcome,
    pub notification: Option<Notification>,
    pub manifest: Manifest,
    /// Whether the items table changed and must be redrawn
    pub refresh: bool,
    pub path: Vec<ScanState>,
}

#[derive(ApiResponse)]
pub enum ManifestResponse {
    #[oai(status = 200)]
    Ok(Json<Manifest>),
}

#[derive(ApiResponse)]
pub enum CloseManifestResponse {
    #[oai(status = 204)]
    Closed,
}

#[derive(ApiResponse)]
pub enum ScanResultResponse {
    #[oai(status = 200)]
    Ok(Json<ScanResponse>),
}

#[derive(ApiResponse)]
pub enum SubmitManifestResponse {
    #[oai(status = 200)]
    Ok(Json<SubmittedManifest>),
}

#[OpenApi]
impl ManifestsApi {
    /// Open or replace a manifest session
    #[oai(path = "/manifests/:name", method = "put")]
    async fn open_manifest(
        &self,
        name: Path<String>,
        body: Json<OpenManifestRequest>,
    ) -> Result<ManifestResponse, poem::Error> {
        let manifest = self.service.open_manifest(&name.0, body.0.into())?;
        Ok(ManifestResponse::Ok(Json(manifest)))
    }

    #[oai(path = "/manifests/:name", method = "get")]
    async fn get_manifest(&self, name: Path<String>) -> Result<ManifestResponse, poem::Error> {
        let manifest = self.service.get_manifest(&name.0).await?;
        Ok(ManifestResponse::Ok(Json(manifest)))
    }

    #[oai(path = "/manifests/:name", method = "delete")]
    async fn close_manifest(
        &self,
        name: Path<String>,
    ) -> Result<CloseManifestResponse, poem::Error> {
        self.service.close_manifest(&name.0)?;
        Ok(CloseManifestResponse::Closed)
    }

    /// Handle a scanned barcode for the manifest
    #[oai(path = "/manifests/:name/scan", method = "post")]
    async fn scan(
        &self,
        name: Path<String>,
        body: Json<ScanRequest>,
    ) -> Result<ScanResultResponse, poem::Error> {
        let report = self.service.scan(&name.0, &body.0.scan_barcode).await?;
        let refresh = report.result.refresh_items();

        Ok(ScanResultResponse::Ok(Json(ScanResponse {
            scan_id: report.result.scan_id,
            outcome: report.result.outcome,
            notification: report.result.notification,
            manifest: report.manifest,
            refresh,
            path: report.result.path,
        })))
    }

    /// Submit the manifest to the host and close the session
    #[oai(path = "/manifests/:name/submit", method = "post")]
    async fn submit(&self, name: Path<String>) -> Result<SubmitManifestResponse, poem::Error> {
        let submitted = self.service.submit_manifest(&name.0).await?;
        Ok(SubmitManifestResponse::Ok(Json(submitted)))
    }
}
