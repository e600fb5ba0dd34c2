use crate::business::scan::{ScanWorkflow, WorkflowResult};
use crate::business::submit::{ManifestSubmitter, SubmittedManifest};
use crate::domain::Manifest;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

/// An open manifest being scanned into.
///
/// Scans run one at a time: a scan arriving while another is in flight waits
/// for it and then sees the manifest that scan left behind. Submission takes
/// the same lock, so no scan lands on a submitted manifest.
pub struct ManifestSession {
    state: Mutex<SessionState>,
}

struct SessionState {
    manifest: Manifest,
    submitted: bool,
}

/// A scan result together with the manifest after applying it
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub result: WorkflowResult,
    pub manifest: Manifest,
}

impl ManifestSession {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            state: Mutex::new(SessionState {
                manifest,
                submitted: false,
            }),
        }
    }

    pub async fn snapshot(&self) -> Manifest {
        self.state.lock().await.manifest.clone()
    }

    /// Run the scan workflow for `code` and apply its outcome
    pub async fn scan(&self, workflow: &ScanWorkflow, code: &str) -> Result<ScanReport, AppError> {
        let mut state = self.state.lock().await;
        if state.submitted {
            return Err(already_submitted(&state.manifest));
        }
        let manifest = &mut state.manifest;
        manifest.scan_barcode = code.to_string();

        let result = workflow.on_scan_code_changed(manifest, code).await;
        result.apply(manifest);

        Ok(ScanReport {
            result,
            manifest: manifest.clone(),
        })
    }

    /// Submit the manifest; later scans and submissions are refused
    pub async fn submit(&self, submitter: &ManifestSubmitter) -> Result<SubmittedManifest, AppError> {
        let mut state = self.state.lock().await;
        if state.submitted {
            return Err(already_submitted(&state.manifest));
        }
        let submitted = submitter.submit(&state.manifest).await?;
        state.submitted = true;
        Ok(submitted)
    }
}

fn already_submitted(manifest: &Manifest) -> AppError {
    AppError::Conflict(format!("Manifest {} is already submitted", manifest.name))
}

/// Open manifest sessions keyed by manifest name
pub struct ManifestStore {
    sessions: RwLock<HashMap<String, Arc<ManifestSession>>>,
}

impl Default for ManifestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session, replacing any previous session of the same manifest
    pub fn open(&self, manifest: Manifest) -> Arc<ManifestSession> {
        let name = manifest.name.clone();
        let session = Arc::new(ManifestSession::new(manifest));
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.insert(name, Arc::clone(&session));
        session
    }

    pub fn get(&self, name: &str) -> Option<Arc<ManifestSession>> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(name).cloned()
    }

    /// Close a session; returns false if none was open
    pub fn close(&self, name: &str) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.remove(name).is_some()
    }

    pub fn open_manifests(&self) -> Vec<String> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.keys().cloned().collect()
    }
}
