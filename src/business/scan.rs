use crate::business::directory::ShipmentDirectory;
use crate::business::provider::ProviderRegistry;
use crate::business::validation::{ensure_not_scanned, normalize_scan_code, reconcile_pickup};
use crate::business::workflow::{ScanRun, ScanState};
use crate::domain::{Manifest, ManifestItem};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

pub const NOT_FOUND_MESSAGE: &str = "AWB number not found in Shipment doctype.";
pub const LOOKUP_FAILED_MESSAGE: &str = "Error: Unable to look up the shipment for this AWB number.";
pub const PICKUP_FETCH_FAILED_MESSAGE: &str = "Error: Unable to fetch shipment details from the API.";

/// How a scan event ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
#[oai(rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Empty input, nothing happened
    Ignored,
    Duplicate,
    NotFound,
    /// Shipment lookup failed in transport
    LookupFailed,
    PickupMismatch,
    PickupLookupFailed,
    Appended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "lowercase")]
#[oai(rename_all = "lowercase")]
pub enum Indicator {
    Red,
    Orange,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "lowercase")]
#[oai(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Transient toast
    Alert,
    /// Modal message dialog
    Message,
}

/// User-facing notification produced by a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Object)]
pub struct Notification {
    pub kind: NotificationKind,
    pub indicator: Indicator,
    pub message: String,
}

impl Notification {
    pub fn alert(message: impl Into<String>, indicator: Indicator) -> Self {
        Self {
            kind: NotificationKind::Alert,
            indicator,
            message: message.into(),
        }
    }

    pub fn message(message: impl Into<String>, indicator: Indicator) -> Self {
        Self {
            kind: NotificationKind::Message,
            indicator,
            message: message.into(),
        }
    }
}

/// Changes a scan makes to the manifest, besides clearing the input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Object)]
pub struct ManifestMutation {
    pub append: Option<ManifestItem>,
    pub pickup_id: Option<String>,
}

/// Result of one scan event
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct WorkflowResult {
    pub scan_id: String,
    pub outcome: ScanOutcome,
    pub mutation: ManifestMutation,
    pub notification: Option<Notification>,
    pub path: Vec<ScanState>,
}

impl WorkflowResult {
    fn finish(
        run: ScanRun,
        outcome: ScanOutcome,
        mutation: ManifestMutation,
        notification: Option<Notification>,
    ) -> Self {
        let scan_id = run.scan_id;
        Self {
            scan_id: scan_id.to_string(),
            outcome,
            mutation,
            notification,
            path: run.finish(),
        }
    }

    /// Whether the manifest items table must be redrawn
    pub fn refresh_items(&self) -> bool {
        self.mutation.append.is_some()
    }

    /// Apply the mutation to a manifest. The scan input is always cleared.
    pub fn apply(&self, manifest: &mut Manifest) {
        if let Some(ref pickup_id) = self.mutation.pickup_id {
            manifest.pickup_id = Some(pickup_id.clone());
        }
        if let Some(ref item) = self.mutation.append {
            manifest.manifest_items.push(item.clone());
        }
        manifest.scan_barcode.clear();
    }
}

/// Scan-to-manifest workflow
pub struct ScanWorkflow {
    directory: Arc<dyn ShipmentDirectory>,
    providers: Arc<ProviderRegistry>,
}

impl ScanWorkflow {
    pub fn new(directory: Arc<dyn ShipmentDirectory>, providers: Arc<ProviderRegistry>) -> Self {
        Self {
            directory,
            providers,
        }
    }

    /// Handle a change of the scan input against the current manifest state:
    /// 1. Ignore empty input
    /// 2. Reject codes already on the manifest, before any remote call
    /// 3. Resolve the shipment for the manifest's provider
    /// 4. Reconcile the pickup id when the provider requires it
    /// 5. Append the line item
    pub async fn on_scan_code_changed(&self, manifest: &Manifest, raw_code: &str) -> WorkflowResult {
        let mut run = ScanRun::new();
        let span = info_span!(
            "scan",
            scan_id = %run.scan_id,
            manifest = %manifest.name,
            awb_number = %raw_code.trim(),
        );

        async move {
            let code = match normalize_scan_code(raw_code) {
                Ok(code) => code,
                Err(_) => {
                    debug!("Ignoring empty scan");
                    return WorkflowResult::finish(
                        run,
                        ScanOutcome::Ignored,
                        ManifestMutation::default(),
                        None,
                    );
                }
            };
            run.advance(ScanState::Guarded);

            if let Err(e) = ensure_not_scanned(manifest, code) {
                warn!("Rejecting duplicate scan");
                run.advance(ScanState::Rejected);
                return WorkflowResult::finish(
                    run,
                    ScanOutcome::Duplicate,
                    ManifestMutation::default(),
                    Some(Notification::alert(e.to_string(), Indicator::Red)),
                );
            }
            run.advance(ScanState::DuplicateChecked);

            let provider = manifest.service_provider.as_str();
            run.advance(ScanState::ShipmentResolving);
            debug!("Looking up shipment for provider {}", provider);
            let shipment = match self.directory.find_shipment(code, provider).await {
                Ok(Some(shipment)) => shipment,
                Ok(None) => {
                    info!("No shipment matches the scanned code");
                    run.advance(ScanState::NotFound);
                    return WorkflowResult::finish(
                        run,
                        ScanOutcome::NotFound,
                        ManifestMutation::default(),
                        Some(Notification::message(NOT_FOUND_MESSAGE, Indicator::Orange)),
                    );
                }
                Err(e) => {
                    error!("Shipment lookup failed: {}", e);
                    run.advance(ScanState::Rejected);
                    return WorkflowResult::finish(
                        run,
                        ScanOutcome::LookupFailed,
                        ManifestMutation::default(),
                        Some(Notification::message(LOOKUP_FAILED_MESSAGE, Indicator::Red)),
                    );
                }
            };
            run.advance(ScanState::Resolved);

            let mut mutation = ManifestMutation::default();
            if self.providers.requires_pickup_reconciliation(provider) {
                run.advance(ScanState::PickupValidating);
                let fetched = match shipment.carrier_shipment_id() {
                    Some(shipment_id) => self
                        .directory
                        .fetch_pickup_id(shipment_id, provider)
                        .await
                        .map_err(|e| format!("Pickup id lookup for {} failed: {}", shipment_id, e)),
                    None => Err(format!("Shipment {} has no carrier shipment id", shipment.name)),
                };
                let fetched = match fetched {
                    Ok(pickup_id) => pickup_id,
                    Err(e) => {
                        error!("{}", e);
                        run.advance(ScanState::Rejected);
                        return WorkflowResult::finish(
                            run,
                            ScanOutcome::PickupLookupFailed,
                            ManifestMutation::default(),
                            Some(Notification::message(PICKUP_FETCH_FAILED_MESSAGE, Indicator::Red)),
                        );
                    }
                };

                match reconcile_pickup(manifest.current_pickup_id(), &fetched) {
                    Ok(pickup_id) => mutation.pickup_id = Some(pickup_id),
                    Err(e) => {
                        warn!("Rejecting scan: {:?}", e);
                        run.advance(ScanState::Rejected);
                        return WorkflowResult::finish(
                            run,
                            ScanOutcome::PickupMismatch,
                            ManifestMutation::default(),
                            Some(Notification::message(e.to_string(), Indicator::Red)),
                        );
                    }
                }
            }
            run.advance(ScanState::Accepted);

            info!("Adding shipment {} to manifest", shipment.name);
            mutation.append = Some(ManifestItem::from(shipment));
            run.advance(ScanState::Appended);

            WorkflowResult::finish(run, ScanOutcome::Appended, mutation, None)
        }
        .instrument(span)
        .await
    }
}
