use crate::domain::{Manifest, Shipment};
use crate::frappe::FrappeError;
use async_trait::async_trait;

/// Remote lookups the scan workflow depends on
#[async_trait]
pub trait ShipmentDirectory: Send + Sync {
    /// Resolve a scanned AWB number to at most one shipment of the given provider
    async fn find_shipment(
        &self,
        awb_number: &str,
        service_provider: &str,
    ) -> Result<Option<Shipment>, FrappeError>;

    /// Fetch the carrier pickup location id of a booked shipment
    async fn fetch_pickup_id(
        &self,
        shipment_id: &str,
        service_provider: &str,
    ) -> Result<String, FrappeError>;
}

/// Host operations used when a manifest is submitted
#[async_trait]
pub trait ManifestPublisher: Send + Sync {
    /// Save the manifest's items and submit the document
    async fn submit_manifest(&self, manifest: &Manifest) -> Result<(), FrappeError>;

    /// URL of the newest file attached to a manifest, if any
    async fn find_manifest_file(&self, manifest_name: &str) -> Result<Option<String>, FrappeError>;
}
