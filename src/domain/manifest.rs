use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// A line item in a manifest's child table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Object)]
pub struct ManifestItem {
    /// Name of the Shipment document
    pub shipment: String,
    pub awb_number: String,
    /// Carrier-side shipment identifier, unset until the shipment is booked
    pub shipment_id: Option<String>,
}

/// Shipment record as returned by the host's list query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Object)]
pub struct Shipment {
    pub name: String,
    pub awb_number: String,
    /// Frappe sends `null` for an unset Data field
    #[serde(default)]
    pub shipment_id: Option<String>,
}

impl Shipment {
    /// Carrier shipment id, treating an empty value as unset
    pub fn carrier_shipment_id(&self) -> Option<&str> {
        self.shipment_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl From<Shipment> for ManifestItem {
    fn from(shipment: Shipment) -> Self {
        let shipment_id = shipment.carrier_shipment_id().map(str::to_string);
        Self {
            shipment: shipment.name,
            awb_number: shipment.awb_number,
            shipment_id,
        }
    }
}

/// Shipment Manifest document state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Object)]
pub struct Manifest {
    pub name: String,
    pub service_provider: String,
    #[serde(default)]
    pub pickup_id: Option<String>,
    #[serde(default)]
    #[oai(default)]
    pub scan_barcode: String,
    #[serde(default)]
    #[oai(default)]
    pub manifest_items: Vec<ManifestItem>,
}

impl Manifest {
    pub fn new(name: impl Into<String>, service_provider: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service_provider: service_provider.into(),
            pickup_id: None,
            scan_barcode: String::new(),
            manifest_items: Vec::new(),
        }
    }

    /// Whether a package with this AWB number is already on the manifest
    pub fn contains_awb(&self, awb_number: &str) -> bool {
        self.manifest_items.iter().any(|item| item.awb_number == awb_number)
    }

    /// Pickup id, treating an empty value as unset
    pub fn current_pickup_id(&self) -> Option<&str> {
        self.pickup_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Carrier shipment ids in scan order, skipping items without one
    pub fn shipment_ids(&self) -> Vec<String> {
        self.manifest_items
            .iter()
            .filter_map(|item| item.shipment_id.as_deref())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// AWB numbers of items that have no carrier shipment id
    pub fn items_without_shipment_id(&self) -> Vec<&str> {
        self.manifest_items
            .iter()
            .filter(|item| item.shipment_id.as_deref().map_or(true, str::is_empty))
            .map(|item| item.awb_number.as_str())
            .collect()
    }
}
