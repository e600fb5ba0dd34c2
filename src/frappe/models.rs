use crate::domain::{Manifest, ManifestItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GET_LIST_METHOD: &str = "frappe.client.get_list";
pub const SHIPMENT_MANIFEST_DOCTYPE: &str = "Shipment Manifest";
pub const SHIPMENT_DETAILS_METHOD: &str =
    "erpnext_shipping.erpnext_shipping.shipping.get_shipment_details";

/// Envelope of every `/api/method/...` response
#[derive(Debug, Clone, Deserialize)]
pub struct MethodResponse<T> {
    pub message: Option<T>,
}

/// Envelope of `/api/resource/...` responses
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceResponse<T> {
    pub data: Option<T>,
}

/// Arguments for `frappe.client.get_list`
#[derive(Debug, Clone, Serialize)]
pub struct ListQuery {
    pub doctype: String,
    pub filters: serde_json::Map<String, Value>,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    pub limit_page_length: u32,
}

impl ListQuery {
    pub fn new(doctype: impl Into<String>) -> Self {
        Self {
            doctype: doctype.into(),
            filters: serde_json::Map::new(),
            fields: vec!["name".to_string()],
            order_by: None,
            limit_page_length: 20,
        }
    }

    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.insert(field.to_string(), value.into());
        self
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit_page_length = limit;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipmentDetailsArgs<'a> {
    pub shipment_id: &'a str,
    pub service_provider: &'a str,
}

/// Manifest update that submits the document; the host builds the carrier
/// manifest in its submit hook
#[derive(Debug, Clone, Serialize)]
pub struct ManifestSubmission<'a> {
    pub service_provider: &'a str,
    pub pickup_id: Option<&'a str>,
    pub manifest_items: &'a [ManifestItem],
    pub docstatus: u8,
}

impl<'a> From<&'a Manifest> for ManifestSubmission<'a> {
    fn from(manifest: &'a Manifest) -> Self {
        Self {
            service_provider: &manifest.service_provider,
            pickup_id: manifest.current_pickup_id(),
            manifest_items: &manifest.manifest_items,
            docstatus: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileRecord {
    #[serde(default)]
    pub file_url: Option<String>,
}

/// Carrier order details; only the pickup id is consumed
#[derive(Debug, Clone, Deserialize)]
pub struct ShipmentDetails {
    #[serde(default)]
    pub data: Option<ShipmentDetailsData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShipmentDetailsData {
    #[serde(default)]
    pub pickup_id: Option<Value>,
}

impl ShipmentDetails {
    /// Pickup id as a string; carriers return it as a string or a number
    pub fn pickup_id(&self) -> Option<String> {
        let value = self.data.as_ref()?.pickup_id.as_ref()?;
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
