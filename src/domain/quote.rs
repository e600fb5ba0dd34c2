use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// A carrier price quote offered in the service selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Object)]
pub struct ServiceQuote {
    pub service_provider: String,
    pub carrier: String,
    pub service_name: String,
    pub total_price: f64,
    /// ISO currency code of `total_price`; the configured default applies when absent
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    #[oai(default)]
    pub is_preferred: bool,
}
