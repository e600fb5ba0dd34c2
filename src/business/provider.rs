use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub const SHIPROCKET_PROVIDER: &str = "Shiprocket";
pub const LETMESHIP_PROVIDER: &str = "LetMeShip";
pub const PACKLINK_PROVIDER: &str = "Packlink";
pub const SENDCLOUD_PROVIDER: &str = "SendCloud";
pub const DUNZO_PROVIDER: &str = "Dunzo";

/// Capabilities of a carrier integration that affect manifest scanning
pub trait CarrierProfile: Send + Sync {
    /// Provider name as stored in `service_provider`
    fn provider(&self) -> &str;

    /// Whether every package on a manifest must share one pickup location
    fn requires_pickup_reconciliation(&self) -> bool {
        false
    }

    /// Whether submitting a manifest books a carrier manifest document
    fn generates_carrier_manifest(&self) -> bool {
        false
    }
}

/// Shiprocket books pickups per location, so a manifest is bound to one pickup id
pub struct Shiprocket;

impl CarrierProfile for Shiprocket {
    fn provider(&self) -> &str {
        SHIPROCKET_PROVIDER
    }

    fn requires_pickup_reconciliation(&self) -> bool {
        true
    }

    fn generates_carrier_manifest(&self) -> bool {
        true
    }
}

/// Integration with no scan-time checks beyond the shipment lookup
pub struct BasicCarrier {
    provider: String,
}

impl BasicCarrier {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }
}

impl CarrierProfile for BasicCarrier {
    fn provider(&self) -> &str {
        &self.provider
    }
}

/// Registry of carrier profiles keyed by provider name
pub struct ProviderRegistry {
    profiles: HashMap<String, Arc<dyn CarrierProfile>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Register a carrier profile, replacing any previous one for the provider
    pub fn register(&mut self, profile: Arc<dyn CarrierProfile>) {
        let provider = profile.provider().to_string();
        debug!("Registering carrier profile for provider: {}", provider);
        self.profiles.insert(provider, profile);
    }

    pub fn get(&self, provider: &str) -> Option<Arc<dyn CarrierProfile>> {
        self.profiles.get(provider).cloned()
    }

    /// Unknown providers get no extra validation
    pub fn requires_pickup_reconciliation(&self, provider: &str) -> bool {
        self.profiles
            .get(provider)
            .map(|p| p.requires_pickup_reconciliation())
            .unwrap_or(false)
    }

    pub fn generates_carrier_manifest(&self, provider: &str) -> bool {
        self.profiles
            .get(provider)
            .map(|p| p.generates_carrier_manifest())
            .unwrap_or(false)
    }

    pub fn registered_providers(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }
}

impl Default for ProviderRegistry {
    /// Registry with the shipping integrations known to the host app
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Shiprocket));
        for provider in [
            LETMESHIP_PROVIDER,
            PACKLINK_PROVIDER,
            SENDCLOUD_PROVIDER,
            DUNZO_PROVIDER,
        ] {
            registry.register(Arc::new(BasicCarrier::new(provider)));
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contents() {
        let registry = ProviderRegistry::default();
        let mut providers = registry.registered_providers();
        providers.sort();
        assert_eq!(
            providers,
            vec!["Dunzo", "LetMeShip", "Packlink", "SendCloud", "Shiprocket"]
        );
    }

    #[test]
    fn test_only_shiprocket_requires_reconciliation() {
        let registry = ProviderRegistry::default();
        assert!(registry.requires_pickup_reconciliation(SHIPROCKET_PROVIDER));
        assert!(!registry.requires_pickup_reconciliation(DUNZO_PROVIDER));
        assert!(!registry.requires_pickup_reconciliation(SENDCLOUD_PROVIDER));
    }

    #[test]
    fn test_only_shiprocket_generates_carrier_manifest() {
        let registry = ProviderRegistry::default();
        assert!(registry.generates_carrier_manifest(SHIPROCKET_PROVIDER));
        assert!(!registry.generates_carrier_manifest(PACKLINK_PROVIDER));
        assert!(!registry.generates_carrier_manifest("Delhivery"));
    }

    #[test]
    fn test_unknown_provider_needs_no_reconciliation() {
        let registry = ProviderRegistry::default();
        assert!(registry.get("Delhivery").is_none());
        assert!(!registry.requires_pickup_reconciliation("Delhivery"));
        // Lookup is exact, like the stored provider name
        assert!(!registry.requires_pickup_reconciliation("shiprocket"));
    }

    #[test]
    fn test_register_new_provider() {
        struct PickupBound;
        impl CarrierProfile for PickupBound {
            fn provider(&self) -> &str {
                "Delhivery"
            }
            fn requires_pickup_reconciliation(&self) -> bool {
                true
            }
        }

        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(PickupBound));
        assert!(registry.requires_pickup_reconciliation("Delhivery"));
        assert_eq!(registry.get("Delhivery").unwrap().provider(), "Delhivery");
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = ProviderRegistry::default();
        registry.register(Arc::new(BasicCarrier::new(SHIPROCKET_PROVIDER)));
        assert!(!registry.requires_pickup_reconciliation(SHIPROCKET_PROVIDER));
    }
}
