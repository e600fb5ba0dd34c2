use std::sync::Arc;

use poem::listener::TcpListener;
use poem_openapi::OpenApiService;

use shipgate::api::{HealthApi, ManifestsApi, ServicesApi};
use shipgate::business::{
    ManifestService, ManifestStore, ManifestSubmitter, ProviderRegistry, ScanWorkflow,
};
use shipgate::config::Config;
use shipgate::frappe::FrappeClient;
use shipgate::logging::init;
use shipgate::selector::ComparisonRenderer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    init(config.log_format);

    // Initialize Frappe client
    let frappe_client = Arc::new(
        FrappeClient::new(&config)
            .map_err(|e| format!("Failed to create Frappe client: {}", e))?,
    );

    // Initialize scan workflow
    let providers = Arc::new(ProviderRegistry::default());
    let workflow = Arc::new(ScanWorkflow::new(frappe_client.clone(), providers.clone()));
    let submitter = Arc::new(ManifestSubmitter::new(frappe_client, providers.clone()));

    // Initialize manifest service
    let store = Arc::new(ManifestStore::new());
    let manifest_service = Arc::new(
        ManifestService::new(store.clone(), workflow).with_submitter(submitter),
    );

    let renderer = Arc::new(ComparisonRenderer::new(config.default_currency.clone()));

    // Initialize APIs
    let health_api = HealthApi::new(store, providers);
    let manifests_api = ManifestsApi::new(manifest_service);
    let services_api = ServicesApi::new(renderer);

    let api_service = OpenApiService::new(
        (health_api, manifests_api, services_api),
        "ShipGate API",
        "1.0",
    )
    .server(format!("http://localhost:{}", config.port));

    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();

    let app = poem::Route::new()
        .nest("/", api_service)
        .nest("/docs", ui)
        .nest("/spec", spec);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        "Starting ShipGate server on {} (Frappe at {})",
        addr,
        config.frappe_url
    );

    poem::Server::new(TcpListener::bind(&addr))
        .run(app)
        .await?;

    Ok(())
}
