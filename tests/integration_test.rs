// End-to-end scan flow through the public library API, with the Frappe
// client talking to a mock Frappe site.

use serde_json::json;
use std::sync::Arc;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use shipgate::business::{
    Indicator, ManifestService, ManifestSnapshot, ManifestStore, ManifestSubmitter,
    NotificationKind, ProviderRegistry, ScanOutcome, ScanWorkflow,
};
use shipgate::config::{Config, LogFormat};
use shipgate::domain::ManifestItem;
use shipgate::frappe::FrappeClient;

const GET_LIST_PATH: &str = "/api/method/frappe.client.get_list";
const SHIPMENT_DETAILS_PATH: &str =
    "/api/method/erpnext_shipping.erpnext_shipping.shipping.get_shipment_details";

fn manifest_service(frappe_url: String) -> ManifestService {
    let config = Config {
        port: 8080,
        frappe_url,
        frappe_api_key: "api-key".to_string(),
        frappe_api_secret: "api-secret".to_string(),
        frappe_timeout_secs: 5,
        default_currency: "INR".to_string(),
        log_format: LogFormat::Text,
    };
    let client = Arc::new(FrappeClient::new(&config).unwrap());
    let providers = Arc::new(ProviderRegistry::default());
    let workflow = Arc::new(ScanWorkflow::new(client.clone(), providers.clone()));
    let submitter = Arc::new(ManifestSubmitter::new(client, providers));
    ManifestService::new(Arc::new(ManifestStore::new()), workflow).with_submitter(submitter)
}

async fn mount_shipment(server: &MockServer, awb: &str, shipment_id: &str) {
    Mock::given(method("POST"))
        .and(path(GET_LIST_PATH))
        .and(header("Authorization", "token api-key:api-secret"))
        .and(body_partial_json(json!({
            "doctype": "Shipment",
            "filters": {"awb_number": awb}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": [{
                "name": format!("SHP-{}", awb),
                "awb_number": awb,
                "shipment_id": shipment_id
            }]
        })))
        .mount(server)
        .await;
}

async fn mount_pickup(server: &MockServer, shipment_id: &str, pickup_id: &str) {
    Mock::given(method("POST"))
        .and(path(SHIPMENT_DETAILS_PATH))
        .and(body_partial_json(json!({"shipment_id": shipment_id})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"data": {"pickup_id": pickup_id}}
        })))
        .mount(server)
        .await;
}

fn shiprocket_snapshot() -> ManifestSnapshot {
    ManifestSnapshot {
        service_provider: "Shiprocket".to_string(),
        pickup_id: None,
        manifest_items: vec![],
    }
}

#[tokio::test]
async fn test_scan_appends_and_rejects_duplicate() {
    let server = MockServer::start().await;
    mount_shipment(&server, "AWB100", "SR-5").await;
    mount_pickup(&server, "SR-5", "PK-9").await;

    let service = manifest_service(server.uri());
    service
        .open_manifest("MAN-0001", shiprocket_snapshot())
        .unwrap();

    let report = service.scan("MAN-0001", "AWB100").await.unwrap();
    assert_eq!(report.result.outcome, ScanOutcome::Appended);
    assert!(report.result.notification.is_none());
    assert!(report.result.refresh_items());
    assert_eq!(report.manifest.pickup_id.as_deref(), Some("PK-9"));
    assert_eq!(
        report.manifest.manifest_items,
        vec![ManifestItem {
            shipment: "SHP-AWB100".to_string(),
            awb_number: "AWB100".to_string(),
            shipment_id: Some("SR-5".to_string()),
        }]
    );
    assert_eq!(report.manifest.scan_barcode, "");

    let requests_before = server.received_requests().await.unwrap().len();

    let report = service.scan("MAN-0001", "AWB100").await.unwrap();
    assert_eq!(report.result.outcome, ScanOutcome::Duplicate);
    let notification = report.result.notification.unwrap();
    assert_eq!(notification.kind, NotificationKind::Alert);
    assert_eq!(notification.indicator, Indicator::Red);
    assert_eq!(notification.message, "Package already added in this manifest");
    assert_eq!(report.manifest.manifest_items.len(), 1);

    // Duplicates are rejected before any remote call
    assert_eq!(
        server.received_requests().await.unwrap().len(),
        requests_before
    );
}

#[tokio::test]
async fn test_scan_rejects_different_pickup() {
    let server = MockServer::start().await;
    mount_shipment(&server, "AWB100", "SR-5").await;
    mount_pickup(&server, "SR-5", "PK-9").await;
    mount_shipment(&server, "AWB200", "SR-6").await;
    mount_pickup(&server, "SR-6", "PK-2").await;

    let service = manifest_service(server.uri());
    service
        .open_manifest("MAN-0002", shiprocket_snapshot())
        .unwrap();

    let first = service.scan("MAN-0002", "AWB100").await.unwrap();
    assert_eq!(first.result.outcome, ScanOutcome::Appended);

    let second = service.scan("MAN-0002", "AWB200").await.unwrap();
    assert_eq!(second.result.outcome, ScanOutcome::PickupMismatch);
    let notification = second.result.notification.unwrap();
    assert_eq!(notification.kind, NotificationKind::Message);
    assert_eq!(notification.indicator, Indicator::Red);
    assert_eq!(second.manifest.manifest_items.len(), 1);
    assert_eq!(second.manifest.pickup_id.as_deref(), Some("PK-9"));
    assert_eq!(second.manifest.scan_barcode, "");
}

#[tokio::test]
async fn test_scan_unknown_awb() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GET_LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": []})))
        .mount(&server)
        .await;

    let service = manifest_service(server.uri());
    service
        .open_manifest("MAN-0003", shiprocket_snapshot())
        .unwrap();

    let report = service.scan("MAN-0003", "AWB999").await.unwrap();
    assert_eq!(report.result.outcome, ScanOutcome::NotFound);
    let notification = report.result.notification.unwrap();
    assert_eq!(notification.indicator, Indicator::Orange);
    assert_eq!(notification.message, "AWB number not found in Shipment doctype.");
    assert!(report.manifest.manifest_items.is_empty());
    assert!(report.manifest.pickup_id.is_none());
}

#[tokio::test]
async fn test_non_reconciling_provider_skips_pickup_lookup() {
    let server = MockServer::start().await;
    mount_shipment(&server, "AWB300", "PL-1").await;
    Mock::given(method("POST"))
        .and(path(SHIPMENT_DETAILS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let service = manifest_service(server.uri());
    service
        .open_manifest(
            "MAN-0004",
            ManifestSnapshot {
                service_provider: "Packlink".to_string(),
                pickup_id: None,
                manifest_items: vec![],
            },
        )
        .unwrap();

    let report = service.scan("MAN-0004", "AWB300").await.unwrap();
    assert_eq!(report.result.outcome, ScanOutcome::Appended);
    assert!(report.manifest.pickup_id.is_none());
    assert_eq!(report.manifest.shipment_ids(), vec!["PL-1"]);
}

#[tokio::test]
async fn test_scan_unavailable_frappe_reports_lookup_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GET_LIST_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let service = manifest_service(server.uri());
    service
        .open_manifest("MAN-0005", shiprocket_snapshot())
        .unwrap();

    let report = service.scan("MAN-0005", "AWB100").await.unwrap();
    assert_eq!(report.result.outcome, ScanOutcome::LookupFailed);
    assert_eq!(
        report.result.notification.unwrap().indicator,
        Indicator::Red
    );
    assert!(report.manifest.manifest_items.is_empty());
}

#[tokio::test]
async fn test_scan_appends_shipment_with_null_shipment_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GET_LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": [{"name": "SHP-02", "awb_number": "AWB200", "shipment_id": null}]
        })))
        .mount(&server)
        .await;

    let service = manifest_service(server.uri());
    service
        .open_manifest(
            "MAN-0006",
            ManifestSnapshot {
                service_provider: "Dunzo".to_string(),
                pickup_id: None,
                manifest_items: vec![],
            },
        )
        .unwrap();

    let report = service.scan("MAN-0006", "AWB200").await.unwrap();
    assert_eq!(report.result.outcome, ScanOutcome::Appended);
    assert!(report.result.notification.is_none());
    assert_eq!(
        report.manifest.manifest_items,
        vec![ManifestItem {
            shipment: "SHP-02".to_string(),
            awb_number: "AWB200".to_string(),
            shipment_id: None,
        }]
    );
}

#[tokio::test]
async fn test_scan_then_submit_manifest() {
    let server = MockServer::start().await;
    mount_shipment(&server, "AWB100", "SR-5").await;
    mount_pickup(&server, "SR-5", "PK-9").await;
    Mock::given(method("PUT"))
        .and(path("/api/resource/Shipment%20Manifest/MAN-0007"))
        .and(body_partial_json(json!({
            "pickup_id": "PK-9",
            "docstatus": 1,
            "manifest_items": [{"awb_number": "AWB100", "shipment_id": "SR-5"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"name": "MAN-0007", "docstatus": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GET_LIST_PATH))
        .and(body_partial_json(json!({"doctype": "File"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": [{"file_url": "/private/files/MAN-0007-manifest.pdf"}]
        })))
        .mount(&server)
        .await;

    let service = manifest_service(server.uri());
    service
        .open_manifest("MAN-0007", shiprocket_snapshot())
        .unwrap();
    let report = service.scan("MAN-0007", "AWB100").await.unwrap();
    assert_eq!(report.result.outcome, ScanOutcome::Appended);

    let submitted = service.submit_manifest("MAN-0007").await.unwrap();
    assert_eq!(submitted.shipment_ids, vec!["SR-5"]);
    assert_eq!(
        submitted.manifest_url.as_deref(),
        Some("/private/files/MAN-0007-manifest.pdf")
    );
    assert!(service.get_manifest("MAN-0007").await.is_err());
}
