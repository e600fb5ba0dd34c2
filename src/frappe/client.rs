use crate::business::directory::{ManifestPublisher, ShipmentDirectory};
use crate::config::Config;
use crate::domain::{Manifest, Shipment};
use crate::frappe::error::FrappeError;
use crate::frappe::models::*;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;
use tracing::{debug, error, info};

/// Client for whitelisted methods of a Frappe site
pub struct FrappeClient {
    base_url: String,
    client: reqwest::Client,
}

impl FrappeClient {
    /// Create a new client authenticated with an API key pair
    pub fn new(config: &Config) -> Result<Self, FrappeError> {
        let base_url = config.frappe_url.trim_end_matches('/').to_string();

        if config.frappe_api_key.is_empty() || config.frappe_api_secret.is_empty() {
            return Err(FrappeError::AuthenticationError(
                "Frappe API key and secret are required".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let auth_value = format!(
            "token {}:{}",
            config.frappe_api_key, config.frappe_api_secret
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).map_err(|e| {
                FrappeError::AuthenticationError(format!("Invalid token format: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.frappe_timeout_secs))
            .build()
            .map_err(FrappeError::NetworkError)?;

        Ok(Self { base_url, client })
    }

    fn method_url(&self, method: &str) -> Result<String, FrappeError> {
        if method.is_empty() || method.contains('/') {
            return Err(FrappeError::InvalidUrl(format!(
                "Invalid method name: {:?}",
                method
            )));
        }
        let mut url = self.base_url.clone();
        write!(url, "/api/method/{}", method)
            .map_err(|e| FrappeError::InvalidUrl(format!("Failed to build URL: {}", e)))?;
        Ok(url)
    }

    fn resource_url(&self, doctype: &str, name: &str) -> Result<reqwest::Url, FrappeError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| FrappeError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FrappeError::InvalidUrl(format!("Cannot be a base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "resource", doctype, name]);
        Ok(url)
    }

    /// Update fields of an existing document through the REST resource API
    pub async fn update_doc<B: Serialize + ?Sized>(
        &self,
        doctype: &str,
        name: &str,
        body: &B,
    ) -> Result<serde_json::Value, FrappeError> {
        let url = self.resource_url(doctype, name)?;
        debug!("Updating Frappe document: {}", url);

        let response = self.client.put(url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Frappe API error: {} - {}", status, text);
            return Err(FrappeError::from_status_code(status.as_u16(), text));
        }

        let envelope: ResourceResponse<serde_json::Value> = serde_json::from_str(&text)?;
        envelope.data.ok_or_else(|| {
            FrappeError::UnexpectedResponse(format!("No document returned for {} {}", doctype, name))
        })
    }

    /// Call a whitelisted server method and decode its `message`
    pub async fn call<A, T>(&self, method: &str, args: &A) -> Result<Option<T>, FrappeError>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.method_url(method)?;
        debug!("Calling Frappe method: {}", url);

        let response = self.client.post(&url).json(args).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Frappe API error: {} - {}", status, text);
            return Err(FrappeError::from_status_code(status.as_u16(), text));
        }

        let envelope: MethodResponse<T> = serde_json::from_str(&text)?;
        Ok(envelope.message)
    }

    /// Run a `frappe.client.get_list` query
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<T>, FrappeError> {
        let rows: Option<Vec<T>> = self.call(GET_LIST_METHOD, query).await?;
        Ok(rows.unwrap_or_default())
    }

    /// Fetch carrier-side details of a booked shipment
    pub async fn get_shipment_details(
        &self,
        shipment_id: &str,
        service_provider: &str,
    ) -> Result<ShipmentDetails, FrappeError> {
        let args = ShipmentDetailsArgs {
            shipment_id,
            service_provider,
        };
        self.call(SHIPMENT_DETAILS_METHOD, &args)
            .await?
            .ok_or_else(|| {
                FrappeError::UnexpectedResponse(format!(
                    "No shipment details returned for {}",
                    shipment_id
                ))
            })
    }
}

#[async_trait]
impl ShipmentDirectory for FrappeClient {
    async fn find_shipment(
        &self,
        awb_number: &str,
        service_provider: &str,
    ) -> Result<Option<Shipment>, FrappeError> {
        let query = ListQuery::new("Shipment")
            .filter("awb_number", awb_number)
            .filter("service_provider", service_provider)
            .fields(&["name", "awb_number", "shipment_id"])
            .limit(1);

        let shipments: Vec<Shipment> = self.get_list(&query).await?;
        Ok(shipments.into_iter().next())
    }

    async fn fetch_pickup_id(
        &self,
        shipment_id: &str,
        service_provider: &str,
    ) -> Result<String, FrappeError> {
        let details = self
            .get_shipment_details(shipment_id, service_provider)
            .await?;
        details.pickup_id().ok_or_else(|| {
            FrappeError::UnexpectedResponse(format!(
                "Shipment details for {} carry no pickup id",
                shipment_id
            ))
        })
    }
}

#[async_trait]
impl ManifestPublisher for FrappeClient {
    async fn submit_manifest(&self, manifest: &Manifest) -> Result<(), FrappeError> {
        let body = ManifestSubmission::from(manifest);
        self.update_doc(SHIPMENT_MANIFEST_DOCTYPE, &manifest.name, &body)
            .await?;
        info!("Submitted {} {}", SHIPMENT_MANIFEST_DOCTYPE, manifest.name);
        Ok(())
    }

    async fn find_manifest_file(&self, manifest_name: &str) -> Result<Option<String>, FrappeError> {
        let query = ListQuery::new("File")
            .filter("attached_to_doctype", SHIPMENT_MANIFEST_DOCTYPE)
            .filter("attached_to_name", manifest_name)
            .fields(&["file_url"])
            .order_by("creation desc")
            .limit(1);

        let files: Vec<FileRecord> = self.get_list(&query).await?;
        Ok(files
            .into_iter()
            .next()
            .and_then(|f| f.file_url)
            .filter(|url| !url.is_empty()))
    }
}
