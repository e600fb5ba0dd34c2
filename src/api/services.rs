use poem_openapi::{
    payload::{Html, Json},
    ApiResponse, Object, OpenApi,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::domain::ServiceQuote;
use crate::error::AppError;
use crate::selector::{ComparisonRenderer, ServiceComparison, ServiceSelection, DEFAULT_HEADER_COLUMNS};

pub struct ServicesApi {
    renderer: Arc<ComparisonRenderer>,
}

impl ServicesApi {
    pub fn new(renderer: Arc<ComparisonRenderer>) -> Self {
        Self { renderer }
    }
}

/// Quotes either as one flat list, split on `is_preferred` and sorted by
/// price, or already split into the two tables
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ComparisonRequest {
    #[serde(default)]
    #[oai(default)]
    pub services: Vec<ServiceQuote>,
    #[serde(default)]
    #[oai(default)]
    pub preferred_services: Vec<ServiceQuote>,
    #[serde(default)]
    #[oai(default)]
    pub other_services: Vec<ServiceQuote>,
    pub header_columns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct SelectionRequest {
    #[serde(default)]
    #[oai(default)]
    pub services: Vec<ServiceQuote>,
    #[serde(default)]
    #[oai(default)]
    pub preferred_services: Vec<ServiceQuote>,
    #[serde(default)]
    #[oai(default)]
    pub other_services: Vec<ServiceQuote>,
    /// Row id of the clicked button, e.g. `data-preferred-0`
    pub element_id: String,
}

fn arrange(
    services: Vec<ServiceQuote>,
    preferred_services: Vec<ServiceQuote>,
    other_services: Vec<ServiceQuote>,
) -> Result<ServiceComparison, AppError> {
    if services.is_empty() {
        return Ok(ServiceComparison {
            preferred_services,
            other_services,
        });
    }
    if !preferred_services.is_empty() || !other_services.is_empty() {
        return Err(AppError::BadRequest(
            "Send either services or preferred_services/other_services, not both".to_string(),
        ));
    }
    Ok(ServiceComparison::from_quotes(services))
}

#[derive(ApiResponse)]
pub enum ComparisonResponse {
    #[oai(status = 200)]
    Ok(Html<String>),
}

#[derive(ApiResponse)]
pub enum SelectionResponse {
    #[oai(status = 200)]
    Ok(Json<ServiceQuote>),
}

#[OpenApi]
impl ServicesApi {
    /// Render the service selector tables as an HTML fragment
    #[oai(path = "/services/comparison", method = "post")]
    async fn comparison(
        &self,
        body: Json<ComparisonRequest>,
    ) -> Result<ComparisonResponse, poem::Error> {
        let req = body.0;
        let header_columns = req.header_columns.unwrap_or_else(|| {
            DEFAULT_HEADER_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect()
        });
        let comparison = arrange(req.services, req.preferred_services, req.other_services)?;
        debug!(
            "Rendering {} preferred and {} other services",
            comparison.preferred_services.len(),
            comparison.other_services.len()
        );
        Ok(ComparisonResponse::Ok(Html(
            self.renderer.render(&comparison, &header_columns),
        )))
    }

    /// Resolve a clicked row back to its quote
    #[oai(path = "/services/selection", method = "post")]
    async fn selection(
        &self,
        body: Json<SelectionRequest>,
    ) -> Result<SelectionResponse, poem::Error> {
        let req = body.0;
        let selection: ServiceSelection = req
            .element_id
            .parse()
            .map_err(|e: crate::selector::SelectionError| AppError::BadRequest(e.to_string()))?;

        let comparison = arrange(req.services, req.preferred_services, req.other_services)?;
        let quote = comparison.select(selection).cloned().ok_or_else(|| {
            AppError::NotFound(format!("No service at {}", selection.element_id()))
        })?;
        Ok(SelectionResponse::Ok(Json(quote)))
    }
}
