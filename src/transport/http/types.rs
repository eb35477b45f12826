use crate::app::car_service::CarService;
use crate::storage::catalog::CatalogStore;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub car_service: Arc<CarService>,
    pub catalog: Arc<dyn CatalogStore>,
    pub pool: PgPool,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Criteria for the union search. Absent or blank fields do not
/// participate; the date range only participates when both bounds are set.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct SearchRequest {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub release_year: Option<i32>,
}

/// Query parameters for the quick-search endpoint. Dates arrive as raw
/// strings; an unparsable date yields an empty result rather than an error.
#[derive(Deserialize, Debug, Default)]
pub struct QuickSearchParams {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ModelsParams {
    pub brand_code: String,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
