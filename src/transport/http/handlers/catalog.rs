use crate::domain::error::ServiceError;
use crate::transport::http::handlers::common::{error_response, ok_response};
use crate::transport::http::types::{ApiResponse, AppState, ModelsParams};
use axum::extract::{Query, State};
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/brands",
    responses(
        (status = 200, description = "All car brands", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn brands_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.find_all_brands().await {
        Ok(brands) => ok_response(serde_json::json!({ "brands": brands })).into_response(),
        Err(e) => error_response(ServiceError::Storage(e)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/models",
    params(
        ("brand_code" = String, Query, description = "Brand code (e.g. bmw)")
    ),
    responses(
        (status = 200, description = "Models for the brand", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn models_handler(
    State(state): State<AppState>,
    Query(params): Query<ModelsParams>,
) -> impl IntoResponse {
    match state
        .catalog
        .find_models_by_brand_code(&params.brand_code)
        .await
    {
        Ok(models) => ok_response(serde_json::json!({ "models": models })).into_response(),
        Err(e) => error_response(ServiceError::Storage(e)).into_response(),
    }
}
