use crate::transport::http::handlers::common::{error_response, ok_response};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/cars/reg-count",
    responses(
        (status = 200, description = "Registrations per date over the trailing week", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn reg_count_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.car_service.reg_cars_count_by_day().await {
        Ok(counts) => ok_response(serde_json::json!({ "counts": counts })).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/cars/statistics",
    responses(
        (status = 200, description = "Cars registered on each of the last 7 days, index 0 = today", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn issued_last_week_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.car_service.cars_issued_last_week().await {
        Ok(issued) => ok_response(serde_json::json!({ "issued": issued })).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
