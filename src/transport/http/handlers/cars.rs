use crate::app::car_service::SearchCriteria;
use crate::domain::car::CarPayload;
use crate::transport::http::handlers::common::{error_response, ok_response};
use crate::transport::http::types::{json_422, ApiResponse, AppState, QuickSearchParams, SearchRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;

#[utoipa::path(
    get,
    path = "/api/cars",
    responses(
        (status = 200, description = "All cars", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_cars_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.car_service.find_all().await {
        Ok(cars) => ok_response(serde_json::json!({ "cars": cars })).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/cars",
    request_body = CarPayload,
    responses(
        (status = 200, description = "Car added", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn add_car_handler(
    State(state): State<AppState>,
    request: Result<Json<CarPayload>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"brand\": \"...\", \"release_year\": 2020}").into_response();
        }
    };

    match state.car_service.add_car(payload).await {
        Ok(car) => ok_response(serde_json::json!({ "car": car })).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/cars/{id}",
    params(
        ("id" = i64, Path, description = "Car id")
    ),
    request_body = CarPayload,
    responses(
        (status = 200, description = "Car updated", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 404, description = "Car not found", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_car_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request: Result<Json<CarPayload>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"brand\": \"...\", \"release_year\": 2020}").into_response();
        }
    };

    match state.car_service.update_car(id, payload).await {
        Ok(car) => ok_response(serde_json::json!({ "car": car })).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    params(
        ("id" = i64, Path, description = "Car id")
    ),
    responses(
        (status = 200, description = "Car deleted", body = ApiResponse),
        (status = 404, description = "Car not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_car_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.car_service.delete_car_by_id(id).await {
        Ok(()) => ok_response(serde_json::json!({ "deleted": id })).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/cars/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Union of all per-criterion matches", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn search_cars_handler(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"brand\": \"...\", \"release_year\": 2020}").into_response();
        }
    };

    let criteria = SearchCriteria {
        brand: request.brand,
        start_date: request.start_date,
        end_date: request.end_date,
        release_year: request.release_year,
        owner_name: request.owner_name,
    };

    match state.car_service.search(&criteria).await {
        Ok(cars) => ok_response(serde_json::json!({ "cars": cars })).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/cars/quick-search",
    params(
        ("title" = Option<String>, Query, description = "Brand substring, case-insensitive"),
        ("start_date" = Option<String>, Query, description = "Range start (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "Range end (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Matching cars", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn quick_search_handler(
    State(state): State<AppState>,
    Query(params): Query<QuickSearchParams>,
) -> impl IntoResponse {
    let title = non_blank(params.title.as_deref());
    let start = non_blank(params.start_date.as_deref());
    let end = non_blank(params.end_date.as_deref());

    // Title wins over the date range; a half-specified or unparsable
    // range yields an empty list, not an error.
    let result = if let Some(title) = title {
        state.car_service.find_by_title(title).await
    } else if let (Some(start), Some(end)) = (start, end) {
        match (start.parse::<NaiveDate>(), end.parse::<NaiveDate>()) {
            (Ok(start), Ok(end)) => state.car_service.find_by_date_range(start, end).await,
            _ => Ok(Vec::new()),
        }
    } else {
        state.car_service.find_all().await
    };

    match result {
        Ok(cars) => ok_response(serde_json::json!({ "cars": cars })).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
