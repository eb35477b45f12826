use crate::domain::car::{Car, CarPayload};
use crate::domain::catalog::{CarBrand, CarModel};
use crate::transport::http::handlers::{cars, catalog, health, stats};
use crate::transport::http::types::{ApiResponse, SearchRequest};
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        cars::list_cars_handler,
        cars::add_car_handler,
        cars::update_car_handler,
        cars::delete_car_handler,
        cars::search_cars_handler,
        cars::quick_search_handler,
        stats::reg_count_handler,
        stats::issued_last_week_handler,
        catalog::brands_handler,
        catalog::models_handler
    ),
    components(schemas(
        ApiResponse,
        Car,
        CarPayload,
        SearchRequest,
        CarBrand,
        CarModel
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/cars",
            get(cars::list_cars_handler).post(cars::add_car_handler),
        )
        .route("/api/cars/search", post(cars::search_cars_handler))
        .route("/api/cars/quick-search", get(cars::quick_search_handler))
        .route("/api/cars/reg-count", get(stats::reg_count_handler))
        .route("/api/cars/statistics", get(stats::issued_last_week_handler))
        .route(
            "/api/cars/:id",
            axum::routing::put(cars::update_car_handler).delete(cars::delete_car_handler),
        )
        .route("/api/brands", get(catalog::brands_handler))
        .route("/api/models", get(catalog::models_handler))
        .with_state(app_state)
}
