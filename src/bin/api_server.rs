// src/bin/api_server.rs

use std::sync::Arc;

use car_inventory::infra::telegram::TelegramSink;
use car_inventory::storage::{self, PgCarStore, PgCatalogStore};
use car_inventory::transport;
use car_inventory::CarService;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // --- Storage Initialization ---
    println!("> Connecting to PostgreSQL...");
    let pool = storage::connect_pool().await?;
    storage::init_schema(&pool).await?;
    println!("> Schema ready.");

    // --- Notification Sink Initialization ---
    println!("> Initializing Telegram notification sink...");
    let sink = Arc::new(TelegramSink::from_env());

    // --- Service Initialization ---
    let car_store = Arc::new(PgCarStore::new(pool.clone()));
    let car_service = Arc::new(CarService::new(car_store, sink));
    let catalog = Arc::new(PgCatalogStore::new(pool.clone()));

    let app_state = transport::http::AppState {
        car_service,
        catalog,
        pool,
    };
    println!("> CarService initialized successfully.");

    // --- API Server Initialization ---
    println!("> Starting API server...");
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            transport::http::ApiDoc::openapi(),
        ))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    println!("> API server listening on http://0.0.0.0:3000");
    println!("> Swagger UI available at http://localhost:3000/swagger-ui");

    axum::serve(listener, app).await?;

    Ok(())
}
