//! Persistence layer: pool construction, table bootstrap, and the stores.

pub mod cars;
pub mod catalog;

pub use cars::{CarStore, NewCar, PgCarStore};
pub use catalog::{CatalogStore, PgCatalogStore};

use crate::infra::config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connects to PostgreSQL using `DATABASE_URL`.
pub async fn connect_pool() -> anyhow::Result<PgPool> {
    dotenv::dotenv().ok();
    let database_url = config::database_url();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    Ok(pool)
}

/// Creates the inventory tables if they do not exist yet.
///
/// Brand and model rows are reference data imported out of band; only the
/// table shapes are owned here.
pub async fn init_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS cars (
            id BIGSERIAL PRIMARY KEY,
            brand TEXT NOT NULL,
            release_year INT NOT NULL,
            reg_date DATE,
            owner_name TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS car_brands (
            id BIGSERIAL PRIMARY KEY,
            brand_code TEXT NOT NULL,
            brand_name TEXT NOT NULL,
            brand_cyrillic TEXT,
            popular_brand INT,
            country TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS car_models (
            id BIGSERIAL PRIMARY KEY,
            model_code TEXT NOT NULL,
            model_name TEXT NOT NULL,
            model_cyrillic TEXT,
            car_class TEXT,
            year_from INT,
            year_to INT,
            brand_id BIGINT NOT NULL REFERENCES car_brands(id)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
