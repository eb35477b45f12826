//! Read-only store for brand and model reference data.

use crate::domain::catalog::{CarBrand, CarModel};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_all_brands(&self) -> Result<Vec<CarBrand>>;

    /// Models belonging to the brand with the given code.
    async fn find_models_by_brand_code(&self, brand_code: &str) -> Result<Vec<CarModel>>;
}

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_all_brands(&self) -> Result<Vec<CarBrand>> {
        let brands = sqlx::query_as::<_, CarBrand>(
            "SELECT id, brand_code, brand_name, brand_cyrillic, popular_brand, country
             FROM car_brands ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(brands)
    }

    async fn find_models_by_brand_code(&self, brand_code: &str) -> Result<Vec<CarModel>> {
        let models = sqlx::query_as::<_, CarModel>(
            "SELECT m.id, m.model_code, m.model_name, m.model_cyrillic,
                    m.car_class, m.year_from, m.year_to, m.brand_id
             FROM car_models m
             JOIN car_brands b ON m.brand_id = b.id
             WHERE b.brand_code = $1
             ORDER BY m.id",
        )
        .bind(brand_code)
        .fetch_all(&self.pool)
        .await?;
        Ok(models)
    }
}
