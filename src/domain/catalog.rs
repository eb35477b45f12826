//! Brand and model reference data.
//!
//! These rows are loaded out of band (import scripts) and are read-only
//! from the service's perspective.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A car make, e.g. `bmw` / "BMW".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct CarBrand {
    pub id: i64,
    /// Short key used to look models up, e.g. `bmw`.
    pub brand_code: String,
    pub brand_name: String,
    pub brand_cyrillic: Option<String>,
    /// Popularity rank used by clients to pre-sort pick lists.
    pub popular_brand: Option<i32>,
    pub country: Option<String>,
}

/// A concrete model belonging to exactly one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct CarModel {
    pub id: i64,
    pub model_code: String,
    pub model_name: String,
    pub model_cyrillic: Option<String>,
    /// Vehicle class, e.g. SUV or sedan.
    pub car_class: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub brand_id: i64,
}
