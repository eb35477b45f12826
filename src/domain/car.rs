//! Car inventory entities and the rules that operate on them.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A car record as persisted in the `cars` table.
///
/// Equality is structural over all fields; the union search relies on this
/// to drop exact duplicates that arrive through more than one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub release_year: i32,
    #[schema(value_type = Option<String>, format = Date)]
    pub reg_date: Option<NaiveDate>,
    pub owner_name: Option<String>,
}

/// Incoming payload for add/update operations. The store assigns the id;
/// on add the service stamps the registration date itself.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CarPayload {
    pub brand: String,
    pub release_year: i32,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub reg_date: Option<NaiveDate>,
    #[serde(default)]
    pub owner_name: Option<String>,
}

impl CarPayload {
    /// Validates the payload before persisting.
    /// Returns Ok(()) if valid, Err(String) with error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.brand.trim().is_empty() {
            return Err("brand must not be empty".to_string());
        }
        let max_year = Utc::now().year() + 1;
        if self.release_year < 1885 || self.release_year > max_year {
            return Err(format!(
                "release_year must be between 1885 and {}",
                max_year
            ));
        }
        Ok(())
    }
}

/// Labels of the fields that differ between the stored and the updated
/// record, in fixed check order: owner, brand, release year, registration
/// date. The first entry is always the first difference in that order.
pub fn changed_fields(old: &Car, new: &Car) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if old.owner_name != new.owner_name {
        changed.push("owner");
    }
    if old.brand != new.brand {
        changed.push("brand");
    }
    if old.release_year != new.release_year {
        changed.push("release year");
    }
    if old.reg_date != new.reg_date {
        changed.push("registration date");
    }
    changed
}
