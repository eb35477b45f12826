//! Car record store: the persistence port and its PostgreSQL implementation.

use crate::domain::car::Car;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

/// Fields the caller controls on insert; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCar {
    pub brand: String,
    pub release_year: i32,
    pub reg_date: Option<NaiveDate>,
    pub owner_name: Option<String>,
}

/// Persistence port for car records.
///
/// The predicate lookups mirror what the search and quick-search flows
/// need; each returns the full matching set with no paging.
#[async_trait]
pub trait CarStore: Send + Sync {
    async fn insert(&self, car: NewCar) -> Result<Car>;

    /// Overwrites every mutable column of the row with the given id.
    async fn update(&self, car: &Car) -> Result<Car>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>>;

    async fn delete_by_id(&self, id: i64) -> Result<()>;

    async fn find_all(&self) -> Result<Vec<Car>>;

    /// Case-insensitive substring match on the brand.
    async fn find_by_brand_contains(&self, title: &str) -> Result<Vec<Car>>;

    /// Case-insensitive exact match on the brand.
    async fn find_by_brand_equals(&self, brand: &str) -> Result<Vec<Car>>;

    /// Inclusive registration-date range.
    async fn find_by_reg_date_between(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Car>>;

    async fn find_by_release_year(&self, year: i32) -> Result<Vec<Car>>;

    /// Exact match on the owner name.
    async fn find_by_owner_name(&self, owner: &str) -> Result<Vec<Car>>;
}

/// PostgreSQL-backed car store.
#[derive(Clone)]
pub struct PgCarStore {
    pool: PgPool,
}

impl PgCarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for PgCarStore {
    async fn insert(&self, car: NewCar) -> Result<Car> {
        let saved = sqlx::query_as::<_, Car>(
            "INSERT INTO cars (brand, release_year, reg_date, owner_name)
             VALUES ($1, $2, $3, $4)
             RETURNING id, brand, release_year, reg_date, owner_name",
        )
        .bind(&car.brand)
        .bind(car.release_year)
        .bind(car.reg_date)
        .bind(&car.owner_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update(&self, car: &Car) -> Result<Car> {
        let saved = sqlx::query_as::<_, Car>(
            "UPDATE cars
             SET brand = $2, release_year = $3, reg_date = $4, owner_name = $5
             WHERE id = $1
             RETURNING id, brand, release_year, reg_date, owner_name",
        )
        .bind(car.id)
        .bind(&car.brand)
        .bind(car.release_year)
        .bind(car.reg_date)
        .bind(&car.owner_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(
            "SELECT id, brand, release_year, reg_date, owner_name FROM cars WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(car)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, brand, release_year, reg_date, owner_name FROM cars ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    async fn find_by_brand_contains(&self, title: &str) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, brand, release_year, reg_date, owner_name FROM cars
             WHERE brand ILIKE '%' || $1 || '%' ORDER BY id",
        )
        .bind(title)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    async fn find_by_brand_equals(&self, brand: &str) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, brand, release_year, reg_date, owner_name FROM cars
             WHERE LOWER(brand) = LOWER($1) ORDER BY id",
        )
        .bind(brand)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    async fn find_by_reg_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, brand, release_year, reg_date, owner_name FROM cars
             WHERE reg_date BETWEEN $1 AND $2 ORDER BY id",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    async fn find_by_release_year(&self, year: i32) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, brand, release_year, reg_date, owner_name FROM cars
             WHERE release_year = $1 ORDER BY id",
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    async fn find_by_owner_name(&self, owner: &str) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, brand, release_year, reg_date, owner_name FROM cars
             WHERE owner_name = $1 ORDER BY id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }
}
