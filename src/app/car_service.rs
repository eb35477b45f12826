//! The car management service.
//!
//! This module sits between the HTTP boundary and the stores. It is
//! responsible for:
//! 1.  Multi-criterion union search with duplicate removal.
//! 2.  Mutations (add / update / delete) and their change notifications.
//! 3.  Day-bucketed registration statistics over a trailing 7-day window.

use crate::domain::car::{changed_fields, Car, CarPayload};
use crate::domain::error::ServiceError;
use crate::domain::notify::{owner_text, reg_date_text, NotificationSink};
use crate::storage::cars::{CarStore, NewCar};
use chrono::{Duration, NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Optional criteria for the union search. Blank strings count as absent;
/// the date range only participates when both bounds are present.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub brand: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub release_year: Option<i32>,
    pub owner_name: Option<String>,
}

/// The main service that manages the car inventory.
pub struct CarService {
    store: Arc<dyn CarStore>,
    sink: Arc<dyn NotificationSink>,
}

impl CarService {
    pub fn new(store: Arc<dyn CarStore>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { store, sink }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    pub async fn find_all(&self) -> Result<Vec<Car>, ServiceError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Car, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Case-insensitive brand substring lookup (the quick-search flavor).
    pub async fn find_by_title(&self, title: &str) -> Result<Vec<Car>, ServiceError> {
        Ok(self.store.find_by_brand_contains(title).await?)
    }

    /// Inclusive registration-date range lookup.
    pub async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Car>, ServiceError> {
        Ok(self.store.find_by_reg_date_between(start, end).await?)
    }

    /// Union search: every supplied criterion fetches its own result set
    /// and the concatenation is deduplicated by full structural equality,
    /// keeping first-seen order. A record matching any one criterion
    /// qualifies; criteria are never combined conjunctively. When no
    /// criterion was supplied, or nothing matched, the whole car set is
    /// returned instead.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Car>, ServiceError> {
        let mut cars: Vec<Car> = Vec::new();

        if let Some(brand) = non_blank(criteria.brand.as_deref()) {
            cars.extend(self.store.find_by_brand_equals(brand).await?);
        }
        if let (Some(start), Some(end)) = (criteria.start_date, criteria.end_date) {
            cars.extend(self.store.find_by_reg_date_between(start, end).await?);
        }
        if let Some(year) = criteria.release_year {
            cars.extend(self.store.find_by_release_year(year).await?);
        }
        if let Some(owner) = non_blank(criteria.owner_name.as_deref()) {
            cars.extend(self.store.find_by_owner_name(owner).await?);
        }

        let mut seen = HashSet::new();
        let distinct: Vec<Car> = cars
            .into_iter()
            .filter(|car| seen.insert(car.clone()))
            .collect();

        if distinct.is_empty() {
            return Ok(self.store.find_all().await?);
        }
        Ok(distinct)
    }

    /// Adds a car. The registration date is stamped server-side; whatever
    /// the caller supplied is discarded. The addition notification only
    /// follows a successful save.
    pub async fn add_car(&self, payload: CarPayload) -> Result<Car, ServiceError> {
        payload.validate().map_err(ServiceError::Validation)?;

        let saved = self
            .store
            .insert(NewCar {
                brand: payload.brand,
                release_year: payload.release_year,
                reg_date: Some(Self::today()),
                owner_name: payload.owner_name,
            })
            .await?;

        if let Err(e) = self
            .sink
            .notify_added(
                &saved.brand,
                saved.release_year,
                &reg_date_text(saved.reg_date),
                owner_text(saved.owner_name.as_deref()),
            )
            .await
        {
            eprintln!("> Failed to deliver car-added notification: {}", e);
        }
        Ok(saved)
    }

    /// Overwrites every field of an existing car with the payload, then
    /// reports which fields changed. Checked in fixed order: owner, brand,
    /// release year, registration date. Nothing changed, nothing sent.
    pub async fn update_car(&self, id: i64, payload: CarPayload) -> Result<Car, ServiceError> {
        payload.validate().map_err(ServiceError::Validation)?;

        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        let updated = Car {
            id: existing.id,
            brand: payload.brand,
            release_year: payload.release_year,
            reg_date: payload.reg_date,
            owner_name: payload.owner_name,
        };
        let saved = self.store.update(&updated).await?;

        let changed = changed_fields(&existing, &saved);
        if !changed.is_empty() {
            if let Err(e) = self
                .sink
                .notify_updated(
                    &saved.brand,
                    saved.release_year,
                    &reg_date_text(saved.reg_date),
                    owner_text(saved.owner_name.as_deref()),
                    &changed.join(", "),
                )
                .await
            {
                eprintln!("> Failed to deliver car-updated notification: {}", e);
            }
        }
        Ok(saved)
    }

    /// Deletes a car by id. The deletion notification goes out before the
    /// row is removed; a nonexistent id never fires one.
    pub async fn delete_car_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let car = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        if let Err(e) = self
            .sink
            .notify_deleted(
                &car.brand,
                &reg_date_text(car.reg_date),
                owner_text(car.owner_name.as_deref()),
            )
            .await
        {
            eprintln!("> Failed to deliver car-deleted notification: {}", e);
        }

        self.store.delete_by_id(id).await?;
        Ok(())
    }

    /// Registrations per date over the trailing week. A date appears only
    /// if at least one car was registered on it. Records without a
    /// registration date, or registered more than a week ago, are skipped;
    /// exactly seven days ago falls outside the window.
    pub async fn reg_cars_count_by_day(
        &self,
    ) -> Result<BTreeMap<NaiveDate, i64>, ServiceError> {
        let cutoff = Self::today() - Duration::days(7);
        let mut counts: BTreeMap<NaiveDate, i64> = BTreeMap::new();

        for car in self.store.find_all().await? {
            if let Some(reg_date) = car.reg_date {
                if reg_date > cutoff {
                    *counts.entry(reg_date).or_insert(0) += 1;
                }
            }
        }
        Ok(counts)
    }

    /// Cars registered on each of the last 7 days, newest first (index 0
    /// is today). Days without registrations report 0.
    pub async fn cars_issued_last_week(&self) -> Result<Vec<i64>, ServiceError> {
        let counts = self.reg_cars_count_by_day().await?;
        let today = Self::today();

        Ok((0..7)
            .map(|i| {
                counts
                    .get(&(today - Duration::days(i)))
                    .copied()
                    .unwrap_or(0)
            })
            .collect())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
