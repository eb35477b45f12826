//! Service-level tests: union search, change notifications, and the 7-day
//! registration statistics, run against in-memory doubles of the store and
//! the notification sink.

use anyhow::Result;
use async_trait::async_trait;
use car_inventory::{
    Car, CarPayload, CarService, CarStore, NewCar, NotificationSink, SearchCriteria, ServiceError,
};
use chrono::{Duration, NaiveDate, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

// --- In-memory store ---

struct MemoryCarStore {
    cars: Mutex<Vec<Car>>,
    next_id: AtomicI64,
}

impl MemoryCarStore {
    fn new() -> Self {
        Self {
            cars: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn with_cars(cars: Vec<Car>) -> Self {
        let max_id = cars.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            cars: Mutex::new(cars),
            next_id: AtomicI64::new(max_id + 1),
        }
    }
}

#[async_trait]
impl CarStore for MemoryCarStore {
    async fn insert(&self, car: NewCar) -> Result<Car> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let car = Car {
            id,
            brand: car.brand,
            release_year: car.release_year,
            reg_date: car.reg_date,
            owner_name: car.owner_name,
        };
        self.cars.lock().unwrap().push(car.clone());
        Ok(car)
    }

    async fn update(&self, car: &Car) -> Result<Car> {
        let mut cars = self.cars.lock().unwrap();
        let slot = cars
            .iter_mut()
            .find(|c| c.id == car.id)
            .ok_or_else(|| anyhow::anyhow!("no row with id {}", car.id))?;
        *slot = car.clone();
        Ok(car.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>> {
        Ok(self.cars.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.cars.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Car>> {
        Ok(self.cars.lock().unwrap().clone())
    }

    async fn find_by_brand_contains(&self, title: &str) -> Result<Vec<Car>> {
        let needle = title.to_lowercase();
        Ok(self
            .cars
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.brand.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_brand_equals(&self, brand: &str) -> Result<Vec<Car>> {
        Ok(self
            .cars
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.brand.eq_ignore_ascii_case(brand))
            .cloned()
            .collect())
    }

    async fn find_by_reg_date_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Car>> {
        Ok(self
            .cars
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.reg_date.map_or(false, |d| d >= start && d <= end))
            .cloned()
            .collect())
    }

    async fn find_by_release_year(&self, year: i32) -> Result<Vec<Car>> {
        Ok(self
            .cars
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.release_year == year)
            .cloned()
            .collect())
    }

    async fn find_by_owner_name(&self, owner: &str) -> Result<Vec<Car>> {
        Ok(self
            .cars
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.owner_name.as_deref() == Some(owner))
            .cloned()
            .collect())
    }
}

// --- Recording sink ---

#[derive(Debug, Clone)]
enum Notification {
    Added {
        brand: String,
        release_year: i32,
        reg_date: String,
        owner: String,
    },
    Updated {
        changed: String,
    },
    Deleted {
        brand: String,
        reg_date: String,
        owner: String,
    },
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify_added(
        &self,
        brand: &str,
        release_year: i32,
        reg_date: &str,
        owner: &str,
    ) -> Result<()> {
        self.events.lock().unwrap().push(Notification::Added {
            brand: brand.to_string(),
            release_year,
            reg_date: reg_date.to_string(),
            owner: owner.to_string(),
        });
        Ok(())
    }

    async fn notify_updated(
        &self,
        _brand: &str,
        _release_year: i32,
        _reg_date: &str,
        _owner: &str,
        changed: &str,
    ) -> Result<()> {
        self.events.lock().unwrap().push(Notification::Updated {
            changed: changed.to_string(),
        });
        Ok(())
    }

    async fn notify_deleted(&self, brand: &str, reg_date: &str, owner: &str) -> Result<()> {
        self.events.lock().unwrap().push(Notification::Deleted {
            brand: brand.to_string(),
            reg_date: reg_date.to_string(),
            owner: owner.to_string(),
        });
        Ok(())
    }
}

/// A sink whose deliveries always fail; mutations must still succeed.
struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    async fn notify_added(&self, _: &str, _: i32, _: &str, _: &str) -> Result<()> {
        Err(anyhow::anyhow!("sink unreachable"))
    }

    async fn notify_updated(&self, _: &str, _: i32, _: &str, _: &str, _: &str) -> Result<()> {
        Err(anyhow::anyhow!("sink unreachable"))
    }

    async fn notify_deleted(&self, _: &str, _: &str, _: &str) -> Result<()> {
        Err(anyhow::anyhow!("sink unreachable"))
    }
}

// --- Helpers ---

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn car(id: i64, brand: &str, year: i32, reg_date: Option<NaiveDate>, owner: Option<&str>) -> Car {
    Car {
        id,
        brand: brand.to_string(),
        release_year: year,
        reg_date,
        owner_name: owner.map(str::to_string),
    }
}

fn payload(brand: &str, year: i32, reg_date: Option<NaiveDate>, owner: Option<&str>) -> CarPayload {
    CarPayload {
        brand: brand.to_string(),
        release_year: year,
        reg_date,
        owner_name: owner.map(str::to_string),
    }
}

fn service_with(cars: Vec<Car>) -> (CarService, Arc<MemoryCarStore>, Arc<RecordingSink>) {
    let store = Arc::new(MemoryCarStore::with_cars(cars));
    let sink = Arc::new(RecordingSink::default());
    let service = CarService::new(store.clone(), sink.clone());
    (service, store, sink)
}

fn fleet() -> Vec<Car> {
    vec![
        car(1, "BMW", 2018, Some(today()), Some("alice")),
        car(2, "Audi", 2020, Some(today() - Duration::days(3)), Some("bob")),
        car(3, "BMW", 2020, Some(today() - Duration::days(10)), None),
        car(4, "Lada", 1995, None, Some("carol")),
    ]
}

// --- Search ---

#[tokio::test]
async fn search_without_criteria_returns_everything() {
    let (service, _, _) = service_with(fleet());

    let result = service.search(&SearchCriteria::default()).await.unwrap();
    assert_eq!(result.len(), 4);
}

#[tokio::test]
async fn search_is_a_union_not_an_intersection() {
    let (service, _, _) = service_with(fleet());

    // Brand BMW matches ids 1 and 3; year 2020 matches ids 2 and 3.
    let criteria = SearchCriteria {
        brand: Some("bmw".to_string()),
        release_year: Some(2020),
        ..Default::default()
    };
    let result = service.search(&criteria).await.unwrap();

    let ids: Vec<i64> = result.iter().map(|c| c.id).collect();
    assert!(ids.contains(&1));
    assert!(ids.contains(&2));
    assert!(ids.contains(&3));
    assert!(!ids.contains(&4));
}

#[tokio::test]
async fn search_deduplicates_structurally_identical_records() {
    let (service, _, _) = service_with(fleet());

    // Id 3 matches both the brand and the year criterion.
    let criteria = SearchCriteria {
        brand: Some("BMW".to_string()),
        release_year: Some(2020),
        ..Default::default()
    };
    let result = service.search(&criteria).await.unwrap();

    let matches_of_3 = result.iter().filter(|c| c.id == 3).count();
    assert_eq!(matches_of_3, 1);
    assert_eq!(result.len(), 3);
}

#[tokio::test]
async fn search_falls_back_to_everything_when_nothing_matches() {
    let (service, _, _) = service_with(fleet());

    let criteria = SearchCriteria {
        brand: Some("Packard".to_string()),
        ..Default::default()
    };
    let result = service.search(&criteria).await.unwrap();
    assert_eq!(result.len(), 4);
}

#[tokio::test]
async fn search_ignores_blank_criteria() {
    let (service, _, _) = service_with(fleet());

    let criteria = SearchCriteria {
        brand: Some("   ".to_string()),
        owner_name: Some(String::new()),
        ..Default::default()
    };
    let result = service.search(&criteria).await.unwrap();
    assert_eq!(result.len(), 4);
}

#[tokio::test]
async fn search_date_range_requires_both_bounds() {
    let (service, _, _) = service_with(fleet());

    // Only a start date: the range criterion does not participate, so the
    // union is empty and the fallback returns everything.
    let criteria = SearchCriteria {
        start_date: Some(today() - Duration::days(5)),
        ..Default::default()
    };
    let result = service.search(&criteria).await.unwrap();
    assert_eq!(result.len(), 4);
}

#[tokio::test]
async fn search_by_owner_matches_exactly() {
    let (service, _, _) = service_with(fleet());

    let criteria = SearchCriteria {
        owner_name: Some("bob".to_string()),
        ..Default::default()
    };
    let result = service.search(&criteria).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 2);
}

// --- Add ---

#[tokio::test]
async fn add_car_stamps_registration_date() {
    let (service, store, _) = service_with(Vec::new());

    let stale = today() - Duration::days(30);
    let saved = service
        .add_car(payload("Volvo", 2021, Some(stale), Some("dave")))
        .await
        .unwrap();

    assert_eq!(saved.reg_date, Some(today()));

    // Round-trip through the store keeps brand, year, owner and the
    // stamped date intact.
    let fetched = store.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(fetched.brand, "Volvo");
    assert_eq!(fetched.release_year, 2021);
    assert_eq!(fetched.owner_name.as_deref(), Some("dave"));
    assert_eq!(fetched.reg_date, Some(today()));
}

#[tokio::test]
async fn add_car_sends_one_addition_notification() {
    let (service, _, sink) = service_with(Vec::new());

    service
        .add_car(payload("Volvo", 2021, None, None))
        .await
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Notification::Added {
            brand,
            release_year,
            reg_date,
            owner,
        } => {
            assert_eq!(brand, "Volvo");
            assert_eq!(*release_year, 2021);
            assert_eq!(reg_date, &today().to_string());
            assert_eq!(owner, "not specified");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn add_car_rejects_blank_brand() {
    let (service, store, sink) = service_with(Vec::new());

    let err = service
        .add_car(payload("  ", 2021, None, None))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(store.find_all().await.unwrap().is_empty());
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn add_car_rejects_implausible_release_year() {
    let (service, _, _) = service_with(Vec::new());

    let err = service
        .add_car(payload("Benz", 1700, None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn add_car_survives_sink_failure() {
    let store = Arc::new(MemoryCarStore::new());
    let service = CarService::new(store.clone(), Arc::new(FailingSink));

    let saved = service
        .add_car(payload("Volvo", 2021, None, Some("dave")))
        .await
        .unwrap();

    // Delivery failed, the mutation did not.
    assert!(store.find_by_id(saved.id).await.unwrap().is_some());
}

// --- Update ---

#[tokio::test]
async fn update_missing_car_is_not_found_and_silent() {
    let (service, _, sink) = service_with(fleet());

    let err = service
        .update_car(99, payload("BMW", 2018, None, None))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(99)));
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn update_reports_owner_first_when_several_fields_changed() {
    let reg = today() - Duration::days(1);
    let (service, _, sink) = service_with(vec![car(1, "BMW", 2018, Some(reg), Some("alice"))]);

    // Owner and release year both change; owner is checked first.
    service
        .update_car(1, payload("BMW", 2020, Some(reg), Some("bob")))
        .await
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Notification::Updated { changed } => {
            assert!(changed.starts_with("owner"));
            assert_eq!(changed, "owner, release year");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn update_without_changes_sends_nothing() {
    let reg = today() - Duration::days(1);
    let (service, _, sink) = service_with(vec![car(1, "BMW", 2018, Some(reg), Some("alice"))]);

    service
        .update_car(1, payload("BMW", 2018, Some(reg), Some("alice")))
        .await
        .unwrap();

    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn update_overwrites_every_field() {
    let reg = today() - Duration::days(1);
    let (service, store, sink) = service_with(vec![car(1, "BMW", 2018, Some(reg), Some("alice"))]);

    // The payload clears the registration date and the owner.
    service
        .update_car(1, payload("Audi", 2019, None, None))
        .await
        .unwrap();

    let saved = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(saved.brand, "Audi");
    assert_eq!(saved.release_year, 2019);
    assert_eq!(saved.reg_date, None);
    assert_eq!(saved.owner_name, None);

    match &sink.events()[0] {
        Notification::Updated { changed } => {
            assert_eq!(changed, "owner, brand, release year, registration date");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

// --- Delete ---

#[tokio::test]
async fn delete_missing_car_is_not_found_and_silent() {
    let (service, _, sink) = service_with(fleet());

    let err = service.delete_car_by_id(99).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(99)));
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn delete_sends_one_notification_and_removes_the_record() {
    let (service, store, sink) = service_with(fleet());

    service.delete_car_by_id(2).await.unwrap();

    assert!(store.find_by_id(2).await.unwrap().is_none());
    let events = sink.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Notification::Deleted { brand, .. } => assert_eq!(brand, "Audi"),
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn delete_uses_placeholders_for_absent_fields() {
    let (service, _, sink) = service_with(vec![car(7, "Moskvich", 1980, None, None)]);

    service.delete_car_by_id(7).await.unwrap();

    match &sink.events()[0] {
        Notification::Deleted {
            brand,
            reg_date,
            owner,
        } => {
            assert_eq!(brand, "Moskvich");
            assert_eq!(reg_date, "not specified");
            assert_eq!(owner, "not specified");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

// --- Statistics ---

#[tokio::test]
async fn reg_count_excludes_old_and_undated_records() {
    let cars = vec![
        car(1, "BMW", 2018, Some(today()), None),
        car(2, "Audi", 2020, Some(today()), None),
        car(3, "Lada", 1995, Some(today() - Duration::days(6)), None),
        // Exactly seven days ago sits outside the window.
        car(4, "Volvo", 2019, Some(today() - Duration::days(7)), None),
        car(5, "Kia", 2022, Some(today() - Duration::days(30)), None),
        car(6, "Fiat", 2001, None, None),
    ];
    let (service, _, _) = service_with(cars);

    let counts = service.reg_cars_count_by_day().await.unwrap();

    assert_eq!(counts.get(&today()), Some(&2));
    assert_eq!(counts.get(&(today() - Duration::days(6))), Some(&1));
    assert!(!counts.contains_key(&(today() - Duration::days(7))));
    assert!(!counts.contains_key(&(today() - Duration::days(30))));
    // Only dates with at least one registration appear.
    assert_eq!(counts.len(), 2);
}

#[tokio::test]
async fn issued_last_week_reports_seven_days_newest_first() {
    let cars = vec![
        car(1, "BMW", 2018, Some(today()), None),
        car(2, "Audi", 2020, Some(today()), None),
        car(3, "Lada", 1995, Some(today() - Duration::days(2)), None),
    ];
    let (service, _, _) = service_with(cars);

    let issued = service.cars_issued_last_week().await.unwrap();

    assert_eq!(issued.len(), 7);
    assert_eq!(issued[0], 2);
    assert_eq!(issued[1], 0);
    assert_eq!(issued[2], 1);
    assert_eq!(&issued[3..], &[0, 0, 0, 0]);
}

// --- Lookup ---

#[tokio::test]
async fn find_by_id_resolves_or_fails_with_not_found() {
    let (service, _, _) = service_with(fleet());

    let found = service.find_by_id(1).await.unwrap();
    assert_eq!(found.brand, "BMW");

    let err = service.find_by_id(99).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(99)));
}

#[tokio::test]
async fn find_by_title_matches_substrings_case_insensitively() {
    let (service, _, _) = service_with(fleet());

    let result = service.find_by_title("mw").await.unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|c| c.brand == "BMW"));
}
