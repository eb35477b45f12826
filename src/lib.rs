pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::car_service::{CarService, SearchCriteria};
pub use domain::car::{Car, CarPayload};
pub use domain::catalog::{CarBrand, CarModel};
pub use domain::error::ServiceError;
pub use domain::notify::NotificationSink;
pub use storage::cars::{CarStore, NewCar, PgCarStore};
pub use storage::catalog::{CatalogStore, PgCatalogStore};
