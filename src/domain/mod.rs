pub mod car;
pub mod catalog;
pub mod error;
pub mod notify;

pub use car::{changed_fields, Car, CarPayload};
pub use catalog::{CarBrand, CarModel};
pub use error::ServiceError;
pub use notify::NotificationSink;
