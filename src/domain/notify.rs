//! Outbound notification port for inventory changes.

use async_trait::async_trait;
use chrono::NaiveDate;

/// Placeholder reported when an optional field has no value.
pub const NOT_SPECIFIED: &str = "not specified";

/// One delivery attempt per mutating event. Implementations return an
/// error on failed delivery; the caller decides what to do with it (the
/// service logs and moves on; delivery is subordinate to persistence).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify_added(
        &self,
        brand: &str,
        release_year: i32,
        reg_date: &str,
        owner: &str,
    ) -> anyhow::Result<()>;

    async fn notify_updated(
        &self,
        brand: &str,
        release_year: i32,
        reg_date: &str,
        owner: &str,
        changed: &str,
    ) -> anyhow::Result<()>;

    async fn notify_deleted(&self, brand: &str, reg_date: &str, owner: &str)
        -> anyhow::Result<()>;
}

pub fn reg_date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

pub fn owner_text(owner: Option<&str>) -> &str {
    owner.unwrap_or(NOT_SPECIFIED)
}
