use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::Result;
use crate::exchange_rate::{ExchangeRate, NewExchangeRate};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgRateStore;

/// Durable storage for rate records. Ranges are inclusive on both ends.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Appends every record and returns them with their assigned ids.
    async fn insert_all(&self, records: Vec<NewExchangeRate>) -> Result<Vec<ExchangeRate>>;

    /// Records whose timestamp lies in `[start, end]`, in insertion order.
    async fn query_range(&self, start: NaiveDateTime, end: NaiveDateTime)
    -> Result<Vec<ExchangeRate>>;

    /// Deletes records whose timestamp lies in `[start, end]`, returning how many went.
    async fn delete_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<u64>;

    /// The most recently recorded batch.
    async fn query_latest(&self) -> Result<Vec<ExchangeRate>>;
}
