use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::RateStore;
use crate::error::Result;
use crate::exchange_rate::{ExchangeRate, NewExchangeRate};

/// Vec-backed store that counts calls, for service and API tests.
#[derive(Debug, Default)]
pub struct MemoryRateStore {
    rows: Mutex<Vec<ExchangeRate>>,
    query_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_rows(records: Vec<NewExchangeRate>) -> Self {
        let store = Self::new();
        store.rows.lock().await.extend(
            records
                .into_iter()
                .map(|record| record.with_id(Uuid::new_v4())),
        );
        store
    }

    pub async fn row_count(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub fn queries(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn insert_all(&self, records: Vec<NewExchangeRate>) -> Result<Vec<ExchangeRate>> {
        let inserted: Vec<_> = records
            .into_iter()
            .map(|record| record.with_id(Uuid::new_v4()))
            .collect();
        self.rows.lock().await.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn query_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ExchangeRate>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp <= end)
            .cloned()
            .collect())
    }

    async fn delete_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|r| r.timestamp < start || r.timestamp > end);
        Ok((before - rows.len()) as u64)
    }

    async fn query_latest(&self) -> Result<Vec<ExchangeRate>> {
        let rows = self.rows.lock().await;
        let Some(latest) = rows.iter().map(|r| r.timestamp).max() else {
            return Ok(Vec::new());
        };
        Ok(rows
            .iter()
            .filter(|r| r.timestamp == latest)
            .cloned()
            .collect())
    }
}
