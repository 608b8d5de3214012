use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tokio::sync::Mutex;

use crate::error::{RatesError, Result};
use crate::exchange_rate::ExchangeRate;
use crate::nbu_client::RatesSource;
use crate::nbu_rate::{ParseError, parse_rates};
use crate::store::RateStore;

/// Outcome of asking for today's rates.
#[derive(Debug)]
pub enum CurrentRates {
    /// Today's rows were already stored.
    Stored(Vec<ExchangeRate>),
    /// Nothing was stored for today; these rows were just fetched and inserted.
    Fetched(Vec<ExchangeRate>),
    /// Upstream answered with something that is not a rate list. Nothing was stored.
    SoftFailure(ParseError),
}

impl CurrentRates {
    pub fn into_rates(self) -> Vec<ExchangeRate> {
        match self {
            CurrentRates::Stored(rates) | CurrentRates::Fetched(rates) => rates,
            CurrentRates::SoftFailure(e) => {
                log::error!("Incorrect structure of the NBU response: {}", e);
                Vec::new()
            }
        }
    }
}

/// Inclusive `[00:00:00, 23:59:59.999999999]` interval of `date`.
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    (start, start + TimeDelta::days(1) - TimeDelta::nanoseconds(1))
}

fn require_date(date: Option<NaiveDate>) -> Result<NaiveDate> {
    date.ok_or_else(|| RatesError::InvalidArgument("date is required".to_string()))
}

pub struct RateService {
    store: Arc<dyn RateStore>,
    source: Arc<dyn RatesSource>,
    // Held while today's rows are fetched and inserted, so overlapping
    // callers on a miss populate the day once.
    populate: Mutex<()>,
}

impl RateService {
    pub fn new(store: Arc<dyn RateStore>, source: Arc<dyn RatesSource>) -> Self {
        Self {
            store,
            source,
            populate: Mutex::new(()),
        }
    }

    pub async fn get_current_rates(&self) -> Result<CurrentRates> {
        let now = Local::now().naive_local();
        let today = now.date();
        let (start, end) = day_bounds(today);

        let stored = self.store.query_range(start, end).await?;
        if !stored.is_empty() {
            return Ok(CurrentRates::Stored(stored));
        }

        let _guard = self.populate.lock().await;
        let stored = self.store.query_range(start, end).await?;
        if !stored.is_empty() {
            return Ok(CurrentRates::Stored(stored));
        }

        log::info!("No exchange rates stored for {}, fetching from NBU", today);
        let raw = self.source.fetch_latest_rates_raw().await?;

        match parse_rates(&raw, now) {
            Ok(records) => {
                let inserted = self.store.insert_all(records).await?;
                log::info!("Stored {} exchange rates for {}", inserted.len(), today);
                Ok(CurrentRates::Fetched(inserted))
            }
            Err(e) if e.is_soft() => Ok(CurrentRates::SoftFailure(e)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_rates_by_date(&self, date: Option<NaiveDate>) -> Result<Vec<ExchangeRate>> {
        let date = require_date(date)?;
        log::info!("Loading exchange rates for {}", date);
        let (start, end) = day_bounds(date);
        self.store.query_range(start, end).await
    }

    pub async fn delete_rates_by_date(&self, date: Option<NaiveDate>) -> Result<u64> {
        let date = require_date(date)?;
        let (start, end) = day_bounds(date);
        let deleted = self.store.delete_range(start, end).await?;
        log::info!("Deleted {} exchange rates for {}", deleted, date);
        Ok(deleted)
    }

    pub async fn get_latest_rates(&self) -> Result<Vec<ExchangeRate>> {
        self.store.query_latest().await
    }
}
