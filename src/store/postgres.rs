use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::RateStore;
use crate::error::Result;
use crate::exchange_rate::{ExchangeRate, NewExchangeRate};

const COLUMNS: &str = "id, base_currency_name, target_currency_code, rate, recorded_at";

#[derive(Debug, Clone)]
pub struct PgRateStore {
    pool: PgPool,
}

impl PgRateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateStore for PgRateStore {
    async fn insert_all(&self, records: Vec<NewExchangeRate>) -> Result<Vec<ExchangeRate>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO exchange_rate (id, base_currency_name, target_currency_code, rate, recorded_at) ",
        );
        builder.push_values(records, |mut row, record| {
            row.push_bind(Uuid::new_v4())
                .push_bind(record.base_currency_name)
                .push_bind(record.target_currency_code)
                .push_bind(record.rate)
                .push_bind(record.timestamp);
        });
        builder.push(" RETURNING ");
        builder.push(COLUMNS);

        let mut tx = self.pool.begin().await?;
        let inserted = builder
            .build_query_as::<ExchangeRate>()
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(inserted)
    }

    async fn query_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ExchangeRate>> {
        let rates = sqlx::query_as::<_, ExchangeRate>(&format!(
            "SELECT {COLUMNS} FROM exchange_rate \
             WHERE recorded_at BETWEEN $1 AND $2 ORDER BY seq"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rates)
    }

    async fn delete_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<u64> {
        let result = sqlx::query("DELETE FROM exchange_rate WHERE recorded_at BETWEEN $1 AND $2")
            .bind(start)
            .bind(end)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn query_latest(&self) -> Result<Vec<ExchangeRate>> {
        let rates = sqlx::query_as::<_, ExchangeRate>(&format!(
            "SELECT {COLUMNS} FROM exchange_rate \
             WHERE recorded_at = (SELECT MAX(recorded_at) FROM exchange_rate) ORDER BY seq"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rates)
    }
}
