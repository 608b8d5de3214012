use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored rate of one currency at the moment its batch was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub id: Uuid,
    pub base_currency_name: String,
    pub target_currency_code: String,
    pub rate: Decimal,
    #[sqlx(rename = "recorded_at")]
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExchangeRate {
    pub base_currency_name: String,
    pub target_currency_code: String,
    pub rate: Decimal,
    pub timestamp: NaiveDateTime,
}

impl NewExchangeRate {
    pub fn with_id(self, id: Uuid) -> ExchangeRate {
        ExchangeRate {
            id,
            base_currency_name: self.base_currency_name,
            target_currency_code: self.target_currency_code,
            rate: self.rate,
            timestamp: self.timestamp,
        }
    }
}
