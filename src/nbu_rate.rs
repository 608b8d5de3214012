use chrono::{NaiveDateTime, SubsecRound};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::exchange_rate::NewExchangeRate;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected response shape")]
    UnexpectedShape,
    #[error("response is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("invalid rate record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid rate {value:?} for {code}")]
    InvalidRate {
        code: String,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },
}

impl ParseError {
    /// Soft failures are logged and degrade to an empty result instead of
    /// failing the request.
    pub fn is_soft(&self) -> bool {
        matches!(self, ParseError::UnexpectedShape | ParseError::Malformed(_))
    }
}

/// One element of the NBU `statdirectory/exchange?json` payload.
#[derive(Debug, Deserialize, PartialEq)]
pub struct NbuRate {
    pub txt: String,
    pub cc: String,
    #[serde(deserialize_with = "rate_text")]
    pub rate: String,
}

// NBU sends `rate` as a bare JSON number; some mirrors quote it. Both keep
// their literal text thanks to `arbitrary_precision`.
fn rate_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected decimal string or number, found {other}"
        ))),
    }
}

impl NbuRate {
    fn into_new_rate(self, observed_at: NaiveDateTime) -> Result<NewExchangeRate, ParseError> {
        let text = self.rate.trim();
        let parsed = if text.contains(['e', 'E']) {
            Decimal::from_scientific(text)
        } else {
            // rejects digits that `Decimal` would otherwise round away
            Decimal::from_str_exact(text)
        };
        let rate = parsed
            .map_err(|source| ParseError::InvalidRate {
                code: self.cc.clone(),
                value: self.rate.clone(),
                source,
            })?;

        Ok(NewExchangeRate {
            base_currency_name: self.txt,
            target_currency_code: self.cc,
            rate,
            timestamp: observed_at,
        })
    }
}

pub fn parse_rates(
    raw: &str,
    observed_at: NaiveDateTime,
) -> Result<Vec<NewExchangeRate>, ParseError> {
    let root: Value = serde_json::from_str(raw).map_err(ParseError::Malformed)?;
    let Value::Array(items) = root else {
        return Err(ParseError::UnexpectedShape);
    };

    let observed_at = observed_at.trunc_subsecs(6);

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let nbu_rate: NbuRate = serde_json::from_value(item)
                .map_err(|source| ParseError::InvalidRecord { index, source })?;
            nbu_rate.into_new_rate(observed_at)
        })
        .collect()
}
