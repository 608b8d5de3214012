use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
}

/// Where today's raw rate payload comes from.
#[async_trait]
pub trait RatesSource: Send + Sync {
    async fn fetch_latest_rates_raw(&self) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct NbuClient {
    http: Client,
    url: String,
}

impl NbuClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }

    async fn load_json(&self) -> Result<String, TransportError> {
        let request_error = |source: reqwest::Error| TransportError::Request {
            url: self.url.clone(),
            source,
        };

        let resp = self.http.get(&self.url).send().await.map_err(request_error)?;
        if !resp.status().is_success() {
            return Err(TransportError::Status {
                url: self.url.clone(),
                status: resp.status(),
            });
        }

        resp.text().await.map_err(request_error)
    }
}

#[async_trait]
impl RatesSource for NbuClient {
    async fn fetch_latest_rates_raw(&self) -> Result<String, TransportError> {
        log::info!("Requesting latest exchange rates from {}", self.url);

        match self.load_json().await {
            Ok(text) => {
                log::info!("Received {} bytes from NBU API", text.len());
                log::debug!("Response from NBU API: {}", text);
                Ok(text)
            }
            Err(e) => {
                log::error!("Error while fetching data from NBU API: {}", e);
                Err(e)
            }
        }
    }
}
