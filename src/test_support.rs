use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::nbu_client::{RatesSource, TransportError};

#[derive(Debug)]
enum Reply {
    Body(String),
    Status(StatusCode),
}

/// Canned upstream that counts how often it was asked.
#[derive(Debug)]
pub struct FakeSource {
    reply: Reply,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn body(body: &str) -> Self {
        Self::new(Reply::Body(body.to_string()))
    }

    pub fn failing(status: StatusCode) -> Self {
        Self::new(Reply::Status(status))
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RatesSource for FakeSource {
    async fn fetch_latest_rates_raw(&self) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status) => Err(TransportError::Status {
                url: "http://nbu.test/exchange".to_string(),
                status: *status,
            }),
        }
    }
}
