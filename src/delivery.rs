//! Delivery of stats records to the remote statistics service.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use thiserror::Error;

use crate::model::RunStats;

/// Shared HTTP client for all deliveries.
///
/// One connection pool for the process. The request timeout bounds how long
/// a slow endpoint can stall run-event dispatch.
static SHARED_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .pool_max_idle_per_host(5)
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create shared HTTP client")
});

/// Returns the process-wide shared HTTP client.
pub fn shared_client() -> &'static Client {
    &SHARED_CLIENT
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint rejected record with status {status}")]
    Rejected { status: u16 },
}

/// Destination for completed stats records.
///
/// The production implementation posts over HTTP; tests substitute a
/// recording sink.
#[async_trait]
pub trait StatsSink: Send + Sync {
    /// Deliver one record to `endpoint`. A single attempt: no retry, no
    /// backoff, no state kept between calls.
    async fn post(&self, endpoint: &str, stats: &RunStats) -> Result<(), DeliveryError>;
}

/// JSON-over-HTTP delivery through the shared client.
#[derive(Default)]
pub struct HttpStatsSink;

impl HttpStatsSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatsSink for HttpStatsSink {
    async fn post(&self, endpoint: &str, stats: &RunStats) -> Result<(), DeliveryError> {
        let response = shared_client().post(endpoint).json(stats).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
