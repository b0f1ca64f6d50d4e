//! HTTP export endpoint serving a JSON snapshot

use std::time::Duration;

use super::{OrderSource, Snapshot};
use crate::types::{RawOrder, Result, SalesError};

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct RemoteSource {
    url: String,
    timeout: Duration,
}

impl RemoteSource {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl OrderSource for RemoteSource {
    fn name(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<RawOrder>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SalesError::Fetch(format!("HTTP client error: {}", e)))?;

        tracing::debug!(url = %self.url, "fetching order snapshot");
        let response = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SalesError::Fetch(format!("{}: {}", self.url, e)))?;

        let snapshot: Snapshot = response
            .json()
            .map_err(|e| SalesError::Fetch(format!("{}: invalid snapshot: {}", self.url, e)))?;

        Ok(snapshot.into_orders())
    }
}
