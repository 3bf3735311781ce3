//! The schedule source seam and its aladhan.com implementation.

use adhan_core::wire::{TimingsResponse, WireError};
use adhan_core::Schedule;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::config::FetchConfig;

/// Error fetching or decoding the day's schedule.
///
/// The whole program recovers these locally: the monitor backs off and
/// retries, the command loop re-prompts. Nothing propagates further.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, non-success HTTP status or an undecodable body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The body decoded but could not become a schedule.
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Anything that can produce today's schedule on demand.
///
/// Every call is a fresh, self-contained fetch; implementations must
/// not cache across calls.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetches today's schedule.
    async fn fetch(&self) -> Result<Schedule, FetchError>;
}

/// aladhan.com `timingsByCity` client.
#[derive(Debug, Clone)]
pub struct AladhanClient {
    http: reqwest::Client,
    config: FetchConfig,
}

impl AladhanClient {
    /// Builds a client over a shared connection pool.
    pub fn new(config: FetchConfig) -> Self {
        AladhanClient {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ScheduleSource for AladhanClient {
    async fn fetch(&self) -> Result<Schedule, FetchError> {
        let method = self.config.method.to_string();
        let resp = self
            .http
            .get(&self.config.api_url)
            .query(&[
                ("city", self.config.city.as_str()),
                ("country", self.config.country.as_str()),
                ("method", method.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: TimingsResponse = resp.json().await?;
        debug!("fetched prayer times for {}", self.config.city);
        Ok(body.into_schedule()?)
    }
}
