//! Runtime configuration assembled from command-line flags.

use std::time::Duration;

/// Where and how to ask for the day's schedule.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base endpoint, `timingsByCity` shaped.
    pub api_url: String,
    pub city: String,
    pub country: String,
    /// Calculation method id as the service defines them (3 = Muslim
    /// World League).
    pub method: u8,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            api_url: "http://api.aladhan.com/v1/timingsByCity".to_owned(),
            city: "Boynton Beach".to_owned(),
            country: "United States".to_owned(),
            method: 3,
        }
    }
}

/// Cadence of the monitor loop.
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Pause between cycles that fetched successfully.
    pub poll_interval: Duration,
    /// Pause before trying again after a failed fetch.
    pub retry_delay: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            poll_interval: Duration::from_secs(60),
            retry_delay: Duration::from_secs(60),
        }
    }
}
