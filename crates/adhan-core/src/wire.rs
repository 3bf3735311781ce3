//! Serde mirror of the aladhan.com `timingsByCity` response.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{Clock, ClockParseError};
use crate::schedule::Schedule;

/// Top-level envelope: `{ code, status, data }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingsResponse {
    pub code: u16,
    pub status: String,
    pub data: TimingsData,
}

/// Payload wrapper around the timings map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingsData {
    pub timings: WireTimings,
}

/// Raw timing strings, keyed the way the service spells them.
///
/// Unknown keys (Firstthird, Lastthird, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireTimings {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub sunset: String,
    pub maghrib: String,
    pub isha: String,
    pub imsak: String,
    pub midnight: String,
}

/// Why a decoded response could not become a [`Schedule`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The envelope carried a non-success code.
    #[error("service answered {code} {status}")]
    Status { code: u16, status: String },
    /// A timing string did not start with an `HH:MM` token.
    #[error("bad {field} time: {source}")]
    Time {
        field: &'static str,
        #[source]
        source: ClockParseError,
    },
}

impl TimingsResponse {
    /// Validates the envelope and parses the timing strings.
    pub fn into_schedule(self) -> Result<Schedule, WireError> {
        if self.code != 200 {
            return Err(WireError::Status {
                code: self.code,
                status: self.status,
            });
        }
        let t = self.data.timings;
        Ok(Schedule {
            fajr: parse_timing("Fajr", &t.fajr)?,
            sunrise: parse_timing("Sunrise", &t.sunrise)?,
            dhuhr: parse_timing("Dhuhr", &t.dhuhr)?,
            asr: parse_timing("Asr", &t.asr)?,
            maghrib: parse_timing("Maghrib", &t.maghrib)?,
            isha: parse_timing("Isha", &t.isha)?,
            sunset: parse_timing("Sunset", &t.sunset)?,
            imsak: parse_timing("Imsak", &t.imsak)?,
            midnight: parse_timing("Midnight", &t.midnight)?,
        })
    }
}

/// Some endpoints suffix a zone hint after the clock, e.g. `"05:30 (EDT)"`.
/// Only the first whitespace-delimited token counts.
fn parse_timing(field: &'static str, raw: &str) -> Result<Clock, WireError> {
    let token = raw.split_whitespace().next().unwrap_or(raw);
    token
        .parse()
        .map_err(|source| WireError::Time { field, source })
}
