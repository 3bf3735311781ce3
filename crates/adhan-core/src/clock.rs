//! Minute-of-day clock times.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A time of day, stored as minutes since midnight (0..=1439).
///
/// Schedule times arrive as zero-padded `"HH:MM"` strings; once parsed,
/// ordering and equality are plain integer comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Clock(u16);

/// Error for strings that are not a zero-padded `"HH:MM"` clock time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockParseError {
    /// Not two 2-digit fields separated by a colon.
    #[error("expected HH:MM, got {0:?}")]
    Malformed(String),
    /// Shape was right but the hour or minute is out of range.
    #[error("hour or minute out of range in {0:?}")]
    OutOfRange(String),
}

impl Clock {
    /// Builds a clock time from an hour (0-23) and a minute (0-59).
    pub fn from_hm(hour: u16, minute: u16) -> Option<Clock> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Clock(hour * 60 + minute))
    }

    /// Reads the local wall clock, truncated to the minute.
    pub fn now_local() -> Clock {
        let now = Local::now();
        Clock((now.hour() * 60 + now.minute()) as u16)
    }

    /// Minutes since midnight.
    pub fn minute_of_day(self) -> u16 {
        self.0
    }
}

impl FromStr for Clock {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClockParseError::Malformed(s.to_owned());
        let (h, m) = s.split_once(':').ok_or_else(malformed)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(malformed());
        }
        if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let hour: u16 = h.parse().map_err(|_| malformed())?;
        let minute: u16 = m.parse().map_err(|_| malformed())?;
        Clock::from_hm(hour, minute).ok_or_else(|| ClockParseError::OutOfRange(s.to_owned()))
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_hhmm() {
        assert_eq!("05:30".parse::<Clock>().unwrap(), Clock::from_hm(5, 30).unwrap());
        assert_eq!("00:00".parse::<Clock>().unwrap().minute_of_day(), 0);
        assert_eq!("23:59".parse::<Clock>().unwrap().minute_of_day(), 1439);
    }

    #[test]
    fn rejects_bad_shapes() {
        for s in ["", "0530", "5:30", "05:3", "05-30", "ab:cd", "05:30 PM", " 05:30"] {
            assert!(
                matches!(s.parse::<Clock>(), Err(ClockParseError::Malformed(_))),
                "{s:?} should be malformed"
            );
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for s in ["24:00", "25:10", "12:60", "99:99"] {
            assert!(
                matches!(s.parse::<Clock>(), Err(ClockParseError::OutOfRange(_))),
                "{s:?} should be out of range"
            );
        }
    }

    #[test]
    fn display_zero_pads() {
        assert_eq!(Clock::from_hm(5, 3).unwrap().to_string(), "05:03");
        assert_eq!(Clock::from_hm(0, 0).unwrap().to_string(), "00:00");
        assert_eq!(Clock::from_hm(19, 45).unwrap().to_string(), "19:45");
    }

    #[test]
    fn orders_as_minutes() {
        let nine = Clock::from_hm(9, 0).unwrap();
        let ten = Clock::from_hm(10, 0).unwrap();
        assert!(nine < ten);
        assert!(Clock::from_hm(9, 59).unwrap() < ten);
        assert_eq!("09:00".parse::<Clock>().unwrap(), nine);
    }

    #[test]
    fn from_hm_bounds() {
        assert!(Clock::from_hm(23, 59).is_some());
        assert!(Clock::from_hm(24, 0).is_none());
        assert!(Clock::from_hm(0, 60).is_none());
    }

    #[test]
    fn now_local_is_in_range() {
        assert!(Clock::now_local().minute_of_day() <= 1439);
    }
}
