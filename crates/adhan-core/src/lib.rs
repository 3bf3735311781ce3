#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Prayer schedule model and next-prayer selection for the adhan monitor.

pub mod clock;
pub mod schedule;
pub mod select;
pub mod wire;

pub use clock::{Clock, ClockParseError};
pub use schedule::{Prayer, Schedule};
pub use select::{next_prayer, NextPrayer};
