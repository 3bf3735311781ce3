//! Next-prayer selection.

use crate::clock::Clock;
use crate::schedule::{Prayer, Schedule};

/// The prayer a scan settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPrayer {
    /// The selected prayer.
    pub prayer: Prayer,
    /// Its scheduled time today. When `wrapped` is set this is not a
    /// future instant; it already passed and belongs to tomorrow's cycle.
    pub time: Clock,
    /// True when every event today had passed and selection wrapped
    /// around to the first event of the schedule.
    pub wrapped: bool,
}

/// Picks the first event strictly later than `now`, in day order.
///
/// An event exactly at `now` counts as current, not next. When nothing
/// later is left, selection wraps to the first event of the day and
/// reports its own time.
pub fn next_prayer(now: Clock, schedule: &Schedule) -> NextPrayer {
    let events = schedule.events();
    for (prayer, time) in events {
        if time > now {
            return NextPrayer {
                prayer,
                time,
                wrapped: false,
            };
        }
    }
    let (prayer, time) = events[0];
    NextPrayer {
        prayer,
        time,
        wrapped: true,
    }
}
