//! The day's schedule and the prayers eligible for selection.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// The daily prayers considered by next-prayer selection, in day order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prayer {
    /// Dawn prayer, first of the day.
    Fajr,
    /// Sunrise. Not a prayer proper but announced like one.
    Sunrise,
    /// Noon prayer.
    Dhuhr,
    /// Afternoon prayer.
    Asr,
    /// Sunset prayer.
    Maghrib,
    /// Night prayer, last of the day.
    Isha,
}

impl Prayer {
    /// All selection candidates in day order.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Display name, spelled the way the schedule service spells it.
    pub fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

/// One day of prayer times.
///
/// The six `Prayer` fields are the selection candidates; the provider
/// hands them back in ascending order and selection relies on that.
/// Sunset, imsak and midnight ride along for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Fajr time.
    pub fajr: Clock,
    /// Sunrise time.
    pub sunrise: Clock,
    /// Dhuhr time.
    pub dhuhr: Clock,
    /// Asr time.
    pub asr: Clock,
    /// Maghrib time.
    pub maghrib: Clock,
    /// Isha time.
    pub isha: Clock,
    /// Sunset time. Informational, never selected.
    pub sunset: Clock,
    /// Imsak time. Informational, never selected.
    pub imsak: Clock,
    /// Islamic midnight. Informational, never selected.
    pub midnight: Clock,
}

impl Schedule {
    /// The time of one selection candidate.
    pub fn time_of(&self, prayer: Prayer) -> Clock {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// The six selection candidates paired with their times, in day order.
    pub fn events(&self) -> [(Prayer, Clock); 6] {
        Prayer::ALL.map(|p| (p, self.time_of(p)))
    }
}
