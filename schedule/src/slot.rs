//! Time slots and the two fixed slot lists.

use std::fmt;

use chrono::NaiveDate;

use crate::calendar;

#[cfg(test)]
#[path = "slot_test.rs"]
mod slot_test;

/// A half-hour reservation slot, displayed as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

impl TimeSlot {
    #[must_use]
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Morning slots, identical for every date.
pub const MORNING_SLOTS: [TimeSlot; 6] = [
    TimeSlot::new(9, 0),
    TimeSlot::new(9, 30),
    TimeSlot::new(10, 0),
    TimeSlot::new(10, 30),
    TimeSlot::new(11, 0),
    TimeSlot::new(11, 30),
];

/// Afternoon slots on a weekday. Weekends drop the tail, see
/// [`calendar::afternoon_slots_for_date`].
pub const AFTERNOON_SLOTS_FULL: [TimeSlot; 10] = [
    TimeSlot::new(15, 0),
    TimeSlot::new(15, 30),
    TimeSlot::new(16, 0),
    TimeSlot::new(16, 30),
    TimeSlot::new(17, 0),
    TimeSlot::new(17, 30),
    TimeSlot::new(18, 0),
    TimeSlot::new(18, 30),
    TimeSlot::new(19, 0),
    TimeSlot::new(19, 30),
];

/// Which half of the day a slot list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Morning, Period::Afternoon];

    /// Prefix used in element ids (`morning-select-…`, `afternoon-preview-…`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
        }
    }

    /// Section heading shown above the period in both panels.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Morning => "AM",
            Self::Afternoon => "PM",
        }
    }

    /// The slots this period offers on `date`.
    #[must_use]
    pub fn slots_for(self, date: NaiveDate) -> Vec<TimeSlot> {
        match self {
            Self::Morning => MORNING_SLOTS.to_vec(),
            Self::Afternoon => calendar::afternoon_slots_for_date(date),
        }
    }
}
