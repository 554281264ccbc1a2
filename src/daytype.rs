//! Day-type and day-of-week classification for weekly schedules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Schedule day-type selector.
///
/// `Weekday` is the default rule; `Saturday` and `Sunday` may carry rules of
/// their own. Design days are reference profiles for sizing runs and never
/// count toward weekly totals.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
    WinterDesignDay,
    SummerDesignDay,
}

impl DayType {
    /// Returns true for the sizing-run reference day-types.
    pub fn is_design_day(&self) -> bool {
        matches!(self, Self::WinterDesignDay | Self::SummerDesignDay)
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Weekday => "Weekday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
            Self::WinterDesignDay => "WinterDesignDay",
            Self::SummerDesignDay => "SummerDesignDay",
        };
        write!(f, "{}", name)
    }
}

/// Calendar day of the week.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];
}

/// Set of calendar days a schedule rule applies to.
///
/// Rules carry an explicit enumerated set so applicable days are counted
/// directly instead of queried through per-day boolean accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySet {
    days: BTreeSet<DayOfWeek>,
}

impl DaySet {
    /// Creates an empty set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a set containing a single day.
    pub fn only(day: DayOfWeek) -> Self {
        Self::none().with(day)
    }

    /// Monday through Friday.
    pub fn weekdays() -> Self {
        Self::none()
            .with(DayOfWeek::Monday)
            .with(DayOfWeek::Tuesday)
            .with(DayOfWeek::Wednesday)
            .with(DayOfWeek::Thursday)
            .with(DayOfWeek::Friday)
    }

    /// Saturday and Sunday.
    pub fn weekend() -> Self {
        Self::none().with(DayOfWeek::Saturday).with(DayOfWeek::Sunday)
    }

    /// Adds a day and returns the set.
    pub fn with(mut self, day: DayOfWeek) -> Self {
        self.days.insert(day);
        self
    }

    pub fn contains(&self, day: DayOfWeek) -> bool {
        self.days.contains(&day)
    }

    /// Number of calendar days per week this set covers.
    pub fn count(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.days.iter().copied()
    }
}
