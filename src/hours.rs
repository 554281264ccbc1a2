//! Hours of operation: the weekly-hours target, per-day-type start/end
//! windows, and the tiered adjustment that distributes a weekly budget over
//! the week.

use crate::daytype::DayType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Daily cap while the budget stays within the weekday+weekend tiers.
const TIERED_DAILY_CAP: f64 = 12.0;
/// Budget absorbed by stretching weekdays before Saturday activates.
const WEEKDAY_TIER: f64 = 60.0;
/// Budget absorbed before Sunday activates.
const SATURDAY_TIER: f64 = 72.0;
/// Beyond this the daily cap floats to `hours_per_week / 7`.
const UNCAPPED_TIER: f64 = 84.0;

/// Operating window of one day-type, in hours-of-day.
///
/// `end < start` means the occupied interval wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub start: f64,
    pub end: f64,
}

impl DayHours {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Occupied hours, accounting for overnight wraparound.
    pub fn occupied_hours(&self) -> f64 {
        if self.end >= self.start {
            self.end - self.start
        } else {
            24.0 + self.end - self.start
        }
    }

    /// Vacant hours (the rest of the day).
    pub fn vacant_hours(&self) -> f64 {
        24.0 - self.occupied_hours()
    }

    /// Symmetrically stretches or shrinks the window to `target` hours.
    ///
    /// Works on the raw `end - start` span (not the wrap-aware occupied
    /// hours), matching the budget allocation this feeds.
    fn stretch_to(&mut self, target: f64) {
        let delta = target - (self.end - self.start);
        self.start -= delta / 2.0;
        self.end += delta / 2.0;
    }
}

impl fmt::Display for DayHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "{:.prec$}-{:.prec$}h", self.start, self.end, prec = prec)
    }
}

/// Day-types whose own template shape must be replaced by the Weekday shape.
///
/// Membership means the weekly budget pushed that day-type past its tier: it
/// is no longer a reduced-activity day but a full operating day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideSet {
    days: BTreeSet<DayType>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day_type: DayType) {
        self.days.insert(day_type);
    }

    pub fn contains(&self, day_type: DayType) -> bool {
        self.days.contains(&day_type)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = DayType> + '_ {
        self.days.iter().copied()
    }
}

/// Weekly-hours target plus nominal operating windows per day-type.
///
/// Constructed once from the target, adjusted once by [`Self::adjusted`], and
/// read-only thereafter by template evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursOfOperation {
    /// Target operating hours per week.
    pub hours_per_week: f64,
    pub weekday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl HoursOfOperation {
    /// Creates hours of operation with the nominal windows:
    /// Weekday 9-17, Saturday 9-12, Sunday 7-18.
    pub fn new(hours_per_week: f64) -> Self {
        Self {
            hours_per_week,
            weekday: DayHours::new(9.0, 17.0),
            saturday: DayHours::new(9.0, 12.0),
            sunday: DayHours::new(7.0, 18.0),
        }
    }

    /// Replaces the nominal windows.
    pub fn with_windows(mut self, weekday: DayHours, saturday: DayHours, sunday: DayHours) -> Self {
        self.weekday = weekday;
        self.saturday = saturday;
        self.sunday = sunday;
        self
    }

    /// Operating window for a day-type. Design days reference the Weekday
    /// window.
    pub fn day(&self, day_type: DayType) -> DayHours {
        match day_type {
            DayType::Saturday => self.saturday,
            DayType::Sunday => self.sunday,
            _ => self.weekday,
        }
    }

    /// Distributes the weekly-hours budget over the week.
    ///
    /// Tiered allocation: the first 60 h/week stretch the weekday window (up
    /// to 12 h/day); the next 12 activate Saturday; the next 12 Sunday;
    /// beyond 84 the daily cap floats to `hours_per_week / 7` (at most 24).
    /// Saturday/Sunday activation is reported through the override set: those
    /// day-types stop being reduced-activity days and take the Weekday
    /// template shape.
    ///
    /// A zero target is a no-op returning the windows unchanged with an empty
    /// override set. Negative targets are outside the documented domain.
    pub fn adjusted(&self) -> (OverrideSet, HoursOfOperation) {
        let mut overrides = OverrideSet::new();
        let mut adjusted = self.clone();
        let hpw = self.hours_per_week;
        if hpw == 0.0 {
            return (overrides, adjusted);
        }

        let max_daily = if hpw > UNCAPPED_TIER {
            (hpw / 7.0).min(24.0)
        } else {
            TIERED_DAILY_CAP
        };

        adjusted.weekday.stretch_to((hpw / 5.0).min(max_daily));

        if hpw > WEEKDAY_TIER {
            adjusted
                .saturday
                .stretch_to((hpw - WEEKDAY_TIER).min(max_daily));
            overrides.insert(DayType::Saturday);
        }

        if hpw > SATURDAY_TIER {
            adjusted
                .sunday
                .stretch_to((hpw - SATURDAY_TIER).min(max_daily));
            overrides.insert(DayType::Sunday);
        }

        (overrides, adjusted)
    }
}
