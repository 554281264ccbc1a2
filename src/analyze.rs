//! Week-profile analysis: the inverse of template evaluation.
//!
//! Given concrete day schedules and the calendar days each rule covers, this
//! recovers the weekly occupied-hours figure a synthesis run was asked for,
//! which makes synthesized weeks checkable end to end.

use crate::daytype::{DayOfWeek, DaySet, DayType};
use crate::schedule::DaySchedule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A day schedule applying to an explicit set of calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRule {
    pub days: DaySet,
    pub schedule: DaySchedule,
}

impl WeekRule {
    pub fn new(days: DaySet, schedule: DaySchedule) -> Self {
        Self { days, schedule }
    }
}

/// A week of schedules: specific rules plus the default schedule covering the
/// remaining calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekProfile {
    pub default: DaySchedule,
    pub rules: Vec<WeekRule>,
}

impl WeekProfile {
    pub fn new(default: DaySchedule) -> Self {
        Self {
            default,
            rules: Vec::new(),
        }
    }

    /// Adds a rule and returns the profile.
    pub fn with_rule(mut self, days: DaySet, schedule: DaySchedule) -> Self {
        self.rules.push(WeekRule::new(days, schedule));
        self
    }

    /// Builds a profile from an evaluated day-type map: Weekday becomes the
    /// default rule, Saturday/Sunday become single-day rules, design days are
    /// reference-only and ignored. `None` without a Weekday entry.
    pub fn from_day_schedules(week: &BTreeMap<DayType, DaySchedule>) -> Option<Self> {
        let mut profile = Self::new(week.get(&DayType::Weekday)?.clone());
        if let Some(saturday) = week.get(&DayType::Saturday) {
            profile = profile.with_rule(DaySet::only(DayOfWeek::Saturday), saturday.clone());
        }
        if let Some(sunday) = week.get(&DayType::Sunday) {
            profile = profile.with_rule(DaySet::only(DayOfWeek::Sunday), sunday.clone());
        }
        Some(profile)
    }

    /// Calendar days per week left to the default schedule.
    pub fn default_day_count(&self) -> usize {
        7usize.saturating_sub(self.rules.iter().map(|r| r.days.count()).sum())
    }

    /// Occupied hours per week at the given cutoff, weighting each rule by
    /// the calendar days it covers and the default by the remainder.
    pub fn weekly_hours(&self, cutoff: f64) -> f64 {
        let rule_hours: f64 = self
            .rules
            .iter()
            .map(|rule| rule.schedule.duration_above(cutoff) * rule.days.count() as f64)
            .sum();
        rule_hours + self.default.duration_above(cutoff) * self.default_day_count() as f64
    }
}
