//! Concrete day schedules: ordered time/value breakpoints and the occupancy
//! queries derived from them.

use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// End of the schedule day in fractional hours.
pub const DAY_END: f64 = 24.0;

/// A single (time, value) pair of a day schedule.
///
/// The value holds from `time` until the next breakpoint (or until the end of
/// the day for the last breakpoint).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Fractional hours from local midnight.
    pub time: f64,
    pub value: f64,
}

impl Breakpoint {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// A right-continuous step function over one day.
///
/// Breakpoint times are non-decreasing; two breakpoints may share a time to
/// encode an instantaneous jump, but never three or more. The day is
/// implicitly closed at 24 h, so the last breakpoint's value holds to
/// midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    breakpoints: Vec<Breakpoint>,
}

impl DaySchedule {
    /// Validates and wraps a breakpoint list.
    pub fn new(breakpoints: Vec<Breakpoint>) -> Result<Self, ScheduleError> {
        if breakpoints.is_empty() {
            return Err(ScheduleError::Empty);
        }
        let mut repeats = 0usize;
        for pair in breakpoints.windows(2) {
            let (prev, next) = (pair[0].time, pair[1].time);
            if next < prev {
                return Err(ScheduleError::Decreasing { prev, next });
            }
            if next == prev {
                repeats += 1;
                if repeats > 1 {
                    return Err(ScheduleError::RepeatedTime { time: next });
                }
            } else {
                repeats = 0;
            }
        }
        for bp in &breakpoints {
            if !(0.0..=DAY_END).contains(&bp.time) {
                return Err(ScheduleError::OutOfRange { time: bp.time });
            }
        }
        Ok(Self { breakpoints })
    }

    /// A schedule holding one value for the whole day.
    pub fn constant(value: f64) -> Self {
        Self {
            breakpoints: vec![Breakpoint::new(0.0, value)],
        }
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Schedule value at a given time of day.
    pub fn value_at(&self, time: f64) -> f64 {
        let mut value = self.breakpoints[0].value;
        for bp in &self.breakpoints {
            if bp.time <= time {
                value = bp.value;
            } else {
                break;
            }
        }
        value
    }

    /// Total hours during which the value is at or above `cutoff`.
    ///
    /// Each breakpoint's value holds until the next breakpoint, with the last
    /// segment closed at 24 h. Runs of breakpoints repeating the same
    /// qualifying value accumulate segment by segment, so the result equals
    /// the occupied-hours figure used by the weekly-hours analysis.
    pub fn duration_above(&self, cutoff: f64) -> f64 {
        let mut total = 0.0;
        for (i, bp) in self.breakpoints.iter().enumerate() {
            if bp.value >= cutoff {
                let next = self
                    .breakpoints
                    .get(i + 1)
                    .map_or(DAY_END, |b| b.time);
                total += next - bp.time;
            }
        }
        total
    }

    /// Time at which the value first crosses from below `cutoff` to at/above.
    ///
    /// Returns 0.0 when the day starts at/above the cutoff, and the same 0.0
    /// sentinel when the cutoff is never reached (no occupied period, not an
    /// error).
    pub fn start_time(&self, cutoff: f64) -> f64 {
        if self.breakpoints[0].value >= cutoff {
            return 0.0;
        }
        let mut prev_above = false;
        for bp in &self.breakpoints {
            let above = bp.value >= cutoff;
            if above && !prev_above {
                return bp.time;
            }
            prev_above = above;
        }
        0.0
    }

    /// Time of the last crossing from at/above `cutoff` back below it.
    ///
    /// If the value never drops back below the cutoff after rising, this
    /// returns the 0.0 sentinel rather than 24. The asymmetry with
    /// [`Self::start_time`] is intentional: it mirrors the legacy analysis
    /// this engine feeds and must not be "fixed" without changing that
    /// consumer.
    pub fn end_time(&self, cutoff: f64) -> f64 {
        let mut end = 0.0;
        let mut above = self.breakpoints[0].value >= cutoff;
        for bp in &self.breakpoints {
            if above && bp.value < cutoff {
                end = bp.time;
            }
            above = bp.value >= cutoff;
        }
        end
    }
}

impl fmt::Display for DaySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "DaySchedule[")?;
        for (i, bp) in self.breakpoints.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.prec$}h={:.prec$}", bp.time, bp.value, prec = prec)?;
        }
        write!(f, "]")
    }
}
