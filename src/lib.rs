//! Parametric operating-schedule engine for building-energy models.
//!
//! The engine turns a weekly-hours target and symbolic schedule templates
//! into concrete day-long step functions, and analyzes concrete schedules
//! back into occupied hours:
//!
//! 1. [`HoursOfOperation::adjusted`] distributes the weekly budget over
//!    weekday/Saturday/Sunday windows and reports which weekend day-types
//!    become full operating days.
//! 2. [`evaluate`] resolves a token-based [`ScheduleTemplate`] against the
//!    adjusted windows into a [`DaySchedule`] per day-type.
//! 3. [`WeekProfile::weekly_hours`] recovers the weekly occupied hours from
//!    concrete schedules, closing the synthesis/analysis round trip.

pub mod analyze;
pub mod daytype;
pub mod error;
pub mod evaluate;
pub mod expr;
pub mod hours;
pub mod schedule;
pub mod template;
pub mod units;

// Prelude
pub use analyze::{WeekProfile, WeekRule};
pub use daytype::{DayOfWeek, DaySet, DayType};
pub use error::{ExprError, ScheduleError, TemplateError};
pub use evaluate::{evaluate, evaluate_setpoint_pair};
pub use expr::{TimeExpr, TimeToken, ValueExpr, ValueSubstitutions};
pub use hours::{DayHours, HoursOfOperation, OverrideSet};
pub use schedule::{Breakpoint, DaySchedule};
pub use template::{DayTemplate, ScheduleTemplate, TemplateBreakpoint, TemplateLibrary};
pub use units::convert;
