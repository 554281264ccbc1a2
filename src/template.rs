//! Symbolic schedule templates and the canonical template library.
//!
//! A template describes one schedule's day shapes in terms of the operating
//! window tokens, so one set of shapes serves any hours of operation. The
//! canonical library entries are plain data with documented defaults; callers
//! override any of them by inserting a template of the same name.

use crate::error::{ExprError, TemplateError};
use crate::expr::{TimeExpr, TimeToken, ValueExpr};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One symbolic breakpoint of a day template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBreakpoint {
    pub time: TimeExpr,
    pub value: ValueExpr,
}

impl TemplateBreakpoint {
    pub fn new(time: TimeExpr, value: ValueExpr) -> Self {
        Self { time, value }
    }

    /// Breakpoint with a plain numeric value.
    pub fn at(time: TimeExpr, value: f64) -> Self {
        Self::new(time, ValueExpr::Const(value))
    }
}

/// Ordered symbolic breakpoints for one day-type.
///
/// Authored in increasing time order; the first breakpoint sits at time 0 in
/// all canonical templates so the step function covers the whole day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTemplate {
    pub breakpoints: Vec<TemplateBreakpoint>,
}

impl DayTemplate {
    pub fn new(breakpoints: Vec<TemplateBreakpoint>) -> Self {
        Self { breakpoints }
    }

    /// Parses `(time expression, value)` string pairs, the form templates
    /// arrive in from the host document.
    pub fn parse(entries: &[(&str, &str)]) -> Result<Self, ExprError> {
        let mut breakpoints = Vec::with_capacity(entries.len());
        for (time, value) in entries {
            breakpoints.push(TemplateBreakpoint::new(
                TimeExpr::parse(time)?,
                ValueExpr::parse(value)?,
            ));
        }
        Ok(Self::new(breakpoints))
    }

    /// A constant full-day level.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![TemplateBreakpoint::at(TimeExpr::constant(0.0), value)])
    }
}

/// A named schedule template: a Weekday shape, optional Saturday/Sunday
/// shapes, and optional constant design-day levels.
///
/// Missing Saturday/Sunday shapes fall back to the Weekday shape at
/// evaluation time, as does any day-type named in the override set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    pub name: String,
    pub weekday: DayTemplate,
    pub saturday: Option<DayTemplate>,
    pub sunday: Option<DayTemplate>,
    pub winter_design_value: Option<f64>,
    pub summer_design_value: Option<f64>,
}

impl ScheduleTemplate {
    pub fn new(name: &str, weekday: DayTemplate) -> Self {
        Self {
            name: name.to_string(),
            weekday,
            saturday: None,
            sunday: None,
            winter_design_value: None,
            summer_design_value: None,
        }
    }

    /// Parses the weekday shape from string pairs, wrapping parse failures
    /// with the template name.
    pub fn parse(name: &str, weekday: &[(&str, &str)]) -> Result<Self, TemplateError> {
        let weekday = DayTemplate::parse(weekday).map_err(|source| TemplateError::Parse {
            template: name.to_string(),
            source,
        })?;
        Ok(Self::new(name, weekday))
    }

    pub fn with_saturday(mut self, saturday: DayTemplate) -> Self {
        self.saturday = Some(saturday);
        self
    }

    pub fn with_sunday(mut self, sunday: DayTemplate) -> Self {
        self.sunday = Some(sunday);
        self
    }

    /// Sets the constant winter/summer design-day levels.
    pub fn with_design_values(mut self, winter: f64, summer: f64) -> Self {
        self.winter_design_value = Some(winter);
        self.summer_design_value = Some(summer);
        self
    }
}

/// The template configuration handed to evaluation.
///
/// An explicit object rather than a module-level table: callers start from
/// [`TemplateLibrary::standard`] (or empty) and insert overrides by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateLibrary {
    templates: BTreeMap<String, ScheduleTemplate>,
}

impl TemplateLibrary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The canonical office-week templates.
    ///
    /// Shapes are expressed entirely in window tokens so they track the
    /// adjusted hours of operation. Saturday/Sunday entries stay below a 0.5
    /// occupancy cutoff until the weekly budget overrides them onto the
    /// Weekday shape.
    pub fn standard() -> Self {
        let mut lib = Self::empty();
        for template in [
            Self::lighting(),
            Self::electric_equipment(),
            Self::gas_equipment(),
            Self::occupancy(),
            Self::infiltration(),
            Self::hvac_availability(),
            Self::service_hot_water(),
            Self::thermostat_setback(),
        ] {
            lib.insert(template);
        }
        lib
    }

    /// Inserts a template, replacing any existing entry of the same name.
    pub fn insert(&mut self, template: ScheduleTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    pub fn get(&self, name: &str) -> Option<&ScheduleTemplate> {
        self.templates.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn lighting() -> ScheduleTemplate {
        ScheduleTemplate::new(
            "lighting",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.05),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start).minus(2.0), 0.1),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start).minus(1.0), 0.3),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.9),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.5),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End).plus(1.0), 0.3),
                TemplateBreakpoint::at(
                    TimeExpr::token(TimeToken::End).plus_scaled(TimeToken::Vac, 0.35),
                    0.05,
                ),
            ]),
        )
        .with_saturday(DayTemplate::new(vec![
            TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.05),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start).minus(1.0), 0.1),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.45),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.15),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::End).plus(1.0), 0.05),
        ]))
        .with_sunday(DayTemplate::constant(0.05))
        .with_design_values(0.0, 1.0)
    }

    fn electric_equipment() -> ScheduleTemplate {
        ScheduleTemplate::new(
            "electric_equipment",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.25),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.85),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.45),
                TemplateBreakpoint::at(
                    TimeExpr::token(TimeToken::End).plus_scaled(TimeToken::Vac, 0.25),
                    0.25,
                ),
            ]),
        )
        .with_saturday(DayTemplate::new(vec![
            TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.25),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.4),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.25),
        ]))
        .with_sunday(DayTemplate::constant(0.25))
        .with_design_values(0.0, 1.0)
    }

    fn gas_equipment() -> ScheduleTemplate {
        ScheduleTemplate::new(
            "gas_equipment",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.1),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.6),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.1),
            ]),
        )
        .with_saturday(DayTemplate::new(vec![
            TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.1),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.3),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.1),
        ]))
        .with_sunday(DayTemplate::constant(0.1))
        .with_design_values(0.0, 1.0)
    }

    fn occupancy() -> ScheduleTemplate {
        ScheduleTemplate::new(
            "occupancy",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.0),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start).minus(1.0), 0.2),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.95),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.3),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End).plus(1.0), 0.0),
            ]),
        )
        .with_saturday(DayTemplate::new(vec![
            TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.0),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.3),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.0),
        ]))
        .with_sunday(DayTemplate::constant(0.0))
        .with_design_values(0.0, 1.0)
    }

    fn infiltration() -> ScheduleTemplate {
        // Inverse of occupancy: full infiltration while the HVAC is off.
        ScheduleTemplate::new(
            "infiltration",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 1.0),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.25),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 1.0),
            ]),
        )
        .with_saturday(DayTemplate::new(vec![
            TemplateBreakpoint::at(TimeExpr::constant(0.0), 1.0),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.25),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 1.0),
        ]))
        .with_sunday(DayTemplate::constant(1.0))
        .with_design_values(1.0, 1.0)
    }

    fn hvac_availability() -> ScheduleTemplate {
        ScheduleTemplate::new(
            "hvac_availability",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.0),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start).minus(1.0), 1.0),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End).plus(1.0), 0.0),
            ]),
        )
        .with_saturday(DayTemplate::new(vec![
            TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.0),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 1.0),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.0),
        ]))
        .with_sunday(DayTemplate::constant(0.0))
        .with_design_values(1.0, 1.0)
    }

    fn service_hot_water() -> ScheduleTemplate {
        ScheduleTemplate::new(
            "service_hot_water",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.05),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start).minus(2.0), 0.1),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.5),
                TemplateBreakpoint::at(
                    TimeExpr::token(TimeToken::Start).plus_scaled(TimeToken::Occ, 0.5),
                    0.7,
                ),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.3),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End).plus(2.0), 0.05),
            ]),
        )
        .with_saturday(DayTemplate::new(vec![
            TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.05),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 0.3),
            TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.05),
        ]))
        .with_sunday(DayTemplate::constant(0.05))
        .with_design_values(1.0, 1.0)
    }

    fn thermostat_setback() -> ScheduleTemplate {
        // One shape, two evaluations: heating substitutes
        // floor=setback/ceiling=setpoint, cooling the inverse levels.
        ScheduleTemplate::new(
            "thermostat_setback",
            DayTemplate::new(vec![
                TemplateBreakpoint::new(TimeExpr::constant(0.0), ValueExpr::Floor),
                TemplateBreakpoint::new(
                    TimeExpr::token(TimeToken::Start).minus(2.0),
                    ValueExpr::Ceiling,
                ),
                TemplateBreakpoint::new(
                    TimeExpr::token(TimeToken::End).plus(2.0),
                    ValueExpr::Floor,
                ),
            ]),
        )
    }
}
