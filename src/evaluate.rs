//! Template evaluation: symbolic day templates against adjusted hours of
//! operation, producing concrete day schedules per day-type.

use crate::daytype::DayType;
use crate::error::TemplateError;
use crate::expr::{TokenContext, ValueSubstitutions};
use crate::hours::{HoursOfOperation, OverrideSet};
use crate::schedule::{Breakpoint, DaySchedule};
use crate::template::{DayTemplate, ScheduleTemplate};
use std::collections::BTreeMap;

/// Evaluates a template into one concrete schedule per day-type.
///
/// Saturday and Sunday take the Weekday breakpoint shape when the template
/// defines no shape of their own or when the override set names them; their
/// tokens still resolve against that day-type's own operating window. Design
/// days appear in the result as constant schedules when the template defines
/// design levels.
///
/// Pure function of its inputs: on error nothing is returned and no input is
/// modified.
pub fn evaluate(
    template: &ScheduleTemplate,
    overrides: &OverrideSet,
    hours: &HoursOfOperation,
    values: &ValueSubstitutions,
) -> Result<BTreeMap<DayType, DaySchedule>, TemplateError> {
    let mut week = BTreeMap::new();

    for day_type in [DayType::Weekday, DayType::Saturday, DayType::Sunday] {
        let shape = day_shape(template, overrides, day_type);
        let day = evaluate_day(template, shape, day_type, hours, values)?;
        week.insert(day_type, day);
    }

    if let Some(level) = template.winter_design_value {
        week.insert(DayType::WinterDesignDay, DaySchedule::constant(level));
    }
    if let Some(level) = template.summer_design_value {
        week.insert(DayType::SummerDesignDay, DaySchedule::constant(level));
    }

    Ok(week)
}

/// Evaluates a setback template twice with independent value substitutions.
///
/// The heating and cooling setpoint schedules share one breakpoint shape and
/// differ only in the levels substituted for `floor`/`ceiling`, so they are
/// produced together.
#[allow(clippy::type_complexity)]
pub fn evaluate_setpoint_pair(
    template: &ScheduleTemplate,
    overrides: &OverrideSet,
    hours: &HoursOfOperation,
    heating: &ValueSubstitutions,
    cooling: &ValueSubstitutions,
) -> Result<
    (
        BTreeMap<DayType, DaySchedule>,
        BTreeMap<DayType, DaySchedule>,
    ),
    TemplateError,
> {
    let heating_week = evaluate(template, overrides, hours, heating)?;
    let cooling_week = evaluate(template, overrides, hours, cooling)?;
    Ok((heating_week, cooling_week))
}

/// Selects the breakpoint shape for a day-type.
fn day_shape<'a>(
    template: &'a ScheduleTemplate,
    overrides: &OverrideSet,
    day_type: DayType,
) -> &'a DayTemplate {
    let own = match day_type {
        DayType::Saturday => template.saturday.as_ref(),
        DayType::Sunday => template.sunday.as_ref(),
        _ => Some(&template.weekday),
    };
    match own {
        Some(shape) if !overrides.contains(day_type) => shape,
        _ => &template.weekday,
    }
}

fn evaluate_day(
    template: &ScheduleTemplate,
    shape: &DayTemplate,
    day_type: DayType,
    hours: &HoursOfOperation,
    values: &ValueSubstitutions,
) -> Result<DaySchedule, TemplateError> {
    let ctx = TokenContext::for_day(hours.day(day_type));
    let mut points = Vec::with_capacity(shape.breakpoints.len());
    for bp in &shape.breakpoints {
        let time = bp.time.resolve(&ctx);
        let value = bp.value.resolve(values).ok_or_else(|| {
            TemplateError::UnresolvedValue {
                template: template.name.clone(),
                day_type,
                // resolve() only fails on value tokens, so the name exists.
                token: bp.value.token_name().unwrap_or("value"),
            }
        })?;
        points.push(Breakpoint::new(time, value));
    }
    DaySchedule::new(points).map_err(|source| TemplateError::InvalidSchedule {
        template: template.name.clone(),
        day_type,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::expr::{TimeExpr, TimeToken, ValueExpr};
    use crate::template::{TemplateBreakpoint, TemplateLibrary};

    fn occupancy() -> ScheduleTemplate {
        TemplateLibrary::standard().get("occupancy").unwrap().clone()
    }

    #[test]
    fn test_occupancy_weekday_at_40_hours() {
        let (overrides, adjusted) = HoursOfOperation::new(40.0).adjusted();
        let week = evaluate(
            &occupancy(),
            &overrides,
            &adjusted,
            &ValueSubstitutions::none(),
        )
        .unwrap();

        let weekday = &week[&DayType::Weekday];
        let times: Vec<f64> = weekday.breakpoints().iter().map(|bp| bp.time).collect();
        assert_eq!(times, vec![0.0, 8.0, 9.0, 17.0, 18.0]);
        assert!((weekday.duration_above(0.5) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_saturday_keeps_own_shape_below_tier() {
        let (overrides, adjusted) = HoursOfOperation::new(40.0).adjusted();
        let week = evaluate(
            &occupancy(),
            &overrides,
            &adjusted,
            &ValueSubstitutions::none(),
        )
        .unwrap();
        // Own Saturday shape peaks at 0.3: no occupied time at the 0.5 cutoff.
        assert_eq!(week[&DayType::Saturday].duration_above(0.5), 0.0);
        assert_eq!(week[&DayType::Sunday].duration_above(0.5), 0.0);
    }

    #[test]
    fn test_override_retargets_weekday_shape() {
        let (overrides, adjusted) = HoursOfOperation::new(65.0).adjusted();
        assert!(overrides.contains(DayType::Saturday));
        let week = evaluate(
            &occupancy(),
            &overrides,
            &adjusted,
            &ValueSubstitutions::none(),
        )
        .unwrap();

        // Weekday shape, resolved against Saturday's own 8-13 window.
        let saturday = &week[&DayType::Saturday];
        let times: Vec<f64> = saturday.breakpoints().iter().map(|bp| bp.time).collect();
        assert_eq!(times, vec![0.0, 7.0, 8.0, 13.0, 14.0]);
        assert!((saturday.duration_above(0.5) - 5.0).abs() < 1e-12);
        // Sunday stays on its own flat shape below the tier.
        assert_eq!(week[&DayType::Sunday].duration_above(0.5), 0.0);
    }

    #[test]
    fn test_missing_day_shape_falls_back_to_weekday() {
        let template = ScheduleTemplate::new(
            "always_weekday",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.0),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 1.0),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End), 0.0),
            ]),
        );
        let (overrides, adjusted) = HoursOfOperation::new(40.0).adjusted();
        let week = evaluate(&template, &overrides, &adjusted, &ValueSubstitutions::none()).unwrap();
        // Saturday gets the weekday shape against its nominal 9-12 window.
        assert!((week[&DayType::Saturday].duration_above(0.5) - 3.0).abs() < 1e-12);
        assert!((week[&DayType::Sunday].duration_above(0.5) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_design_day_levels() {
        let (overrides, adjusted) = HoursOfOperation::new(40.0).adjusted();
        let week = evaluate(
            &occupancy(),
            &overrides,
            &adjusted,
            &ValueSubstitutions::none(),
        )
        .unwrap();
        assert_eq!(week[&DayType::WinterDesignDay], DaySchedule::constant(0.0));
        assert_eq!(week[&DayType::SummerDesignDay], DaySchedule::constant(1.0));
    }

    #[test]
    fn test_unresolved_value_token_fails() {
        let lib = TemplateLibrary::standard();
        let setback = lib.get("thermostat_setback").unwrap();
        let (overrides, adjusted) = HoursOfOperation::new(40.0).adjusted();
        let err = evaluate(setback, &overrides, &adjusted, &ValueSubstitutions::none())
            .unwrap_err();
        match err {
            TemplateError::UnresolvedValue { template, token, .. } => {
                assert_eq!(template, "thermostat_setback");
                assert_eq!(token, "floor");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_setpoint_pair() {
        let lib = TemplateLibrary::standard();
        let setback = lib.get("thermostat_setback").unwrap();
        let (overrides, adjusted) = HoursOfOperation::new(40.0).adjusted();
        let heating = ValueSubstitutions::new(15.6, 21.1);
        let cooling = ValueSubstitutions::new(29.4, 23.9);
        let (heat, cool) =
            evaluate_setpoint_pair(setback, &overrides, &adjusted, &heating, &cooling).unwrap();

        let heat_day = &heat[&DayType::Weekday];
        assert!((heat_day.value_at(3.0) - 15.6).abs() < 1e-12, "night setback");
        assert!((heat_day.value_at(12.0) - 21.1).abs() < 1e-12, "occupied");
        assert!((heat_day.value_at(22.0) - 15.6).abs() < 1e-12);

        let cool_day = &cool[&DayType::Weekday];
        assert!((cool_day.value_at(3.0) - 29.4).abs() < 1e-12);
        assert!((cool_day.value_at(12.0) - 23.9).abs() < 1e-12);
    }

    #[test]
    fn test_inconsistent_hours_rejected() {
        // end - 10 crosses below the preceding breakpoint for an 8 h window.
        let template = ScheduleTemplate::new(
            "bad",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.0),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Start), 1.0),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::End).minus(10.0), 0.0),
            ]),
        );
        let (overrides, adjusted) = HoursOfOperation::new(40.0).adjusted();
        let err = evaluate(&template, &overrides, &adjusted, &ValueSubstitutions::none())
            .unwrap_err();
        match err {
            TemplateError::InvalidSchedule { template, source, .. } => {
                assert_eq!(template, "bad");
                assert!(matches!(source, ScheduleError::Decreasing { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_overnight_window_resolves_occ_tokens() {
        let template = ScheduleTemplate::new(
            "night_shift",
            DayTemplate::new(vec![
                TemplateBreakpoint::at(TimeExpr::constant(0.0), 0.0),
                TemplateBreakpoint::at(TimeExpr::scaled(TimeToken::Occ, 0.5), 1.0),
                TemplateBreakpoint::at(TimeExpr::token(TimeToken::Occ), 0.0),
            ]),
        );
        let hoo = HoursOfOperation::new(0.0).with_windows(
            crate::hours::DayHours::new(22.0, 6.0),
            crate::hours::DayHours::new(22.0, 6.0),
            crate::hours::DayHours::new(22.0, 6.0),
        );
        let (overrides, adjusted) = hoo.adjusted();
        let week = evaluate(&template, &overrides, &adjusted, &ValueSubstitutions::none()).unwrap();
        let weekday = &week[&DayType::Weekday];
        let times: Vec<f64> = weekday.breakpoints().iter().map(|bp| bp.time).collect();
        // occ = 8 despite end < start.
        assert_eq!(times, vec![0.0, 4.0, 8.0]);
    }

    #[test]
    fn test_evaluate_value_expr_constants_need_no_substitution() {
        let template = ScheduleTemplate::new(
            "flat",
            DayTemplate::new(vec![TemplateBreakpoint::new(
                TimeExpr::constant(0.0),
                ValueExpr::Const(0.4),
            )]),
        );
        let (overrides, adjusted) = HoursOfOperation::new(40.0).adjusted();
        let week = evaluate(&template, &overrides, &adjusted, &ValueSubstitutions::none()).unwrap();
        assert_eq!(week[&DayType::Weekday], DaySchedule::constant(0.4));
    }
}
