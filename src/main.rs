use anyhow::{Context, Result};
use parasched::{
    evaluate, DayType, HoursOfOperation, TemplateLibrary, ValueSubstitutions, WeekProfile,
};

fn main() -> Result<()> {
    let hoo = HoursOfOperation::new(65.0);
    let (overrides, adjusted) = hoo.adjusted();

    println!("target: {} h/week", hoo.hours_per_week);
    println!("weekday:  {:.2}", adjusted.weekday);
    println!("saturday: {:.2}", adjusted.saturday);
    println!("sunday:   {:.2}", adjusted.sunday);
    for day_type in overrides.iter() {
        println!("{day_type} takes the weekday profile");
    }

    let library = TemplateLibrary::standard();
    let occupancy = library
        .get("occupancy")
        .context("standard library has no occupancy template")?;
    let week = evaluate(occupancy, &overrides, &adjusted, &ValueSubstitutions::none())?;

    for day_type in [DayType::Weekday, DayType::Saturday, DayType::Sunday] {
        println!("{day_type}: {:.2}", week[&day_type]);
    }

    let profile = WeekProfile::from_day_schedules(&week)
        .context("evaluated week has no weekday schedule")?;
    println!("weekly occupied hours: {:.3}", profile.weekly_hours(0.5));

    Ok(())
}
