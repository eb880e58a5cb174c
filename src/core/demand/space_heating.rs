use crate::core::profile::HourlyProfile;
use crate::core::schedule::{
    full_day_heating_days, BASELINE_HEATING_WINDOWS, FULL_DAY_HEATING_WINDOW,
};
use crate::core::units::{HOURS_IN_YEAR, HOURS_PER_DAY};
use crate::input::FullDayHeatingFrequency;
use anyhow::bail;

/// Space heating demand shape.
///
/// Raw thermal demand per hour is `max(setpoint − ambient, 0)`. A schedule
/// mask restricts heating to the active windows: every day has the baseline
/// morning (07:00–09:00) and evening (17:00–21:00) windows, and full-day
/// heating days replace them with the single 07:00–21:00 window. For
/// heat-pump systems the thermal demand is divided by the hourly COP series
/// to give electrical demand.

pub const SPACE_HEATING_SETPOINT_C: f64 = 20.0;

/// Build the normalised space heating demand shape.
///
/// Arguments:
/// * `ambient_temperatures` - hourly outside temperatures, in °C (8760 values)
/// * `heating_during_day` - how many days per week are heated all day
/// * `setpoint` - indoor target temperature, in °C
/// * `hourly_cop` - hourly COP series for heat-pump systems, or `None` when
///   the heat source delivers thermal demand directly
///
/// Returns a shape summing to 1, or an all-zero profile when no scheduled
/// hour has any demand (a mild climate, not an error).
pub fn space_heating_profile(
    ambient_temperatures: &[f64],
    heating_during_day: FullDayHeatingFrequency,
    setpoint: f64,
    hourly_cop: Option<&[f64]>,
) -> anyhow::Result<HourlyProfile> {
    if ambient_temperatures.len() != HOURS_IN_YEAR {
        bail!(
            "Expected {HOURS_IN_YEAR} hourly temperatures, got {}",
            ambient_temperatures.len()
        );
    }
    if let Some(cop) = hourly_cop {
        if cop.len() != HOURS_IN_YEAR {
            bail!("Expected {HOURS_IN_YEAR} hourly COP values, got {}", cop.len());
        }
    }

    let full_day = full_day_heating_days(heating_during_day);
    let demand = HourlyProfile::from_fn(|hour| {
        let day = hour / HOURS_PER_DAY;
        let hour_of_day = hour % HOURS_PER_DAY;
        if !heating_scheduled(full_day[day], hour_of_day) {
            return 0.;
        }
        let thermal = (setpoint - ambient_temperatures[hour]).max(0.);
        match hourly_cop {
            Some(cop) => thermal / cop[hour],
            None => thermal,
        }
    });

    Ok(demand.normalized_or_zero())
}

fn heating_scheduled(full_day: bool, hour_of_day: usize) -> bool {
    if full_day {
        let (start, end) = FULL_DAY_HEATING_WINDOW;
        (start..end).contains(&hour_of_day)
    } else {
        BASELINE_HEATING_WINDOWS
            .iter()
            .any(|(start, end)| (*start..*end).contains(&hour_of_day))
    }
}
