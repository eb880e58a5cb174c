use crate::core::profile::HourlyProfile;
use crate::core::schedule::{ev_solar_window, weekday_of, EV_NIGHT_WINDOW};
use crate::core::units::{DAYS_PER_YEAR, HOURS_IN_YEAR, HOURS_PER_DAY};
use anyhow::bail;

/// Home EV charging profile.
///
/// A constant daily charging requirement is allocated into a daytime
/// window on the weekdays that have one (to line up with solar generation)
/// and the remainder into a night window crossing midnight into the next
/// day. The result is a shape normalised to sum to 1; the night window of
/// 31 December truncates at the end of the year.

pub const DEFAULT_CHARGER_KW: f64 = 7.;

/// Fraction of EV charging assumed to happen away from home.
pub const EV_PUBLIC_CHARGING_FRACTION: f64 = 0.2;

/// Build the normalised home-charging shape for the given annual energy and
/// charger power. An annual total of zero yields the documented degenerate
/// all-zero profile.
pub fn ev_charging_profile(annual_kwh: f64, charger_kw: f64) -> anyhow::Result<HourlyProfile> {
    if charger_kw <= 0. {
        bail!("EV charger power must be positive, got {charger_kw} kW");
    }

    let daily_kwh = annual_kwh / DAYS_PER_YEAR as f64;
    let hours_required_per_day = daily_kwh / charger_kw;

    let mut hourly = vec![0.; HOURS_IN_YEAR];
    for day in 0..DAYS_PER_YEAR {
        let day_start = day * HOURS_PER_DAY;
        let mut remaining_hours = hours_required_per_day;

        let mut windows = Vec::with_capacity(2);
        if let Some(solar) = ev_solar_window(weekday_of(day)) {
            windows.push(solar);
        }
        windows.push(EV_NIGHT_WINDOW);

        for (start, end) in windows {
            if remaining_hours <= 0. {
                break;
            }
            let window_hours = (end - start) as f64;
            let hours_to_charge = remaining_hours.min(window_hours);
            fill_hours(&mut hourly, day_start + start, hours_to_charge, charger_kw);
            remaining_hours -= hours_to_charge;
        }
        // leftover beyond the windows is not carried into the next day
    }

    Ok(HourlyProfile::from_values(hourly)?.normalized_or_zero())
}

fn fill_hours(hourly: &mut [f64], start: usize, hours_to_charge: f64, charger_kw: f64) {
    let full_hours = hours_to_charge.floor() as usize;
    let fraction = hours_to_charge - full_hours as f64;
    for offset in 0..full_hours {
        if let Some(value) = hourly.get_mut(start + offset) {
            *value += charger_kw;
        }
    }
    if fraction > 0. {
        if let Some(value) = hourly.get_mut(start + full_hours) {
            *value += charger_kw * fraction;
        }
    }
}
