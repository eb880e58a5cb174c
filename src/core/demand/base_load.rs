use crate::core::profile::HourlyProfile;
use crate::core::units::DAYS_IN_BILLING_YEAR;

/// Baseline "other" electricity demand: appliances and uses not modelled
/// individually (refrigeration, lighting, laundry, electronics and other
/// plug loads). Used both to complete the household total and to determine
/// how much solar generation is absorbed on-site.

const REFRIGERATION_KWH_PER_DAY: f64 = 2.1;
const LIGHTING_KWH_PER_DAY: f64 = 0.8;
const LAUNDRY_KWH_PER_DAY: f64 = 0.4;
const OTHER_KWH_PER_DAY: f64 = 4.3;

/// Fraction of each end use falling in the daytime tariff window.
/// Refrigeration runs around the clock; the remainder is treated as daytime,
/// with unders and overs (standby at night, more fridge cycling by day)
/// assumed to cancel.
const REFRIGERATION_DAY_FRACTION: f64 = 0.67;

pub fn baseline_annual_kwh() -> f64 {
    DAYS_IN_BILLING_YEAR
        * (REFRIGERATION_KWH_PER_DAY + LIGHTING_KWH_PER_DAY + LAUNDRY_KWH_PER_DAY + OTHER_KWH_PER_DAY)
}

/// Split of the baseline annual total into (daytime kWh, nighttime kWh).
pub fn baseline_day_night_kwh() -> (f64, f64) {
    let refrigeration = DAYS_IN_BILLING_YEAR * REFRIGERATION_KWH_PER_DAY;
    let always_day = DAYS_IN_BILLING_YEAR
        * (LIGHTING_KWH_PER_DAY + LAUNDRY_KWH_PER_DAY + OTHER_KWH_PER_DAY);
    let day = refrigeration * REFRIGERATION_DAY_FRACTION + always_day;
    let night = refrigeration * (1. - REFRIGERATION_DAY_FRACTION);
    (day, night)
}

/// Flat day-rate and night-rate shapes: the first is constant over
/// 07:00–21:00 and zero at night, the second the complement. Each is
/// independently normalised to sum to 1, so day and night tariff buckets can
/// be scaled separately.
pub fn flat_day_night_profiles() -> (HourlyProfile, HourlyProfile) {
    let day = HourlyProfile::flat().daytime().normalized_or_zero();
    let night = HourlyProfile::flat().nighttime().normalized_or_zero();
    (day, night)
}
