pub const HOURS_PER_DAY: usize = 24;
pub const DAYS_PER_YEAR: usize = 365;
pub const HOURS_IN_YEAR: usize = HOURS_PER_DAY * DAYS_PER_YEAR;

/// Average calendar year length, used for daily standing charges and other
/// per-day billing quantities. The simulated year itself is 365 days.
pub const DAYS_IN_BILLING_YEAR: f64 = 365.25;

pub const JOULES_PER_KILOWATT_HOUR: f64 = 3.6e6;
pub const KELVIN_OFFSET: f64 = 273.15;

pub const WATER_DENSITY_KG_PER_LITRE: f64 = 1.000028;
pub const WATER_SPECIFIC_HEAT_J_PER_KG_K: f64 = 4184.;
pub const WATER_SPECIFIC_HEAT_KWH_PER_KG_K: f64 = 0.001162;

/// Temperature rise, in °C, that one kWh produces in one litre of water.
pub(crate) fn celsius_per_kwh_per_litre() -> f64 {
    JOULES_PER_KILOWATT_HOUR / (WATER_DENSITY_KG_PER_LITRE * WATER_SPECIFIC_HEAT_J_PER_KG_K)
}
