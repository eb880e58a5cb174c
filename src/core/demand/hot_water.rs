use crate::core::profile::HourlyProfile;
use crate::core::schedule::{HOT_WATER_NIGHT_WINDOW, HOT_WATER_SOLAR_WINDOW};
use crate::core::units::{
    DAYS_IN_BILLING_YEAR, DAYS_PER_YEAR, HOURS_IN_YEAR, HOURS_PER_DAY,
    WATER_DENSITY_KG_PER_LITRE, WATER_SPECIFIC_HEAT_KWH_PER_KG_K,
};
use crate::errors::CalcError;
use crate::input::{HotWaterHeatingSource, HotWaterUsage};
use anyhow::bail;

/// Hot water heating demand: annual energy estimation and the construction
/// of an hourly electricity usage profile from it.
///
/// The annual total is distributed over the year by ambient temperature (the
/// colder the inlet water, the more heating each litre needs), then each
/// day's energy is converted to heating hours and allocated into a solar
/// window first and a night window second, so that storage systems can soak
/// up daytime generation while remaining able to reheat overnight.

pub const HOT_WATER_STORAGE_TEMPERATURE_C: f64 = 65.;
pub const DELIVERED_HOT_WATER_TEMPERATURE_C: f64 = 40.;
pub const TEMPERATURE_SHOWER_C: f64 = 37.;
const INDOOR_CYLINDER_AMBIENT_TEMPERATURE_C: f64 = 18.;

/// Assumed electrical input power of hot water systems, in kW.
pub const HOT_WATER_POWER_INPUT_KW: f64 = 3.0;

/// Fraction of electric hot water energy that can be supplied on night or
/// controlled rates.
pub const HOT_WATER_FLEXIBLE_KWH_FRACTION: f64 = 0.8;

const GAS_INSTANTANEOUS_WATER_HEATING_EFFICIENCY: f64 = 0.834;
const GAS_STORAGE_WATER_HEATING_EFFICIENCY: f64 = 0.885;
const ELECTRIC_WATER_HEATING_EFFICIENCY: f64 = 1.0;

/// Inlet-to-cylinder window of the rolling mean used to estimate inlet water
/// temperature from ambient air temperature, in days.
const INLET_TEMPERATURE_ROLLING_WINDOW: usize = 30;

/// Nominal cylinder size band, selected by household size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TankSize {
    Small,
    Medium,
    Large,
}

impl TankSize {
    pub fn for_household(people_in_house: usize) -> Self {
        match people_in_house {
            0..=2 => Self::Small,
            3..=4 => Self::Medium,
            _ => Self::Large,
        }
    }
}

pub fn electric_cylinder_volume_litres(size: TankSize) -> f64 {
    match size {
        TankSize::Small => 130.,
        TankSize::Medium => 180.,
        TankSize::Large => 250.,
    }
}

pub fn gas_cylinder_volume_litres(size: TankSize) -> f64 {
    match size {
        TankSize::Small => 130.,
        TankSize::Medium => 180.,
        TankSize::Large => 260.,
    }
}

pub fn heat_pump_cylinder_volume_litres(size: TankSize) -> f64 {
    match size {
        TankSize::Small => 170.,
        TankSize::Medium => 250.,
        TankSize::Large => 300.,
    }
}

/// Energy, in kWh, to heat the given volume of water over `delta_t` degrees.
pub fn water_heating_kwh(volume_litres: f64, delta_t: f64) -> f64 {
    volume_litres * delta_t * WATER_DENSITY_KG_PER_LITRE * WATER_SPECIFIC_HEAT_KWH_PER_KG_K
}

struct ShowerScenario {
    showers_per_week: f64,
    flow_rate_l_per_min: f64,
    duration_min: f64,
}

fn shower_scenario(usage: HotWaterUsage) -> ShowerScenario {
    match usage {
        HotWaterUsage::Low => ShowerScenario {
            showers_per_week: 5.,
            flow_rate_l_per_min: 5.,
            duration_min: 5.,
        },
        HotWaterUsage::Average => ShowerScenario {
            showers_per_week: 6.,
            flow_rate_l_per_min: 7.,
            duration_min: 7.,
        },
        HotWaterUsage::High => ShowerScenario {
            showers_per_week: 7.,
            flow_rate_l_per_min: 9.,
            duration_min: 9.,
        },
    }
}

/// Annual energy for showering, in kWh, before heater efficiency.
pub fn shower_kwh_per_year(
    usage: HotWaterUsage,
    inlet_temperature: f64,
    people_in_house: usize,
) -> f64 {
    let scenario = shower_scenario(usage);
    let delta_t = TEMPERATURE_SHOWER_C - inlet_temperature;
    let volume_per_shower = scenario.flow_rate_l_per_min * scenario.duration_min;
    let daily_volume_per_occupant = volume_per_shower * scenario.showers_per_week / 7.;
    let yearly_volume_per_occupant = daily_volume_per_occupant * DAYS_IN_BILLING_YEAR;
    people_in_house as f64 * water_heating_kwh(yearly_volume_per_occupant, delta_t)
}

/// Annual energy for non-shower hot water use (washing machine, taps,
/// high-flow/outdoor), in kWh, before heater efficiency.
pub fn other_water_kwh_per_year(inlet_temperature: f64, people_in_house: usize) -> f64 {
    // (volume per occupant per day in litres, delivery temperature in °C)
    let uses = [
        (10.4038461538462, 35.),  // washing machine
        (8.90384615384615, 40.),  // tap
        (4.19230769230769, 37.),  // high flow / outdoor
    ];
    people_in_house as f64
        * uses
            .iter()
            .map(|(volume_l_per_day, temperature)| {
                water_heating_kwh(
                    volume_l_per_day * DAYS_IN_BILLING_YEAR,
                    temperature - inlet_temperature,
                )
            })
            .sum::<f64>()
}

/// Heat loss, in kWh per day, for an electric cylinder at MEPS level with a
/// TPR valve. Table values are for a 55° temperature rise and scale linearly
/// with delta T.
fn electric_cylinder_loss_kwh_per_day(size: TankSize, delta_t: f64) -> f64 {
    let loss_at_55 = match size {
        TankSize::Small => 1.56,
        TankSize::Medium => 1.76,
        TankSize::Large => 2.16,
    };
    loss_at_55 * (delta_t / 55.)
}

/// Heat loss, in kWh per day, for a gas storage cylinder per
/// AS/NZS 4552.2:2010 (45° rise, 30 MJ nominal gas consumption).
fn gas_storage_loss_kwh_per_day(volume_litres: f64, delta_t: f64) -> f64 {
    (0.42 + 0.02 * volume_litres.powf(2. / 3.) + 0.006 * 30.) * 24. / 3.6 * (delta_t / 45.)
}

/// Heat loss, in kWh per day, for a heat pump cylinder, based on heat
/// exchanger MEPS (55° rise), plus 0.2 each for the TPR valve and fittings.
fn heat_pump_cylinder_loss_kwh_per_day(volume_litres: f64, delta_t: f64) -> f64 {
    volume_litres.powf(0.3261) * 0.6099 * (delta_t / 55.) + 0.2 + 0.2
}

/// Annual standing loss for the hot water system, in kWh. Instantaneous
/// systems store no water and lose nothing.
pub fn standing_loss_kwh_per_year(
    source: HotWaterHeatingSource,
    people_in_house: usize,
    average_air_temperature: f64,
) -> f64 {
    let size = TankSize::for_household(people_in_house);
    let indoor_delta_t = HOT_WATER_STORAGE_TEMPERATURE_C - INDOOR_CYLINDER_AMBIENT_TEMPERATURE_C;
    let outdoor_delta_t = HOT_WATER_STORAGE_TEMPERATURE_C - average_air_temperature;
    let loss_per_day = match source {
        HotWaterHeatingSource::ElectricCylinder => {
            electric_cylinder_loss_kwh_per_day(size, indoor_delta_t)
        }
        HotWaterHeatingSource::PipedGasCylinder => {
            gas_storage_loss_kwh_per_day(gas_cylinder_volume_litres(size), indoor_delta_t)
        }
        HotWaterHeatingSource::HeatPump => {
            heat_pump_cylinder_loss_kwh_per_day(heat_pump_cylinder_volume_litres(size), outdoor_delta_t)
        }
        HotWaterHeatingSource::PipedGasInstantaneous
        | HotWaterHeatingSource::BottledGasInstantaneous => 0.,
    };
    loss_per_day * DAYS_IN_BILLING_YEAR
}

/// Energy conversion efficiency of the hot water system. Standing losses are
/// accounted for separately.
pub fn heating_efficiency(source: HotWaterHeatingSource, heat_pump_cop: f64) -> f64 {
    match source {
        HotWaterHeatingSource::ElectricCylinder => ELECTRIC_WATER_HEATING_EFFICIENCY,
        HotWaterHeatingSource::PipedGasCylinder => GAS_STORAGE_WATER_HEATING_EFFICIENCY,
        HotWaterHeatingSource::PipedGasInstantaneous
        | HotWaterHeatingSource::BottledGasInstantaneous => {
            GAS_INSTANTANEOUS_WATER_HEATING_EFFICIENCY
        }
        HotWaterHeatingSource::HeatPump => heat_pump_cop,
    }
}

/// Collapse an hourly temperature series to daily means.
pub fn daily_mean_temperatures(hourly_temperatures: &[f64]) -> Vec<f64> {
    hourly_temperatures
        .chunks(HOURS_PER_DAY)
        .map(|day| day.iter().sum::<f64>() / day.len() as f64)
        .collect()
}

fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(window - 1);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Distribute the annual hot water energy demand over the days of the year.
///
/// The inlet water temperature for each day is estimated as a 30-day rolling
/// mean of the daily ambient temperature; each day's share is proportional
/// to `(delivered_temp − inlet).max(0)`, divided by the daily COP for
/// heat-pump systems. The factor total being zero for a whole year indicates
/// broken input data and is a hard error.
pub fn daily_demand_kwh(
    daily_temperatures: &[f64],
    annual_demand_kwh: f64,
    daily_cop: Option<&[f64]>,
) -> anyhow::Result<Vec<f64>> {
    if daily_temperatures.len() != DAYS_PER_YEAR {
        bail!(
            "Expected {DAYS_PER_YEAR} daily temperatures, got {}",
            daily_temperatures.len()
        );
    }
    if let Some(cop) = daily_cop {
        if cop.len() != DAYS_PER_YEAR {
            bail!("Expected {DAYS_PER_YEAR} daily COP values, got {}", cop.len());
        }
    }
    let inlet = rolling_mean(daily_temperatures, INLET_TEMPERATURE_ROLLING_WINDOW);
    let factors: Vec<f64> = inlet
        .iter()
        .enumerate()
        .map(|(day, inlet_temperature)| {
            let demand_factor = (DELIVERED_HOT_WATER_TEMPERATURE_C - inlet_temperature).max(0.);
            match daily_cop {
                Some(cop) => demand_factor / cop[day],
                None => demand_factor,
            }
        })
        .collect();
    let total: f64 = factors.iter().sum();
    if total == 0. {
        return Err(CalcError::DegenerateNormalization("hot water daily demand factors").into());
    }
    Ok(factors
        .into_iter()
        .map(|factor| factor / total * annual_demand_kwh)
        .collect())
}

/// Build a normalised hourly hot water heating profile from daily energy
/// demand.
///
/// For each day the required heating hours (`energy / heater power`) are
/// allocated uniformly into the solar window first, then the night window,
/// with fractional hours pro-rated at the window boundary. Night-window
/// hours spilling past the end of the year are dropped.
pub fn solar_friendly_profile(
    daily_energy_kwh: &[f64],
    heater_power_kw: f64,
) -> anyhow::Result<HourlyProfile> {
    if daily_energy_kwh.len() != DAYS_PER_YEAR {
        bail!(
            "Expected {DAYS_PER_YEAR} daily energy values, got {}",
            daily_energy_kwh.len()
        );
    }
    if heater_power_kw <= 0. {
        bail!("Hot water heater power must be positive, got {heater_power_kw} kW");
    }

    let (solar_start, solar_end) = HOT_WATER_SOLAR_WINDOW;
    let (night_start, night_end) = HOT_WATER_NIGHT_WINDOW;
    let solar_duration = (solar_end - solar_start) as f64;
    let night_duration = (night_end - night_start) as f64;

    let mut hourly = vec![0.; HOURS_IN_YEAR];
    for (day, energy) in daily_energy_kwh.iter().enumerate() {
        let required_hours = energy / heater_power_kw;
        let solar_hours = required_hours.min(solar_duration);
        let night_hours = (required_hours - solar_duration).max(0.).min(night_duration);
        let day_start = day * HOURS_PER_DAY;
        allocate_window(&mut hourly, day_start + solar_start, solar_hours, heater_power_kw);
        allocate_window(&mut hourly, day_start + night_start, night_hours, heater_power_kw);
    }

    Ok(HourlyProfile::from_values(hourly)?.normalized("hot water heating profile")?)
}

/// Fill `hours_to_fill` hours of heating at `power_kw` from `start` onwards,
/// pro-rating the final partial hour. Hours beyond the end of the year are
/// silently dropped.
fn allocate_window(hourly: &mut [f64], start: usize, hours_to_fill: f64, power_kw: f64) {
    let full_hours = hours_to_fill.floor() as usize;
    let fraction = hours_to_fill - full_hours as f64;
    for offset in 0..full_hours {
        if let Some(value) = hourly.get_mut(start + offset) {
            *value += power_kw;
        }
    }
    if fraction > 0. {
        if let Some(value) = hourly.get_mut(start + full_hours) {
            *value += power_kw * fraction;
        }
    }
}
