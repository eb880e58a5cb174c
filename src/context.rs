use crate::core::cop::{cop_series, CopMethod};
use crate::core::demand::hot_water::{
    daily_mean_temperatures, HOT_WATER_STORAGE_TEMPERATURE_C,
};
use crate::core::demand::space_heating::SPACE_HEATING_SETPOINT_C;
use crate::core::emissions::EmissionsFactors;
use crate::core::profile::HourlyProfile;
use crate::core::units::HOURS_IN_YEAR;
use crate::errors::CalcError;
use anyhow::bail;

/// The read-only reference data for one calculation request, resolved for
/// the household's location before any computation begins. Constructed once
/// by the caller (which owns postcode/zone mapping and data files) and
/// passed into the engine's entry points; the engine holds no global state
/// and performs no I/O.
#[derive(Clone, Debug)]
pub struct CalculationContext {
    pub climate: ClimateData,
    pub cop: CopTable,
    /// Annual generation of the standard solar array at this location, as a
    /// scaled hourly profile in kWh.
    pub solar_generation: HourlyProfile,
    pub emissions_factors: EmissionsFactors,
    /// Annual heating degree days at this location, for demand estimation.
    pub heating_degree_days: f64,
}

/// Temperature series and climate summary values for the location.
#[derive(Clone, Debug)]
pub struct ClimateData {
    hourly_temperatures: Vec<f64>,
    /// Annual mean air temperature, in °C.
    pub average_air_temperature: f64,
    /// Assumed inlet water temperature, in °C. Ground and inlet water
    /// temperatures are taken to track the annual mean air temperature.
    pub inlet_water_temperature: f64,
}

impl ClimateData {
    pub fn from_hourly_temperatures(hourly_temperatures: Vec<f64>) -> anyhow::Result<Self> {
        if hourly_temperatures.len() != HOURS_IN_YEAR {
            bail!(
                "Expected {HOURS_IN_YEAR} hourly temperatures, got {}",
                hourly_temperatures.len()
            );
        }
        let average_air_temperature =
            hourly_temperatures.iter().sum::<f64>() / hourly_temperatures.len() as f64;
        Ok(Self {
            hourly_temperatures,
            average_air_temperature,
            inlet_water_temperature: average_air_temperature,
        })
    }

    pub fn hourly_temperatures(&self) -> &[f64] {
        &self.hourly_temperatures
    }

    pub fn daily_mean_temperatures(&self) -> Vec<f64> {
        daily_mean_temperatures(&self.hourly_temperatures)
    }
}

/// Published annual-average COPs for the location's climate zone, and the
/// method used to spread them over the year.
#[derive(Clone, Copy, Debug)]
pub struct CopTable {
    pub method: CopMethod,
    pub space_heating_annual_cop: f64,
    pub hot_water_annual_cop: f64,
}

impl CalculationContext {
    /// Hourly COP series for space heating at this location.
    pub fn space_heating_cop_series(&self) -> Result<Vec<f64>, CalcError> {
        cop_series(
            self.cop.method,
            self.cop.space_heating_annual_cop,
            SPACE_HEATING_SETPOINT_C,
            self.climate.hourly_temperatures(),
        )
    }

    /// Daily COP series for hot water heating at this location.
    pub fn hot_water_cop_series(&self) -> Result<Vec<f64>, CalcError> {
        cop_series(
            self.cop.method,
            self.cop.hot_water_annual_cop,
            HOT_WATER_STORAGE_TEMPERATURE_C,
            &self.climate.daily_mean_temperatures(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::*;

    #[fixture]
    fn context() -> CalculationContext {
        let temperatures: Vec<f64> = (0..HOURS_IN_YEAR)
            .map(|hour| 12. + 6. * ((hour % 24) as f64 / 24. * std::f64::consts::TAU).sin())
            .collect();
        CalculationContext {
            climate: ClimateData::from_hourly_temperatures(temperatures).unwrap(),
            cop: CopTable {
                method: CopMethod::ScaledCarnot,
                space_heating_annual_cop: 3.93,
                hot_water_annual_cop: 3.29,
            },
            solar_generation: HourlyProfile::zeros(),
            emissions_factors: EmissionsFactors::published(),
            heating_degree_days: 2490.,
        }
    }

    #[rstest]
    fn should_reject_wrong_length_temperature_series() {
        assert!(ClimateData::from_hourly_temperatures(vec![10.; 24]).is_err());
    }

    #[rstest]
    fn should_derive_average_and_inlet_temperatures(context: CalculationContext) {
        assert_relative_eq!(
            context.climate.average_air_temperature,
            12.,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            context.climate.inlet_water_temperature,
            context.climate.average_air_temperature,
            max_relative = 1e-9
        );
    }

    #[rstest]
    fn should_build_cop_series_matching_published_averages(context: CalculationContext) {
        let hourly = context.space_heating_cop_series().unwrap();
        assert_eq!(hourly.len(), HOURS_IN_YEAR);
        let mean = hourly.iter().sum::<f64>() / hourly.len() as f64;
        assert_relative_eq!(mean, 3.93, max_relative = 1e-9);

        let daily = context.hot_water_cop_series().unwrap();
        assert_eq!(daily.len(), 365);
        let mean = daily.iter().sum::<f64>() / daily.len() as f64;
        assert_relative_eq!(mean, 3.29, max_relative = 1e-9);
    }
}
