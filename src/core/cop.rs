use crate::core::units::KELVIN_OFFSET;
use crate::errors::CalcError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Coefficient-of-performance modelling for heat-pump-driven loads.

/// How an hourly (or daily) COP series is derived for a climate zone.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, PartialEq, Eq, Serialize)]
pub enum CopMethod {
    /// The zone's published annual-average COP, repeated for every step.
    #[serde(rename = "constant")]
    #[strum(serialize = "constant")]
    Constant,
    /// Theoretical Carnot COP per step, linearly rescaled so the series' mean
    /// equals the zone's annual-average COP.
    #[serde(rename = "scaled_carnot_cop")]
    #[strum(serialize = "scaled_carnot_cop")]
    ScaledCarnot,
}

impl CopMethod {
    /// Parse a method name, reporting unknown names as a calculation error
    /// rather than falling back silently.
    pub fn from_name(name: &str) -> Result<Self, CalcError> {
        Self::from_str(name).map_err(|_| CalcError::UnsupportedCopMethod(name.to_string()))
    }
}

/// Theoretical Carnot COP for a heat pump lifting heat from `t_cold` to
/// `t_hot` (both in °C). This is the thermodynamic upper limit of efficiency;
/// it is undefined unless the hot side is strictly warmer than the cold side.
pub fn carnot_cop(t_hot: f64, t_cold: f64) -> Result<f64, CalcError> {
    if t_hot <= t_cold {
        return Err(CalcError::ThermalBoundsViolation { t_hot, t_cold });
    }
    Ok((t_hot + KELVIN_OFFSET) / (t_hot - t_cold))
}

/// Build a COP series aligned with `ambient_temperatures` (hourly for space
/// heating, daily for hot water).
///
/// Arguments:
/// * `method` - COP calculation method
/// * `annual_average_cop` - the climate zone's published annual-average COP
/// * `target_temperature` - setpoint or storage temperature the heat pump
///   delivers, in °C
/// * `ambient_temperatures` - cold-side temperatures, in °C
pub fn cop_series(
    method: CopMethod,
    annual_average_cop: f64,
    target_temperature: f64,
    ambient_temperatures: &[f64],
) -> Result<Vec<f64>, CalcError> {
    match method {
        CopMethod::Constant => Ok(vec![annual_average_cop; ambient_temperatures.len()]),
        CopMethod::ScaledCarnot => {
            let theoretical = ambient_temperatures
                .iter()
                .map(|&t_cold| carnot_cop(target_temperature, t_cold))
                .collect::<Result<Vec<_>, _>>()?;
            let mean = theoretical.iter().sum::<f64>() / theoretical.len() as f64;
            let scale = annual_average_cop / mean;
            Ok(theoretical.into_iter().map(|cop| cop * scale).collect())
        }
    }
}
