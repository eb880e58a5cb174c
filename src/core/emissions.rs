use crate::core::usage::UsageProfile;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::debug;

/// Operational emissions accounting.

/// Fuel categories carrying an emissions factor. Electricity factors apply
/// per kWh, liquid fuels per litre.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, Hash, PartialEq, Serialize)]
pub enum Fuel {
    Electricity,
    NaturalGas,
    Lpg,
    Wood,
    Petrol,
    Diesel,
}

/// Per-fuel emissions factors, in kg CO2e per kWh or per litre.
///
/// Lookup is deliberately lenient: a fuel without a factor contributes zero,
/// since an absent factor means "not yet modelled" rather than invalid
/// input. This is the opposite policy to tariff key matching, which fails
/// fast.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EmissionsFactors {
    factors: IndexMap<Fuel, f64>,
}

impl EmissionsFactors {
    pub fn new(factors: IndexMap<Fuel, f64>) -> Self {
        Self { factors }
    }

    /// Published national factors. The electricity grid factor is a
    /// five-year average of MBIE numbers.
    pub fn published() -> Self {
        Self {
            factors: IndexMap::from([
                (Fuel::Electricity, 0.1072),
                (Fuel::NaturalGas, 0.195),
                (Fuel::Lpg, 0.214),
                (Fuel::Wood, 0.005),
                (Fuel::Petrol, 2.41),
                (Fuel::Diesel, 2.67),
            ]),
        }
    }

    pub fn factor(&self, fuel: Fuel) -> f64 {
        self.factors.get(&fuel).copied().unwrap_or_else(|| {
            debug!("no emissions factor for {fuel}, defaulting to zero");
            0.
        })
    }
}

/// The household's yearly operational emissions, in kg CO2e. Solar
/// generation displaces grid electricity and counts negatively.
pub fn emissions_kg_co2e(usage_profile: &UsageProfile, factors: &EmissionsFactors) -> f64 {
    let components = [
        (-usage_profile.solar_generation_kwh.total(), Fuel::Electricity),
        (usage_profile.electricity_kwh.annual_kwh(), Fuel::Electricity),
        (usage_profile.public_ev_charger_kwh, Fuel::Electricity),
        (usage_profile.natural_gas_kwh, Fuel::NaturalGas),
        (usage_profile.lpg_kwh, Fuel::Lpg),
        (usage_profile.wood_kwh, Fuel::Wood),
        (usage_profile.petrol_litres, Fuel::Petrol),
        (usage_profile.diesel_litres, Fuel::Diesel),
    ];
    components
        .iter()
        .map(|(quantity, fuel)| quantity * factors.factor(*fuel))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::HourlyProfile;
    use crate::core::usage::SolarGeneration;
    use approx::assert_relative_eq;
    use rstest::*;

    #[rstest]
    fn should_default_missing_factors_to_zero() {
        let factors = EmissionsFactors::new(IndexMap::from([(Fuel::Electricity, 0.1)]));
        assert_eq!(factors.factor(Fuel::Wood), 0.);
        assert_eq!(factors.factor(Fuel::Electricity), 0.1);
    }

    #[rstest]
    fn should_sum_emissions_across_fuels() {
        let usage = UsageProfile {
            natural_gas_kwh: 1000.,
            petrol_litres: 500.,
            ..Default::default()
        };
        let factors = EmissionsFactors::published();
        assert_relative_eq!(
            emissions_kg_co2e(&usage, &factors),
            1000. * 0.195 + 500. * 2.41,
            max_relative = 1e-9
        );
    }

    #[rstest]
    fn should_credit_solar_generation_against_grid_emissions() {
        let usage = UsageProfile {
            solar_generation_kwh: SolarGeneration {
                timeseries: HourlyProfile::flat().scaled_by(4000.),
            },
            ..Default::default()
        };
        let factors = EmissionsFactors::published();
        assert_relative_eq!(
            emissions_kg_co2e(&usage, &factors),
            -4000. * 0.1072,
            max_relative = 1e-9
        );
    }
}
