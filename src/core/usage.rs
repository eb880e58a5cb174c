use crate::core::profile::HourlyProfile;

/// Usage profiles: per-component and household-level records of annual fuel
/// consumption, with electricity held as hourly profiles.

/// Household electricity demand, split along two axes:
///
/// * fixed-time vs shiftable - whether the load occurs at a determined time
///   or can be relocated (to solar hours or off-peak rates);
/// * uncontrolled vs controllable - whether the load could sit on a
///   retailer-controlled (ripple) circuit.
///
/// Each category is a scaled hourly profile summing to its annual kWh. All
/// derived views are recomputed from the stored categories on each call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElectricityUsage {
    pub fixed_uncontrolled: HourlyProfile,
    pub fixed_controllable: HourlyProfile,
    pub shift_uncontrolled: HourlyProfile,
    pub shift_controllable: HourlyProfile,
}

impl ElectricityUsage {
    pub fn zero() -> Self {
        Self::default()
    }

    /// All fixed-time demand.
    pub fn total_fixed(&self) -> HourlyProfile {
        &self.fixed_uncontrolled + &self.fixed_controllable
    }

    /// All shiftable demand.
    pub fn total_shiftable(&self) -> HourlyProfile {
        &self.shift_uncontrolled + &self.shift_controllable
    }

    /// All demand, at its natural times.
    pub fn total(&self) -> HourlyProfile {
        &self.total_fixed() + &self.total_shiftable()
    }

    /// All demand, with shiftable load moved into the night sub-window, as a
    /// household on a time-of-use tariff with smart scheduling would run it.
    pub fn total_with_night_shift(&self) -> HourlyProfile {
        &self.total_fixed() + &self.total_shiftable().night_shift()
    }

    /// Demand that could sit on a controlled (ripple) circuit.
    pub fn controllable(&self) -> HourlyProfile {
        &self.fixed_controllable + &self.shift_controllable
    }

    /// Demand that must be billed at uncontrolled rates.
    pub fn uncontrolled(&self) -> HourlyProfile {
        &self.fixed_uncontrolled + &self.shift_uncontrolled
    }

    pub fn annual_kwh(&self) -> f64 {
        self.total().total()
    }

    pub fn combine(&self, other: &Self) -> Self {
        Self {
            fixed_uncontrolled: &self.fixed_uncontrolled + &other.fixed_uncontrolled,
            fixed_controllable: &self.fixed_controllable + &other.fixed_controllable,
            shift_uncontrolled: &self.shift_uncontrolled + &other.shift_uncontrolled,
            shift_controllable: &self.shift_controllable + &other.shift_controllable,
        }
    }
}

/// On-site solar generation over the year, as a scaled hourly profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolarGeneration {
    pub timeseries: HourlyProfile,
}

impl SolarGeneration {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn total(&self) -> f64 {
        self.timeseries.total()
    }

    pub fn combine(&self, other: &Self) -> Self {
        Self {
            timeseries: &self.timeseries + &other.timeseries,
        }
    }
}

/// A yearly fuel usage profile for one household area, or for the whole
/// household once components are combined. Every component carries the same
/// fields; those that do not apply are zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsageProfile {
    /// Days with an electricity connection.
    pub elx_connection_days: f64,
    pub electricity_kwh: ElectricityUsage,
    pub solar_generation_kwh: SolarGeneration,
    /// Days with a natural gas connection.
    pub natural_gas_connection_days: f64,
    pub natural_gas_kwh: f64,
    /// Days of LPG bottle rental (a pair of 45 kg bottles).
    pub lpg_tanks_rental_days: f64,
    pub lpg_kwh: f64,
    pub wood_kwh: f64,
    pub petrol_litres: f64,
    pub diesel_litres: f64,
    pub public_ev_charger_kwh: f64,
    /// Thousands of km driven, for road user charges.
    pub thousand_km: f64,
}

impl UsageProfile {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Combine two usage profiles. Flow quantities add; connection-day
    /// quantities take the maximum, since a shared connection is not billed
    /// twice.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            elx_connection_days: self.elx_connection_days.max(other.elx_connection_days),
            electricity_kwh: self.electricity_kwh.combine(&other.electricity_kwh),
            solar_generation_kwh: self.solar_generation_kwh.combine(&other.solar_generation_kwh),
            natural_gas_connection_days: self
                .natural_gas_connection_days
                .max(other.natural_gas_connection_days),
            natural_gas_kwh: self.natural_gas_kwh + other.natural_gas_kwh,
            lpg_tanks_rental_days: self.lpg_tanks_rental_days.max(other.lpg_tanks_rental_days),
            lpg_kwh: self.lpg_kwh + other.lpg_kwh,
            wood_kwh: self.wood_kwh + other.wood_kwh,
            petrol_litres: self.petrol_litres + other.petrol_litres,
            diesel_litres: self.diesel_litres + other.diesel_litres,
            public_ev_charger_kwh: self.public_ev_charger_kwh + other.public_ev_charger_kwh,
            thousand_km: self.thousand_km + other.thousand_km,
        }
    }

    /// Fold any number of component profiles into one, starting from the
    /// all-zero identity.
    pub fn aggregate<'a>(components: impl IntoIterator<Item = &'a UsageProfile>) -> Self {
        components
            .into_iter()
            .fold(Self::zero(), |acc, component| acc.combine(component))
    }
}
