use crate::core::energy_supply::solar_allocation::{compute_solar_offset, SolarAllocation};
use crate::core::usage::UsageProfile;
use crate::errors::CalcError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::Display;

/// Energy plans and cost evaluation.
///
/// A plan charges under a closed set of named rate periods. Only the key-set
/// combinations enumerated in `variable_electricity_cost` are supported;
/// anything else fails fast rather than being priced on a guess.

/// Named rate periods a plan may charge under.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum RatePeriod {
    #[serde(rename = "All inclusive")]
    #[strum(serialize = "All inclusive")]
    AllInclusive,
    Day,
    Night,
    Uncontrolled,
    Controlled,
}

/// Cost outcome for one plan (or a whole household) and one usage profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnergyCostBreakdown {
    /// Daily charges x connection days.
    pub fixed_cost: f64,
    /// Consumption charges, net of solar self-consumption.
    pub variable_cost: f64,
    pub solar: Option<SolarSavingsBreakdown>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolarSavingsBreakdown {
    pub self_consumption_kwh: f64,
    pub export_kwh: f64,
    pub self_consumption_savings: f64,
    pub export_earnings: f64,
    pub self_consumption_pct: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ElectricityPlan {
    pub name: String,
    /// Daily fixed charge.
    pub daily_charge: f64,
    pub import_rates: IndexMap<RatePeriod, f64>,
    pub export_rates: IndexMap<RatePeriod, f64>,
}

/// Electricity import net of solar, bucketed for rate matching. Shiftable
/// usage not met by solar is assumed to be shifted to the cheapest available
/// period (night or controlled), which implies smart energy management; this
/// keeps solar savings from being double-counted against load-shifting
/// savings.
struct CategorisedImport {
    fixed_day_kwh: f64,
    fixed_night_kwh: f64,
    shiftable_kwh: f64,
    controllable_kwh: f64,
    uncontrolled_kwh: f64,
}

impl CategorisedImport {
    fn net_of(usage_profile: &UsageProfile, allocation: &SolarAllocation) -> Self {
        let electricity = &usage_profile.electricity_kwh;
        let fixed = electricity.total_fixed();
        Self {
            fixed_day_kwh: fixed.daytime_total() - allocation.fixed_self_consumption_kwh,
            fixed_night_kwh: fixed.nighttime_total(),
            shiftable_kwh: electricity.total_shiftable().total()
                - allocation.shift_self_consumption_kwh,
            controllable_kwh: electricity.controllable().total()
                - allocation.shift_self_consumption_kwh,
            uncontrolled_kwh: electricity.uncontrolled().total()
                - allocation.fixed_self_consumption_kwh,
        }
    }

    fn total_kwh(&self) -> f64 {
        self.fixed_day_kwh + self.fixed_night_kwh + self.shiftable_kwh
    }
}

impl ElectricityPlan {
    pub fn calculate_cost(
        &self,
        usage_profile: &UsageProfile,
    ) -> Result<EnergyCostBreakdown, CalcError> {
        let fixed_cost = usage_profile.elx_connection_days * self.daily_charge;

        let allocation = compute_solar_offset(usage_profile);
        let import = CategorisedImport::net_of(usage_profile, &allocation);
        let (variable_cost, self_consumption_savings) =
            self.variable_electricity_cost(&import, &allocation)?;

        let export_rate = self
            .export_rates
            .get(&RatePeriod::Uncontrolled)
            .copied()
            .unwrap_or(0.);
        let export_earnings = allocation.export_kwh * export_rate;
        let self_consumption_kwh = allocation.self_consumption_kwh();
        let total_solar_kwh = self_consumption_kwh + allocation.export_kwh;
        let self_consumption_pct = if total_solar_kwh > 0. {
            self_consumption_kwh / total_solar_kwh * 100.
        } else {
            0.
        };

        Ok(EnergyCostBreakdown {
            fixed_cost,
            variable_cost,
            solar: Some(SolarSavingsBreakdown {
                self_consumption_kwh,
                export_kwh: allocation.export_kwh,
                self_consumption_savings,
                export_earnings,
                self_consumption_pct,
            }),
        })
    }

    /// Price the net import under the plan's rate period keys, returning the
    /// variable cost and the value of solar self-consumption at the rates
    /// the offset usage would have paid.
    fn variable_electricity_cost(
        &self,
        import: &CategorisedImport,
        allocation: &SolarAllocation,
    ) -> Result<(f64, f64), CalcError> {
        use RatePeriod::*;

        let keys: BTreeSet<RatePeriod> = self.import_rates.keys().copied().collect();
        let rate = |period: RatePeriod| self.import_rates[&period];
        let fixed_sc = allocation.fixed_self_consumption_kwh;
        let shift_sc = allocation.shift_self_consumption_kwh;

        let single_rate = |anytime: f64| {
            (
                import.total_kwh() * anytime,
                allocation.self_consumption_kwh() * anytime,
            )
        };
        // shiftable usage is met by solar first, then by the night rate
        let night_and = |day_rate: f64| {
            (
                import.fixed_day_kwh * day_rate
                    + (import.fixed_night_kwh + import.shiftable_kwh) * rate(Night),
                fixed_sc * day_rate + shift_sc * rate(Night),
            )
        };

        Ok(if keys == BTreeSet::from([AllInclusive]) {
            single_rate(rate(AllInclusive))
        } else if keys == BTreeSet::from([Uncontrolled]) {
            single_rate(rate(Uncontrolled))
        } else if keys == BTreeSet::from([Day, Night]) {
            night_and(rate(Day))
        } else if keys == BTreeSet::from([Night, AllInclusive]) {
            night_and(rate(AllInclusive))
        } else if keys == BTreeSet::from([Night, Uncontrolled]) {
            night_and(rate(Uncontrolled))
        } else if keys == BTreeSet::from([Uncontrolled, Controlled]) {
            (
                import.uncontrolled_kwh * rate(Uncontrolled)
                    + import.controllable_kwh * rate(Controlled),
                fixed_sc * rate(Uncontrolled) + shift_sc * rate(Controlled),
            )
        } else {
            return Err(CalcError::UnrecognizedTariffKeySet(
                keys.iter().map(|key| key.to_string()).collect(),
            ));
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NaturalGasPlan {
    pub name: String,
    pub daily_charge: f64,
    pub import_rates: IndexMap<RatePeriod, f64>,
}

impl NaturalGasPlan {
    pub fn calculate_cost(
        &self,
        usage_profile: &UsageProfile,
    ) -> Result<EnergyCostBreakdown, CalcError> {
        let keys: BTreeSet<RatePeriod> = self.import_rates.keys().copied().collect();
        if keys != BTreeSet::from([RatePeriod::Uncontrolled]) {
            return Err(CalcError::UnrecognizedTariffKeySet(
                keys.iter().map(|key| key.to_string()).collect(),
            ));
        }
        Ok(EnergyCostBreakdown {
            fixed_cost: usage_profile.natural_gas_connection_days * self.daily_charge,
            variable_cost: usage_profile.natural_gas_kwh
                * self.import_rates[&RatePeriod::Uncontrolled],
            solar: None,
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LpgPlan {
    pub name: String,
    pub per_kwh: f64,
    /// Daily bottle rental charge.
    pub daily_charge: f64,
}

impl LpgPlan {
    pub fn calculate_cost(&self, usage_profile: &UsageProfile) -> EnergyCostBreakdown {
        EnergyCostBreakdown {
            fixed_cost: usage_profile.lpg_tanks_rental_days * self.daily_charge,
            variable_cost: usage_profile.lpg_kwh * self.per_kwh,
            solar: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WoodPrice {
    pub name: String,
    pub per_kwh: f64,
}

impl WoodPrice {
    pub fn calculate_cost(&self, usage_profile: &UsageProfile) -> EnergyCostBreakdown {
        EnergyCostBreakdown {
            variable_cost: usage_profile.wood_kwh * self.per_kwh,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PetrolPrice {
    pub name: String,
    pub per_litre: f64,
}

impl PetrolPrice {
    pub fn calculate_cost(&self, usage_profile: &UsageProfile) -> EnergyCostBreakdown {
        EnergyCostBreakdown {
            variable_cost: usage_profile.petrol_litres * self.per_litre,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DieselPrice {
    pub name: String,
    pub per_litre: f64,
}

impl DieselPrice {
    pub fn calculate_cost(&self, usage_profile: &UsageProfile) -> EnergyCostBreakdown {
        EnergyCostBreakdown {
            variable_cost: usage_profile.diesel_litres * self.per_litre,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PublicChargingPrice {
    pub name: String,
    pub per_kwh: f64,
}

impl PublicChargingPrice {
    pub fn calculate_cost(&self, usage_profile: &UsageProfile) -> EnergyCostBreakdown {
        EnergyCostBreakdown {
            variable_cost: usage_profile.public_ev_charger_kwh * self.per_kwh,
            ..Default::default()
        }
    }
}

/// Non-energy costs of vehicle ownership.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VehicleOwnershipCosts {
    pub name: String,
    pub licensing_per_year: f64,
    pub servicing_per_year: f64,
    pub road_user_charges_per_1000_km: f64,
}

impl VehicleOwnershipCosts {
    pub fn calculate_cost(&self, usage_profile: &UsageProfile) -> EnergyCostBreakdown {
        EnergyCostBreakdown {
            variable_cost: self.licensing_per_year
                + self.servicing_per_year
                + usage_profile.thousand_km * self.road_user_charges_per_1000_km,
            ..Default::default()
        }
    }
}

/// The full set of plans a household buys energy under.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HouseholdEnergyPlan {
    pub name: String,
    pub electricity_plan: ElectricityPlan,
    pub natural_gas_plan: NaturalGasPlan,
    pub lpg_plan: LpgPlan,
    pub wood_price: WoodPrice,
    pub petrol_price: PetrolPrice,
    pub diesel_price: DieselPrice,
    pub public_charging_price: PublicChargingPrice,
    pub other_vehicle_costs: VehicleOwnershipCosts,
}

impl HouseholdEnergyPlan {
    /// Total energy costs for a household across all fuel types.
    pub fn calculate_cost(
        &self,
        usage_profile: &UsageProfile,
    ) -> Result<EnergyCostBreakdown, CalcError> {
        let electricity = self.electricity_plan.calculate_cost(usage_profile)?;
        let mut fixed_cost = electricity.fixed_cost;
        let mut variable_cost = electricity.variable_cost;

        let other_costs = [
            self.natural_gas_plan.calculate_cost(usage_profile)?,
            self.lpg_plan.calculate_cost(usage_profile),
            self.wood_price.calculate_cost(usage_profile),
            self.petrol_price.calculate_cost(usage_profile),
            self.diesel_price.calculate_cost(usage_profile),
            self.public_charging_price.calculate_cost(usage_profile),
            self.other_vehicle_costs.calculate_cost(usage_profile),
        ];
        for cost in other_costs {
            fixed_cost += cost.fixed_cost;
            variable_cost += cost.variable_cost;
        }

        // surface the solar breakdown only when solar actually contributed
        let solar = electricity.solar.filter(|breakdown| {
            breakdown.self_consumption_savings > 0. || breakdown.export_earnings > 0.
        });

        Ok(EnergyCostBreakdown {
            fixed_cost,
            variable_cost,
            solar,
        })
    }
}
