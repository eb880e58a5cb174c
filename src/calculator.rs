use crate::context::CalculationContext;
use crate::core::demand::base_load::{baseline_day_night_kwh, flat_day_night_profiles};
use crate::core::demand::cooktop::cooktop_usage_profile;
use crate::core::demand::ev_charging::{
    ev_charging_profile, DEFAULT_CHARGER_KW, EV_PUBLIC_CHARGING_FRACTION,
};
use crate::core::demand::hot_water::{
    daily_demand_kwh, heat_pump_cylinder_volume_litres, heating_efficiency,
    other_water_kwh_per_year, shower_kwh_per_year, solar_friendly_profile,
    standing_loss_kwh_per_year, TankSize, HOT_WATER_FLEXIBLE_KWH_FRACTION,
    HOT_WATER_POWER_INPUT_KW,
};
use crate::core::demand::space_heating::{space_heating_profile, SPACE_HEATING_SETPOINT_C};
use crate::core::emissions::{emissions_kg_co2e, Fuel};
use crate::core::energy_supply::solar_diverter::reroute_hot_water_to_solar;
use crate::core::tariff::{EnergyCostBreakdown, HouseholdEnergyPlan, SolarSavingsBreakdown};
use crate::core::units::DAYS_IN_BILLING_YEAR;
use crate::core::usage::{ElectricityUsage, SolarGeneration, UsageProfile};
use crate::input::{
    CooktopAnswers, CooktopType, DrivingAnswers, HeatingAnswers, HotWaterAnswers,
    HotWaterHeatingSource, HouseholdAnswers, MainHeatingSource, SolarAnswers, VehicleType,
};
use tracing::warn;

/// Assembly of per-end-use usage profiles into a household estimate, and the
/// savings calculations built on top of it.

/// Per-heating-degree-day demand of a standard home, in kWh.
const STANDARD_HOME_KWH_PER_HEATING_DEGREE_DAY: f64 = 1.94;
/// Fraction of the home the household actually heats.
const LIVING_AREA_FRACTION: f64 = 0.63;

/// Weight of each daily heating period in annual demand. Mornings and
/// evenings are heated every day; the day weight applies per full heating
/// day per week.
const MORNING_HEATING_FACTOR_PER_DAY: f64 = 0.04971;
const DAY_HEATING_FACTOR_PER_DAY: f64 = 0.07398;
const EVENING_HEATING_FACTOR_PER_DAY: f64 = 0.07201;

const GAS_SPACE_HEATING_EFFICIENCY: f64 = 0.8;
const LPG_SPACE_HEATING_EFFICIENCY: f64 = 0.8;
const ELECTRIC_HEATER_SPACE_HEATING_EFFICIENCY: f64 = 1.0;
const LOG_BURNER_SPACE_HEATING_EFFICIENCY: f64 = 0.7;

/// Average household size, used to scale standard-household energy figures
/// by occupancy while preserving the average.
const AVERAGE_HOUSEHOLD_SIZE: f64 = 2.69;

const STANDARD_COOKTOP_KWH_INDUCTION: f64 = 294.;
const STANDARD_COOKTOP_KWH_RESISTANCE: f64 = 325.;
const STANDARD_COOKTOP_KWH_GAS: f64 = 760.;

/// Modelled fuel consumption, in litres per 100 km.
fn fuel_consumption_litres_per_100km(vehicle_type: VehicleType) -> f64 {
    match vehicle_type {
        VehicleType::Petrol | VehicleType::Diesel => 8.,
        VehicleType::Hybrid => 5.,
        VehicleType::PlugInHybrid => 1.,
        VehicleType::Electric => 0.,
    }
}

/// Modelled battery economy, in kWh per 100 km.
fn battery_economy_kwh_per_100km(vehicle_type: VehicleType) -> f64 {
    match vehicle_type {
        VehicleType::PlugInHybrid | VehicleType::Electric => 17.5,
        _ => 0.,
    }
}

/// Behaviour switches for a usage estimate.
#[derive(Clone, Copy, Debug, Default)]
pub struct UsageOptions {
    /// Evaluate the alternative appliance choices instead of the current
    /// ones.
    pub use_alternatives: bool,
    /// Include baseline "other" electricity demand, needed whenever solar
    /// self-consumption is being assessed.
    pub include_other_electricity: bool,
    /// Reshape hot water usage with the diverter simulation.
    pub use_solar_diverter: bool,
}

/// Annual space heating service demand, in kWh, before heater efficiency.
fn annual_space_heating_demand_kwh(
    answers: &HeatingAnswers,
    context: &CalculationContext,
) -> f64 {
    let frequency_factor = MORNING_HEATING_FACTOR_PER_DAY * 7.
        + DAY_HEATING_FACTOR_PER_DAY * answers.heating_during_day.average_days_per_week()
        + EVENING_HEATING_FACTOR_PER_DAY * 7.;
    context.heating_degree_days
        * STANDARD_HOME_KWH_PER_HEATING_DEGREE_DAY
        * LIVING_AREA_FRACTION
        * answers.insulation_quality.demand_factor()
        * frequency_factor
}

fn heating_usage(
    answers: &HeatingAnswers,
    context: &CalculationContext,
    use_alternative: bool,
) -> anyhow::Result<UsageProfile> {
    let source = answers.source_for(use_alternative);
    let service_demand_kwh = annual_space_heating_demand_kwh(answers, context);

    Ok(match source {
        MainHeatingSource::PipedGasHeater => UsageProfile {
            natural_gas_kwh: service_demand_kwh / GAS_SPACE_HEATING_EFFICIENCY,
            natural_gas_connection_days: DAYS_IN_BILLING_YEAR,
            elx_connection_days: DAYS_IN_BILLING_YEAR,
            ..Default::default()
        },
        MainHeatingSource::BottledGasHeater => UsageProfile {
            lpg_kwh: service_demand_kwh / LPG_SPACE_HEATING_EFFICIENCY,
            lpg_tanks_rental_days: DAYS_IN_BILLING_YEAR,
            elx_connection_days: DAYS_IN_BILLING_YEAR,
            ..Default::default()
        },
        MainHeatingSource::WoodBurner => UsageProfile {
            wood_kwh: service_demand_kwh / LOG_BURNER_SPACE_HEATING_EFFICIENCY,
            elx_connection_days: DAYS_IN_BILLING_YEAR,
            ..Default::default()
        },
        MainHeatingSource::HeatPump => {
            let cop = context.space_heating_cop_series()?;
            let shape = space_heating_profile(
                context.climate.hourly_temperatures(),
                answers.heating_during_day,
                SPACE_HEATING_SETPOINT_C,
                Some(&cop),
            )?;
            let electricity_kwh = service_demand_kwh / context.cop.space_heating_annual_cop;
            UsageProfile {
                elx_connection_days: DAYS_IN_BILLING_YEAR,
                electricity_kwh: ElectricityUsage {
                    fixed_uncontrolled: shape.scaled_by(electricity_kwh),
                    ..Default::default()
                },
                ..Default::default()
            }
        }
        MainHeatingSource::ElectricHeater => {
            let shape = space_heating_profile(
                context.climate.hourly_temperatures(),
                answers.heating_during_day,
                SPACE_HEATING_SETPOINT_C,
                None,
            )?;
            let electricity_kwh = service_demand_kwh / ELECTRIC_HEATER_SPACE_HEATING_EFFICIENCY;
            UsageProfile {
                elx_connection_days: DAYS_IN_BILLING_YEAR,
                electricity_kwh: ElectricityUsage {
                    fixed_uncontrolled: shape.scaled_by(electricity_kwh),
                    ..Default::default()
                },
                ..Default::default()
            }
        }
    })
}

fn hot_water_usage(
    answers: &HotWaterAnswers,
    people_in_house: usize,
    context: &CalculationContext,
    use_alternative: bool,
) -> anyhow::Result<UsageProfile> {
    let source = answers.source_for(use_alternative);

    let inlet_temperature = context.climate.inlet_water_temperature;
    let service_demand_kwh =
        shower_kwh_per_year(answers.hot_water_usage, inlet_temperature, people_in_house)
            + other_water_kwh_per_year(inlet_temperature, people_in_house);
    let heat_demand_kwh = service_demand_kwh
        + standing_loss_kwh_per_year(
            source,
            people_in_house,
            context.climate.average_air_temperature,
        );
    let efficiency = heating_efficiency(source, context.cop.hot_water_annual_cop);
    let total_kwh = heat_demand_kwh / efficiency;

    if source.is_electric() {
        let daily_cop = match source {
            HotWaterHeatingSource::HeatPump => Some(context.hot_water_cop_series()?),
            _ => None,
        };
        let daily_energy = daily_demand_kwh(
            &context.climate.daily_mean_temperatures(),
            heat_demand_kwh,
            daily_cop.as_deref(),
        )?;
        let shape = solar_friendly_profile(&daily_energy, HOT_WATER_POWER_INPUT_KW)?;

        let flexible_kwh = total_kwh * HOT_WATER_FLEXIBLE_KWH_FRACTION;
        let fixed_kwh = total_kwh - flexible_kwh;
        // the fixed portion is daytime demand; the flexible portion keeps
        // the full shape so it can follow solar or night windows
        let fixed_shape = shape.daytime().normalized_or_zero();
        return Ok(UsageProfile {
            elx_connection_days: DAYS_IN_BILLING_YEAR,
            electricity_kwh: ElectricityUsage {
                fixed_controllable: fixed_shape.scaled_by(fixed_kwh),
                shift_controllable: shape.scaled_by(flexible_kwh),
                ..Default::default()
            },
            ..Default::default()
        });
    }

    Ok(match source {
        HotWaterHeatingSource::PipedGasCylinder | HotWaterHeatingSource::PipedGasInstantaneous => {
            UsageProfile {
                natural_gas_kwh: total_kwh,
                natural_gas_connection_days: DAYS_IN_BILLING_YEAR,
                elx_connection_days: DAYS_IN_BILLING_YEAR,
                ..Default::default()
            }
        }
        HotWaterHeatingSource::BottledGasInstantaneous => UsageProfile {
            lpg_kwh: total_kwh,
            lpg_tanks_rental_days: DAYS_IN_BILLING_YEAR,
            elx_connection_days: DAYS_IN_BILLING_YEAR,
            ..Default::default()
        },
        HotWaterHeatingSource::ElectricCylinder | HotWaterHeatingSource::HeatPump => {
            unreachable!("electric sources are handled above")
        }
    })
}

fn cooktop_usage(
    answers: &CooktopAnswers,
    people_in_house: usize,
    use_alternative: bool,
) -> UsageProfile {
    let cooktop = answers.cooktop_for(use_alternative);
    let standard_kwh = match cooktop {
        CooktopType::ElectricInduction => STANDARD_COOKTOP_KWH_INDUCTION,
        CooktopType::ElectricResistance => STANDARD_COOKTOP_KWH_RESISTANCE,
        CooktopType::PipedGas | CooktopType::BottledGas => STANDARD_COOKTOP_KWH_GAS,
    };
    // linearised occupancy scaling that preserves the average household's
    // energy use for cooking
    let total_kwh =
        standard_kwh * (1. + people_in_house as f64) / (1. + AVERAGE_HOUSEHOLD_SIZE);

    match cooktop {
        CooktopType::ElectricInduction | CooktopType::ElectricResistance => UsageProfile {
            elx_connection_days: DAYS_IN_BILLING_YEAR,
            electricity_kwh: ElectricityUsage {
                fixed_uncontrolled: cooktop_usage_profile().scaled_by(total_kwh),
                ..Default::default()
            },
            ..Default::default()
        },
        CooktopType::PipedGas => UsageProfile {
            natural_gas_kwh: total_kwh,
            natural_gas_connection_days: DAYS_IN_BILLING_YEAR,
            elx_connection_days: DAYS_IN_BILLING_YEAR,
            ..Default::default()
        },
        CooktopType::BottledGas => UsageProfile {
            lpg_kwh: total_kwh,
            lpg_tanks_rental_days: DAYS_IN_BILLING_YEAR,
            elx_connection_days: DAYS_IN_BILLING_YEAR,
            ..Default::default()
        },
    }
}

fn driving_usage(
    answers: &DrivingAnswers,
    use_alternative: bool,
) -> anyhow::Result<UsageProfile> {
    let vehicle_type = answers.vehicle_for(use_alternative);
    let daily_distance_km = answers.km_per_week.km_per_week() / 7.;
    let thousand_km = daily_distance_km * DAYS_IN_BILLING_YEAR / 1000.;

    let fuel_litres =
        thousand_km * 10. * fuel_consumption_litres_per_100km(vehicle_type);
    let (petrol_litres, diesel_litres) = match vehicle_type {
        VehicleType::Petrol | VehicleType::Hybrid | VehicleType::PlugInHybrid => (fuel_litres, 0.),
        VehicleType::Diesel => (0., fuel_litres),
        VehicleType::Electric => (0., 0.),
    };

    let mut electricity_kwh = ElectricityUsage::zero();
    let mut public_charging_kwh = 0.;
    if vehicle_type.has_battery() {
        let total_kwh = thousand_km * 10. * battery_economy_kwh_per_100km(vehicle_type);
        public_charging_kwh = total_kwh * EV_PUBLIC_CHARGING_FRACTION;
        let home_charging_kwh = total_kwh - public_charging_kwh;
        let shape = ev_charging_profile(home_charging_kwh, DEFAULT_CHARGER_KW)?;
        electricity_kwh.shift_uncontrolled = shape.scaled_by(home_charging_kwh);
    }

    Ok(UsageProfile {
        elx_connection_days: DAYS_IN_BILLING_YEAR,
        electricity_kwh,
        petrol_litres,
        diesel_litres,
        public_ev_charger_kwh: public_charging_kwh,
        thousand_km,
        ..Default::default()
    })
}

fn solar_usage(add_solar: bool, context: &CalculationContext) -> UsageProfile {
    if !add_solar {
        return UsageProfile::zero();
    }
    UsageProfile {
        solar_generation_kwh: SolarGeneration {
            timeseries: context.solar_generation.clone(),
        },
        ..Default::default()
    }
}

/// Baseline demand from appliances the questionnaire does not cover
/// (refrigeration, lighting, laundry, electronics).
fn other_electricity_usage() -> UsageProfile {
    let (day_kwh, night_kwh) = baseline_day_night_kwh();
    let (day_shape, night_shape) = flat_day_night_profiles();
    UsageProfile {
        elx_connection_days: DAYS_IN_BILLING_YEAR,
        electricity_kwh: ElectricityUsage {
            fixed_uncontrolled: &day_shape.scaled_by(day_kwh) + &night_shape.scaled_by(night_kwh),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Whether any appliance (current or alternative, as selected) burns piped
/// gas.
pub fn uses_natural_gas(answers: &HouseholdAnswers, use_alternatives: bool) -> bool {
    let heating = answers
        .heating
        .as_ref()
        .map(|heating| heating.source_for(use_alternatives));
    let hot_water = answers
        .hot_water
        .as_ref()
        .map(|hot_water| hot_water.source_for(use_alternatives));
    let cooktop = answers
        .cooktop
        .as_ref()
        .map(|cooktop| cooktop.cooktop_for(use_alternatives));
    heating == Some(MainHeatingSource::PipedGasHeater)
        || matches!(
            hot_water,
            Some(HotWaterHeatingSource::PipedGasCylinder)
                | Some(HotWaterHeatingSource::PipedGasInstantaneous)
        )
        || cooktop == Some(CooktopType::PipedGas)
}

/// Whether any appliance (current or alternative, as selected) burns bottled
/// gas.
pub fn uses_lpg(answers: &HouseholdAnswers, use_alternatives: bool) -> bool {
    let heating = answers
        .heating
        .as_ref()
        .map(|heating| heating.source_for(use_alternatives));
    let hot_water = answers
        .hot_water
        .as_ref()
        .map(|hot_water| hot_water.source_for(use_alternatives));
    let cooktop = answers
        .cooktop
        .as_ref()
        .map(|cooktop| cooktop.cooktop_for(use_alternatives));
    heating == Some(MainHeatingSource::BottledGasHeater)
        || hot_water == Some(HotWaterHeatingSource::BottledGasInstantaneous)
        || cooktop == Some(CooktopType::BottledGas)
}

/// Estimate the household's yearly fuel usage profile from its answers.
pub fn estimate_household_usage(
    answers: &HouseholdAnswers,
    context: &CalculationContext,
    options: UsageOptions,
) -> anyhow::Result<UsageProfile> {
    let people_in_house = answers.your_home.people_in_house;
    let use_alternatives = options.use_alternatives;

    let heating_profile = answers
        .heating
        .as_ref()
        .map(|heating| heating_usage(heating, context, use_alternatives))
        .transpose()?
        .unwrap_or_default();
    let mut hot_water_profile = answers
        .hot_water
        .as_ref()
        .map(|hot_water| hot_water_usage(hot_water, people_in_house, context, use_alternatives))
        .transpose()?
        .unwrap_or_default();
    let cooktop_profile = answers
        .cooktop
        .as_ref()
        .map(|cooktop| cooktop_usage(cooktop, people_in_house, use_alternatives))
        .unwrap_or_default();
    let driving_profile = answers
        .driving
        .as_ref()
        .map(|driving| driving_usage(driving, use_alternatives))
        .transpose()?
        .unwrap_or_default();
    let add_solar = answers.solar.map(|solar| solar.add_solar).unwrap_or(false);
    let solar_profile = solar_usage(add_solar, context);
    let other_profile = if options.include_other_electricity {
        other_electricity_usage()
    } else {
        UsageProfile::zero()
    };

    if add_solar && options.use_solar_diverter {
        if let Some(hot_water) = answers.hot_water.as_ref() {
            let source = hot_water.source_for(use_alternatives);
            let non_hot_water = heating_profile
                .electricity_kwh
                .combine(&cooktop_profile.electricity_kwh)
                .combine(&driving_profile.electricity_kwh)
                .combine(&other_profile.electricity_kwh);
            hot_water_profile.electricity_kwh = reroute_hot_water_to_solar(
                &hot_water_profile.electricity_kwh,
                &solar_profile.solar_generation_kwh,
                &non_hot_water,
                heat_pump_cylinder_volume_litres(TankSize::for_household(people_in_house)),
                HOT_WATER_POWER_INPUT_KW,
                heating_efficiency(source, context.cop.hot_water_annual_cop),
            );
        }
    }

    let mut aggregated = UsageProfile::aggregate([
        &heating_profile,
        &hot_water_profile,
        &cooktop_profile,
        &driving_profile,
        &solar_profile,
        &other_profile,
    ]);

    // connection days follow fuel presence for the evaluated scenario; a
    // household always has an electricity connection
    aggregated.elx_connection_days = DAYS_IN_BILLING_YEAR;
    aggregated.natural_gas_connection_days = if uses_natural_gas(answers, use_alternatives) {
        DAYS_IN_BILLING_YEAR
    } else {
        0.
    };
    aggregated.lpg_tanks_rental_days = if uses_lpg(answers, use_alternatives) {
        DAYS_IN_BILLING_YEAR
    } else {
        0.
    };

    Ok(aggregated)
}

/// Cost and emissions for one household scenario.
pub fn costs_and_emissions(
    answers: &HouseholdAnswers,
    plan: &HouseholdEnergyPlan,
    context: &CalculationContext,
    options: UsageOptions,
) -> anyhow::Result<(EnergyCostBreakdown, f64)> {
    let usage = estimate_household_usage(answers, context, options)?;
    let cost = plan.calculate_cost(&usage)?;
    let emissions = emissions_kg_co2e(&usage, &context.emissions_factors);
    Ok((cost, emissions))
}

/// The benefit of adding rooftop solar to a household.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolarSavings {
    pub annual_kwh_generated: f64,
    pub annual_kg_co2e_saving: f64,
    pub annual_earnings_solar_export: f64,
    pub annual_savings_solar_self_consumption: f64,
}

/// Calculate the benefit of adding solar PV.
///
/// The home is assumed not to have solar yet. Savings from switching
/// appliances are attributed to electrification (costed without solar), and
/// the incremental change from adding solar on top of the alternative
/// configuration is attributed entirely to solar.
pub fn calculate_solar_savings(
    answers: &HouseholdAnswers,
    plan: &HouseholdEnergyPlan,
    context: &CalculationContext,
) -> anyhow::Result<SolarSavings> {
    if answers
        .heating
        .as_ref()
        .map_or(true, |heating| heating.alternative_main_heating_source.is_none())
    {
        warn!("No heating source selected. Self-consumption may be underestimated.");
    }
    if answers.hot_water.as_ref().map_or(true, |hot_water| {
        hot_water.alternative_hot_water_heating_source.is_none()
    }) {
        warn!("No hot water heating source selected. Self-consumption may be underestimated.");
    }
    if answers
        .cooktop
        .as_ref()
        .map_or(true, |cooktop| cooktop.alternative_cooktop.is_none())
    {
        warn!("No cooktop selected. Self-consumption may be underestimated.");
    }
    if answers
        .driving
        .as_ref()
        .map_or(true, |driving| driving.alternative_vehicle_type.is_none())
    {
        warn!("No vehicle type selected. Self-consumption may be underestimated.");
    }

    let mut with_solar = answers.clone();
    with_solar.solar = Some(SolarAnswers { add_solar: true });
    let usage = estimate_household_usage(
        &with_solar,
        context,
        UsageOptions {
            use_alternatives: true,
            include_other_electricity: true,
            use_solar_diverter: false,
        },
    )?;

    let annual_kwh_generated = usage.solar_generation_kwh.total();
    let annual_kg_co2e_saving =
        annual_kwh_generated * context.emissions_factors.factor(Fuel::Electricity);

    let breakdown = plan.electricity_plan.calculate_cost(&usage)?;
    let solar = breakdown.solar.unwrap_or_else(SolarSavingsBreakdown::default);

    Ok(SolarSavings {
        annual_kwh_generated,
        annual_kg_co2e_saving,
        annual_earnings_solar_export: solar.export_earnings,
        annual_savings_solar_self_consumption: solar.self_consumption_savings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ClimateData, CopTable};
    use crate::core::cop::CopMethod;
    use crate::core::emissions::EmissionsFactors;
    use crate::core::profile::HourlyProfile;
    use crate::core::tariff::{
        DieselPrice, ElectricityPlan, LpgPlan, NaturalGasPlan, PetrolPrice,
        PublicChargingPrice, RatePeriod, VehicleOwnershipCosts, WoodPrice,
    };
    use crate::core::units::HOURS_IN_YEAR;
    use crate::input::{
        CooktopAnswers, FullDayHeatingFrequency, HotWaterUsage, SolarAnswers, ThermalEnvelope,
        VehicleSize, WeeklyDistance, YourHomeAnswers,
    };
    use approx::assert_relative_eq;
    use indexmap::IndexMap;
    use rstest::*;

    #[fixture]
    fn context() -> CalculationContext {
        let temperatures: Vec<f64> = (0..HOURS_IN_YEAR)
            .map(|hour| {
                let day = (hour / 24) as f64;
                let hour_of_day = (hour % 24) as f64;
                11. + 6. * (day / 365. * std::f64::consts::TAU).cos()
                    + 3. * ((hour_of_day - 15.) / 12. * std::f64::consts::PI).cos()
            })
            .collect();
        let generation = HourlyProfile::from_fn(|hour| match hour % 24 {
            9..=16 => 3.,
            _ => 0.,
        });
        CalculationContext {
            climate: ClimateData::from_hourly_temperatures(temperatures).unwrap(),
            cop: CopTable {
                method: CopMethod::Constant,
                space_heating_annual_cop: 4.97,
                hot_water_annual_cop: 4.15,
            },
            solar_generation: generation,
            emissions_factors: EmissionsFactors::published(),
            heating_degree_days: 1930.,
        }
    }

    #[fixture]
    fn answers() -> HouseholdAnswers {
        HouseholdAnswers {
            your_home: YourHomeAnswers { people_in_house: 3 },
            heating: Some(HeatingAnswers {
                main_heating_source: MainHeatingSource::WoodBurner,
                alternative_main_heating_source: Some(MainHeatingSource::HeatPump),
                heating_during_day: FullDayHeatingFrequency::ThreeToFourDays,
                insulation_quality: ThermalEnvelope::ModeratelyInsulated,
            }),
            hot_water: Some(HotWaterAnswers {
                hot_water_usage: HotWaterUsage::Average,
                hot_water_heating_source: HotWaterHeatingSource::ElectricCylinder,
                alternative_hot_water_heating_source: Some(HotWaterHeatingSource::HeatPump),
            }),
            cooktop: Some(CooktopAnswers {
                cooktop: CooktopType::PipedGas,
                alternative_cooktop: Some(CooktopType::ElectricInduction),
            }),
            driving: Some(DrivingAnswers {
                vehicle_size: VehicleSize::Medium,
                km_per_week: WeeklyDistance::TwoHundred,
                vehicle_type: VehicleType::Petrol,
                alternative_vehicle_type: Some(VehicleType::Electric),
            }),
            solar: None,
        }
    }

    fn plan() -> HouseholdEnergyPlan {
        HouseholdEnergyPlan {
            name: "test household plan".into(),
            electricity_plan: ElectricityPlan {
                name: "day/night".into(),
                daily_charge: 2.0,
                import_rates: IndexMap::from([
                    (RatePeriod::Day, 0.25),
                    (RatePeriod::Night, 0.15),
                ]),
                export_rates: IndexMap::from([(RatePeriod::Uncontrolled, 0.12)]),
            },
            natural_gas_plan: NaturalGasPlan {
                name: "gas".into(),
                daily_charge: 1.6,
                import_rates: IndexMap::from([(RatePeriod::Uncontrolled, 0.11)]),
            },
            lpg_plan: LpgPlan {
                name: "lpg".into(),
                per_kwh: 0.25,
                daily_charge: 0.19,
            },
            wood_price: WoodPrice {
                name: "wood".into(),
                per_kwh: 0.13,
            },
            petrol_price: PetrolPrice {
                name: "petrol".into(),
                per_litre: 2.78,
            },
            diesel_price: DieselPrice {
                name: "diesel".into(),
                per_litre: 2.16,
            },
            public_charging_price: PublicChargingPrice {
                name: "public charging".into(),
                per_kwh: 0.79,
            },
            other_vehicle_costs: VehicleOwnershipCosts {
                name: "other vehicle costs".into(),
                licensing_per_year: 107.09,
                servicing_per_year: 1133.15,
                road_user_charges_per_1000_km: 0.,
            },
        }
    }

    #[rstest]
    fn should_estimate_current_usage_across_fuels(
        answers: HouseholdAnswers,
        context: CalculationContext,
    ) {
        let usage =
            estimate_household_usage(&answers, &context, UsageOptions::default()).unwrap();
        // wood heating, electric hot water, gas cooking, petrol driving
        assert!(usage.wood_kwh > 0.);
        assert!(usage.electricity_kwh.annual_kwh() > 0.);
        assert!(usage.natural_gas_kwh > 0.);
        assert!(usage.petrol_litres > 0.);
        assert_eq!(usage.diesel_litres, 0.);
        assert_eq!(usage.natural_gas_connection_days, DAYS_IN_BILLING_YEAR);
        assert_eq!(usage.lpg_tanks_rental_days, 0.);
    }

    #[rstest]
    fn should_electrify_everything_under_alternatives(
        answers: HouseholdAnswers,
        context: CalculationContext,
    ) {
        let usage = estimate_household_usage(
            &answers,
            &context,
            UsageOptions {
                use_alternatives: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(usage.wood_kwh, 0.);
        assert_eq!(usage.natural_gas_kwh, 0.);
        assert_eq!(usage.petrol_litres, 0.);
        assert!(usage.public_ev_charger_kwh > 0.);
        assert_eq!(usage.natural_gas_connection_days, 0.);
    }

    #[rstest]
    fn should_keep_profile_energy_consistent_with_scalars(
        answers: HouseholdAnswers,
        context: CalculationContext,
    ) {
        let usage = estimate_household_usage(
            &answers,
            &context,
            UsageOptions {
                use_alternatives: true,
                include_other_electricity: true,
                ..Default::default()
            },
        )
        .unwrap();
        let electricity = &usage.electricity_kwh;
        assert_relative_eq!(
            electricity.total().total(),
            electricity.total_fixed().total() + electricity.total_shiftable().total(),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            electricity.annual_kwh(),
            electricity.controllable().total() + electricity.uncontrolled().total(),
            max_relative = 1e-9
        );
    }

    #[rstest]
    fn should_reshape_hot_water_but_not_its_total_under_the_diverter(
        answers: HouseholdAnswers,
        context: CalculationContext,
    ) {
        let mut with_solar = answers.clone();
        with_solar.solar = Some(SolarAnswers { add_solar: true });
        let options = UsageOptions {
            use_alternatives: true,
            include_other_electricity: true,
            use_solar_diverter: false,
        };
        let without_diverter =
            estimate_household_usage(&with_solar, &context, options).unwrap();
        let with_diverter = estimate_household_usage(
            &with_solar,
            &context,
            UsageOptions {
                use_solar_diverter: true,
                ..options
            },
        )
        .unwrap();
        assert_relative_eq!(
            with_diverter.electricity_kwh.annual_kwh(),
            without_diverter.electricity_kwh.annual_kwh(),
            max_relative = 1e-9
        );
        assert_ne!(
            with_diverter.electricity_kwh.total().values(),
            without_diverter.electricity_kwh.total().values()
        );
    }

    #[rstest]
    fn should_calculate_household_costs_and_emissions(
        answers: HouseholdAnswers,
        context: CalculationContext,
    ) {
        let (cost, emissions) =
            costs_and_emissions(&answers, &plan(), &context, UsageOptions::default()).unwrap();
        assert!(cost.fixed_cost > 0.);
        assert!(cost.variable_cost > 0.);
        assert!(emissions > 0.);
    }

    #[rstest]
    fn should_report_positive_solar_savings(
        answers: HouseholdAnswers,
        context: CalculationContext,
    ) {
        let savings = calculate_solar_savings(&answers, &plan(), &context).unwrap();
        assert_relative_eq!(
            savings.annual_kwh_generated,
            context.solar_generation.total(),
            max_relative = 1e-9
        );
        assert!(savings.annual_kg_co2e_saving > 0.);
        assert!(savings.annual_savings_solar_self_consumption > 0.);
        assert!(
            savings.annual_earnings_solar_export + savings.annual_savings_solar_self_consumption
                > 0.
        );
    }
}
