use crate::errors::CalcError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// This module contains the input definitions for a calculation request: the
/// closed appliance/fuel enumerations and the per-topic answer records a
/// household supplies. Behaviour is selected by pattern matching on these
/// variants; string forms exist only at the serialisation boundary, where a
/// failed parse is reported as `UnknownApplianceType`.

fn unknown_appliance(name: &str) -> CalcError {
    CalcError::UnknownApplianceType(name.to_string())
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum MainHeatingSource {
    #[serde(rename = "Heat pump")]
    #[strum(serialize = "Heat pump")]
    HeatPump,
    #[serde(rename = "Electric heater")]
    #[strum(serialize = "Electric heater")]
    ElectricHeater,
    #[serde(rename = "Piped gas heater")]
    #[strum(serialize = "Piped gas heater")]
    PipedGasHeater,
    #[serde(rename = "Bottled gas heater")]
    #[strum(serialize = "Bottled gas heater")]
    BottledGasHeater,
    #[serde(rename = "Wood burner")]
    #[strum(serialize = "Wood burner")]
    WoodBurner,
}

impl MainHeatingSource {
    pub fn from_name(name: &str) -> Result<Self, CalcError> {
        Self::from_str(name).map_err(|_| unknown_appliance(name))
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum HotWaterHeatingSource {
    #[serde(rename = "Electric hot water cylinder")]
    #[strum(serialize = "Electric hot water cylinder")]
    ElectricCylinder,
    #[serde(rename = "Hot water heat pump")]
    #[strum(serialize = "Hot water heat pump")]
    HeatPump,
    #[serde(rename = "Piped gas hot water cylinder")]
    #[strum(serialize = "Piped gas hot water cylinder")]
    PipedGasCylinder,
    #[serde(rename = "Piped gas instantaneous")]
    #[strum(serialize = "Piped gas instantaneous")]
    PipedGasInstantaneous,
    #[serde(rename = "Bottled gas instantaneous")]
    #[strum(serialize = "Bottled gas instantaneous")]
    BottledGasInstantaneous,
}

impl HotWaterHeatingSource {
    pub fn from_name(name: &str) -> Result<Self, CalcError> {
        Self::from_str(name).map_err(|_| unknown_appliance(name))
    }

    pub fn is_electric(&self) -> bool {
        matches!(self, Self::ElectricCylinder | Self::HeatPump)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum CooktopType {
    #[serde(rename = "Electric induction")]
    #[strum(serialize = "Electric induction")]
    ElectricInduction,
    #[serde(rename = "Electric (coil or ceramic)")]
    #[strum(serialize = "Electric (coil or ceramic)")]
    ElectricResistance,
    #[serde(rename = "Piped gas")]
    #[strum(serialize = "Piped gas")]
    PipedGas,
    #[serde(rename = "Bottled gas")]
    #[strum(serialize = "Bottled gas")]
    BottledGas,
}

impl CooktopType {
    pub fn from_name(name: &str) -> Result<Self, CalcError> {
        Self::from_str(name).map_err(|_| unknown_appliance(name))
    }

    pub fn is_electric(&self) -> bool {
        matches!(self, Self::ElectricInduction | Self::ElectricResistance)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum VehicleType {
    Petrol,
    Diesel,
    Hybrid,
    #[serde(rename = "Plug-in hybrid")]
    #[strum(serialize = "Plug-in hybrid")]
    PlugInHybrid,
    Electric,
}

impl VehicleType {
    pub fn from_name(name: &str) -> Result<Self, CalcError> {
        Self::from_str(name).map_err(|_| unknown_appliance(name))
    }

    pub fn has_battery(&self) -> bool {
        matches!(self, Self::PlugInHybrid | Self::Electric)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum VehicleSize {
    Small,
    Medium,
    Large,
}

/// Distance-driven answer options, as bands rather than free numbers.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum WeeklyDistance {
    #[serde(rename = "50 or less")]
    #[strum(serialize = "50 or less")]
    FiftyOrLess,
    #[serde(rename = "100")]
    #[strum(serialize = "100")]
    OneHundred,
    #[serde(rename = "200")]
    #[strum(serialize = "200")]
    TwoHundred,
    #[serde(rename = "300")]
    #[strum(serialize = "300")]
    ThreeHundred,
    #[serde(rename = "400 or more")]
    #[strum(serialize = "400 or more")]
    FourHundredOrMore,
}

impl WeeklyDistance {
    pub(crate) fn km_per_week(&self) -> f64 {
        match self {
            Self::FiftyOrLess => 50.,
            Self::OneHundred => 100.,
            Self::TwoHundred => 200.,
            Self::ThreeHundred => 300.,
            Self::FourHundredOrMore => 400.,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum HotWaterUsage {
    Low,
    Average,
    High,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum ThermalEnvelope {
    #[serde(rename = "Not well insulated")]
    #[strum(serialize = "Not well insulated")]
    NotWellInsulated,
    #[serde(rename = "Moderately insulated")]
    #[strum(serialize = "Moderately insulated")]
    ModeratelyInsulated,
    #[serde(rename = "Well insulated")]
    #[strum(serialize = "Well insulated")]
    WellInsulated,
}

impl ThermalEnvelope {
    /// Multiplier on a standard home's heating demand.
    pub(crate) fn demand_factor(&self) -> f64 {
        match self {
            Self::NotWellInsulated => 1.4,
            Self::ModeratelyInsulated => 1.0,
            Self::WellInsulated => 0.61,
        }
    }
}

/// How many days per week the home is heated all day rather than only in the
/// morning and evening windows.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum FullDayHeatingFrequency {
    Never,
    #[serde(rename = "1-2 days a week")]
    #[strum(serialize = "1-2 days a week")]
    OneToTwoDays,
    #[serde(rename = "3-4 days a week")]
    #[strum(serialize = "3-4 days a week")]
    ThreeToFourDays,
    #[serde(rename = "5-7 days a week")]
    #[strum(serialize = "5-7 days a week")]
    FiveToSevenDays,
}

impl FullDayHeatingFrequency {
    /// Full-day heating days in the given ISO week: the low end of the answer
    /// range on odd weeks, the high end on even weeks.
    pub(crate) fn days_for_week(&self, week_number: u32) -> usize {
        let odd = week_number % 2 == 1;
        match self {
            Self::Never => 0,
            Self::OneToTwoDays => {
                if odd {
                    1
                } else {
                    2
                }
            }
            Self::ThreeToFourDays => {
                if odd {
                    3
                } else {
                    4
                }
            }
            Self::FiveToSevenDays => {
                if odd {
                    5
                } else {
                    7
                }
            }
        }
    }

    /// Average number of full-day heating days per week, for annual demand
    /// estimation.
    pub(crate) fn average_days_per_week(&self) -> f64 {
        match self {
            Self::Never => 0.,
            Self::OneToTwoDays => 1.5,
            Self::ThreeToFourDays => 3.5,
            Self::FiveToSevenDays => 6.,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct YourHomeAnswers {
    pub people_in_house: usize,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HeatingAnswers {
    pub main_heating_source: MainHeatingSource,
    pub alternative_main_heating_source: Option<MainHeatingSource>,
    pub heating_during_day: FullDayHeatingFrequency,
    pub insulation_quality: ThermalEnvelope,
}

impl HeatingAnswers {
    /// The heating source for the evaluated scenario, falling back to the
    /// current source when no alternative was given.
    pub fn source_for(&self, use_alternative: bool) -> MainHeatingSource {
        if use_alternative {
            self.alternative_main_heating_source
                .unwrap_or(self.main_heating_source)
        } else {
            self.main_heating_source
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HotWaterAnswers {
    pub hot_water_usage: HotWaterUsage,
    pub hot_water_heating_source: HotWaterHeatingSource,
    pub alternative_hot_water_heating_source: Option<HotWaterHeatingSource>,
}

impl HotWaterAnswers {
    pub fn source_for(&self, use_alternative: bool) -> HotWaterHeatingSource {
        if use_alternative {
            self.alternative_hot_water_heating_source
                .unwrap_or(self.hot_water_heating_source)
        } else {
            self.hot_water_heating_source
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CooktopAnswers {
    pub cooktop: CooktopType,
    pub alternative_cooktop: Option<CooktopType>,
}

impl CooktopAnswers {
    pub fn cooktop_for(&self, use_alternative: bool) -> CooktopType {
        if use_alternative {
            self.alternative_cooktop.unwrap_or(self.cooktop)
        } else {
            self.cooktop
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DrivingAnswers {
    pub vehicle_size: VehicleSize,
    pub km_per_week: WeeklyDistance,
    pub vehicle_type: VehicleType,
    pub alternative_vehicle_type: Option<VehicleType>,
}

impl DrivingAnswers {
    pub fn vehicle_for(&self, use_alternative: bool) -> VehicleType {
        if use_alternative {
            self.alternative_vehicle_type.unwrap_or(self.vehicle_type)
        } else {
            self.vehicle_type
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SolarAnswers {
    pub add_solar: bool,
}

/// All answers for one calculation request. Topics the household did not
/// answer are `None` and contribute an all-zero usage profile.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HouseholdAnswers {
    pub your_home: YourHomeAnswers,
    pub heating: Option<HeatingAnswers>,
    pub hot_water: Option<HotWaterAnswers>,
    pub cooktop: Option<CooktopAnswers>,
    pub driving: Option<DrivingAnswers>,
    pub solar: Option<SolarAnswers>,
}
