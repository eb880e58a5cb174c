pub mod cop;
pub mod demand;
pub mod emissions;
pub mod energy_supply;
pub mod profile;
pub mod schedule;
pub mod tariff;
pub mod units;
pub mod usage;
