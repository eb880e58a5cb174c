use crate::core::usage::UsageProfile;
use itertools::izip;

/// Allocation of solar generation against household demand.
///
/// Fixed demand is offset first: shiftable load is assumed schedulable into
/// solar hours, but is not allowed to crowd out inflexible self-consumption
/// credit in the accounting. Whatever generation neither category absorbs is
/// exported.

/// Annual self-consumption/export split, in kWh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolarAllocation {
    /// Solar used by shiftable household loads.
    pub shift_self_consumption_kwh: f64,
    /// Solar used by fixed (day/night) loads.
    pub fixed_self_consumption_kwh: f64,
    /// Solar exported to the grid.
    pub export_kwh: f64,
}

impl SolarAllocation {
    pub fn self_consumption_kwh(&self) -> f64 {
        self.shift_self_consumption_kwh + self.fixed_self_consumption_kwh
    }
}

/// Compute how much of the generation is self-consumed (split into fixed vs
/// shiftable usage) and how much is exported.
///
/// Hour by hour:
/// 1. fixed self-consumption = min(fixed demand, generation)
/// 2. residual = generation − fixed self-consumption
/// 3. shiftable self-consumption = min(shiftable demand, residual)
/// 4. export = max(0, residual − shiftable demand)
///
/// The three annual sums add up to the total generation exactly.
pub fn compute_solar_offset(usage_profile: &UsageProfile) -> SolarAllocation {
    if usage_profile.solar_generation_kwh.total() == 0. {
        return SolarAllocation::default();
    }

    let solar = &usage_profile.solar_generation_kwh.timeseries;
    let fixed = usage_profile.electricity_kwh.total_fixed();
    let shiftable = usage_profile.electricity_kwh.total_shiftable();

    let mut allocation = SolarAllocation::default();
    for (generation, fixed_demand, shiftable_demand) in
        izip!(solar.values(), fixed.values(), shiftable.values())
    {
        let fixed_self_consumption = fixed_demand.min(*generation);
        let residual = generation - fixed_self_consumption;
        let shift_self_consumption = shiftable_demand.min(residual);
        allocation.fixed_self_consumption_kwh += fixed_self_consumption;
        allocation.shift_self_consumption_kwh += shift_self_consumption;
        allocation.export_kwh += (residual - shiftable_demand).max(0.);
    }
    allocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::HourlyProfile;
    use crate::core::usage::{ElectricityUsage, SolarGeneration};
    use approx::assert_relative_eq;
    use is_close::is_close;
    use rstest::*;

    fn profile_with(
        generation_kwh: f64,
        fixed_day_kwh: f64,
        shiftable_kwh: f64,
    ) -> UsageProfile {
        UsageProfile {
            electricity_kwh: ElectricityUsage {
                fixed_uncontrolled: HourlyProfile::flat()
                    .daytime()
                    .normalized_or_zero()
                    .scaled_by(fixed_day_kwh),
                shift_controllable: HourlyProfile::flat().scaled_by(shiftable_kwh),
                ..Default::default()
            },
            solar_generation_kwh: SolarGeneration {
                // generation concentrated in daytime hours, like real PV
                timeseries: HourlyProfile::flat()
                    .daytime()
                    .normalized_or_zero()
                    .scaled_by(generation_kwh),
            },
            ..Default::default()
        }
    }

    #[rstest]
    #[case(3000., 2000., 500.)]
    #[case(500., 4000., 1000.)]
    #[case(4000., 0., 0.)]
    fn should_conserve_generation_across_the_split(
        #[case] generation_kwh: f64,
        #[case] fixed_day_kwh: f64,
        #[case] shiftable_kwh: f64,
    ) {
        let allocation = compute_solar_offset(&profile_with(
            generation_kwh,
            fixed_day_kwh,
            shiftable_kwh,
        ));
        assert!(is_close!(
            allocation.fixed_self_consumption_kwh
                + allocation.shift_self_consumption_kwh
                + allocation.export_kwh,
            generation_kwh
        ));
    }

    #[rstest]
    fn should_return_zeros_for_zero_generation() {
        let allocation = compute_solar_offset(&profile_with(0., 2000., 500.));
        assert_eq!(allocation, SolarAllocation::default());
    }

    #[rstest]
    fn should_offset_fixed_demand_before_shiftable_demand() {
        // generation below fixed demand in every daytime hour: nothing left
        // over for the shiftable load
        let allocation = compute_solar_offset(&profile_with(1000., 2000., 500.));
        assert_relative_eq!(
            allocation.fixed_self_consumption_kwh,
            1000.,
            max_relative = 1e-9
        );
        assert_eq!(allocation.shift_self_consumption_kwh, 0.);
        assert_eq!(allocation.export_kwh, 0.);
    }

    #[rstest]
    fn should_export_what_no_demand_absorbs() {
        let allocation = compute_solar_offset(&profile_with(4000., 0., 0.));
        assert_relative_eq!(allocation.export_kwh, 4000., max_relative = 1e-9);
        assert_eq!(allocation.self_consumption_kwh(), 0.);
    }
}
