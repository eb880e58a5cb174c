use crate::core::units::{DAYS_PER_YEAR, HOURS_IN_YEAR, HOURS_PER_DAY};
use crate::errors::CalcError;
use anyhow::bail;
use std::ops::{Add, Index};

/// This module contains the fixed-length hourly profile used throughout the
/// engine: one value per hour of a non-leap year, hour 0 being 00:00 on
/// 1 January. Profiles come in two flavours: normalised (sum == 1, a shape)
/// and scaled (sum == annual total in kWh).

/// First hour-of-day of the daytime tariff window. We use the same day/night
/// boundary as the Vector Electricity Pricing Methodology 2025.
pub const DAY_START_HOUR: usize = 7;
/// First hour-of-day after the daytime tariff window.
pub const DAY_END_HOUR: usize = 21;

/// Night hours that receive energy moved by `night_shift`. Intentionally a
/// narrower sub-window than the full night period, so that shifted load does
/// not overlap the sunrise and sunset shoulders.
const NIGHT_SHIFT_TARGET_HOURS: [usize; 5] = [23, 0, 1, 2, 3];

pub(crate) fn is_daytime_hour(hour_of_year: usize) -> bool {
    let hour_of_day = hour_of_year % HOURS_PER_DAY;
    (DAY_START_HOUR..DAY_END_HOUR).contains(&hour_of_day)
}

/// An ordered sequence of exactly 8760 non-negative values, one per hour of
/// the modelled year.
#[derive(Clone, Debug, PartialEq)]
pub struct HourlyProfile {
    values: Vec<f64>,
}

impl Default for HourlyProfile {
    fn default() -> Self {
        Self::zeros()
    }
}

impl HourlyProfile {
    pub fn zeros() -> Self {
        Self {
            values: vec![0.; HOURS_IN_YEAR],
        }
    }

    /// A flat shape: every hour carries 1/8760, so the total is 1.
    pub fn flat() -> Self {
        Self {
            values: vec![1. / HOURS_IN_YEAR as f64; HOURS_IN_YEAR],
        }
    }

    pub fn from_values(values: Vec<f64>) -> anyhow::Result<Self> {
        if values.len() != HOURS_IN_YEAR {
            bail!(
                "Expected a profile of length {HOURS_IN_YEAR}, got {} instead",
                values.len()
            );
        }
        Ok(Self { values })
    }

    pub fn from_fn(value_for_hour: impl Fn(usize) -> f64) -> Self {
        Self {
            values: (0..HOURS_IN_YEAR).map(value_for_hour).collect(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Multiply every hour by a constant factor.
    pub fn scaled_by(&self, factor: f64) -> Self {
        Self {
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Rescale so that the profile sums to 1.
    ///
    /// Fails with `DegenerateNormalization` when the total is zero; use
    /// `normalized_or_zero` where an all-zero result is an acceptable
    /// degenerate case.
    pub fn normalized(&self, what: &'static str) -> Result<Self, CalcError> {
        let total = self.total();
        if total == 0. {
            return Err(CalcError::DegenerateNormalization(what));
        }
        Ok(self.scaled_by(1. / total))
    }

    /// Rescale so that the profile sums to 1, leaving an all-zero profile
    /// unchanged.
    pub fn normalized_or_zero(&self) -> Self {
        let total = self.total();
        if total == 0. {
            self.clone()
        } else {
            self.scaled_by(1. / total)
        }
    }

    /// A copy with all nighttime hours zeroed out.
    pub fn daytime(&self) -> Self {
        Self::from_fn(|hour| if is_daytime_hour(hour) { self.values[hour] } else { 0. })
    }

    /// A copy with all daytime hours zeroed out.
    pub fn nighttime(&self) -> Self {
        Self::from_fn(|hour| if is_daytime_hour(hour) { 0. } else { self.values[hour] })
    }

    pub fn daytime_total(&self) -> f64 {
        self.values
            .iter()
            .enumerate()
            .filter(|(hour, _)| is_daytime_hour(*hour))
            .map(|(_, v)| v)
            .sum()
    }

    pub fn nighttime_total(&self) -> f64 {
        self.total() - self.daytime_total()
    }

    /// Move each day's daytime energy into that day's night sub-window.
    ///
    /// For each of the 365 days, the values across hours 07:00–21:00 are
    /// summed, zeroed, and added evenly across hours 23, 0, 1, 2 and 3 of the
    /// same day. Total energy is conserved exactly.
    pub fn night_shift(&self) -> Self {
        let mut shifted = self.values.clone();
        for day in 0..DAYS_PER_YEAR {
            let day_start = day * HOURS_PER_DAY;
            let day_sum: f64 = (DAY_START_HOUR..DAY_END_HOUR)
                .map(|hour| shifted[day_start + hour])
                .sum();
            for hour in DAY_START_HOUR..DAY_END_HOUR {
                shifted[day_start + hour] = 0.;
            }
            let share = day_sum / NIGHT_SHIFT_TARGET_HOURS.len() as f64;
            for hour in NIGHT_SHIFT_TARGET_HOURS {
                shifted[day_start + hour] += share;
            }
        }
        Self { values: shifted }
    }
}

impl Add<&HourlyProfile> for &HourlyProfile {
    type Output = HourlyProfile;

    fn add(self, rhs: &HourlyProfile) -> Self::Output {
        HourlyProfile {
            values: self
                .values
                .iter()
                .zip(rhs.values.iter())
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl Index<usize> for HourlyProfile {
    type Output = f64;

    fn index(&self, hour: usize) -> &Self::Output {
        &self.values[hour]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn should_reject_wrong_length() {
        assert!(HourlyProfile::from_values(vec![1.; 24]).is_err());
        assert!(HourlyProfile::from_values(vec![0.; HOURS_IN_YEAR]).is_ok());
    }

    #[rstest]
    fn should_build_flat_shape_summing_to_one() {
        assert_relative_eq!(HourlyProfile::flat().total(), 1., max_relative = 1e-9);
    }

    #[rstest]
    fn should_fail_normalising_all_zero_profile() {
        assert!(matches!(
            HourlyProfile::zeros().normalized("test shape"),
            Err(CalcError::DegenerateNormalization(_))
        ));
        assert_eq!(
            HourlyProfile::zeros().normalized_or_zero(),
            HourlyProfile::zeros()
        );
    }

    #[rstest]
    fn should_conserve_energy_in_night_shift() {
        let profile = HourlyProfile::from_fn(|hour| (hour % 17) as f64 * 0.25);
        let shifted = profile.night_shift();
        assert_relative_eq!(shifted.total(), profile.total(), max_relative = 1e-9);
        assert_eq!(shifted.daytime_total(), 0.);
    }

    #[rstest]
    fn should_move_day_energy_to_same_day_night_window() {
        // all energy at noon on day 3
        let profile = HourlyProfile::from_fn(|hour| if hour == 3 * 24 + 12 { 10. } else { 0. });
        let shifted = profile.night_shift();
        for hour in [23, 0, 1, 2, 3] {
            assert_relative_eq!(shifted[3 * 24 + hour], 2., max_relative = 1e-9);
        }
    }

    #[rstest]
    fn should_split_day_and_night_into_disjoint_supports() {
        let profile = HourlyProfile::flat();
        let day = profile.daytime();
        let night = profile.nighttime();
        assert_relative_eq!(
            day.total() + night.total(),
            profile.total(),
            max_relative = 1e-9
        );
        for hour in 0..HOURS_IN_YEAR {
            assert!(day[hour] == 0. || night[hour] == 0.);
        }
        // 14 of 24 hours are daytime
        assert_relative_eq!(day.total(), 14. / 24., max_relative = 1e-9);
    }
}
