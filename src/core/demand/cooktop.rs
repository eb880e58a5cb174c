use crate::core::profile::HourlyProfile;
use crate::core::units::HOURS_PER_DAY;

/// Cooktop electricity usage shape: constant usage over breakfast
/// (07:00–09:00) and twice that level over dinner (18:00–20:00), zero at all
/// other times, normalised to sum to 1.
pub fn cooktop_usage_profile() -> HourlyProfile {
    HourlyProfile::from_fn(|hour| match hour % HOURS_PER_DAY {
        7..=8 => 1.,
        18..=19 => 2.,
        _ => 0.,
    })
    .normalized_or_zero()
}
