use crate::core::units::DAYS_PER_YEAR;
use crate::input::FullDayHeatingFrequency;
use chrono::{Datelike, NaiveDate, Weekday};

/// Calendar and time-window scheduling for the modelled year.
///
/// The model year is fixed to 2019, a non-leap year in which 1 January falls
/// on a Tuesday. The alignment between day number and day type matters to
/// weekday/weekend demand patterns and to ISO-week heating schedules.

pub(crate) const MODEL_YEAR: i32 = 2019;

/// Space heating always runs in these windows (hour-of-day, half-open).
pub(crate) const BASELINE_HEATING_WINDOWS: [(usize, usize); 2] = [(7, 9), (17, 21)];
/// On full-day heating days the single window replaces the baseline pair.
pub(crate) const FULL_DAY_HEATING_WINDOW: (usize, usize) = (7, 21);

/// Hot water heating windows: the solar window is filled first, the night
/// window (which crosses midnight into the next day) takes the remainder.
pub(crate) const HOT_WATER_SOLAR_WINDOW: (usize, usize) = (9, 18);
pub(crate) const HOT_WATER_NIGHT_WINDOW: (usize, usize) = (21, 33);

/// EV charging night window, 21:00 to 09:00 the next day.
pub(crate) const EV_NIGHT_WINDOW: (usize, usize) = (21, 33);

pub(crate) fn model_year_date(day_of_year: usize) -> NaiveDate {
    NaiveDate::from_yo_opt(MODEL_YEAR, day_of_year as u32 + 1)
        .expect("day index lies within the model year")
}

pub(crate) fn weekday_of(day_of_year: usize) -> Weekday {
    model_year_date(day_of_year).weekday()
}

/// EV charging daytime window for the given weekday, if any. Charging at home
/// during the day is only assumed on some days of the week.
pub(crate) fn ev_solar_window(weekday: Weekday) -> Option<(usize, usize)> {
    match weekday {
        Weekday::Tue | Weekday::Thu => Some((13, 16)),
        Weekday::Sat => Some((13, 17)),
        _ => None,
    }
}

/// Mark which days of the model year are heated all day (07:00–21:00) rather
/// than just in the baseline windows.
///
/// Days are grouped by ISO week; within each week the first `n` days in date
/// order are full-day days, where `n` comes from the answer option and
/// alternates between the low and high end of its range on odd and even week
/// numbers.
pub(crate) fn full_day_heating_days(frequency: FullDayHeatingFrequency) -> Vec<bool> {
    let mut full_day = vec![false; DAYS_PER_YEAR];
    let mut current_week: Option<(i32, u32)> = None;
    let mut position_in_week = 0usize;
    for (day, flag) in full_day.iter_mut().enumerate() {
        let iso_week = model_year_date(day).iso_week();
        let week_key = (iso_week.year(), iso_week.week());
        if current_week != Some(week_key) {
            current_week = Some(week_key);
            position_in_week = 0;
        }
        *flag = position_in_week < frequency.days_for_week(iso_week.week());
        position_in_week += 1;
    }
    full_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn should_start_model_year_on_a_tuesday() {
        assert_eq!(weekday_of(0), Weekday::Tue);
        assert_eq!(weekday_of(5), Weekday::Sun);
    }

    #[rstest]
    fn should_have_no_full_days_when_never_heating_during_day() {
        assert!(full_day_heating_days(FullDayHeatingFrequency::Never)
            .iter()
            .all(|day| !day));
    }

    #[rstest]
    #[case(FullDayHeatingFrequency::OneToTwoDays, 1, 2)]
    #[case(FullDayHeatingFrequency::ThreeToFourDays, 3, 4)]
    #[case(FullDayHeatingFrequency::FiveToSevenDays, 5, 7)]
    fn should_alternate_day_counts_by_week_parity(
        #[case] frequency: FullDayHeatingFrequency,
        #[case] odd_days: usize,
        #[case] even_days: usize,
    ) {
        let full_day = full_day_heating_days(frequency);
        // 2019-01-07 (day 6) starts ISO week 2, a full Monday-to-Sunday week
        let week_two: usize = (6..13).filter(|&day| full_day[day]).count();
        let week_three: usize = (13..20).filter(|&day| full_day[day]).count();
        assert_eq!(week_two, even_days);
        assert_eq!(week_three, odd_days);
    }

    #[rstest]
    fn should_mark_earliest_days_of_each_week_as_full_day() {
        let full_day = full_day_heating_days(FullDayHeatingFrequency::OneToTwoDays);
        // week 3 of 2019 starts Monday 14 January (day 13) and is odd: one day
        assert!(full_day[13]);
        assert!(!full_day[14]);
    }

    #[rstest]
    fn should_schedule_ev_solar_windows_on_tue_thu_sat_only() {
        assert_eq!(ev_solar_window(Weekday::Tue), Some((13, 16)));
        assert_eq!(ev_solar_window(Weekday::Sat), Some((13, 17)));
        assert_eq!(ev_solar_window(Weekday::Mon), None);
        assert_eq!(ev_solar_window(Weekday::Sun), None);
    }
}
