//! Open/closed evaluation of the store schedule.

use chrono::{Datelike, Timelike};

use crate::catalog::StoreSchedule;
use crate::types::{StoreStatus, WallClockTime};

/// Whether the store is open on `weekday` (0 = Sunday) at `now`.
///
/// Open iff every schedule field is present, `weekday` is an operating day,
/// and `opening_time <= now <= closing_time`. Both bounds are inclusive.
/// A closing time earlier than the opening time never matches, so schedules
/// that run past midnight report closed.
#[must_use]
pub fn evaluate(schedule: &StoreSchedule, weekday: u8, now: &WallClockTime) -> StoreStatus {
    let (Some(opening), Some(closing), Some(days)) = (
        &schedule.opening_time,
        &schedule.closing_time,
        &schedule.operating_days,
    ) else {
        return StoreStatus::Closed;
    };

    if days.contains(&weekday) && opening <= now && now <= closing {
        StoreStatus::Open
    } else {
        StoreStatus::Closed
    }
}

/// [`evaluate`] at a clock reading, in whatever time zone `moment` carries.
#[must_use]
pub fn evaluate_at<T: Datelike + Timelike>(schedule: &StoreSchedule, moment: &T) -> StoreStatus {
    // num_days_from_sunday is 0..=6, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation)]
    let weekday = moment.weekday().num_days_from_sunday() as u8;
    evaluate(schedule, weekday, &WallClockTime::of(moment))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;

    fn time(s: &str) -> WallClockTime {
        WallClockTime::parse(s).unwrap()
    }

    fn schedule() -> StoreSchedule {
        StoreSchedule {
            opening_time: Some(time("18:00")),
            closing_time: Some(time("23:00")),
            operating_days: Some(BTreeSet::from([0, 2, 3, 4, 5, 6])),
        }
    }

    #[test]
    fn test_open_on_operating_day_within_hours() {
        assert_eq!(evaluate(&schedule(), 2, &time("19:00")), StoreStatus::Open);
    }

    #[test]
    fn test_closed_on_non_operating_day() {
        assert_eq!(evaluate(&schedule(), 1, &time("19:00")), StoreStatus::Closed);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(evaluate(&schedule(), 2, &time("17:59")), StoreStatus::Closed);
        assert_eq!(evaluate(&schedule(), 2, &time("18:00")), StoreStatus::Open);
        assert_eq!(evaluate(&schedule(), 2, &time("23:00")), StoreStatus::Open);
        assert_eq!(evaluate(&schedule(), 2, &time("23:01")), StoreStatus::Closed);
    }

    #[test]
    fn test_any_missing_field_is_closed() {
        let mut no_opening = schedule();
        no_opening.opening_time = None;
        assert_eq!(evaluate(&no_opening, 2, &time("19:00")), StoreStatus::Closed);

        let mut no_closing = schedule();
        no_closing.closing_time = None;
        assert_eq!(evaluate(&no_closing, 2, &time("19:00")), StoreStatus::Closed);

        let mut no_days = schedule();
        no_days.operating_days = None;
        assert_eq!(evaluate(&no_days, 2, &time("19:00")), StoreStatus::Closed);
    }

    #[test]
    fn test_schedule_past_midnight_reports_closed() {
        let overnight = StoreSchedule {
            opening_time: Some(time("22:00")),
            closing_time: Some(time("02:00")),
            operating_days: Some((0..=6).collect()),
        };
        assert_eq!(evaluate(&overnight, 3, &time("23:30")), StoreStatus::Closed);
        assert_eq!(evaluate(&overnight, 3, &time("01:00")), StoreStatus::Closed);
    }

    #[test]
    fn test_evaluate_at_uses_sunday_based_weekday() {
        // 2024-06-04 was a Tuesday, 2024-06-03 a Monday.
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();

        assert_eq!(evaluate_at(&schedule(), &tuesday), StoreStatus::Open);
        assert_eq!(evaluate_at(&schedule(), &monday), StoreStatus::Closed);
    }
}
