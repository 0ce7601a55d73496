//! Shift lifecycle and week arithmetic.
//!
//! Shifts live in exactly two states: `Draft` (manager-only, freely
//! editable) and `Published` (employee-visible, replaced wholesale by the
//! next publish of the same week + area).

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    Draft,
    Published,
}

/// The Monday of the week containing `date`. `week_start` fields are always
/// Mondays.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(days_from_monday))
        .unwrap_or(date)
}

/// The Monday one week before `week_start`.
pub fn previous_week(week_start: NaiveDate) -> NaiveDate {
    week_start
        .checked_sub_days(Days::new(7))
        .unwrap_or(week_start)
}

/// `date` shifted forward by exactly one week, used when cloning a week's
/// shifts into the next week.
pub fn plus_week(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(7)).unwrap_or(date)
}

/// Ordering key for schedule listings and notification summaries:
/// date first, then start time.
pub fn schedule_order_key(date: NaiveDate, start: NaiveTime) -> (NaiveDate, NaiveTime) {
    (date, start)
}

/// Whether `week_start` actually is a Monday.
pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn week_start_is_monday_of_week() {
        // 2024-01-01 is a Monday.
        assert_eq!(week_start_of(d("2024-01-01")), d("2024-01-01"));
        assert_eq!(week_start_of(d("2024-01-03")), d("2024-01-01"));
        assert_eq!(week_start_of(d("2024-01-07")), d("2024-01-01"));
    }

    #[test]
    fn previous_and_plus_week_are_seven_days() {
        assert_eq!(previous_week(d("2024-01-08")), d("2024-01-01"));
        assert_eq!(plus_week(d("2024-01-01")), d("2024-01-08"));
    }

    #[test]
    fn monday_check() {
        assert!(is_week_start(d("2024-01-01")));
        assert!(!is_week_start(d("2024-01-02")));
    }

    #[test]
    fn schedule_order_sorts_by_date_then_start() {
        let t = |s: &str| s.parse::<NaiveTime>().unwrap();
        let mut keys = vec![
            schedule_order_key(d("2024-01-02"), t("09:00:00")),
            schedule_order_key(d("2024-01-01"), t("18:00:00")),
            schedule_order_key(d("2024-01-01"), t("10:00:00")),
        ];
        keys.sort();
        assert_eq!(keys[0].0, d("2024-01-01"));
        assert_eq!(keys[0].1, t("10:00:00"));
        assert_eq!(keys[2].0, d("2024-01-02"));
    }

    #[test]
    fn status_wire_form_is_screaming() {
        assert_eq!(
            serde_json::to_value(ShiftStatus::Published).unwrap(),
            "PUBLISHED"
        );
        assert_eq!(serde_json::to_value(ShiftStatus::Draft).unwrap(), "DRAFT");
    }
}
