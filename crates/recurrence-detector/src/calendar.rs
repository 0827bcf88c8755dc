//! Calendar arithmetic used by the detectors.
//!
//! Everything here is a thin layer over `chrono`: exact month shifting (no
//! day-of-month clamping), calendar-week numbering with a configurable week
//! start, month boundaries, and the nth / last weekday of a month.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

/// Weekdays in table order, Sunday first (0 = Sunday .. 6 = Saturday).
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a calendar week when counting week gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

/// Index of the calendar week containing `date`.
///
/// Consecutive weeks have consecutive indices. With a Monday week start this
/// matches `floor(julian_day / 7)` up to a constant. Computed on day numbers,
/// so weeks that begin before `NaiveDate::MIN` still get an index.
pub fn week_index(date: NaiveDate, week_start: WeekStartDay) -> i64 {
    let week_start_day =
        i64::from(date.num_days_from_ce()) - days_from_week_start(date.weekday(), week_start);
    week_start_day.div_euclid(7)
}

// ── Month arithmetic ────────────────────────────────────────────────────────

/// Running month number (`year * 12 + month0`), so that December → January is 1.
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Move `date` by `months` calendar months, keeping the day-of-month.
///
/// Returns `None` when that day does not exist in the target month
/// (e.g. January 31 + 1 month). No clamping.
pub fn shift_months_exact(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let target = month_index(date) + months;
    NaiveDate::from_ymd_opt(
        target.div_euclid(12),
        target.rem_euclid(12) as u32 + 1,
        date.day(),
    )
}

/// First day of the given month.
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last day of the given month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month == 12 {
        return NaiveDate::from_ymd_opt(year, 12, 31);
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()
}

// ── Weekday-of-month lookup ─────────────────────────────────────────────────

/// The `n`th (1-based) `weekday` of the month, or `None` if the month has fewer.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }
    let first = first_day_of_month(year, month)?;
    let diff = (7 + weekday.num_days_from_sunday() - first.weekday().num_days_from_sunday()) % 7;
    // Past NaiveDate::MAX, or into the next month, means the occurrence does not exist
    let target = first.checked_add_days(Days::new(u64::from(diff) + 7 * u64::from(n - 1)))?;
    (target.month() == month).then_some(target)
}

/// The last `weekday` of the month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    let diff = (7 + last.weekday().num_days_from_sunday() - weekday.num_days_from_sunday()) % 7;
    last.checked_sub_days(Days::new(u64::from(diff)))
}

// ── Names ───────────────────────────────────────────────────────────────────

/// Lowercase English weekday name ("monday").
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Lowercase English month name for a 1-based month number, `None` outside 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let name = match month {
        1 => "january",
        2 => "february",
        3 => "march",
        4 => "april",
        5 => "may",
        6 => "june",
        7 => "july",
        8 => "august",
        9 => "september",
        10 => "october",
        11 => "november",
        12 => "december",
        _ => return None,
    };
    Some(name)
}

/// Two-letter RFC 5545 weekday code ("MO").
pub fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_shift_months_keeps_day() {
        assert_eq!(shift_months_exact(d(2001, 1, 10), 1), Some(d(2001, 2, 10)));
        assert_eq!(shift_months_exact(d(2001, 1, 1), 12), Some(d(2002, 1, 1)));
    }

    #[test]
    fn test_shift_months_across_year_end() {
        assert_eq!(shift_months_exact(d(2000, 12, 10), 1), Some(d(2001, 1, 10)));
        assert_eq!(shift_months_exact(d(2001, 1, 10), -1), Some(d(2000, 12, 10)));
    }

    #[test]
    fn test_shift_months_does_not_clamp() {
        assert_eq!(shift_months_exact(d(2001, 1, 31), 1), None);
        assert_eq!(shift_months_exact(d(2004, 2, 29), 12), None);
        assert_eq!(shift_months_exact(d(2001, 3, 31), 1), None);
    }

    #[test]
    fn test_month_index_december_to_january_is_one() {
        assert_eq!(month_index(d(2001, 1, 5)) - month_index(d(2000, 12, 20)), 1);
        assert_eq!(month_index(d(2002, 1, 5)) - month_index(d(2001, 11, 5)), 2);
    }

    #[test]
    fn test_week_index_monday_start() {
        // Sun Jan 28 2001 and Mon Jan 29 2001 straddle a Monday-based boundary
        let sunday = week_index(d(2001, 1, 28), WeekStartDay::Monday);
        let monday = week_index(d(2001, 1, 29), WeekStartDay::Monday);
        let friday = week_index(d(2001, 2, 2), WeekStartDay::Monday);
        assert_eq!(monday - sunday, 1);
        assert_eq!(friday, monday);
    }

    #[test]
    fn test_week_index_sunday_start() {
        let saturday = week_index(d(2001, 1, 27), WeekStartDay::Sunday);
        let sunday = week_index(d(2001, 1, 28), WeekStartDay::Sunday);
        let monday = week_index(d(2001, 1, 29), WeekStartDay::Sunday);
        assert_eq!(sunday - saturday, 1);
        assert_eq!(monday, sunday);
    }

    #[test]
    fn test_week_index_two_weeks_apart() {
        let a = week_index(d(2001, 1, 29), WeekStartDay::Monday);
        let b = week_index(d(2001, 2, 12), WeekStartDay::Monday);
        assert_eq!(b - a, 2);
    }

    #[test]
    fn test_week_index_at_min_date() {
        // NaiveDate::MIN is mid-week, so its week starts before the supported range
        let min = NaiveDate::MIN;
        for week_start in [WeekStartDay::Monday, WeekStartDay::Sunday] {
            let a = week_index(min, week_start);
            let b = week_index(min + Days::new(7), week_start);
            let c = week_index(min + Days::new(21), week_start);
            assert_eq!(b - a, 1);
            assert_eq!(c - a, 3);
        }
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2001, 2), Some(d(2001, 2, 28)));
        assert_eq!(last_day_of_month(2004, 2), Some(d(2004, 2, 29)));
        assert_eq!(last_day_of_month(2001, 12), Some(d(2001, 12, 31)));
        assert_eq!(last_day_of_month(2001, 13), None);
    }

    #[test]
    fn test_nth_weekday_of_month() {
        // January 2001 starts on a Monday
        assert_eq!(nth_weekday_of_month(2001, 1, Weekday::Mon, 1), Some(d(2001, 1, 1)));
        assert_eq!(nth_weekday_of_month(2001, 1, Weekday::Tue, 2), Some(d(2001, 1, 9)));
        assert_eq!(nth_weekday_of_month(2001, 1, Weekday::Tue, 5), Some(d(2001, 1, 30)));
        assert_eq!(nth_weekday_of_month(2001, 1, Weekday::Sun, 1), Some(d(2001, 1, 7)));
    }

    #[test]
    fn test_nth_weekday_of_month_overflow_is_none() {
        // February 2001 has only four Tuesdays
        assert_eq!(nth_weekday_of_month(2001, 2, Weekday::Tue, 5), None);
        assert_eq!(nth_weekday_of_month(2001, 2, Weekday::Tue, 0), None);
    }

    #[test]
    fn test_weekday_of_month_in_max_year_does_not_overflow() {
        let year = NaiveDate::MAX.year();
        for weekday in WEEKDAYS {
            for n in 1..=5 {
                if let Some(date) = nth_weekday_of_month(year, 12, weekday, n) {
                    assert_eq!(date.month(), 12);
                }
            }
            let last = last_weekday_of_month(year, 12, weekday).unwrap();
            assert_eq!(last.weekday(), weekday);
        }
        assert_eq!(last_day_of_month(year, 12), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_last_weekday_of_month() {
        assert_eq!(last_weekday_of_month(2001, 1, Weekday::Tue), Some(d(2001, 1, 30)));
        assert_eq!(last_weekday_of_month(2001, 2, Weekday::Tue), Some(d(2001, 2, 27)));
        assert_eq!(last_weekday_of_month(2001, 4, Weekday::Tue), Some(d(2001, 4, 24)));
        // Last day itself is the weekday
        assert_eq!(last_weekday_of_month(2001, 3, Weekday::Sat), Some(d(2001, 3, 31)));
    }

    #[test]
    fn test_month_name_rejects_out_of_range() {
        assert_eq!(month_name(1), Some("january"));
        assert_eq!(month_name(12), Some("december"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_weekday_table_order() {
        for (i, wd) in WEEKDAYS.iter().enumerate() {
            assert_eq!(wd.num_days_from_sunday() as usize, i);
        }
    }
}
