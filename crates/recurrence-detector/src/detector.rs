//! The detector cascade.
//!
//! Detectors run in a fixed order of specificity and the first match wins:
//!
//! 1. every year
//! 2. every month
//! 3. every week
//! 4. every day
//! 5. every weekday
//! 6. custom months (day-of-month cycle, then nth / last weekday)
//! 7. custom weeks
//! 8. custom days
//!
//! A contiguous pattern is also a degenerate custom pattern, so the fixed
//! shapes are tried first. Fewer than two distinct dates never match anything.

use chrono::NaiveDate;
use serde_json::Value;

use crate::calendar::WeekStartDay;
use crate::consecutive::{
    try_every_day, try_every_month, try_every_week, try_every_weekday, try_every_year,
};
use crate::custom::{try_custom_days, try_custom_months, try_custom_weeks};
use crate::date_set::DateSet;
use crate::error::DetectError;
use crate::rule::RecurrenceRule;

/// Options for [`classify_with_options`].
#[derive(Debug, Clone, Default)]
pub struct DetectOptions {
    /// Which day starts the calendar week when counting week gaps.
    pub week_start: WeekStartDay,
}

/// Classify dates with default options.
///
/// # Examples
///
/// ```
/// use recurrence_detector::{classify, NaiveDate, RecurrenceRule};
///
/// let dates: Vec<NaiveDate> = ["2001-01-27", "2001-01-30", "2001-02-02", "2001-02-05"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// assert_eq!(classify(&dates), RecurrenceRule::CustomDays { interval_days: 3 });
/// ```
pub fn classify(dates: &[NaiveDate]) -> RecurrenceRule {
    classify_with_options(dates, &DetectOptions::default())
}

/// Classify dates. Input order does not matter; duplicates are tolerated.
pub fn classify_with_options(dates: &[NaiveDate], options: &DetectOptions) -> RecurrenceRule {
    let set = DateSet::new(dates.iter().copied());
    let distinct = set.distinct_len();
    tracing::debug!(dates = set.len(), distinct, "classifying dates");

    if distinct < 2 {
        return RecurrenceRule::None;
    }

    let rule = try_every_year(&set)
        .or_else(|| try_every_month(&set))
        .or_else(|| try_every_week(&set))
        .or_else(|| try_every_day(&set))
        .or_else(|| try_every_weekday(&set))
        .or_else(|| try_custom_months(&set))
        .or_else(|| try_custom_weeks(&set, options.week_start))
        .or_else(|| try_custom_days(&set))
        .unwrap_or(RecurrenceRule::None);

    tracing::debug!(%rule, "classification finished");
    rule
}

/// Parse `YYYY-MM-DD` strings, then classify with default options.
///
/// # Errors
///
/// Returns [`DetectError::InvalidInput`] if any element is not a plain calendar
/// date. No detector runs in that case.
pub fn classify_strs<S: AsRef<str>>(dates: &[S]) -> Result<RecurrenceRule, DetectError> {
    Ok(DateSet::parse(dates)?.classify(&DetectOptions::default()))
}

/// Parse a JSON array of `YYYY-MM-DD` strings, then classify with default options.
///
/// # Errors
///
/// Returns [`DetectError::InvalidInput`] if `value` is not an array of date strings.
pub fn classify_json(value: &Value) -> Result<RecurrenceRule, DetectError> {
    Ok(DateSet::from_json(value)?.classify(&DetectOptions::default()))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{MonthlyPattern, Ordinal};
    use chrono::Weekday;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(classify(&[]), RecurrenceRule::None);
    }

    #[test]
    fn test_single_date_is_none() {
        assert_eq!(classify(&[d(2001, 1, 1)]), RecurrenceRule::None);
    }

    #[test]
    fn test_identical_dates_are_none() {
        assert_eq!(
            classify(&[d(2001, 1, 1), d(2001, 1, 1), d(2001, 1, 1)]),
            RecurrenceRule::None
        );
    }

    #[test]
    fn test_every_day_beats_custom_days() {
        let dates = [d(2001, 1, 1), d(2001, 1, 2), d(2001, 1, 3)];
        assert_eq!(classify(&dates), RecurrenceRule::EveryDay);
    }

    #[test]
    fn test_every_year_beats_custom_months() {
        // Yearly dates also form a day-of-month cycle 12 months apart
        let dates = [d(2001, 3, 5), d(2002, 3, 5), d(2003, 3, 5)];
        assert_eq!(classify(&dates), RecurrenceRule::EveryYear { month: 3 });
    }

    #[test]
    fn test_every_month_beats_custom_months() {
        let dates = [d(2001, 1, 10), d(2001, 2, 10), d(2001, 3, 10)];
        assert_eq!(classify(&dates), RecurrenceRule::EveryMonth { day_of_month: 10 });
    }

    #[test]
    fn test_every_week_beats_custom_weeks() {
        let dates = [d(2001, 1, 1), d(2001, 1, 8), d(2001, 1, 15)];
        assert_eq!(
            classify(&dates),
            RecurrenceRule::EveryWeek { weekday: Weekday::Mon }
        );
    }

    #[test]
    fn test_every_weekday_detected() {
        let dates = [
            d(2001, 2, 1),
            d(2001, 2, 2),
            d(2001, 1, 30),
            d(2001, 1, 31),
            d(2001, 2, 5),
            d(2001, 2, 6),
        ];
        assert_eq!(classify(&dates), RecurrenceRule::EveryWeekday);
    }

    #[test]
    fn test_custom_months_beats_custom_weeks() {
        // Last Tuesdays are also a weekday cycle, but not with a constant week step
        let dates = [d(2001, 1, 30), d(2001, 2, 27), d(2001, 3, 27), d(2001, 4, 24), d(2001, 5, 29)];
        assert_eq!(
            classify(&dates),
            RecurrenceRule::CustomMonths {
                interval_months: 1,
                pattern: MonthlyPattern::On {
                    ordinal: Ordinal::Last,
                    weekday: Weekday::Tue,
                },
            }
        );
    }

    #[test]
    fn test_duplicates_do_not_match_daily() {
        let dates = [d(2001, 1, 1), d(2001, 1, 2), d(2001, 1, 2), d(2001, 1, 3)];
        assert_eq!(classify(&dates), RecurrenceRule::None);
    }

    #[test]
    fn test_week_start_option_is_used() {
        let dates = [d(2001, 1, 7), d(2001, 1, 8), d(2001, 1, 21), d(2001, 1, 22)];
        let sunday = DetectOptions {
            week_start: WeekStartDay::Sunday,
        };
        assert_eq!(
            classify_with_options(&dates, &sunday),
            RecurrenceRule::CustomWeeks {
                interval_weeks: 2,
                weekdays: vec![Weekday::Sun, Weekday::Mon],
            }
        );
    }

    #[test]
    fn test_classify_strs() {
        let rule = classify_strs(&["2001-01-01", "2002-01-01", "2003-01-01"]).unwrap();
        assert_eq!(rule, RecurrenceRule::EveryYear { month: 1 });
    }

    #[test]
    fn test_classify_strs_rejects_timestamp() {
        let result = classify_strs(&["2001-01-01", "2001-01-02T12:00:00Z", "2001-01-03"]);
        assert!(matches!(result, Err(DetectError::InvalidInput(_))));
    }

    #[test]
    fn test_classify_json() {
        let rule = classify_json(&json!(["2001-01-03", "2001-01-01", "2001-01-02"])).unwrap();
        assert_eq!(rule, RecurrenceRule::EveryDay);
    }

    #[test]
    fn test_classify_json_rejects_non_array() {
        let result = classify_json(&json!("2001-01-01"));
        assert!(matches!(result, Err(DetectError::InvalidInput(_))));
    }
}
