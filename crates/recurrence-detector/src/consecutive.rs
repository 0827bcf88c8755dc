//! Consecutive detectors: every adjacent pair must satisfy one fixed offset.
//!
//! A single failing pair anywhere rejects the whole sequence.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::calendar::shift_months_exact;
use crate::date_set::DateSet;
use crate::rule::RecurrenceRule;

/// True when the set has at least one pair and every `(prev, date)` pair passes.
fn every_pair(dates: &DateSet, condition: impl Fn(NaiveDate, NaiveDate) -> bool) -> bool {
    dates.len() >= 2 && dates.pairs().all(|(prev, date)| condition(prev, date))
}

/// Same day and month, one year apart.
pub fn try_every_year(dates: &DateSet) -> Option<RecurrenceRule> {
    let first = dates.first()?;
    every_pair(dates, |prev, date| shift_months_exact(prev, 12) == Some(date)).then(|| {
        RecurrenceRule::EveryYear {
            month: first.month(),
        }
    })
}

/// Same day-of-month, one month apart.
pub fn try_every_month(dates: &DateSet) -> Option<RecurrenceRule> {
    let first = dates.first()?;
    every_pair(dates, |prev, date| shift_months_exact(prev, 1) == Some(date)).then(|| {
        RecurrenceRule::EveryMonth {
            day_of_month: first.day(),
        }
    })
}

/// Exactly seven days apart.
pub fn try_every_week(dates: &DateSet) -> Option<RecurrenceRule> {
    let first = dates.first()?;
    every_pair(dates, |prev, date| (date - prev).num_days() == 7).then(|| {
        RecurrenceRule::EveryWeek {
            weekday: first.weekday(),
        }
    })
}

/// Exactly one day apart.
pub fn try_every_day(dates: &DateSet) -> Option<RecurrenceRule> {
    every_pair(dates, |prev, date| date.pred_opt() == Some(prev)).then_some(RecurrenceRule::EveryDay)
}

/// Consecutive business days: Friday is followed by Monday.
///
/// Only weekdays are compared, not the day gap.
pub fn try_every_weekday(dates: &DateSet) -> Option<RecurrenceRule> {
    every_pair(dates, |prev, date| {
        let weekday = date.weekday();
        let expected = match weekday {
            Weekday::Sat | Weekday::Sun => return false,
            Weekday::Mon => Weekday::Fri,
            other => other.pred(),
        };
        prev.weekday() == expected
    })
    .then_some(RecurrenceRule::EveryWeekday)
}

// ── Tests ───────────────────────────────────────────────────────────────────
