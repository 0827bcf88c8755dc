//! Custom-interval detectors.
//!
//! Unlike the consecutive detectors these look for a repeating *cycle*
//! (Monday/Wednesday/Friday, the 10th and 12th) with a constant macro-step
//! between repetitions, measured in days, calendar weeks or calendar months.

use chrono::{Datelike, Weekday};

use crate::calendar::{month_index, week_index, WeekStartDay, WEEKDAYS};
use crate::date_set::DateSet;
use crate::occurrences::MonthOccurrenceTable;
use crate::rule::{MonthlyPattern, Ordinal, RecurrenceRule};

// ── Cycle extraction ────────────────────────────────────────────────────────

/// Find the repeating cycle at the start of `keys`.
///
/// The cycle length is the index of the first repeat of `keys[0]`. The sequence
/// is cut into chunks of that length, an incomplete trailing chunk is ignored,
/// and at least two chunks must exist and all be identical.
pub fn find_cycle<T: PartialEq>(keys: &[T]) -> Option<&[T]> {
    let first = keys.first()?;
    let len = keys.iter().skip(1).position(|k| k == first)? + 1;
    let chunks: Vec<&[T]> = keys.chunks_exact(len).collect();
    if chunks.len() < 2 {
        return None;
    }
    let cycle = chunks[0];
    chunks.iter().all(|chunk| *chunk == cycle).then_some(cycle)
}

/// The common step of `gaps` once zero gaps are dropped. `None` if no non-zero
/// gap remains or they differ.
fn uniform_nonzero_step(gaps: impl IntoIterator<Item = i64>) -> Option<u32> {
    let mut gaps = gaps.into_iter().filter(|gap| *gap != 0);
    let step = gaps.next()?;
    if !gaps.all(|gap| gap == step) {
        return None;
    }
    u32::try_from(step).ok()
}

// ── CustomDays ──────────────────────────────────────────────────────────────

/// Every adjacent day gap is the same positive number of days.
pub fn try_custom_days(dates: &DateSet) -> Option<RecurrenceRule> {
    let mut gaps = dates.pairs().map(|(prev, date)| (date - prev).num_days());
    let step = gaps.next()?;
    if step <= 0 || !gaps.all(|gap| gap == step) {
        return None;
    }
    Some(RecurrenceRule::CustomDays {
        interval_days: u32::try_from(step).ok()?,
    })
}

// ── CustomWeeks ─────────────────────────────────────────────────────────────

/// A repeating cycle of weekdays, repeated every N calendar weeks.
pub fn try_custom_weeks(dates: &DateSet, week_start: WeekStartDay) -> Option<RecurrenceRule> {
    let weekdays: Vec<Weekday> = dates.as_slice().iter().map(|date| date.weekday()).collect();
    let cycle = find_cycle(&weekdays)?;

    let interval_weeks = uniform_nonzero_step(
        dates
            .pairs()
            .map(|(prev, date)| week_index(date, week_start) - week_index(prev, week_start)),
    );
    let Some(interval_weeks) = interval_weeks else {
        tracing::trace!(cycle_len = cycle.len(), "weekday cycle without a constant week step");
        return None;
    };

    let mut distinct: Vec<Weekday> = Vec::with_capacity(cycle.len());
    for weekday in cycle {
        if !distinct.contains(weekday) {
            distinct.push(*weekday);
        }
    }

    Some(RecurrenceRule::CustomWeeks {
        interval_weeks,
        weekdays: distinct,
    })
}

// ── CustomMonths ────────────────────────────────────────────────────────────

/// Either a repeating cycle of days-of-month, or the nth / last weekday of
/// every month. The day cycle is tried first.
pub fn try_custom_months(dates: &DateSet) -> Option<RecurrenceRule> {
    try_day_of_month_cycle(dates).or_else(|| try_ordinal_weekday(dates))
}

/// A repeating cycle of days-of-month, repeated every N calendar months.
fn try_day_of_month_cycle(dates: &DateSet) -> Option<RecurrenceRule> {
    let days: Vec<u32> = dates.as_slice().iter().map(|date| date.day()).collect();
    let cycle = find_cycle(&days)?;

    let interval_months = uniform_nonzero_step(
        dates
            .pairs()
            .map(|(prev, date)| i64::from(month_index(date) - month_index(prev))),
    );
    let Some(interval_months) = interval_months else {
        tracing::trace!(cycle = ?cycle, "day-of-month cycle without a constant month step");
        return None;
    };

    Some(RecurrenceRule::CustomMonths {
        interval_months,
        pattern: MonthlyPattern::Days(cycle.to_vec()),
    })
}

/// The distinct input dates are exactly the nth (or last) `weekday` of every
/// month between the first and last date.
fn try_ordinal_weekday(dates: &DateSet) -> Option<RecurrenceRule> {
    let (first, last) = (dates.first()?, dates.last()?);
    let wanted = dates.distinct();

    // Any twelve consecutive months hold at least four occurrences of every
    // ordinal weekday, so a matching run cannot span more months than this.
    let spanned_months = i64::from(month_index(last) - month_index(first)) + 1;
    let max_months = 3 * wanted.len() as i64 + 14;
    if spanned_months > max_months {
        tracing::trace!(spanned_months, max_months, "date span too wide for an ordinal weekday");
        return None;
    }

    let table = MonthOccurrenceTable::build(dates.years()?);

    // Last is checked first: in months with exactly n occurrences the nth and
    // last sets coincide, and Last is reported.
    let (ordinal, weekday) = Ordinal::ALL.iter().rev().find_map(|ordinal| {
        WEEKDAYS.iter().find_map(|weekday| {
            (table.occurrences_between(*ordinal, *weekday, first, last) == wanted)
                .then_some((*ordinal, *weekday))
        })
    })?;

    Some(RecurrenceRule::CustomMonths {
        interval_months: 1,
        pattern: MonthlyPattern::On { ordinal, weekday },
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
