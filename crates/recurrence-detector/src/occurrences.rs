//! Month-occurrence table: every "nth / last weekday of the month" date for a
//! span of years.
//!
//! The table is indexed year → ordinal → weekday and holds one date per month
//! in which that occurrence exists. A fifth Tuesday, for instance, only exists
//! in months with five Tuesdays.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use chrono::{NaiveDate, Weekday};

use crate::calendar::{last_weekday_of_month, nth_weekday_of_month, WEEKDAYS};
use crate::rule::Ordinal;

/// Occurrence of `ordinal` `weekday` in the given month, if the month has one.
pub fn occurrence_in_month(
    ordinal: Ordinal,
    weekday: Weekday,
    year: i32,
    month: u32,
) -> Option<NaiveDate> {
    match ordinal {
        Ordinal::Last => last_weekday_of_month(year, month, weekday),
        nth => nth_weekday_of_month(year, month, weekday, nth.position() as u32),
    }
}

/// One year of the table: `[ordinal][weekday from Sunday]` → dates in month order.
#[derive(Debug, Clone, Default)]
struct YearOccurrences {
    by_ordinal: [[Vec<NaiveDate>; 7]; 6],
}

impl YearOccurrences {
    fn build(year: i32) -> Self {
        let mut table = Self::default();
        for (oi, ordinal) in Ordinal::ALL.iter().enumerate() {
            for (wi, weekday) in WEEKDAYS.iter().enumerate() {
                table.by_ordinal[oi][wi] = (1..=12)
                    .filter_map(|month| occurrence_in_month(*ordinal, *weekday, year, month))
                    .collect();
            }
        }
        table
    }
}

/// Lookup table of weekday-of-month occurrences over a span of years.
#[derive(Debug, Clone, Default)]
pub struct MonthOccurrenceTable {
    years: BTreeMap<i32, YearOccurrences>,
}

impl MonthOccurrenceTable {
    /// Build the table for every year in `years`.
    ///
    /// # Examples
    ///
    /// ```
    /// use recurrence_detector::{MonthOccurrenceTable, Ordinal, Weekday};
    ///
    /// let table = MonthOccurrenceTable::build(2001..=2001);
    /// let last_tuesdays = table.get(2001, Ordinal::Last, Weekday::Tue);
    /// assert_eq!(last_tuesdays.len(), 12);
    /// assert_eq!(last_tuesdays[0].to_string(), "2001-01-30");
    /// ```
    pub fn build(years: RangeInclusive<i32>) -> Self {
        let years = years.map(|year| (year, YearOccurrences::build(year))).collect();
        Self { years }
    }

    /// Occurrences in one year, in month order. Empty if the year is not in the table.
    pub fn get(&self, year: i32, ordinal: Ordinal, weekday: Weekday) -> &[NaiveDate] {
        self.years
            .get(&year)
            .map(|y| y.by_ordinal[ordinal_index(ordinal)][weekday.num_days_from_sunday() as usize].as_slice())
            .unwrap_or(&[])
    }

    /// All occurrences across the table, ascending.
    pub fn occurrences(
        &self,
        ordinal: Ordinal,
        weekday: Weekday,
    ) -> impl Iterator<Item = NaiveDate> + '_ {
        self.years
            .keys()
            .flat_map(move |year| self.get(*year, ordinal, weekday).iter().copied())
    }

    /// Occurrences falling within `[from, to]`.
    pub fn occurrences_between(
        &self,
        ordinal: Ordinal,
        weekday: Weekday,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BTreeSet<NaiveDate> {
        self.occurrences(ordinal, weekday)
            .filter(|date| (from..=to).contains(date))
            .collect()
    }

    /// Number of years the table covers.
    pub fn year_count(&self) -> usize {
        self.years.len()
    }
}

fn ordinal_index(ordinal: Ordinal) -> usize {
    match ordinal {
        Ordinal::First => 0,
        Ordinal::Second => 1,
        Ordinal::Third => 2,
        Ordinal::Fourth => 3,
        Ordinal::Fifth => 4,
        Ordinal::Last => 5,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
