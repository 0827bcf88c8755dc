//! Input validation and normalization.
//!
//! A [`DateSet`] is the sorted input handed to every detector. Typed input is
//! accepted as-is; string and JSON input is validated eagerly and rejected as a
//! whole if any element is not a plain calendar date.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::detector::{classify_with_options, DetectOptions};
use crate::error::DetectError;
use crate::rule::RecurrenceRule;

/// Dates sorted ascending. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateSet {
    dates: Vec<NaiveDate>,
}

impl DateSet {
    /// Build a set from already-typed dates.
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort_unstable();
        Self { dates }
    }

    /// Parse a sequence of `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidInput`] naming the first element that is not a
    /// plain calendar date. A timestamp such as `"2001-01-01T10:00:00Z"` is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use recurrence_detector::DateSet;
    ///
    /// let set = DateSet::parse(&["2001-02-01", "2001-01-01"]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert!(DateSet::parse(&["2001-01-01", "2001-01-02T09:00:00Z"]).is_err());
    /// ```
    pub fn parse<S: AsRef<str>>(inputs: &[S]) -> Result<Self, DetectError> {
        let dates = inputs
            .iter()
            .enumerate()
            .map(|(i, s)| parse_date(s.as_ref(), i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(dates))
    }

    /// Parse a JSON array of `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidInput`] if `value` is not an array, or if any
    /// element is not a date string.
    pub fn from_json(value: &Value) -> Result<Self, DetectError> {
        let items = value.as_array().ok_or_else(|| {
            DetectError::InvalidInput(format!(
                "dates must be an array of dates, got {}",
                json_kind(value)
            ))
        })?;
        let dates = items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => parse_date(s, i),
                other => Err(DetectError::InvalidInput(format!(
                    "element {i} is not a date: {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(dates))
    }

    /// Classify this set with the given options.
    pub fn classify(&self, options: &DetectOptions) -> RecurrenceRule {
        classify_with_options(&self.dates, options)
    }

    /// The dates in ascending order, duplicates included.
    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of dates, duplicates included.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True when no dates were given.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Earliest date.
    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Latest date.
    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// The distinct dates, for set comparisons.
    pub fn distinct(&self) -> BTreeSet<NaiveDate> {
        self.dates.iter().copied().collect()
    }

    /// Number of distinct dates.
    pub fn distinct_len(&self) -> usize {
        let mut count = 0;
        let mut prev = None;
        for date in &self.dates {
            if prev != Some(date) {
                count += 1;
            }
            prev = Some(date);
        }
        count
    }

    /// Calendar years covered, first through last (inclusive).
    pub fn years(&self) -> Option<std::ops::RangeInclusive<i32>> {
        Some(self.first()?.year()..=self.last()?.year())
    }

    /// Adjacent `(prev, date)` pairs in ascending order.
    pub fn pairs(&self) -> impl Iterator<Item = (NaiveDate, NaiveDate)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }
}

impl FromIterator<NaiveDate> for DateSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Parse a strict ISO 8601 calendar date: exactly `YYYY-MM-DD`, zero-padded, with
/// no surrounding whitespace and no time part.
fn parse_date(s: &str, index: usize) -> Result<NaiveDate, DetectError> {
    if !has_date_shape(s) {
        return Err(DetectError::InvalidInput(format!(
            "element {index} ('{s}'): expected YYYY-MM-DD"
        )));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DetectError::InvalidInput(format!("element {index} ('{s}'): {e}")))
}

fn has_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
