//! The classifier's output: a single recurrence rule.
//!
//! A [`RecurrenceRule`] is a plain value. It serializes to a tagged JSON object,
//! renders a human description through `Display`, and can be expressed as an
//! RFC 5545 RRULE (see [`RecurrenceRule::to_rrule`]).

use std::fmt;

use chrono::{NaiveDate, Weekday};
use rrule::RRuleSet;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use crate::calendar::{month_name, weekday_code, weekday_name};
use crate::error::DetectError;

// ── Ordinal ─────────────────────────────────────────────────────────────────

/// Which occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordinal {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Last,
}

impl Ordinal {
    /// All ordinals, `Last` at the end.
    pub const ALL: [Ordinal; 6] = [
        Ordinal::First,
        Ordinal::Second,
        Ordinal::Third,
        Ordinal::Fourth,
        Ordinal::Fifth,
        Ordinal::Last,
    ];

    /// Position as used in an RRULE `BYDAY` entry: 1..=5, or -1 for `Last`.
    pub fn position(self) -> i32 {
        match self {
            Ordinal::First => 1,
            Ordinal::Second => 2,
            Ordinal::Third => 3,
            Ordinal::Fourth => 4,
            Ordinal::Fifth => 5,
            Ordinal::Last => -1,
        }
    }

    /// Lowercase name ("first" .. "last").
    pub fn name(self) -> &'static str {
        match self {
            Ordinal::First => "first",
            Ordinal::Second => "second",
            Ordinal::Third => "third",
            Ordinal::Fourth => "fourth",
            Ordinal::Fifth => "fifth",
            Ordinal::Last => "last",
        }
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── RecurrenceRule ──────────────────────────────────────────────────────────

/// How a custom monthly recurrence picks its days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyPattern {
    /// Fixed days of the month, in cycle order (e.g. `[10, 12]`).
    Days(Vec<u32>),
    /// The nth (or last) weekday of the month.
    On {
        ordinal: Ordinal,
        #[serde(serialize_with = "serialize_weekday")]
        weekday: Weekday,
    },
}

/// The single best-matching recurrence for a set of dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "recurrence", rename_all = "snake_case")]
pub enum RecurrenceRule {
    /// No rule fits (or too few distinct dates to tell).
    None,
    EveryDay,
    /// Monday through Friday.
    EveryWeekday,
    EveryWeek {
        #[serde(serialize_with = "serialize_weekday")]
        weekday: Weekday,
    },
    EveryMonth {
        day_of_month: u32,
    },
    EveryYear {
        /// 1 = January.
        #[serde(serialize_with = "serialize_month")]
        month: u32,
    },
    CustomDays {
        interval_days: u32,
    },
    CustomWeeks {
        interval_weeks: u32,
        #[serde(serialize_with = "serialize_weekdays")]
        weekdays: Vec<Weekday>,
    },
    CustomMonths {
        interval_months: u32,
        #[serde(flatten)]
        pattern: MonthlyPattern,
    },
}

impl RecurrenceRule {
    /// True for [`RecurrenceRule::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, RecurrenceRule::None)
    }

    /// Render the rule as an RFC 5545 RRULE value (without the `RRULE:` prefix).
    ///
    /// Returns `None` for [`RecurrenceRule::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use recurrence_detector::{RecurrenceRule, Weekday};
    ///
    /// let rule = RecurrenceRule::CustomWeeks {
    ///     interval_weeks: 2,
    ///     weekdays: vec![Weekday::Mon, Weekday::Wed],
    /// };
    /// assert_eq!(rule.to_rrule().as_deref(), Some("FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE"));
    /// ```
    pub fn to_rrule(&self) -> Option<String> {
        let rule = match self {
            RecurrenceRule::None => return None,
            RecurrenceRule::EveryDay => "FREQ=DAILY".to_string(),
            RecurrenceRule::EveryWeekday => "FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR".to_string(),
            RecurrenceRule::EveryWeek { weekday } => {
                format!("FREQ=WEEKLY;BYDAY={}", weekday_code(*weekday))
            }
            RecurrenceRule::EveryMonth { day_of_month } => {
                format!("FREQ=MONTHLY;BYMONTHDAY={day_of_month}")
            }
            RecurrenceRule::EveryYear { month } => format!("FREQ=YEARLY;BYMONTH={month}"),
            RecurrenceRule::CustomDays { interval_days } => {
                format!("FREQ=DAILY{}", interval(*interval_days))
            }
            RecurrenceRule::CustomWeeks {
                interval_weeks,
                weekdays,
            } => {
                let days: Vec<&str> = weekdays.iter().map(|wd| weekday_code(*wd)).collect();
                format!("FREQ=WEEKLY{};BYDAY={}", interval(*interval_weeks), days.join(","))
            }
            RecurrenceRule::CustomMonths {
                interval_months,
                pattern: MonthlyPattern::Days(days),
            } => {
                let days: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                format!(
                    "FREQ=MONTHLY{};BYMONTHDAY={}",
                    interval(*interval_months),
                    days.join(",")
                )
            }
            RecurrenceRule::CustomMonths {
                interval_months,
                pattern: MonthlyPattern::On { ordinal, weekday },
            } => format!(
                "FREQ=MONTHLY{};BYDAY={}{}",
                interval(*interval_months),
                ordinal.position(),
                weekday_code(*weekday)
            ),
        };
        Some(rule)
    }

    /// Anchor the rule at `dtstart` and parse it into an [`RRuleSet`] the caller
    /// can expand.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidRule`] for [`RecurrenceRule::None`], or if the
    /// `rrule` parser rejects the rendered rule.
    pub fn to_rrule_set(&self, dtstart: NaiveDate) -> Result<RRuleSet, DetectError> {
        let rule = self
            .to_rrule()
            .ok_or_else(|| DetectError::InvalidRule("no recurrence to express".to_string()))?;
        let text = format!("DTSTART:{}T000000Z\nRRULE:{}", dtstart.format("%Y%m%d"), rule);
        text.parse::<RRuleSet>()
            .map_err(|e| DetectError::InvalidRule(format!("'{}': {}", rule, e)))
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::None => f.write_str("no recurrence"),
            RecurrenceRule::EveryDay => f.write_str("every day"),
            RecurrenceRule::EveryWeekday => f.write_str("every weekday"),
            RecurrenceRule::EveryWeek { weekday } => {
                write!(f, "every week on {}", title(weekday_name(*weekday)))
            }
            RecurrenceRule::EveryMonth { day_of_month } => {
                write!(f, "every month on the {}", day_ordinal(*day_of_month))
            }
            RecurrenceRule::EveryYear { month } => {
                match month_name(*month) {
                    Some(name) => write!(f, "every year in {}", title(name)),
                    None => write!(f, "every year in month {month}"),
                }
            }
            RecurrenceRule::CustomDays { interval_days } => {
                write!(f, "{}", every(*interval_days, "day"))
            }
            RecurrenceRule::CustomWeeks {
                interval_weeks,
                weekdays,
            } => {
                let names: Vec<String> = weekdays.iter().map(|wd| title(weekday_name(*wd))).collect();
                write!(f, "{} on {}", every(*interval_weeks, "week"), join_list(&names))
            }
            RecurrenceRule::CustomMonths {
                interval_months,
                pattern: MonthlyPattern::Days(days),
            } => {
                let days: Vec<String> = days.iter().map(|d| day_ordinal(*d)).collect();
                write!(f, "{} on the {}", every(*interval_months, "month"), join_list(&days))
            }
            RecurrenceRule::CustomMonths {
                interval_months,
                pattern: MonthlyPattern::On { ordinal, weekday },
            } => write!(
                f,
                "{} on the {} {}",
                every(*interval_months, "month"),
                ordinal,
                title(weekday_name(*weekday))
            ),
        }
    }
}

// ── Formatting helpers ──────────────────────────────────────────────────────

fn every(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("every {unit}")
    } else {
        format!("every {n} {unit}s")
    }
}

/// `;INTERVAL=n` for an RRULE, empty for the default interval of 1.
fn interval(n: u32) -> String {
    if n == 1 {
        String::new()
    } else {
        format!(";INTERVAL={n}")
    }
}

fn title(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "1st", "2nd", "3rd", "4th", "11th", "22nd".
fn day_ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// "a", "a and b", "a, b and c".
fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

// ── Serialization helpers ───────────────────────────────────────────────────

fn serialize_weekday<S: Serializer>(weekday: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*weekday))
}

fn serialize_weekdays<S: Serializer>(weekdays: &[Weekday], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(weekdays.iter().map(|wd| weekday_name(*wd)))
}

fn serialize_month<S: Serializer>(month: &u32, s: S) -> Result<S::Ok, S::Error> {
    let name = month_name(*month)
        .ok_or_else(|| S::Error::custom(format!("month {month} is not in 1..=12")))?;
    s.serialize_str(name)
}

// ── Tests ───────────────────────────────────────────────────────────────────
