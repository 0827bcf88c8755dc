//! # recurrence-detector
//!
//! Infer the recurrence rule behind an unordered set of calendar dates.
//!
//! Given historical occurrence dates (for example, from a calendar event), the
//! classifier returns the single best-matching rule, such as "every day",
//! "every 2 weeks on Monday", "every month on the 10th and 12th" or "every
//! month on the last Tuesday", or [`RecurrenceRule::None`] when nothing fits.
//!
//! ## Modules
//!
//! - [`detector`] — The fixed-priority detector cascade and [`DetectOptions`]
//! - [`consecutive`] — Every year / month / week / day / weekday detectors
//! - [`custom`] — Custom day, week and month cycles
//! - [`occurrences`] — Nth / last weekday-of-month lookup table
//! - [`date_set`] — Input validation and normalization
//! - [`calendar`] — Month shifting, week numbering, month boundaries
//! - [`rule`] — The [`RecurrenceRule`] output, with serde, `Display` and RRULE rendering
//! - [`error`] — Error types

pub mod calendar;
pub mod consecutive;
pub mod custom;
pub mod date_set;
pub mod detector;
pub mod error;
pub mod occurrences;
pub mod rule;

pub use calendar::WeekStartDay;
pub use chrono::{NaiveDate, Weekday};
pub use date_set::DateSet;
pub use detector::{classify, classify_json, classify_strs, classify_with_options, DetectOptions};
pub use error::{DetectError, Result};
pub use occurrences::MonthOccurrenceTable;
pub use rule::{MonthlyPattern, Ordinal, RecurrenceRule};
