//! # ds-calendar
//!
//! Immutable business-day calendars: sorted sets of dates supplied by the
//! caller, with logarithmic boundary lookups, cached frequency positions,
//! per-date [`Rows`], grouping and splitting into [`Collection`]s.
//!
//! ```
//! use ds_calendar::{Calendar, OnError, Split, BD};
//! use ds_time::{Date, Frequency};
//!
//! let start = Date::from_ymd(2019, 1, 1).unwrap();
//! let end = Date::from_ymd(2019, 6, 30).unwrap();
//! let business_days = Calendar::generate(start, end).weekdays();
//!
//! // third Friday of every month
//! let fridays = business_days.filter(|d| d.weekday() == ds_time::Weekday::Friday);
//! let third = fridays.resample(Frequency::Month).nth(2, 0, &OnError::Raise).unwrap();
//! assert_eq!(third.first(), Some(Date::from_ymd(2019, 1, 18).unwrap()));
//!
//! // periods running from the last business day of a month to the day before the next one
//! let periods = business_days.split(Split::On(BD::new(-1, Frequency::Month))).unwrap();
//! assert_eq!(periods.len(), 6);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `BD`: n-th business day of each period.
pub mod bd;

/// `Calendar`: sorted set of dates.
pub mod calendar;

/// `Collection`: ordered sub-calendars.
pub mod collection;

/// `DateMap`: date → position tables.
pub mod datemap;

/// `DateFilter`: named period criteria.
pub mod filter;

/// Error and fallback policies.
pub mod policy;

/// `Rows`: per-date records of neighbours and positions.
pub mod rows;

mod grouping;
mod positions;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use bd::BD;
pub use calendar::{Calendar, SliceBound};
pub use collection::Collection;
pub use datemap::{DateMap, DateMapKey, Position};
pub use filter::DateFilter;
pub use policy::{Bounds, Fallback, OnError, Side, Split};
pub use rows::{Field, Rows, Value};
