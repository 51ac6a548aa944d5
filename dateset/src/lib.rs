//! # dateset
//!
//! Set algebra, position queries and period splitting over irregular
//! business-day calendars.  The caller supplies the dates; this library
//! never decides which days are holidays.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `ds-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! dateset = "0.1"
//! ```
//!
//! ```rust
//! use dateset::calendar::{Calendar, Side};
//! use dateset::time::{Date, Frequency};
//!
//! let start = Date::from_ymd(2019, 12, 23).unwrap();
//! let end = Date::from_ymd(2020, 1, 10).unwrap();
//! let holidays = [
//!     Date::from_ymd(2019, 12, 25).unwrap(),
//!     Date::from_ymd(2020, 1, 1).unwrap(),
//! ];
//! let sessions = Calendar::generate(start, end).weekdays().difference(holidays);
//!
//! let christmas = holidays[0];
//! assert_eq!(sessions.asof(christmas, Side::Left).unwrap().to_string(), "2019-12-24");
//! assert_eq!(sessions.eom(Date::from_ymd(2019, 12, 24).unwrap()).unwrap().to_string(), "2019-12-31");
//! assert_eq!(sessions.dayof(Frequency::Year).get(Date::from_ymd(2020, 1, 3).unwrap()), Ok(2));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions and process-wide settings.
pub use ds_core as core;

/// Date, weekday and frequency types.
pub use ds_time as time;

/// Calendars, collections, business-day selectors and policies.
pub use ds_calendar as calendar;
