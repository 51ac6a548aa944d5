//! # ds-time
//!
//! Date, weekday and frequency types.  The frequency resolver is stateless:
//! it maps a date to the calendar-day boundaries of the period containing it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date` type.
pub mod date;

/// Period granularities and their boundaries.
pub mod frequency;

/// `Weekday`: day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use date::Date;
pub use frequency::Frequency;
pub use weekday::Weekday;
