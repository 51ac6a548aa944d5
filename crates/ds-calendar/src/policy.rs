//! Policies that select how batched lookups degrade when an element is
//! missing.
//!
//! Each policy is a closed enum with a [`FromStr`](std::str::FromStr)
//! implementation accepting the usual lower-case names.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ds_core::errors::{Error, Result};
use ds_time::Date;

use crate::bd::BD;
use crate::calendar::Calendar;

/// Strategy computing a substitute date for a sub-calendar whose requested
/// element does not exist.  `Ok(None)` drops the sub-calendar.
pub type Recovery = dyn Fn(&Calendar) -> Result<Option<Date>> + Send + Sync;

/// What to do when the requested element of a sub-calendar does not exist.
#[derive(Clone, Default)]
pub enum OnError {
    /// Propagate the error.
    #[default]
    Raise,
    /// Omit the sub-calendar's contribution.
    Drop,
    /// Substitute the sub-calendar's first date.
    First,
    /// Substitute the sub-calendar's last date.
    Last,
    /// Ask a caller-supplied function for a substitute.
    Custom(Arc<Recovery>),
}

impl OnError {
    /// Wrap a closure as a [`OnError::Custom`] policy.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Calendar) -> Result<Option<Date>> + Send + Sync + 'static,
    {
        OnError::Custom(Arc::new(f))
    }

    /// Apply the policy to `calendar`, which failed with `err`.
    ///
    /// Returns the substitute date, `None` to skip, or the error itself
    /// under [`OnError::Raise`].
    pub fn recover(&self, calendar: &Calendar, err: Error) -> Result<Option<Date>> {
        match self {
            OnError::Raise => Err(err),
            OnError::Drop => Ok(None),
            OnError::First => Ok(calendar.first()),
            OnError::Last => Ok(calendar.last()),
            OnError::Custom(f) => f(calendar),
        }
    }
}

impl fmt::Debug for OnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnError::Raise => f.write_str("Raise"),
            OnError::Drop => f.write_str("Drop"),
            OnError::First => f.write_str("First"),
            OnError::Last => f.write_str("Last"),
            OnError::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl FromStr for OnError {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raise" => Ok(OnError::Raise),
            "skip" | "drop" => Ok(OnError::Drop),
            "first" => Ok(OnError::First),
            "last" => Ok(OnError::Last),
            _ => Err(Error::InvalidArgument(format!(
                "onerror should be one of 'raise', 'skip', 'drop', 'first' or 'last', {s:?} given"
            ))),
        }
    }
}

/// How [`Calendar::snap`] treats dates absent from the reference calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Drop the date.
    #[default]
    Drop,
    /// Replace with the reference's last date strictly before it.
    Previous,
    /// Replace with the reference's first date strictly after it.
    Next,
}

impl FromStr for Fallback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Fallback::Drop),
            "previous" | "ffill" => Ok(Fallback::Previous),
            "next" | "bfill" => Ok(Fallback::Next),
            _ => Err(Error::InvalidArgument(format!(
                "fallback should be one of 'drop', 'previous' or 'next', {s:?} given"
            ))),
        }
    }
}

/// Which endpoints [`Calendar::daysbetween`] counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    /// Both endpoints are included.
    #[default]
    Both,
    /// Only the earlier endpoint is included.
    Left,
    /// Only the later endpoint is included.
    Right,
    /// Neither endpoint is included.
    Neither,
}

impl Bounds {
    fn includes_left(self) -> bool {
        matches!(self, Bounds::Both | Bounds::Left)
    }

    fn includes_right(self) -> bool {
        matches!(self, Bounds::Both | Bounds::Right)
    }

    /// Whether `date` lies within `[lo, hi]` under these bounds.
    pub fn contains(self, lo: Date, hi: Date, date: Date) -> bool {
        let above = if self.includes_left() { date >= lo } else { date > lo };
        let below = if self.includes_right() { date <= hi } else { date < hi };
        above && below
    }
}

impl FromStr for Bounds {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(Bounds::Both),
            "left" => Ok(Bounds::Left),
            "right" => Ok(Bounds::Right),
            "neither" | "none" => Ok(Bounds::Neither),
            _ => Err(Error::InvalidArgument(format!(
                "bounds should be one of 'both', 'left', 'right' or 'neither', {s:?} given"
            ))),
        }
    }
}

/// Direction of an as-of lookup for dates not in the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Use the last date before.
    #[default]
    Left,
    /// Use the first date after.
    Right,
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(Error::InvalidArgument(format!(
                "side should be one of 'left' or 'right', {s:?} given"
            ))),
        }
    }
}

/// Where [`Calendar::split`] cuts the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// Each sub-calendar starts on a selected day.
    On(BD),
    /// Same anchoring as [`Split::On`].
    Starting(BD),
    /// Each sub-calendar ends on a selected day.
    Ending(BD),
}

impl Split {
    /// The cut-point selector.
    pub fn selector(&self) -> BD {
        match *self {
            Split::On(bd) | Split::Starting(bd) | Split::Ending(bd) => bd,
        }
    }

    /// The side on which dates attach to their cut point.
    pub fn side(&self) -> Side {
        match self {
            Split::On(_) | Split::Starting(_) => Side::Left,
            Split::Ending(_) => Side::Right,
        }
    }
}
