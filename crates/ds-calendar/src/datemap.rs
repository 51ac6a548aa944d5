//! `DateMap`: a read-only date → position table.
//!
//! A `DateMap` is built in a single pass over a sorted date list and records,
//! for each date, its position inside the enclosing period of a
//! [`Frequency`].  Calendars cache one map per [`DateMapKey`].

use std::collections::BTreeMap;
use std::fmt;

use ds_core::errors::{Error, Result};
use ds_time::{Date, Frequency};

/// Which position a [`DateMap`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Ordinal of the date within its period, counted from a base.
    DayOf,
    /// Calendar dates remaining until the end of the period.
    DaysTo,
}

/// Cache key of a position map: `(operation, frequency, base)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateMapKey {
    /// Position recorded.
    pub position: Position,
    /// Period granularity.
    pub frequency: Frequency,
    /// Value assigned to the first date of each period.
    pub base: usize,
}

impl fmt::Display for DateMapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Position::DayOf => write!(f, "dayof({}, base={})", self.frequency, self.base),
            Position::DaysTo => write!(f, "daysto({})", self.frequency),
        }
    }
}

/// An immutable, sorted mapping from date to position.
#[derive(Debug, Clone, PartialEq)]
pub struct DateMap {
    key: DateMapKey,
    data: BTreeMap<Date, usize>,
}

impl DateMap {
    // ── Builders ─────────────────────────────────────────────────────────

    /// Number each date within its period, starting at `base`.
    ///
    /// `dates` must be strictly increasing.  A new period starts whenever a
    /// date passes the end of the current one.
    pub(crate) fn day_of(dates: &[Date], frequency: Frequency, base: usize) -> Self {
        let mut data = BTreeMap::new();
        let mut end: Option<Date> = None;
        let mut counter = base;
        for &date in dates {
            match end {
                Some(e) if date <= e => counter += 1,
                _ => {
                    end = Some(frequency.ceil(date));
                    counter = base;
                }
            }
            data.insert(date, counter);
        }
        let key = DateMapKey {
            position: Position::DayOf,
            frequency,
            base,
        };
        Self { key, data }
    }

    /// Count, for each date, the dates after it in the same period.
    ///
    /// `dates` must be strictly increasing; they are walked backwards.
    pub(crate) fn days_to(dates: &[Date], frequency: Frequency) -> Self {
        let mut data = BTreeMap::new();
        let mut start: Option<Date> = None;
        let mut counter = 0;
        for &date in dates.iter().rev() {
            match start {
                Some(s) if date >= s => counter += 1,
                _ => {
                    start = Some(frequency.floor(date));
                    counter = 0;
                }
            }
            data.insert(date, counter);
        }
        let key = DateMapKey {
            position: Position::DaysTo,
            frequency,
            base: 0,
        };
        Self { key, data }
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// The operation, frequency and base this map was built for.
    pub fn key(&self) -> DateMapKey {
        self.key
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `date` is a key.
    pub fn contains(&self, date: Date) -> bool {
        self.data.contains_key(&date)
    }

    // ── Element access ───────────────────────────────────────────────────

    /// Position of `date`.
    ///
    /// # Errors
    /// [`Error::Lookup`] if `date` was not among the dates the map was
    /// built from.
    pub fn get(&self, date: Date) -> Result<usize> {
        self.data
            .get(&date)
            .copied()
            .ok_or_else(|| Error::Lookup(format!("{date} is not in the {} map", self.key)))
    }

    /// Positions of several dates, failing on the first absent one.
    pub fn get_many(&self, dates: &[Date]) -> Result<Vec<usize>> {
        dates.iter().map(|&d| self.get(d)).collect()
    }

    // ── Bulk access ──────────────────────────────────────────────────────

    /// `(date, position)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, usize)> + '_ {
        self.data.iter().map(|(&d, &p)| (d, p))
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<Date> {
        self.data.keys().copied().collect()
    }

    /// All positions in key-ascending order.
    pub fn values(&self) -> Vec<usize> {
        self.data.values().copied().collect()
    }
}
