//! `Calendar`: an immutable, sorted set of unique dates.
//!
//! Every query uses binary search on the sorted vector; every transformation
//! returns a new calendar.  Position maps (see [`Calendar::dayof`]) are cached
//! per calendar and shared between clones.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use ds_core::errors::{Error, Result};
use ds_time::{Date, Frequency};

use crate::datemap::{DateMap, DateMapKey};
use crate::filter::DateFilter;
use crate::policy::{Bounds, Fallback, Side};

pub(crate) type DateMapCache = RwLock<HashMap<DateMapKey, Arc<DateMap>>>;

/// An immutable, strictly increasing set of dates.
#[derive(Clone, Default)]
pub struct Calendar {
    dates: Vec<Date>,
    pub(crate) cache: Arc<DateMapCache>,
}

/// A slice bound: an integer position (negative counts from the end) or a
/// date resolved by binary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceBound {
    /// No bound.
    Unbounded,
    /// Integer position.
    Index(isize),
    /// Date bound.
    Date(Date),
}

impl From<isize> for SliceBound {
    fn from(i: isize) -> Self {
        SliceBound::Index(i)
    }
}

impl From<Date> for SliceBound {
    fn from(d: Date) -> Self {
        SliceBound::Date(d)
    }
}

impl From<Option<Date>> for SliceBound {
    fn from(d: Option<Date>) -> Self {
        d.map_or(SliceBound::Unbounded, SliceBound::Date)
    }
}

impl From<std::ops::RangeFull> for SliceBound {
    fn from(_: std::ops::RangeFull) -> Self {
        SliceBound::Unbounded
    }
}

impl Calendar {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Build a calendar from any collection of dates, sorting and
    /// removing duplicates.
    pub fn new(dates: impl IntoIterator<Item = Date>) -> Self {
        let mut dates: Vec<Date> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();
        Self::from_sorted(dates)
    }

    /// Wrap a vector already known to be strictly increasing.
    pub(crate) fn from_sorted(dates: Vec<Date>) -> Self {
        debug_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        Self {
            dates,
            cache: Arc::default(),
        }
    }

    /// Build a calendar from date-like values, validating each element.
    ///
    /// Any proleptic Gregorian date from 0001-01-01 to 9999-12-31
    /// ([`Date::MIN`] to [`Date::MAX`]) is accepted.
    ///
    /// # Errors
    /// [`Error::Type`] naming the first element that is not a valid date,
    /// such as an impossible day of month or a year outside `1..=9999`.
    pub fn try_new<I, T>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: TryInto<Date> + fmt::Debug + Copy,
        T::Error: fmt::Display,
    {
        let dates = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                item.try_into().map_err(|e| {
                    Error::Type(format!("element {i} ({item:?}) is not a valid date: {e}"))
                })
            })
            .collect::<Result<Vec<Date>>>()?;
        Ok(Self::new(dates))
    }

    /// Build a calendar from `(year, month, day)` triples.
    pub fn from_ymd(triples: &[(u16, u8, u8)]) -> Result<Self> {
        Self::try_new(triples.iter().copied())
    }

    /// Every calendar day in `[start, end]`; empty if `start > end`.
    pub fn generate(start: Date, end: Date) -> Self {
        Self::from_sorted(Date::range_inclusive(start, end).collect())
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the calendar has no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The earliest date.
    pub fn first(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// The latest date.
    pub fn last(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// The dates in ascending order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Iterate the dates in ascending order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Date>> {
        self.dates.iter().copied()
    }

    /// Whether `date` is in the calendar.
    pub fn contains(&self, date: Date) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// 0-based position of `date`.
    ///
    /// # Errors
    /// [`Error::Lookup`] if `date` is not in the calendar.
    pub fn index(&self, date: Date) -> Result<usize> {
        self.dates
            .binary_search(&date)
            .map_err(|_| Error::Lookup(format!("{date} is not in the calendar")))
    }

    /// Date at position `i`; negative positions count from the end.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] unless `-len <= i < len`.
    pub fn get(&self, i: isize) -> Result<Date> {
        let size = self.dates.len();
        let pos = if i < 0 { i + size as isize } else { i };
        if pos < 0 || pos >= size as isize {
            return Err(Error::IndexOutOfRange { index: i, size });
        }
        Ok(self.dates[pos as usize])
    }

    // ── Slicing ──────────────────────────────────────────────────────────

    /// Half-open slice `[start, stop)`.
    ///
    /// Integer bounds behave like sequence slicing and are clamped to the
    /// calendar.  A date `start` resolves to the first date `>= start`; a
    /// date `stop` resolves past the last date `<= stop`, so the stop date
    /// itself is included.
    pub fn slice(&self, start: impl Into<SliceBound>, stop: impl Into<SliceBound>) -> Calendar {
        let lo = self.resolve_bound(start.into(), 0, |d| self.lower_bound(d));
        let hi = self.resolve_bound(stop.into(), self.len(), |d| self.upper_bound(d));
        if lo >= hi {
            return Calendar::default();
        }
        Self::from_sorted(self.dates[lo..hi].to_vec())
    }

    /// Dates in `[start, end]`.
    pub fn between(&self, start: Date, end: Date) -> Calendar {
        self.slice(start, end)
    }

    fn resolve_bound(&self, bound: SliceBound, unbounded: usize, search: impl Fn(Date) -> usize) -> usize {
        let size = self.len() as isize;
        match bound {
            SliceBound::Unbounded => unbounded,
            SliceBound::Date(d) => search(d),
            SliceBound::Index(i) if i < 0 => (i + size).max(0) as usize,
            SliceBound::Index(i) => i.min(size) as usize,
        }
    }

    /// Number of dates strictly before `date`.
    pub(crate) fn lower_bound(&self, date: Date) -> usize {
        self.dates.partition_point(|&d| d < date)
    }

    /// Number of dates on or before `date`.
    pub(crate) fn upper_bound(&self, date: Date) -> usize {
        self.dates.partition_point(|&d| d <= date)
    }

    // ── Set algebra ──────────────────────────────────────────────────────

    /// Dates in `self` or `other`.
    pub fn union(&self, other: impl IntoIterator<Item = Date>) -> Calendar {
        Self::new(self.iter().chain(other))
    }

    /// Dates in `self` or any of `others`.
    pub fn union_all<'a>(&self, others: impl IntoIterator<Item = &'a Calendar>) -> Calendar {
        Self::new(self.iter().chain(others.into_iter().flat_map(|c| c.iter())))
    }

    /// Dates in `self` but not in `other`.
    pub fn difference(&self, other: impl IntoIterator<Item = Date>) -> Calendar {
        let other = Calendar::new(other);
        self.filter(|d| !other.contains(d))
    }

    /// Dates in both `self` and `other`.
    pub fn intersection(&self, other: impl IntoIterator<Item = Date>) -> Calendar {
        let other = Calendar::new(other);
        self.filter(|d| other.contains(d))
    }

    /// Whether every date of `self` is in `other`.
    pub fn is_subset(&self, other: &Calendar) -> bool {
        self.iter().all(|d| other.contains(d))
    }

    /// A copy of the calendar with `date` added.
    pub fn with_date(&self, date: Date) -> Calendar {
        match self.dates.binary_search(&date) {
            Ok(_) => self.clone(),
            Err(pos) => {
                let mut dates = Vec::with_capacity(self.len() + 1);
                dates.extend_from_slice(&self.dates[..pos]);
                dates.push(date);
                dates.extend_from_slice(&self.dates[pos..]);
                Self::from_sorted(dates)
            }
        }
    }

    /// Dates of `self` on or before `on`, followed by dates of `other`
    /// strictly after `on`.  `on` defaults to the last date of `self`.
    pub fn join(&self, other: &Calendar, on: Option<Date>) -> Calendar {
        let Some(on) = on.or(self.last()) else {
            return other.clone();
        };
        let head = &self.dates[..self.upper_bound(on)];
        let tail = &other.dates[other.upper_bound(on)..];
        Self::from_sorted([head, tail].concat())
    }

    // ── Filtering ────────────────────────────────────────────────────────

    /// Dates for which `predicate` holds.
    pub fn filter(&self, predicate: impl Fn(Date) -> bool) -> Calendar {
        Self::from_sorted(self.iter().filter(|&d| predicate(d)).collect())
    }

    /// Dates matching every criterion of `filter`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the filter is empty or a criterion is
    /// out of range.
    pub fn filter_by(&self, filter: &DateFilter) -> Result<Calendar> {
        filter.validate()?;
        Ok(self.filter(|d| filter.matches(d)))
    }

    /// Dates falling Monday to Friday.
    pub fn weekdays(&self) -> Calendar {
        self.filter(|d| !d.is_weekend())
    }

    /// Dates falling on Saturday or Sunday.
    pub fn weekends(&self) -> Calendar {
        self.filter(|d| d.is_weekend())
    }

    /// Calendar days in `[start, end]` that are not in the calendar.
    ///
    /// `start` and `end` default to the calendar's own first and last dates,
    /// which are members, so the default complement is strictly interior.
    pub fn inverse(&self, start: Option<Date>, end: Option<Date>) -> Calendar {
        let (Some(start), Some(end)) = (start.or(self.first()), end.or(self.last())) else {
            return Calendar::default();
        };
        Self::from_sorted(
            Date::range_inclusive(start, end)
                .filter(|&d| !self.contains(d))
                .collect(),
        )
    }

    // ── Lookups ──────────────────────────────────────────────────────────

    /// The date `n` positions away from `date`.
    ///
    /// # Errors
    /// [`Error::Lookup`] if `date` is absent, [`Error::OutOfRange`] if the
    /// shift leaves the calendar.
    pub fn offset(&self, date: Date, n: isize) -> Result<Date> {
        let i = self.index(date)? as isize;
        let target = i + n;
        if target < 0 || target >= self.len() as isize {
            return Err(Error::OutOfRange(format!(
                "offsetting {date} by {n} leaves the calendar ({} to {})",
                fmt_opt(self.first()),
                fmt_opt(self.last())
            )));
        }
        Ok(self.dates[target as usize])
    }

    /// First date strictly after `date`.
    ///
    /// # Errors
    /// [`Error::Lookup`] if no date of the calendar is after `date`.
    pub fn fa(&self, date: Date) -> Result<Date> {
        self.dates.get(self.upper_bound(date)).copied().ok_or_else(|| {
            Error::Lookup(format!(
                "no date after {date}; the calendar ends on {}",
                fmt_opt(self.last())
            ))
        })
    }

    /// Last date strictly before `date`.
    ///
    /// # Errors
    /// [`Error::Lookup`] if no date of the calendar is before `date`.
    pub fn lb(&self, date: Date) -> Result<Date> {
        match self.lower_bound(date) {
            0 => Err(Error::Lookup(format!(
                "no date before {date}; the calendar starts on {}",
                fmt_opt(self.first())
            ))),
            i => Ok(self.dates[i - 1]),
        }
    }

    /// `date` itself if present, otherwise [`lb`](Self::lb) for
    /// [`Side::Left`] or [`fa`](Self::fa) for [`Side::Right`].
    pub fn asof(&self, date: Date, side: Side) -> Result<Date> {
        if self.contains(date) {
            return Ok(date);
        }
        match side {
            Side::Left => self.lb(date),
            Side::Right => self.fa(date),
        }
    }

    /// Restrict the calendar to dates of `other`, replacing absent dates
    /// according to `fallback`.
    ///
    /// # Errors
    /// [`Error::Lookup`] if a replacement does not exist in `other`.
    pub fn snap(&self, other: &Calendar, fallback: Fallback) -> Result<Calendar> {
        let mut snapped = Vec::with_capacity(self.len());
        for date in self {
            if other.contains(date) {
                snapped.push(date);
                continue;
            }
            match fallback {
                Fallback::Drop => {}
                Fallback::Previous => snapped.push(other.lb(date)?),
                Fallback::Next => snapped.push(other.fa(date)?),
            }
        }
        Ok(Calendar::new(snapped))
    }

    /// Number of calendar dates between `d1` and `d2` (in either order),
    /// with `bounds` selecting which endpoints count.
    pub fn daysbetween(&self, d1: Date, d2: Date, bounds: Bounds) -> usize {
        let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let from = self.lower_bound(lo);
        let to = self.upper_bound(hi);
        self.dates[from..to.max(from)]
            .iter()
            .filter(|&&d| bounds.contains(lo, hi, d))
            .count()
    }

    // ── Mapping ──────────────────────────────────────────────────────────

    /// Apply `f` to every date, in order.
    pub fn map<T>(&self, f: impl FnMut(Date) -> T) -> Vec<T> {
        self.iter().map(f).collect()
    }

    /// Apply `f` to every date and collect the results as a calendar.
    pub fn map_dates(&self, f: impl FnMut(Date) -> Date) -> Calendar {
        Calendar::new(self.iter().map(f))
    }

    // ── Period boundaries ────────────────────────────────────────────────

    /// First date of the calendar in the same `frequency` period as `date`.
    ///
    /// # Errors
    /// [`Error::Lookup`] if `date` is not in the calendar.
    pub fn period_start(&self, date: Date, frequency: Frequency) -> Result<Date> {
        let i = self.index(date)?;
        Ok(self.dates[self.lower_bound(frequency.floor(date)).min(i)])
    }

    /// Last date of the calendar in the same `frequency` period as `date`.
    ///
    /// # Errors
    /// [`Error::Lookup`] if `date` is not in the calendar.
    pub fn period_end(&self, date: Date, frequency: Frequency) -> Result<Date> {
        let i = self.index(date)?;
        Ok(self.dates[self.upper_bound(frequency.ceil(date)).max(i + 1) - 1])
    }

    /// First date of the month.
    pub fn som(&self, date: Date) -> Result<Date> {
        self.period_start(date, Frequency::Month)
    }

    /// Last date of the month.
    pub fn eom(&self, date: Date) -> Result<Date> {
        self.period_end(date, Frequency::Month)
    }

    /// First date of the quarter.
    pub fn soq(&self, date: Date) -> Result<Date> {
        self.period_start(date, Frequency::Quarter)
    }

    /// Last date of the quarter.
    pub fn eoq(&self, date: Date) -> Result<Date> {
        self.period_end(date, Frequency::Quarter)
    }

    /// First date of the trimester.
    pub fn sot(&self, date: Date) -> Result<Date> {
        self.period_start(date, Frequency::Trimester)
    }

    /// Last date of the trimester.
    pub fn eot(&self, date: Date) -> Result<Date> {
        self.period_end(date, Frequency::Trimester)
    }

    /// First date of the semester.
    pub fn sos(&self, date: Date) -> Result<Date> {
        self.period_start(date, Frequency::Semester)
    }

    /// Last date of the semester.
    pub fn eos(&self, date: Date) -> Result<Date> {
        self.period_end(date, Frequency::Semester)
    }

    /// First date of the year.
    pub fn soy(&self, date: Date) -> Result<Date> {
        self.period_start(date, Frequency::Year)
    }

    /// Last date of the year.
    pub fn eoy(&self, date: Date) -> Result<Date> {
        self.period_end(date, Frequency::Year)
    }
}

fn fmt_opt(date: Option<Date>) -> String {
    date.map_or_else(|| "<empty>".to_string(), |d| d.to_string())
}

// ── Trait implementations ─────────────────────────────────────────────────────

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Calendar").field(&self.dates).finish()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => write!(f, "Calendar({a} to {b}, {} dates)", self.len()),
            _ => f.write_str("Calendar(empty)"),
        }
    }
}

impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        self.dates == other.dates
    }
}

impl Eq for Calendar {}

/// Symmetric containment: order and duplicates in `other` are irrelevant.
impl PartialEq<[Date]> for Calendar {
    fn eq(&self, other: &[Date]) -> bool {
        other.iter().all(|&d| self.contains(d)) && self.iter().all(|d| other.contains(&d))
    }
}

impl PartialEq<Vec<Date>> for Calendar {
    fn eq(&self, other: &Vec<Date>) -> bool {
        self == other.as_slice()
    }
}

impl<const N: usize> PartialEq<[Date; N]> for Calendar {
    fn eq(&self, other: &[Date; N]) -> bool {
        self == other.as_slice()
    }
}

impl FromIterator<Date> for Calendar {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Date>> for Calendar {
    fn from(dates: Vec<Date>) -> Self {
        Self::new(dates)
    }
}

impl<'a> IntoIterator for &'a Calendar {
    type Item = Date;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Date>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Calendar {
    type Item = Date;
    type IntoIter = std::vec::IntoIter<Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.into_iter()
    }
}

impl std::ops::Add<&Calendar> for &Calendar {
    type Output = Calendar;

    fn add(self, rhs: &Calendar) -> Calendar {
        self.union(rhs)
    }
}

impl std::ops::Add<Date> for &Calendar {
    type Output = Calendar;

    fn add(self, rhs: Date) -> Calendar {
        self.with_date(rhs)
    }
}

impl std::ops::Add<Date> for Calendar {
    type Output = Calendar;

    fn add(self, rhs: Date) -> Calendar {
        self.with_date(rhs)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Calendar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.dates)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Calendar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<Date>::deserialize(deserializer).map(Calendar::new)
    }
}
