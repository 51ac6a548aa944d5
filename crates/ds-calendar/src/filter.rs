//! `DateFilter`: named period criteria for [`Calendar::filter_by`].
//!
//! [`Calendar::filter_by`]: crate::Calendar::filter_by

use ds_core::ensure;
use ds_core::errors::{Error, Result};
use ds_time::{Date, Weekday};

/// A conjunction of period criteria.
///
/// ```
/// use ds_calendar::DateFilter;
/// let q3_2020 = DateFilter::new().year(2020).quarter(3);
/// assert!(!q3_2020.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    year: Option<u16>,
    semester: Option<u8>,
    trimester: Option<u8>,
    quarter: Option<u8>,
    month: Option<u8>,
    week: Option<u8>,
    weekday: Option<Weekday>,
}

impl DateFilter {
    /// An empty filter.  At least one criterion must be added before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep dates of the given year.
    pub fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// Keep dates of the given semester (1–2).
    pub fn semester(mut self, semester: u8) -> Self {
        self.semester = Some(semester);
        self
    }

    /// Keep dates of the given trimester (1–3).
    pub fn trimester(mut self, trimester: u8) -> Self {
        self.trimester = Some(trimester);
        self
    }

    /// Keep dates of the given quarter (1–4).
    pub fn quarter(mut self, quarter: u8) -> Self {
        self.quarter = Some(quarter);
        self
    }

    /// Keep dates of the given month (1–12).
    pub fn month(mut self, month: u8) -> Self {
        self.month = Some(month);
        self
    }

    /// Keep dates of the given ISO week number (1–53).
    pub fn week(mut self, week: u8) -> Self {
        self.week = Some(week);
        self
    }

    /// Keep dates falling on `weekday`.
    pub fn weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = Some(weekday);
        self
    }

    /// Whether no criterion has been set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check that at least one criterion is set and every one is in range.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.is_empty(),
            InvalidArgument,
            "filter needs one of year, semester, trimester, quarter, month, week or weekday"
        );
        check("semester", self.semester, 2)?;
        check("trimester", self.trimester, 3)?;
        check("quarter", self.quarter, 4)?;
        check("month", self.month, 12)?;
        check("week", self.week, 53)?;
        Ok(())
    }

    /// Whether `date` satisfies every criterion.
    pub fn matches(&self, date: Date) -> bool {
        fn ok<T: PartialEq>(want: Option<T>, got: impl FnOnce() -> T) -> bool {
            want.map_or(true, |w| w == got())
        }
        ok(self.year, || date.year())
            && ok(self.semester, || date.semester())
            && ok(self.trimester, || date.trimester())
            && ok(self.quarter, || date.quarter())
            && ok(self.month, || date.month())
            && ok(self.week, || date.iso_week().1)
            && ok(self.weekday, || date.weekday())
    }
}

fn check(name: &str, value: Option<u8>, max: u8) -> Result<()> {
    match value {
        Some(v) if v == 0 || v > max => Err(Error::InvalidArgument(format!(
            "{name} should be in [1, {max}], {v} given"
        ))),
        _ => Ok(()),
    }
}
