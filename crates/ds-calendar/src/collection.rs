//! `Collection`: an ordered list of sub-calendars.
//!
//! Collections come out of [`Calendar::groupby`], [`Calendar::resample`] and
//! [`Calendar::split`], and collapse back to a single calendar through
//! [`Collection::combine`] or one of the element extractors.

use std::ops::{Bound, RangeBounds};

use ds_core::errors::{Error, Result};
use ds_time::Date;
use tracing::trace;

use crate::calendar::{Calendar, SliceBound};
use crate::policy::OnError;

/// An ordered sequence of calendars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    calendars: Vec<Calendar>,
}

impl Collection {
    /// Wrap a list of calendars.
    pub fn new(calendars: Vec<Calendar>) -> Self {
        Self { calendars }
    }

    /// Number of sub-calendars.
    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    /// Whether there are no sub-calendars.
    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }

    /// The sub-calendars in order.
    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    /// Iterate the sub-calendars.
    pub fn iter(&self) -> std::slice::Iter<'_, Calendar> {
        self.calendars.iter()
    }

    /// Sub-calendar at position `i`; negative positions count from the end.
    pub fn get(&self, i: isize) -> Result<&Calendar> {
        let size = self.calendars.len();
        let pos = if i < 0 { i + size as isize } else { i };
        if pos < 0 || pos >= size as isize {
            return Err(Error::IndexOutOfRange { index: i, size });
        }
        Ok(&self.calendars[pos as usize])
    }

    // ── Element extraction ───────────────────────────────────────────────

    /// First date of every non-empty sub-calendar.
    pub fn first(&self) -> Calendar {
        Calendar::new(self.calendars.iter().filter_map(Calendar::first))
    }

    /// Last date of every non-empty sub-calendar.
    pub fn last(&self) -> Calendar {
        Calendar::new(self.calendars.iter().filter_map(Calendar::last))
    }

    /// The `index`-th date of every sub-calendar.
    ///
    /// Non-negative indices are counted from `base` (so `nth(3, 1, ..)` is
    /// the third date); negative indices count from the end regardless of
    /// `base`.  Sub-calendars too short for the index are handled by
    /// `onerror`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `index < base`; otherwise whatever
    /// `onerror` propagates.
    pub fn nth(&self, index: isize, base: usize, onerror: &OnError) -> Result<Calendar> {
        let pos = relative_position(index, base)?;
        let mut picked = Vec::with_capacity(self.len());
        for calendar in &self.calendars {
            let date = match calendar.get(pos) {
                Ok(date) => Some(date),
                Err(err) => {
                    trace!(%calendar, index, ?onerror, "element missing");
                    onerror.recover(calendar, err)?
                }
            };
            picked.extend(date);
        }
        Ok(Calendar::new(picked))
    }

    /// The dates of every sub-calendar's `[start, stop)` slice, combined.
    pub fn nth_range(&self, start: impl Into<SliceBound>, stop: impl Into<SliceBound>) -> Calendar {
        let (start, stop) = (start.into(), stop.into());
        Calendar::new(
            self.calendars
                .iter()
                .flat_map(|c| c.slice(start, stop).into_iter()),
        )
    }

    // ── Transformations ──────────────────────────────────────────────────

    /// Map every sub-calendar through `f`.
    ///
    /// When `f` fails, `onerror` decides: [`OnError::Raise`] propagates,
    /// [`OnError::Drop`] omits the sub-calendar, and the substituting
    /// policies replace it by the single date they select.
    pub fn apply<F>(&self, f: F, onerror: &OnError) -> Result<Collection>
    where
        F: Fn(&Calendar) -> Result<Calendar>,
    {
        let mut mapped = Vec::with_capacity(self.len());
        for calendar in &self.calendars {
            match f(calendar) {
                Ok(c) => mapped.push(c),
                Err(err) => {
                    if let Some(date) = onerror.recover(calendar, err)? {
                        mapped.push(Calendar::new([date]));
                    }
                }
            }
        }
        Ok(Collection::new(mapped))
    }

    /// Keep the sub-calendars for which `predicate` holds.
    pub fn filter(&self, predicate: impl Fn(&Calendar) -> bool) -> Collection {
        Collection::new(
            self.calendars
                .iter()
                .filter(|c| predicate(c))
                .cloned()
                .collect(),
        )
    }

    /// Union of every sub-calendar.
    pub fn combine(&self) -> Calendar {
        Calendar::default().union_all(&self.calendars)
    }

    // ── Locating dates ───────────────────────────────────────────────────

    /// Whether any sub-calendar contains `date`.
    pub fn contains(&self, date: Date) -> bool {
        self.calendars.iter().any(|c| c.contains(date))
    }

    /// Position of the first sub-calendar containing `date`.
    ///
    /// # Errors
    /// [`Error::Lookup`] if no sub-calendar contains `date`.
    pub fn index_of(&self, date: Date) -> Result<usize> {
        self.calendars
            .iter()
            .position(|c| c.contains(date))
            .ok_or_else(|| Error::Lookup(format!("{date} is not in any sub-calendar")))
    }

    /// The first sub-calendar containing `date`.
    pub fn get_by_date(&self, date: Date) -> Result<&Calendar> {
        self.index_of(date).map(|i| &self.calendars[i])
    }

    /// Union of the sub-calendars in `range` (clamped to the collection).
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Calendar {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len(),
        }
        .min(self.len());
        if start >= end {
            return Calendar::default();
        }
        Calendar::default().union_all(&self.calendars[start..end])
    }
}

/// Turn a possibly base-1 index into a 0-based signed position.
pub(crate) fn relative_position(index: isize, base: usize) -> Result<isize> {
    if index < 0 {
        return Ok(index);
    }
    let pos = index - base as isize;
    if pos < 0 {
        return Err(Error::InvalidArgument(format!(
            "index {index} is below the base {base}"
        )));
    }
    Ok(pos)
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Calendar;
    type IntoIter = std::slice::Iter<'a, Calendar>;

    fn into_iter(self) -> Self::IntoIter {
        self.calendars.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Calendar;
    type IntoIter = std::vec::IntoIter<Calendar>;

    fn into_iter(self) -> Self::IntoIter {
        self.calendars.into_iter()
    }
}

impl FromIterator<Calendar> for Collection {
    fn from_iter<I: IntoIterator<Item = Calendar>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sample() -> Collection {
        Collection::new(vec![
            Calendar::new([date(2019, 1, 2), date(2019, 1, 3), date(2019, 1, 4)]),
            Calendar::new([date(2019, 2, 1)]),
            Calendar::default(),
            Calendar::new([date(2019, 3, 1), date(2019, 3, 4)]),
        ])
    }

    #[test]
    fn first_and_last_skip_empty_calendars() {
        let c = sample();
        assert_eq!(c.first(), [date(2019, 1, 2), date(2019, 2, 1), date(2019, 3, 1)]);
        assert_eq!(c.last(), [date(2019, 1, 4), date(2019, 2, 1), date(2019, 3, 4)]);
    }

    #[test]
    fn nth_with_policies() {
        let c = sample();
        assert!(c.nth(1, 0, &OnError::Raise).is_err());
        assert_eq!(
            c.nth(1, 0, &OnError::Drop).unwrap(),
            [date(2019, 1, 3), date(2019, 3, 4)]
        );
        assert_eq!(
            c.nth(2, 1, &OnError::Drop).unwrap(),
            [date(2019, 1, 3), date(2019, 3, 4)]
        );
        assert_eq!(
            c.nth(1, 0, &OnError::Last).unwrap(),
            [date(2019, 1, 3), date(2019, 2, 1), date(2019, 3, 4)]
        );
        assert_eq!(
            c.nth(-1, 0, &OnError::Drop).unwrap(),
            [date(2019, 1, 4), date(2019, 2, 1), date(2019, 3, 4)]
        );
        let fixed = OnError::custom(|_| Ok(Some(date(2019, 12, 31))));
        assert_eq!(c.nth(2, 0, &fixed).unwrap().len(), 2);
        assert!(matches!(
            c.nth(0, 1, &OnError::Drop),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn nth_range_slices_each_calendar() {
        let c = sample();
        assert_eq!(
            c.nth_range(0isize, 2isize),
            [
                date(2019, 1, 2),
                date(2019, 1, 3),
                date(2019, 2, 1),
                date(2019, 3, 1),
                date(2019, 3, 4)
            ]
        );
    }

    #[test]
    fn apply_and_filter() {
        let c = sample();
        let heads = c
            .apply(|cal| cal.get(0).map(|d| Calendar::new([d])), &OnError::Drop)
            .unwrap();
        assert_eq!(heads.len(), 3);
        assert_eq!(heads.combine(), c.first());
        assert!(c.apply(|cal| cal.get(0).map(|d| Calendar::new([d])), &OnError::Raise).is_err());
        assert_eq!(c.filter(|cal| cal.len() > 1).len(), 2);
    }

    #[test]
    fn locate_dates() {
        let c = sample();
        assert!(c.contains(date(2019, 2, 1)));
        assert_eq!(c.index_of(date(2019, 3, 4)), Ok(3));
        assert!(matches!(c.index_of(date(2019, 3, 5)), Err(Error::Lookup(_))));
        assert_eq!(c.get_by_date(date(2019, 1, 3)).unwrap().len(), 3);
        assert_eq!(c.slice(0..2).len(), 4);
        assert_eq!(c.slice(1..).len(), 3);
        assert!(c.slice(4..).is_empty());
        assert_eq!(c.get(-1).unwrap().len(), 2);
    }
}
