//! Partitioning a calendar into a [`Collection`].

use std::hash::Hash;

use ds_core::errors::Result;
use ds_time::{Date, Frequency};
use indexmap::IndexMap;
use tracing::debug_span;

use crate::calendar::Calendar;
use crate::collection::Collection;
use crate::policy::{OnError, Split};

impl Calendar {
    /// Group dates by `key`, keeping groups in order of first occurrence
    /// and dates in calendar order within each group.
    pub fn groupby<K, F>(&self, key: F) -> Collection
    where
        K: Hash + Eq,
        F: Fn(Date) -> K,
    {
        let _span = debug_span!("groupby", len = self.len()).entered();
        let mut groups: IndexMap<K, Vec<Date>> = IndexMap::new();
        for date in self {
            groups.entry(key(date)).or_default().push(date);
        }
        groups.into_values().map(Calendar::from_sorted).collect()
    }

    /// Group dates by `frequency` period.
    pub fn resample(&self, frequency: Frequency) -> Collection {
        let _span = debug_span!("resample", %frequency).entered();
        self.groupby(|d| frequency.floor(d))
    }

    /// Cut the calendar at the dates selected by a [`BD`](crate::BD).
    ///
    /// Periods where the selected day does not exist contribute no cut.
    /// With [`Split::On`] or [`Split::Starting`] each date joins the nearest
    /// cut on or before it; with [`Split::Ending`] the nearest cut on or
    /// after it.  Dates with no such cut are left out.
    pub fn split(&self, how: Split) -> Result<Collection> {
        let (selector, side) = (how.selector(), how.side());
        let _span = debug_span!("split", bd = %selector, ?side).entered();
        let cuts = selector.resolve(self, &OnError::Drop)?;
        let mut groups: IndexMap<Date, Vec<Date>> = IndexMap::new();
        for date in self {
            if let Ok(anchor) = cuts.asof(date, side) {
                groups.entry(anchor).or_default().push(date);
            }
        }
        Ok(groups.into_values().map(Calendar::from_sorted).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bd::BD;
    use ds_time::Weekday;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn four_days() -> Calendar {
        Calendar::from_ymd(&[(2019, 8, 15), (2019, 8, 16), (2019, 8, 19), (2019, 8, 20)]).unwrap()
    }

    #[test]
    fn resample_by_frequency() {
        let cal = four_days();
        let weeks = cal.resample(Frequency::Week(Weekday::Monday));
        assert_eq!(weeks.first(), [date(2019, 8, 15), date(2019, 8, 19)]);
        assert_eq!(cal.resample(Frequency::Month).first(), [date(2019, 8, 15)]);
        assert_eq!(cal.resample(Frequency::Year).last(), [date(2019, 8, 20)]);
    }

    #[test]
    fn groupby_keeps_first_occurrence_order() {
        let cal = four_days();
        let parity = cal.groupby(|d| d.day_of_month() % 2);
        assert_eq!(parity.len(), 2);
        assert_eq!(parity.get(0).unwrap(), &[date(2019, 8, 15), date(2019, 8, 19)]);
        assert_eq!(parity.get(1).unwrap(), &[date(2019, 8, 16), date(2019, 8, 20)]);
    }

    #[test]
    fn split_on_second_day_of_week() {
        // cuts fall on 08-16 and 08-20
        let cal = four_days();
        let second = BD::new(1, Frequency::Week(Weekday::Monday));

        let starting = cal.split(Split::Starting(second)).unwrap();
        assert_eq!(starting.len(), 2);
        assert_eq!(starting.get(0).unwrap(), &[date(2019, 8, 16), date(2019, 8, 19)]);
        assert_eq!(starting.get(1).unwrap(), &[date(2019, 8, 20)]);
        assert!(!starting.contains(date(2019, 8, 15)));

        let ending = cal.split(Split::Ending(second)).unwrap();
        assert_eq!(ending.get(0).unwrap(), &[date(2019, 8, 15), date(2019, 8, 16)]);
        assert_eq!(ending.combine(), cal);
    }
}
