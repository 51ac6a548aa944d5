//! Frequency positions of calendar dates, memoised per calendar.

use std::sync::{Arc, PoisonError};

use ds_core::errors::Result;
use ds_time::{Date, Frequency};
use tracing::{debug, trace};

use crate::calendar::Calendar;
use crate::datemap::{DateMap, DateMapKey, Position};

impl Calendar {
    /// 1-based position of every date within its `frequency` period.
    ///
    /// ```
    /// use ds_calendar::Calendar;
    /// use ds_time::{Date, Frequency};
    ///
    /// let cal = Calendar::from_ymd(&[(2019, 7, 14), (2019, 7, 29), (2019, 8, 15)]).unwrap();
    /// let pos = cal.dayof(Frequency::Month);
    /// assert_eq!(pos.get(Date::from_ymd(2019, 7, 29).unwrap()), Ok(2));
    /// ```
    pub fn dayof(&self, frequency: Frequency) -> Arc<DateMap> {
        self.dayof_with_base(frequency, 1)
    }

    /// Position of every date within its `frequency` period, the first date
    /// of each period being numbered `base`.
    pub fn dayof_with_base(&self, frequency: Frequency, base: usize) -> Arc<DateMap> {
        let key = DateMapKey {
            position: Position::DayOf,
            frequency,
            base,
        };
        self.cached(key, |dates| DateMap::day_of(dates, frequency, base))
    }

    /// Position of `date` in the whole calendar, the first date being
    /// numbered `base`.
    ///
    /// # Errors
    /// [`Error::Lookup`](ds_core::Error::Lookup) if `date` is not in the
    /// calendar.
    pub fn position(&self, date: Date, base: usize) -> Result<usize> {
        Ok(self.index(date)? + base)
    }

    /// Calendar dates since the start of the `frequency` period
    /// (0 on the first date of each period).
    pub fn daysfrom(&self, frequency: Frequency) -> Arc<DateMap> {
        self.dayof_with_base(frequency, 0)
    }

    /// Calendar dates until the end of the `frequency` period
    /// (0 on the last date of each period).
    pub fn daysto(&self, frequency: Frequency) -> Arc<DateMap> {
        let key = DateMapKey {
            position: Position::DaysTo,
            frequency,
            base: 0,
        };
        self.cached(key, |dates| DateMap::days_to(dates, frequency))
    }

    fn cached(&self, key: DateMapKey, build: impl FnOnce(&[Date]) -> DateMap) -> Arc<DateMap> {
        if let Some(map) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            trace!(%key, "datemap cache hit");
            return Arc::clone(map);
        }

        let map = Arc::new(build(self.dates()));
        debug!(
            op = ?key.position,
            frequency = %key.frequency,
            base = key.base,
            len = map.len(),
            "datemap computed"
        );
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(key).or_insert(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_time::Weekday;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sample() -> Calendar {
        Calendar::from_ymd(&[
            (2019, 7, 14),
            (2019, 7, 29),
            (2019, 8, 15),
            (2019, 8, 16),
            (2019, 8, 19),
            (2019, 8, 20),
        ])
        .unwrap()
    }

    #[test]
    fn dayof_by_frequency() {
        let cal = sample();
        let month = cal.dayof(Frequency::Month);
        assert_eq!(month.get(date(2019, 7, 14)), Ok(1));
        assert_eq!(month.get(date(2019, 7, 29)), Ok(2));
        assert_eq!(month.get(date(2019, 8, 16)), Ok(2));
        assert_eq!(cal.dayof(Frequency::Year).get(date(2019, 8, 16)), Ok(4));
        let week = cal.dayof(Frequency::Week(Weekday::Monday));
        assert_eq!(week.get(date(2019, 8, 19)), Ok(1));
        assert_eq!(week.get(date(2019, 8, 20)), Ok(2));
    }

    #[test]
    fn position_in_the_whole_calendar() {
        let cal = sample();
        assert_eq!(cal.position(date(2019, 7, 14), 1), Ok(1));
        assert_eq!(cal.position(date(2019, 8, 16), 1), Ok(4));
        assert_eq!(cal.position(date(2019, 8, 16), 0), Ok(3));
        assert!(cal.position(date(2019, 8, 17), 1).is_err());
        assert!(cal.cache.read().unwrap().is_empty());
    }

    #[test]
    fn base_shifts_every_position() {
        let cal = sample();
        let one = cal.dayof(Frequency::Quarter);
        let zero = cal.daysfrom(Frequency::Quarter);
        for (d, p) in one.iter() {
            assert_eq!(zero.get(d), Ok(p - 1));
        }
    }

    #[test]
    fn maps_are_cached_and_shared_by_clones() {
        let cal = sample();
        let a = cal.daysto(Frequency::Month);
        let b = cal.clone().daysto(Frequency::Month);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &cal.daysto(Frequency::Year)));
        assert_eq!(cal.cache.read().unwrap().len(), 2);
    }

    #[test]
    fn derived_calendars_get_their_own_cache() {
        let cal = sample();
        let before = cal.dayof(Frequency::Month);
        let tail = cal.slice(2isize, ..);
        let after = tail.dayof(Frequency::Month);
        assert_eq!(before.get(date(2019, 8, 16)), Ok(2));
        assert_eq!(after.get(date(2019, 8, 16)), Ok(2));
        assert!(after.get(date(2019, 7, 14)).is_err());
    }
}
