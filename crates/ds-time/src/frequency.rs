//! `Frequency`: period granularities and their calendar-day boundaries.
//!
//! Everything here is stateless: a frequency maps a date to the first and
//! last calendar day of the period that contains it.  Calendars build their
//! business-day positions on top of these boundaries.

use crate::date::{days_in_month, serial_from_ymd, Date};
use crate::weekday::Weekday;
use ds_core::errors::{Error, Result};

/// Period granularity used to bucket dates.
///
/// `Week` carries the weekday on which its weeks *begin*; every other
/// variant is aligned on calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Every calendar day is its own period.
    Day,
    /// Seven-day weeks starting on the given weekday.
    Week(Weekday),
    /// Calendar months.
    Month,
    /// Three-month quarters (Jan, Apr, Jul, Oct).
    Quarter,
    /// Four-month thirds of the year (Jan, May, Sep).
    Trimester,
    /// Half years (Jan, Jul).
    Semester,
    /// Calendar years.
    Year,
}

impl Frequency {
    /// Weekly frequency starting on the configured default week start
    /// (see [`Settings`](ds_core::settings::Settings)).
    pub fn week() -> Self {
        Frequency::Week(Weekday::week_start())
    }

    /// Weekly frequency whose weeks end on `last`.
    pub fn week_ending(last: Weekday) -> Self {
        Frequency::Week(last.succ())
    }

    /// Number of months spanned by one period, for month-aligned variants.
    fn months(&self) -> Option<u8> {
        match self {
            Frequency::Day | Frequency::Week(_) => None,
            Frequency::Month => Some(1),
            Frequency::Quarter => Some(3),
            Frequency::Trimester => Some(4),
            Frequency::Semester => Some(6),
            Frequency::Year => Some(12),
        }
    }

    /// First calendar day of the period containing `date`.
    ///
    /// Weekly periods that would start before [`Date::MIN`] are truncated.
    pub fn floor(&self, date: Date) -> Date {
        match (self, self.months()) {
            (Frequency::Week(first), _) => {
                let back = first.days_until(date.weekday());
                Date::from_serial_clamped(date.serial() - back)
            }
            (_, Some(span)) => {
                let (y, m, _) = date.ymd();
                let m0 = (m - 1) / span * span + 1;
                Date::from_serial_clamped(serial_from_ymd(y, m0, 1))
            }
            _ => date,
        }
    }

    /// Last calendar day of the period containing `date`.
    ///
    /// Weekly periods that would end after [`Date::MAX`] are truncated.
    pub fn ceil(&self, date: Date) -> Date {
        match (self, self.months()) {
            (Frequency::Week(first), _) => {
                let ahead = date.weekday().days_until(first.pred());
                Date::from_serial_clamped(date.serial() + ahead)
            }
            (_, Some(span)) => {
                let (y, m, _) = date.ymd();
                let m1 = (m - 1) / span * span + span;
                Date::from_serial_clamped(serial_from_ymd(y, m1, days_in_month(y, m1)))
            }
            _ => date,
        }
    }

    /// Whether `a` and `b` fall in the same period.
    pub fn same_period(&self, a: Date, b: Date) -> bool {
        self.floor(a) == self.floor(b)
    }

    /// Calendar-day position of `date` within its period, counting from `base`.
    pub fn day_of(&self, date: Date, base: i32) -> i32 {
        self.days_from_start(date) + base
    }

    /// Calendar days elapsed since the start of the period.
    pub fn days_from_start(&self, date: Date) -> i32 {
        date - self.floor(date)
    }

    /// Calendar days remaining until the end of the period.
    pub fn days_to_end(&self, date: Date) -> i32 {
        self.ceil(date) - date
    }

    /// Occurrence number of `date`'s weekday within its period.
    ///
    /// With `base = 1`, the third Friday of a month gives `3`.
    pub fn weekday_of(&self, date: Date, base: i32) -> i32 {
        self.days_from_start(date) / 7 + base
    }

    /// Short tag, the inverse of [`FromStr`](std::str::FromStr).
    pub fn tag(&self) -> String {
        match self {
            Frequency::Day => "D".into(),
            Frequency::Week(first) => format!("W-{}", first.pred().tag()),
            Frequency::Month => "M".into(),
            Frequency::Quarter => "Q".into(),
            Frequency::Trimester => "T".into(),
            Frequency::Semester => "S".into(),
            Frequency::Year => "Y".into(),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = Error;

    /// Parse a frequency tag.
    ///
    /// `W-XXX` anchors weeks on their last day, so `W-SUN` is a Monday-start
    /// week and `W-FRI` a Saturday-start week.  Bare `W` uses the default
    /// week start.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_uppercase();
        let freq = match key.as_str() {
            "D" | "DAY" => Frequency::Day,
            "W" | "WEEK" => Frequency::week(),
            "M" | "MONTH" => Frequency::Month,
            "Q" | "QUARTER" => Frequency::Quarter,
            "T" | "TRIMESTER" => Frequency::Trimester,
            "H" | "S" | "SEMESTER" => Frequency::Semester,
            "Y" | "A" | "YEAR" => Frequency::Year,
            other => match other.strip_prefix("W-") {
                Some(last) => Frequency::week_ending(last.parse().map_err(|_| unknown(s))?),
                None => return Err(unknown(s)),
            },
        };
        Ok(freq)
    }
}

fn unknown(s: &str) -> Error {
    Error::InvalidArgument(format!(
        "unrecognised frequency {s:?}; expected one of D, W, W-MON..W-SUN, M, Q, T, S, Y"
    ))
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tag())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Frequency {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Frequency {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn month_aligned_boundaries() {
        let d = date(2019, 8, 16);
        assert_eq!(Frequency::Month.floor(d), date(2019, 8, 1));
        assert_eq!(Frequency::Month.ceil(d), date(2019, 8, 31));
        assert_eq!(Frequency::Quarter.floor(d), date(2019, 7, 1));
        assert_eq!(Frequency::Quarter.ceil(d), date(2019, 9, 30));
        assert_eq!(Frequency::Trimester.floor(d), date(2019, 5, 1));
        assert_eq!(Frequency::Trimester.ceil(d), date(2019, 8, 31));
        assert_eq!(Frequency::Semester.floor(d), date(2019, 7, 1));
        assert_eq!(Frequency::Semester.ceil(d), date(2019, 12, 31));
        assert_eq!(Frequency::Year.floor(d), date(2019, 1, 1));
        assert_eq!(Frequency::Year.ceil(d), date(2019, 12, 31));
        assert_eq!(Frequency::Day.floor(d), d);
        assert_eq!(Frequency::Day.ceil(d), d);
    }

    #[test]
    fn february_end_in_leap_year() {
        assert_eq!(Frequency::Month.ceil(date(2020, 2, 3)), date(2020, 2, 29));
        assert_eq!(Frequency::Quarter.ceil(date(2020, 2, 3)), date(2020, 3, 31));
    }

    #[test]
    fn week_boundaries() {
        // 2019-08-15 is a Thursday
        let d = date(2019, 8, 15);
        let monday = Frequency::Week(Weekday::Monday);
        assert_eq!(monday.floor(d), date(2019, 8, 12));
        assert_eq!(monday.ceil(d), date(2019, 8, 18));

        let sunday = Frequency::Week(Weekday::Sunday);
        assert_eq!(sunday.floor(d), date(2019, 8, 11));
        assert_eq!(sunday.ceil(d), date(2019, 8, 17));

        // a date on the first weekday is its own floor
        assert_eq!(monday.floor(date(2019, 8, 19)), date(2019, 8, 19));
        assert_eq!(monday.ceil(date(2019, 8, 18)), date(2019, 8, 18));
    }

    #[test]
    fn boundaries_clamp_at_range_edges() {
        assert_eq!(Frequency::Year.ceil(Date::MAX), Date::MAX);
        assert_eq!(Frequency::Year.floor(Date::MIN), Date::MIN);
        // 0001-01-01 is a Monday, so a Sunday-start week is truncated
        assert_eq!(Frequency::Week(Weekday::Sunday).floor(Date::MIN), Date::MIN);
        assert!(Frequency::Week(Weekday::Monday).ceil(Date::MAX) <= Date::MAX);
    }

    #[test]
    fn positions() {
        let d = date(2019, 8, 16);
        assert_eq!(Frequency::Month.day_of(d, 1), 16);
        assert_eq!(Frequency::Month.day_of(d, 0), 15);
        assert_eq!(Frequency::Month.days_from_start(d), 15);
        assert_eq!(Frequency::Month.days_to_end(d), 15);
        assert_eq!(Frequency::Year.day_of(d, 1), d.day_of_year() as i32);
    }

    #[test]
    fn third_friday() {
        // 2019-03-15 is the third Friday of March
        assert_eq!(Frequency::Month.weekday_of(date(2019, 3, 15), 1), 3);
        assert_eq!(Frequency::Month.weekday_of(date(2019, 3, 1), 1), 1);
        assert_eq!(Frequency::Month.weekday_of(date(2019, 3, 29), 0), 4);
    }

    #[test]
    fn parse_tags() {
        assert_eq!("M".parse::<Frequency>().unwrap(), Frequency::Month);
        assert_eq!("quarter".parse::<Frequency>().unwrap(), Frequency::Quarter);
        assert_eq!("h".parse::<Frequency>().unwrap(), Frequency::Semester);
        assert_eq!("A".parse::<Frequency>().unwrap(), Frequency::Year);
        assert_eq!(
            "W-SUN".parse::<Frequency>().unwrap(),
            Frequency::Week(Weekday::Monday)
        );
        assert_eq!(
            "w-fri".parse::<Frequency>().unwrap(),
            Frequency::Week(Weekday::Saturday)
        );
        assert!(matches!(
            "fortnight".parse::<Frequency>(),
            Err(Error::InvalidArgument(_))
        ));
        assert!("W-XYZ".parse::<Frequency>().is_err());
    }

    #[test]
    fn tag_round_trip() {
        for f in [
            Frequency::Day,
            Frequency::Week(Weekday::Wednesday),
            Frequency::Month,
            Frequency::Quarter,
            Frequency::Trimester,
            Frequency::Semester,
            Frequency::Year,
        ] {
            assert_eq!(f.tag().parse::<Frequency>().unwrap(), f);
        }
        assert_eq!(Frequency::Week(Weekday::Monday).to_string(), "W-SUN");
    }
}
