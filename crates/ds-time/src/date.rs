//! `Date` type.
//!
//! Dates are represented as a serial number of days: serial 1 is
//! January 1, 1900.  Serial arithmetic makes day offsets, differences and
//! ordering trivial, and keeps `Date` a 4-byte `Copy` value suitable for the
//! sorted vectors that back a calendar.
//!
//! # Serial number convention
//! * Serial 1 = January 1, 1900 (a Monday).
//! * Earlier dates have zero or negative serials.
//! * The valid date range is 0001-01-01 to 9999-12-31 in the proleptic
//!   Gregorian calendar.

use crate::weekday::Weekday;
use ds_core::errors::{Error, Result};

/// A calendar date (no time component) represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// Minimum valid date: January 1, year 1.
    pub const MIN: Date = Date(-693_594);

    /// Maximum valid date: December 31, 9999.
    pub const MAX: Date = Date(2_958_464);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    ///
    /// Returns an error if the serial falls outside
    /// [`Date::MIN`]..=[`Date::MAX`].
    pub fn from_serial(serial: i32) -> Result<Self> {
        if serial < Self::MIN.0 || serial > Self::MAX.0 {
            return Err(Error::Date(format!(
                "serial {serial} out of range [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(Date(serial))
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1..=9999).contains(&year) {
            return Err(Error::Date(format!("year {year} out of range [1, 9999]")));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    /// Create a date from a serial known to be in range.
    pub(crate) fn from_serial_unchecked(serial: i32) -> Self {
        debug_assert!(
            (Self::MIN.0..=Self::MAX.0).contains(&serial),
            "invalid date serial {serial}"
        );
        Date(serial)
    }

    /// Create a date from a serial, saturating at [`Date::MIN`] / [`Date::MAX`].
    pub(crate) fn from_serial_clamped(serial: i32) -> Self {
        Date(serial.clamp(Self::MIN.0, Self::MAX.0))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return the year (1–9999).
    pub fn year(&self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return `(year, month, day)`.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.0)
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        let (y, m, d) = ymd_from_serial(self.0);
        let leap = u16::from(m > 2 && is_leap_year(y));
        MONTH_OFFSET[m as usize - 1] + leap + d as u16
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // serial 1 → Monday, serial 2 → Tuesday, …
        let w = ((self.0 - 1).rem_euclid(7) + 1) as u8;
        Weekday::from_ordinal(w).unwrap_or(Weekday::Monday)
    }

    /// Return `true` if the date falls on a Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        self.weekday().is_weekend()
    }

    /// Quarter of the year (1–4).
    pub fn quarter(&self) -> u8 {
        (self.month() - 1) / 3 + 1
    }

    /// Trimester (four-month third) of the year (1–3).
    pub fn trimester(&self) -> u8 {
        (self.month() - 1) / 4 + 1
    }

    /// Semester (half) of the year (1–2).
    pub fn semester(&self) -> u8 {
        (self.month() - 1) / 6 + 1
    }

    /// ISO-8601 week date: `(iso_year, week)` with `week` in 1–53.
    ///
    /// Week 1 is the week containing the year's first Thursday, so early
    /// January dates may belong to the previous ISO year and late December
    /// dates to the next.
    pub fn iso_week(&self) -> (u16, u8) {
        let year = self.year();
        let wd = self.weekday().ordinal() as i32;
        let week = (self.day_of_year() as i32 - wd + 10) / 7;
        if week < 1 {
            (year - 1, iso_weeks_in_year(year - 1))
        } else if week > iso_weeks_in_year(year) as i32 {
            (year + 1, 1)
        } else {
            (year, week as u8)
        }
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        self.0
            .checked_add(n)
            .and_then(|serial| Self::from_serial(serial).ok())
            .ok_or_else(|| Error::Date(format!("{self} + {n} day(s) is out of range")))
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the first day of the month containing this date.
    pub fn start_of_month(self) -> Self {
        let (y, m, _) = ymd_from_serial(self.0);
        Date(serial_from_ymd(y, m, 1))
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = ymd_from_serial(self.0);
        Date(serial_from_ymd(y, m, days_in_month(y, m)))
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }

    /// Return the *n*-th occurrence of `weekday` in the month of `year`/`month`.
    ///
    /// For example, `nth_weekday(3, Weekday::Friday, 2019, 3)` returns the
    /// third Friday of March 2019 (2019-03-15).
    ///
    /// # Errors
    /// Returns an error if `n` is zero or larger than the number of such
    /// weekdays in the month, or if the month itself is invalid.
    pub fn nth_weekday(n: u8, weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        if n == 0 {
            return Err(Error::Date("nth_weekday: n must be >= 1".into()));
        }
        let first = Date::from_ymd(year, month, 1)?;
        let skip = first.weekday().days_until(weekday) as u8;
        let day = 1 + skip + 7 * (n - 1);
        if day > days_in_month(year, month) {
            return Err(Error::Date(format!(
                "nth_weekday: {n}-th {weekday} does not exist in {year}-{month:02}"
            )));
        }
        Date::from_ymd(year, month, day)
    }

    /// Iterate every calendar day in `[start, end]` (empty if `start > end`).
    pub fn range_inclusive(start: Date, end: Date) -> impl Iterator<Item = Date> {
        (start.0..=end.0).map(Date::from_serial_unchecked)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

/// # Panics
/// Panics if the result falls outside the supported date range; use
/// [`Date::add_days`] for a checked shift.
impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

/// # Panics
/// Panics if the result falls outside the supported date range.
impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

// ── Interop ───────────────────────────────────────────────────────────────────

impl TryFrom<(u16, u8, u8)> for Date {
    type Error = Error;

    fn try_from((y, m, d): (u16, u8, u8)) -> Result<Self> {
        Date::from_ymd(y, m, d)
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::NaiveDate> for Date {
    type Error = Error;

    fn try_from(value: chrono::NaiveDate) -> Result<Self> {
        use chrono::Datelike;
        let year = u16::try_from(value.year())
            .map_err(|_| Error::Date(format!("year {} out of range [1, 9999]", value.year())))?;
        Date::from_ymd(year, value.month() as u8, value.day() as u8)
    }
}

#[cfg(feature = "chrono")]
impl From<Date> for chrono::NaiveDate {
    fn from(value: Date) -> Self {
        let (y, m, d) = value.ymd();
        chrono::NaiveDate::from_ymd_opt(y as i32, m as u32, d as u32)
            .unwrap_or(chrono::NaiveDate::MIN)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        from_iso(&s).map_err(serde::de::Error::custom)
    }
}

/// Read a strict `YYYY-MM-DD` string.
#[cfg(feature = "serde")]
fn from_iso(s: &str) -> Result<Date> {
    let invalid = || Error::Date(format!("expected a YYYY-MM-DD date, received {s:?}"));
    let mut parts = s.splitn(3, '-');
    let mut next = || parts.next().ok_or_else(invalid);
    let y = next()?.parse::<u16>().map_err(|_| invalid())?;
    let m = next()?.parse::<u8>().map_err(|_| invalid())?;
    let d = next()?.parse::<u8>().map_err(|_| invalid())?;
    Date::from_ymd(y, m, d)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    }
}

/// Number of ISO weeks (52 or 53) in an ISO year.
fn iso_weeks_in_year(year: u16) -> u8 {
    let p = |y: i32| (y + y / 4 - y / 100 + y / 400).rem_euclid(7);
    let y = year as i32;
    if p(y) == 4 || p(y - 1) == 3 {
        53
    } else {
        52
    }
}

/// Days between 1970-01-01 and 1899-12-31 (serial 0).
const UNIX_SHIFT: i32 = 25_568;

/// Days from 0000-03-01 to 1970-01-01.
const CIVIL_SHIFT: i32 = 719_468;

/// Days in a 400-year Gregorian era.
const ERA_DAYS: i32 = 146_097;

/// Convert (year, month, day) to a serial number.
///
/// Serial 1 = 1900-01-01.  Years are counted from March so that the leap
/// day falls at the end of each computational year.
pub(crate) fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let m = month as i32;
    let y = year as i32 - i32::from(m <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doy = (153 * ((m + 9) % 12) + 2) / 5 + day as i32 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * ERA_DAYS + doe - CIVIL_SHIFT + UNIX_SHIFT
}

/// Decompose a serial number into (year, month, day).
fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let z = serial - UNIX_SHIFT + CIVIL_SHIFT;
    let era = z.div_euclid(ERA_DAYS);
    let doe = z - era * ERA_DAYS;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i32::from(m <= 2);
    (y as u16, m as u8, d as u8)
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn epoch_and_bounds() {
        assert_eq!(date(1900, 1, 1).serial(), 1);
        assert_eq!(date(1899, 12, 31).serial(), 0);
        assert_eq!(date(1, 1, 1), Date::MIN);
        assert_eq!(date(9999, 12, 31), Date::MAX);
        assert_eq!(Date::MAX.ymd(), (9999, 12, 31));
        assert_eq!(Date::MIN.ymd(), (1, 1, 1));
        assert!(Date::from_serial(Date::MIN.serial() - 1).is_err());
        assert!(Date::from_serial(Date::MAX.serial() + 1).is_err());
        assert!(Date::from_ymd(0, 12, 31).is_err());
        assert!(Date::from_ymd(10_000, 1, 1).is_err());
    }

    #[test]
    fn serials_match_day_counts() {
        // 1900 is not a leap year, 2000 is
        assert_eq!(date(1901, 1, 1).serial(), 366);
        assert_eq!(date(2000, 3, 1) - date(2000, 2, 28), 2);
        assert_eq!(date(1900, 3, 1) - date(1900, 2, 28), 1);
        assert_eq!(date(2199, 12, 31) - date(2199, 12, 30), 1);
        assert_eq!(date(2200, 1, 1) - date(2199, 12, 31), 1);
        assert_eq!(date(1899, 12, 31).weekday(), Weekday::Sunday);
        assert_eq!(Date::MIN.weekday(), Weekday::Monday);
        assert_eq!(Date::MAX.weekday(), Weekday::Friday);
        assert_eq!(date(9999, 12, 31).day_of_year(), 365);
        assert_eq!(date(2024, 12, 31).day_of_year(), 366);
    }

    #[test]
    fn ymd_roundtrip_on_edges() {
        for (y, m, d) in [
            (1900, 12, 31),
            (2000, 2, 29),
            (2100, 2, 28),
            (2019, 8, 15),
            (2199, 12, 31),
            (1, 1, 1),
            (1582, 10, 10),
            (1600, 2, 29),
            (1899, 3, 1),
            (9999, 12, 31),
        ] {
            assert_eq!(date(y, m, d).ymd(), (y, m, d), "{y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn invalid_triples() {
        assert!(Date::from_ymd(2019, 2, 29).is_err());
        assert!(Date::from_ymd(2019, 13, 1).is_err());
        assert!(Date::from_ymd(2019, 4, 31).is_err());
        assert!(Date::from_ymd(1900, 2, 29).is_err());
    }

    #[test]
    fn weekday() {
        assert_eq!(date(2019, 8, 19).weekday(), Weekday::Monday);
        assert_eq!(date(2019, 10, 19).weekday(), Weekday::Saturday);
        assert!(date(2019, 10, 20).is_weekend());
    }

    #[test]
    fn period_indices() {
        let d = date(2020, 5, 10);
        assert_eq!(d.quarter(), 2);
        assert_eq!(d.trimester(), 2);
        assert_eq!(d.semester(), 1);
        assert_eq!(date(2020, 9, 10).trimester(), 3);
        assert_eq!(date(2020, 7, 1).semester(), 2);
    }

    #[test]
    fn iso_week_across_year_ends() {
        assert_eq!(date(2019, 8, 15).iso_week(), (2019, 33));
        // 2021-01-01 is a Friday in the last ISO week of 2020 (which has 53 weeks)
        assert_eq!(date(2021, 1, 1).iso_week(), (2020, 53));
        // 2019-12-30 is a Monday in week 1 of 2020
        assert_eq!(date(2019, 12, 30).iso_week(), (2020, 1));
    }

    #[test]
    fn month_boundaries() {
        let d = date(2024, 2, 15);
        assert_eq!(d.start_of_month(), date(2024, 2, 1));
        assert_eq!(d.end_of_month(), date(2024, 2, 29));
        assert!(date(2023, 2, 28).is_end_of_month());
    }

    #[test]
    fn arithmetic() {
        let d = date(2023, 1, 1);
        assert_eq!(d + 31, date(2023, 2, 1));
        assert_eq!(date(2023, 2, 1) - d, 31);
        assert!(Date::MAX.add_days(1).is_err());
        assert!(Date::MIN.add_days(-1).is_err());
        assert!(Date::MAX.add_days(i32::MAX).is_err());
    }

    #[test]
    fn nth_weekday() {
        assert_eq!(
            Date::nth_weekday(3, Weekday::Friday, 2019, 3).unwrap(),
            date(2019, 3, 15)
        );
        assert!(Date::nth_weekday(5, Weekday::Wednesday, 2024, 2).is_err());
        assert!(Date::nth_weekday(0, Weekday::Monday, 2024, 1).is_err());
    }

    #[test]
    fn display_is_iso() {
        assert_eq!(date(2019, 8, 5).to_string(), "2019-08-05");
        assert_eq!(format!("{:?}", date(2019, 8, 5)), "Date(2019-08-05)");
    }

    #[test]
    fn range_inclusive() {
        let days: Vec<_> = Date::range_inclusive(date(2021, 12, 30), date(2022, 1, 2)).collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[3], date(2022, 1, 2));
        assert_eq!(Date::range_inclusive(date(2022, 1, 2), date(2022, 1, 1)).count(), 0);
    }
}
