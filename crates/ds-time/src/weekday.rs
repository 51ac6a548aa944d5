//! `Weekday`: day-of-week enum.

use ds_core::errors::{Error, Result};
use ds_core::settings::Settings;

/// Day of the week.
///
/// Variants are numbered 1–7 (Monday = 1, Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

const TAGS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

impl Weekday {
    /// Construct from the ordinal (1 = Monday … 7 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            7 => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// The default first day of the week, as configured in
    /// [`Settings`](ds_core::settings::Settings) (Monday unless changed).
    pub fn week_start() -> Self {
        Self::from_ordinal(Settings::instance().week_start_ordinal()).unwrap_or(Weekday::Monday)
    }

    /// Return `true` if this is Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Return `true` if this is Monday–Friday.
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// Return the ordinal (1 = Monday … 7 = Sunday).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// The following day of the week (Sunday wraps to Monday).
    pub fn succ(&self) -> Self {
        Self::from_ordinal(self.ordinal() % 7 + 1).unwrap_or(Weekday::Monday)
    }

    /// The preceding day of the week (Monday wraps to Sunday).
    pub fn pred(&self) -> Self {
        Self::from_ordinal((self.ordinal() + 5) % 7 + 1).unwrap_or(Weekday::Sunday)
    }

    /// Number of days (0–6) from `self` forward to the next `other`.
    pub fn days_until(&self, other: Weekday) -> i32 {
        (other.ordinal() as i32 - self.ordinal() as i32).rem_euclid(7)
    }

    /// Three-letter upper-case tag (`"MON"` … `"SUN"`).
    pub fn tag(&self) -> &'static str {
        TAGS[self.ordinal() as usize - 1]
    }
}

impl std::str::FromStr for Weekday {
    type Err = Error;

    /// Parse a three-letter tag (`MON` … `SUN`, case-insensitive) or a full
    /// English name.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_uppercase();
        Weekday::all()
            .into_iter()
            .find(|w| w.tag() == key || w.to_string().to_ascii_uppercase() == key)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "expected a weekday tag among {}, received {s:?}",
                    TAGS.join(",")
                ))
            })
    }
}

impl Weekday {
    /// All seven weekdays, Monday first.
    pub fn all() -> [Weekday; 7] {
        [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Weekday {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Weekday {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succ_pred_wrap() {
        assert_eq!(Weekday::Sunday.succ(), Weekday::Monday);
        assert_eq!(Weekday::Monday.pred(), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.succ(), Weekday::Thursday);
        assert_eq!(Weekday::Wednesday.pred(), Weekday::Tuesday);
    }

    #[test]
    fn days_until() {
        assert_eq!(Weekday::Monday.days_until(Weekday::Monday), 0);
        assert_eq!(Weekday::Friday.days_until(Weekday::Monday), 3);
        assert_eq!(Weekday::Monday.days_until(Weekday::Sunday), 6);
    }

    #[test]
    fn parse_tags() {
        assert_eq!("MON".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("thu".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert_eq!("Sunday".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("MOO".parse::<Weekday>().is_err());
        assert!("Monkey".parse::<Weekday>().is_err());
        for w in Weekday::all() {
            assert_eq!(w.tag().parse::<Weekday>().unwrap(), w);
        }
    }
}
