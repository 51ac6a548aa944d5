//! Per-date records combining neighbours and frequency positions.
//!
//! [`Calendar::rows`] walks the calendar once and yields, for every date, the
//! requested [`Field`]s in order.  Position fields read the calendar's cached
//! [`DateMap`](crate::DateMap)s, so asking for the same frequency again on the
//! same calendar does not recompute anything.

use std::fmt;

use ds_core::errors::{Error, Result};
use ds_time::{Date, Frequency};
use tracing::debug;

use crate::calendar::Calendar;

/// A column of [`Calendar::rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// 0-based position in the calendar.
    Index,
    /// The date itself.
    Date,
    /// The preceding calendar date, if any.
    Previous,
    /// The following calendar date, if any.
    Next,
    /// 1-based position within the period (`DOW`, `DOM`, ... `DOY`).
    DayOf(Frequency),
    /// Calendar dates left until the end of the period (`DWE` ... `DYE`).
    DaysTo(Frequency),
    /// Calendar dates since the start of the period (`DWS` ... `DYS`).
    DaysFrom(Frequency),
}

/// A cell of [`Calendar::rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// Value of [`Field::Index`].
    Index(usize),
    /// Value of [`Field::Date`].
    Date(Date),
    /// Value of [`Field::Previous`] or [`Field::Next`].
    Adjacent(Option<Date>),
    /// Value of the position fields.
    Position(usize),
}

impl Value {
    /// The date carried by a `Date` or a present `Adjacent` value.
    pub fn as_date(&self) -> Option<Date> {
        match *self {
            Value::Date(d) | Value::Adjacent(Some(d)) => Some(d),
            _ => None,
        }
    }

    /// The number carried by an `Index` or `Position` value.
    pub fn as_usize(&self) -> Option<usize> {
        match *self {
            Value::Index(n) | Value::Position(n) => Some(n),
            _ => None,
        }
    }
}

/// Frequency named by the letter of a short field code.
fn frequency_letter(c: char) -> Option<Frequency> {
    match c {
        'W' => Some(Frequency::week()),
        'M' => Some(Frequency::Month),
        'Q' => Some(Frequency::Quarter),
        'T' => Some(Frequency::Trimester),
        'S' => Some(Frequency::Semester),
        'Y' => Some(Frequency::Year),
        _ => None,
    }
}

impl std::str::FromStr for Field {
    type Err = Error;

    /// Parse a field name.
    ///
    /// Besides `index`/`i`, `date`/`d`, `previous`/`p`/`-1` and
    /// `next`/`n`/`+1`, three-letter codes select a position: `DO?` for the
    /// day of the period, `D?E` for days to its end and `D?S` for days from
    /// its start, where `?` is one of `W`, `M`, `Q`, `T`, `S`, `Y`.  Week
    /// codes use the default week start.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let field = match lower.as_str() {
            "i" | "index" => Some(Field::Index),
            "d" | "date" | "today" => Some(Field::Date),
            "p" | "previous" | "-1" => Some(Field::Previous),
            "n" | "next" | "+1" => Some(Field::Next),
            _ => {
                let code: Vec<char> = lower.to_uppercase().chars().collect();
                match code.as_slice() {
                    ['D', 'O', f] => frequency_letter(*f).map(Field::DayOf),
                    ['D', f, 'E'] => frequency_letter(*f).map(Field::DaysTo),
                    ['D', f, 'S'] => frequency_letter(*f).map(Field::DaysFrom),
                    _ => None,
                }
            }
        };
        field.ok_or_else(|| Error::InvalidArgument(format!("unexpected field {s:?}")))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Index => f.write_str("index"),
            Field::Date => f.write_str("date"),
            Field::Previous => f.write_str("previous"),
            Field::Next => f.write_str("next"),
            Field::DayOf(freq) => write!(f, "dayof({freq})"),
            Field::DaysTo(freq) => write!(f, "daysto({freq})"),
            Field::DaysFrom(freq) => write!(f, "daysfrom({freq})"),
        }
    }
}

/// Resolved column: neighbours read the date slice, positions a table
/// aligned with it.
#[derive(Debug)]
enum Column {
    Index,
    Date,
    Previous,
    Next,
    Table(Vec<usize>),
}

/// Iterator returned by [`Calendar::rows`].
#[derive(Debug)]
pub struct Rows<'a> {
    dates: &'a [Date],
    columns: Vec<Column>,
    cursor: usize,
}

impl Iterator for Rows<'_> {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Vec<Value>> {
        let i = self.cursor;
        let date = *self.dates.get(i)?;
        self.cursor += 1;
        let row = self
            .columns
            .iter()
            .map(|column| match column {
                Column::Index => Value::Index(i),
                Column::Date => Value::Date(date),
                Column::Previous => Value::Adjacent(i.checked_sub(1).map(|j| self.dates[j])),
                Column::Next => Value::Adjacent(self.dates.get(i + 1).copied()),
                Column::Table(values) => Value::Position(values[i]),
            })
            .collect();
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.dates.len().saturating_sub(self.cursor);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl Calendar {
    /// One record per date holding the requested `fields`, in order.
    ///
    /// An empty field list yields `[Index, Date]` records.
    ///
    /// ```
    /// use ds_calendar::{Calendar, Field, Value};
    /// use ds_time::{Date, Frequency};
    ///
    /// let cal = Calendar::from_ymd(&[(2019, 7, 29), (2019, 8, 15), (2019, 8, 16)]).unwrap();
    /// let last: Vec<Value> = cal
    ///     .rows(&[Field::Previous, Field::DayOf(Frequency::Month)])
    ///     .last()
    ///     .unwrap();
    /// let previous = Date::from_ymd(2019, 8, 15).unwrap();
    /// assert_eq!(last, [Value::Adjacent(Some(previous)), Value::Position(2)]);
    /// ```
    pub fn rows(&self, fields: &[Field]) -> Rows<'_> {
        let fields = if fields.is_empty() {
            &[Field::Index, Field::Date][..]
        } else {
            fields
        };
        debug!(fields = fields.len(), len = self.len(), "rows");
        let columns = fields
            .iter()
            .map(|field| match *field {
                Field::Index => Column::Index,
                Field::Date => Column::Date,
                Field::Previous => Column::Previous,
                Field::Next => Column::Next,
                Field::DayOf(freq) => Column::Table(self.dayof(freq).values()),
                Field::DaysTo(freq) => Column::Table(self.daysto(freq).values()),
                Field::DaysFrom(freq) => Column::Table(self.daysfrom(freq).values()),
            })
            .collect();
        Rows {
            dates: self.dates(),
            columns,
            cursor: 0,
        }
    }

    /// [`Calendar::rows`] with fields given by name, e.g. `["d", "DOM", "DME"]`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] naming the first unrecognised field.
    pub fn rows_by_name(&self, names: &[&str]) -> Result<Rows<'_>> {
        let fields = names
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<Field>>>()?;
        Ok(self.rows(&fields))
    }
}
