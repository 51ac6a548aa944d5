//! `BD`: "the n-th business day of each period" selector.

use std::fmt;

use ds_core::errors::{Error, Result};
use ds_time::Frequency;
use tracing::{debug_span, trace};

use crate::calendar::Calendar;
use crate::collection::relative_position;
use crate::policy::OnError;

/// Selects the `index`-th date of every `frequency` period of a calendar.
///
/// Non-negative indices count from `base` (0 or 1); negative indices count
/// from the end of the period, `-1` being its last date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BD {
    index: isize,
    frequency: Frequency,
    base: usize,
}

impl BD {
    /// A 0-based selector.  `BD::new(0, Frequency::Month)` is the first
    /// business day of each month.
    pub fn new(index: isize, frequency: Frequency) -> Self {
        Self {
            index,
            frequency,
            base: 0,
        }
    }

    /// A selector counting non-negative indices from `base`.
    ///
    /// # Errors
    /// [`Error::Type`] if `base` is not 0 or 1, or if a non-negative
    /// `index` is below `base`.
    pub fn with_base(index: isize, frequency: Frequency, base: usize) -> Result<Self> {
        if base > 1 {
            return Err(Error::Type(format!("BD base should be 0 or 1, {base} given")));
        }
        if index >= 0 && (index as usize) < base {
            return Err(Error::Type(format!(
                "BD index {index} is invalid with base {base}"
            )));
        }
        Ok(Self {
            index,
            frequency,
            base,
        })
    }

    /// A 0-based selector from a frequency tag such as `"M"` or `"quarter"`.
    ///
    /// # Errors
    /// [`Error::Type`] if the tag is not a recognised frequency.
    pub fn from_tag(index: isize, frequency: &str) -> Result<Self> {
        let frequency = frequency
            .parse()
            .map_err(|e| Error::Type(format!("BD frequency: {e}")))?;
        Ok(Self::new(index, frequency))
    }

    /// The requested index.
    pub fn index(&self) -> isize {
        self.index
    }

    /// The period granularity.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// The base of non-negative indices.
    pub fn base(&self) -> usize {
        self.base
    }

    /// The selected date of every period of `calendar`.
    ///
    /// Periods shorter than the index are handled by `onerror`.
    pub fn resolve(&self, calendar: &Calendar, onerror: &OnError) -> Result<Calendar> {
        let _span = debug_span!("bd_resolve", bd = %self, len = calendar.len()).entered();
        let pos = relative_position(self.index, self.base)?;
        let mut cuts = Vec::new();
        for period in calendar.resample(self.frequency) {
            match period.get(pos) {
                Ok(date) => cuts.push(date),
                Err(err) => {
                    let substitute = onerror.recover(&period, err)?;
                    trace!(%period, ?substitute, "period too short");
                    cuts.extend(substitute);
                }
            }
        }
        Ok(Calendar::new(cuts))
    }
}

impl fmt::Display for BD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base == 0 {
            write!(f, "BD({}, {})", self.index, self.frequency)
        } else {
            write!(f, "BD({}, {}, base={})", self.index, self.frequency, self.base)
        }
    }
}
