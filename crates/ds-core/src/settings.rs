//! Global library settings.
//!
//! [`Settings`] holds the **default week start**, the weekday on which a
//! week begins when a weekly frequency is requested without an explicit
//! anchor.  It is a process-wide singleton accessed via a
//! `std::sync::OnceLock`.
//!
//! The weekday is stored as its ordinal (1 = Monday … 7 = Sunday) because
//! this crate sits below the date types.  Tests that change the value should
//! use [`ScopedWeekStart`] so the previous value is restored.

use std::sync::{Mutex, OnceLock, PoisonError};

/// Ordinal of Monday, the default first day of the week.
pub const MONDAY: u8 = 1;

/// Process-wide settings used by the dateset library.
pub struct Settings {
    week_start: Mutex<u8>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            week_start: Mutex::new(MONDAY),
        })
    }

    /// Return the ordinal (1 = Monday … 7 = Sunday) of the default first
    /// day of the week.
    pub fn week_start_ordinal(&self) -> u8 {
        *self
            .week_start
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the default first day of the week.
    ///
    /// Values outside `1..=7` are ignored and `false` is returned.
    pub fn set_week_start_ordinal(&self, ordinal: u8) -> bool {
        if !(1..=7).contains(&ordinal) {
            return false;
        }
        *self
            .week_start
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = ordinal;
        true
    }

    /// Reset the default first day of the week to Monday.
    pub fn reset_week_start(&self) {
        self.set_week_start_ordinal(MONDAY);
    }
}

/// Sets the default week start for the lifetime of the guard, restoring the
/// previous value on drop.
#[derive(Debug)]
pub struct ScopedWeekStart {
    previous: u8,
}

impl ScopedWeekStart {
    /// Install `ordinal` (1 = Monday … 7 = Sunday) as the default week start.
    ///
    /// An invalid ordinal leaves the current value untouched.
    pub fn new(ordinal: u8) -> Self {
        let settings = Settings::instance();
        let previous = settings.week_start_ordinal();
        settings.set_week_start_ordinal(ordinal);
        Self { previous }
    }
}

impl Drop for ScopedWeekStart {
    fn drop(&mut self) {
        Settings::instance().set_week_start_ordinal(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_ordinal() {
        let settings = Settings::instance();
        let before = settings.week_start_ordinal();
        assert!(!settings.set_week_start_ordinal(0));
        assert!(!settings.set_week_start_ordinal(8));
        assert_eq!(settings.week_start_ordinal(), before);
    }
}
