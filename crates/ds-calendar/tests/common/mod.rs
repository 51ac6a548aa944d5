//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use ds_calendar::Calendar;
use ds_time::Date;

pub fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// US exchange holidays falling on weekdays between the fixture bounds.
const HOLIDAYS: &[(u16, u8, u8)] = &[
    (2014, 11, 27),
    (2014, 12, 25),
    (2015, 1, 1),
    (2015, 1, 19),
    (2015, 2, 16),
    (2015, 4, 3),
    (2015, 5, 25),
    (2015, 7, 3),
    (2015, 9, 7),
    (2015, 11, 26),
    (2015, 12, 25),
    (2016, 1, 1),
    (2016, 1, 18),
    (2016, 2, 15),
    (2016, 3, 25),
    (2016, 5, 30),
    (2016, 7, 4),
    (2016, 9, 5),
    (2016, 11, 24),
    (2016, 12, 26),
    (2017, 1, 2),
    (2017, 1, 16),
    (2017, 2, 20),
    (2017, 4, 14),
    (2017, 5, 29),
    (2017, 7, 4),
    (2017, 9, 4),
    (2017, 11, 23),
    (2017, 12, 25),
    (2018, 1, 1),
    (2018, 1, 15),
    (2018, 2, 19),
    (2018, 3, 30),
    (2018, 5, 28),
    (2018, 7, 4),
    (2018, 9, 3),
    (2018, 11, 22),
    (2018, 12, 5),
    (2018, 12, 25),
    (2019, 1, 1),
    (2019, 1, 21),
    (2019, 2, 18),
    (2019, 4, 19),
    (2019, 5, 27),
    (2019, 7, 4),
    (2019, 9, 2),
];

/// US exchange business days from 2014-11-17 to 2019-11-15.
pub fn exchange_calendar() -> Calendar {
    let holidays = Calendar::from_ymd(HOLIDAYS).unwrap();
    Calendar::generate(date(2014, 11, 17), date(2019, 11, 15))
        .weekdays()
        .difference(&holidays)
}

/// Install a test subscriber so `RUST_LOG=ds_calendar=trace` shows events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
