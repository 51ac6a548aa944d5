//! Collections produced by grouping.

mod common;

use common::{date, exchange_calendar};
use ds_calendar::{Calendar, Collection, OnError};
use ds_core::Error;
use ds_time::{Frequency, Weekday};

fn four_days() -> Calendar {
    Calendar::from_ymd(&[(2019, 8, 15), (2019, 8, 16), (2019, 8, 19), (2019, 8, 20)]).unwrap()
}

#[test]
fn first_and_last_by_frequency() {
    let cal = four_days();
    let week = Frequency::Week(Weekday::Monday);
    assert_eq!(cal.resample(week).first(), [date(2019, 8, 15), date(2019, 8, 19)]);
    assert_eq!(cal.resample(Frequency::Month).first(), [date(2019, 8, 15)]);
    assert_eq!(cal.resample(Frequency::Year).last(), [date(2019, 8, 20)]);
}

#[test]
fn apply_then_combine() {
    let cal = four_days();
    let weeks = cal.resample(Frequency::Week(Weekday::Monday));
    let heads = weeks
        .apply(|c| Ok(c.slice(0isize, 1isize)), &OnError::Raise)
        .unwrap()
        .combine();
    assert_eq!(heads, [date(2019, 8, 15), date(2019, 8, 19)]);
}

#[test]
fn apply_with_failing_function() {
    let cal = exchange_calendar();
    let months = cal.resample(Frequency::Month);
    let twenty_third = |c: &Calendar| c.get(22).map(|d| Calendar::new([d]));

    assert!(matches!(
        months.apply(twenty_third, &OnError::Raise),
        Err(Error::IndexOutOfRange { .. })
    ));
    let dropped = months.apply(twenty_third, &OnError::Drop).unwrap();
    assert!(dropped.len() < months.len());
    let substituted = months.apply(twenty_third, &OnError::Last).unwrap();
    assert_eq!(substituted.len(), months.len());
    assert_eq!(substituted.combine(), months.last());
}

#[test]
fn nth_negative_and_custom() {
    let cal = exchange_calendar();
    let quarters = cal.resample(Frequency::Quarter);
    let penultimate = quarters.nth(-2, 0, &OnError::Raise).unwrap();
    assert!(penultimate.contains(date(2018, 9, 27)));

    let fallback = OnError::custom(|c| c.get(-1).map(Some));
    let sixtieth = quarters.nth(60, 1, &fallback).unwrap();
    assert_eq!(sixtieth.len(), quarters.len());
    // the first quarter of the fixture only has a few weeks
    assert_eq!(sixtieth.first(), Some(date(2014, 12, 31)));
}

#[test]
fn nth_range_extracts_leading_days() {
    let cal = exchange_calendar();
    let months = cal.resample(Frequency::Month);
    let first_three = months.nth_range(0isize, 3isize);
    assert_eq!(first_three.len(), 3 * months.len());
    assert!(first_three.contains(date(2019, 11, 5)));
    assert!(!first_three.contains(date(2019, 11, 6)));
}

#[test]
fn locate_and_slice() {
    let cal = exchange_calendar();
    let years = cal.resample(Frequency::Year);
    assert_eq!(years.len(), 6);
    assert_eq!(years.index_of(date(2016, 6, 1)), Ok(2));
    assert_eq!(
        years.get_by_date(date(2016, 6, 1)).unwrap().first(),
        Some(date(2016, 1, 4))
    );
    assert!(!years.contains(date(2016, 6, 4)));
    assert!(years.get_by_date(date(2016, 6, 4)).is_err());
    let middle = years.slice(1..=2);
    assert_eq!(middle.first(), Some(date(2015, 1, 2)));
    assert_eq!(middle.last(), Some(date(2016, 12, 30)));
    assert_eq!(years.slice(..).len(), cal.len());
}

#[test]
fn filter_and_collect() {
    let cal = exchange_calendar();
    let long_months = cal.resample(Frequency::Month).filter(|c| c.len() >= 22);
    assert!(long_months.iter().all(|c| c.len() >= 22));
    let rebuilt: Collection = long_months.clone().into_iter().collect();
    assert_eq!(rebuilt, long_months);
    assert_eq!(Collection::default().combine(), Calendar::default());
}
