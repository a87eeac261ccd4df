// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use chrono::{NaiveDate, TimeZone, Utc};

use crate::{ZipDateTime, ZipDateTimeBuilder};

#[test]
fn date_conversion_test_chrono() {
    let original_dt = Utc.timestamp_opt(1666544102, 0).single().expect("valid timestamp");
    let zip_dt = ZipDateTime::from_chrono(&original_dt);
    let result_dt = zip_dt.as_chrono().expect("expected a valid date");
    assert_eq!(result_dt, original_dt.naive_utc());
}

#[test]
fn date_conversion_test() {
    let year = 2000;
    let month = 9;
    let day = 8;
    let hour = 7;
    let minute = 5;
    let second = 4;

    let mut builder = ZipDateTimeBuilder::new();

    builder = builder.year(year);
    builder = builder.month(month);
    builder = builder.day(day);
    builder = builder.hour(hour);
    builder = builder.minute(minute);
    builder = builder.second(second);

    let built = builder.build();

    assert_eq!(year, built.year());
    assert_eq!(month, built.month());
    assert_eq!(day, built.day());
    assert_eq!(hour, built.hour());
    assert_eq!(minute, built.minute());
    assert_eq!(second, built.second());
}

#[test]
fn odd_seconds_are_truncated() {
    let built = ZipDateTimeBuilder::new().year(2024).month(1).day(1).second(59).build();
    assert_eq!(built.second(), 58);
}

#[test]
fn years_are_clamped() {
    assert_eq!(ZipDateTimeBuilder::new().year(1970).build().year(), 1980);
    assert_eq!(ZipDateTimeBuilder::new().year(2200).build().year(), 2107);
}

#[test]
fn raw_fields_round_trip() {
    let built = ZipDateTimeBuilder::new().year(2021).month(12).day(31).hour(23).minute(59).second(58).build();
    let raw = ZipDateTime::from_raw(built.raw_date(), built.raw_time());
    assert_eq!(raw, built);
}

#[test]
fn zeroed_date_is_not_a_calendar_date() {
    assert!(ZipDateTime::default().as_chrono().is_none());
    assert!(ZipDateTime::default().to_system_time().is_none());
}

#[test]
fn naive_conversion() {
    let naive = NaiveDate::from_ymd_opt(2023, 6, 15).and_then(|date| date.and_hms_opt(12, 30, 10)).expect("valid");
    let zip_dt = ZipDateTime::from(naive);

    assert_eq!(zip_dt.as_chrono(), Some(naive));
}
