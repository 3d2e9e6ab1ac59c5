// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use chrono::{TimeZone, Utc};

fn ms(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> u64 {
    Utc.with_ymd_and_hms(y, m, d, hh, mm, ss).single().expect("valid datetime").timestamp_millis() as u64
}

#[test]
fn midnight_cut_truncates_time_of_day() {
    let now = ms(2026, 7, 28, 14, 30, 0);
    assert_eq!(utc_midnight_ms(now), ms(2026, 7, 28, 0, 0, 0));
}

#[test]
fn week_start_is_the_preceding_monday() {
    // 2026-07-28 is a Tuesday.
    let now = ms(2026, 7, 28, 14, 30, 0);
    assert_eq!(utc_week_start_ms(now), ms(2026, 7, 27, 0, 0, 0));
}

#[test]
fn month_start_is_the_first_of_the_month() {
    let now = ms(2026, 7, 28, 14, 30, 0);
    assert_eq!(utc_month_start_ms(now), ms(2026, 7, 1, 0, 0, 0));
}

#[test]
fn ms_until_next_midnight_counts_down_to_zero() {
    let just_before_midnight = ms(2026, 7, 28, 23, 59, 0);
    assert_eq!(ms_until_next_utc_midnight(just_before_midnight), 60_000);
}
