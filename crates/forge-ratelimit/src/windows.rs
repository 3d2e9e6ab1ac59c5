// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! UTC rolling-window cut points.

use chrono::{Datelike, Duration, TimeZone, Utc};

fn to_datetime(epoch_ms: u64) -> chrono::DateTime<Utc> {
    Utc.timestamp_millis_opt(epoch_ms as i64).single().unwrap_or_else(Utc::now)
}

/// Start of the UTC calendar day containing `epoch_ms`, in milliseconds.
pub fn utc_midnight_ms(epoch_ms: u64) -> u64 {
    let dt = to_datetime(epoch_ms);
    let midnight = dt.date_naive().and_hms_opt(0, 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&midnight).timestamp_millis() as u64
}

/// Start of the UTC calendar week (Monday 00:00) containing `epoch_ms`.
pub fn utc_week_start_ms(epoch_ms: u64) -> u64 {
    let dt = to_datetime(epoch_ms);
    let days_since_monday = dt.weekday().num_days_from_monday();
    let week_start_date = dt.date_naive() - Duration::days(days_since_monday as i64);
    let midnight = week_start_date.and_hms_opt(0, 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&midnight).timestamp_millis() as u64
}

/// Start of the UTC calendar month containing `epoch_ms`.
pub fn utc_month_start_ms(epoch_ms: u64) -> u64 {
    let dt = to_datetime(epoch_ms);
    let first_of_month = dt
        .date_naive()
        .with_day(1)
        .unwrap_or_else(|| dt.date_naive());
    let midnight = first_of_month.and_hms_opt(0, 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&midnight).timestamp_millis() as u64
}

/// Milliseconds remaining until the next UTC midnight after `epoch_ms`.
pub fn ms_until_next_utc_midnight(epoch_ms: u64) -> u64 {
    let today_midnight = utc_midnight_ms(epoch_ms);
    let tomorrow_midnight = today_midnight + 24 * 60 * 60 * 1000;
    tomorrow_midnight.saturating_sub(epoch_ms)
}

#[cfg(test)]
#[path = "windows_tests.rs"]
mod tests;
