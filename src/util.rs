use crate::model::KeyGranularity;
use chrono::{DateTime, Local, NaiveDateTime};

pub fn snapshot_key(now: &NaiveDateTime, granularity: KeyGranularity) -> String {
    match granularity {
        KeyGranularity::Daily => now.format("%Y-%m-%d").to_string(),
        KeyGranularity::Minute => now.format("%Y-%m-%d %H:%M").to_string(),
    }
}

pub fn reference_date(now: &NaiveDateTime) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Local wall-clock time for an epoch-seconds rate-limit reset.
pub fn format_reset(epoch: i64) -> Option<String> {
    let at = DateTime::from_timestamp(epoch, 0)?;
    Some(at.with_timezone(&Local).format("%H:%M:%S").to_string())
}

pub fn split_users(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}
