//! Period identifiers: map a commit date to the bucket label used by
//! periodic reports, plus the date helpers shared by option handling.
//!
//! Labels are zero-padded (`2025-03-07`, `2025-W09`, `2025-03`) so that
//! lexical order matches chronological order within one unit.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, TimeRangeError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl PeriodUnit {
    pub const ALL: [PeriodUnit; 3] = [PeriodUnit::Daily, PeriodUnit::Weekly, PeriodUnit::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodUnit::Daily => "daily",
            PeriodUnit::Weekly => "weekly",
            PeriodUnit::Monthly => "monthly",
        }
    }

    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            PeriodUnit::Daily => daily_label(date),
            PeriodUnit::Weekly => week_label(date),
            PeriodUnit::Monthly => month_label(date),
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodUnit {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PeriodUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnalysisError::UnknownPeriodUnit(s.to_string()))
    }
}

/// `YYYY-MM-DD`, taken from the date's own calendar fields.
pub fn daily_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ISO-8601 week, `YYYY-Wnn`. The week's Thursday decides both the year
/// and the week number, so Dec 29-31 may land in week 01 of the next year
/// and Jan 1-3 in the last week of the previous one.
pub fn week_label(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse a commit date as printed by `git log --date=iso`
/// (`2025-12-31 12:34:56 +0900`), RFC 3339, RFC 2822, or a bare
/// `YYYY-MM-DD` (taken as midnight UTC). Returns `None` for anything else.
pub fn parse_commit_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date {s:?} (expected YYYY-MM-DD)"))
}

pub fn format_date(date: NaiveDate) -> String {
    daily_label(date)
}

/// The instant `days` whole days before `now`.
pub fn days_ago(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}

/// Reject `since > until` and any bound later than `today`.
pub fn validate_time_range(
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), TimeRangeError> {
    if let (Some(s), Some(u)) = (since, until)
        && s > u
    {
        return Err(TimeRangeError::SinceAfterUntil);
    }
    if since.is_some_and(|s| s > today) {
        return Err(TimeRangeError::SinceInFuture);
    }
    if until.is_some_and(|u| u > today) {
        return Err(TimeRangeError::UntilInFuture);
    }
    Ok(())
}

pub fn describe_time_range(
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    days: u32,
) -> String {
    match (since, until) {
        (Some(s), Some(u)) => format!("{} to {}", format_date(s), format_date(u)),
        (Some(s), None) => format!("Since {}", format_date(s)),
        (None, Some(u)) => format!("Until {}", format_date(u)),
        (None, None) => format!("Last {days} day{}", if days == 1 { "" } else { "s" }),
    }
}

/// Unix timestamp of the first second of `date` in UTC.
pub fn start_of_day(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive).timestamp())
        .unwrap_or_default()
}

/// Unix timestamp of the last second of `date` in UTC.
pub fn end_of_day(date: NaiveDate) -> i64 {
    start_of_day(date) + 86_399
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
