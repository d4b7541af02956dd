//! Date formatting, timestamp conversion, and "time ago" humanization.
//!
//! Every function comes in two flavors: one using the local time zone, and an
//! `_in` variant taking an explicit [`TimeZone`] (used by tests and by callers
//! that render for a fixed zone).

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolsError};

/// Pattern used by [`parse_time`] when none is given.
pub const DEFAULT_PATTERN: &str = "{y}-{m}-{d} {h}:{i}:{s}";

/// Weekday names for the `{a}` placeholder, Sunday first.
const WEEKDAYS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// Formats tried, after `-` has been replaced by `/`, for date-time strings.
const DATETIME_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M"];

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(y|m|d|h|i|s|a)+\}").expect("placeholder pattern is a valid regex")
});

/// A point in time as the front-end passes it around.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeInput {
    /// An already-parsed date.
    DateTime(DateTime<Utc>),
    /// Epoch timestamp; 10 digits means seconds, anything else milliseconds.
    Number(i64),
    /// A digit string (treated as [`TimeInput::Number`]) or a date string such
    /// as `2021-08-02 10:30:00`.
    Text(String),
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(value: DateTime<Utc>) -> Self {
        TimeInput::DateTime(value)
    }
}

impl From<i64> for TimeInput {
    fn from(value: i64) -> Self {
        TimeInput::Number(value)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        TimeInput::Text(value.to_string())
    }
}

impl TimeInput {
    fn is_empty(&self) -> bool {
        match self {
            TimeInput::DateTime(_) => false,
            TimeInput::Number(n) => *n == 0,
            TimeInput::Text(s) => s.is_empty(),
        }
    }

    fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Tz>> {
        match self {
            TimeInput::DateTime(dt) => Ok(dt.with_timezone(tz)),
            TimeInput::Number(n) => from_epoch(*n, tz),
            TimeInput::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                let n = s
                    .parse::<i64>()
                    .map_err(|_| ToolsError::InvalidDate(s.clone()))?;
                from_epoch(n, tz)
            }
            TimeInput::Text(s) => parse_date_string(s, tz),
        }
    }
}

/// Interpret an epoch number: exactly 10 digits are seconds, the rest milliseconds.
fn from_epoch<Tz: TimeZone>(n: i64, tz: &Tz) -> Result<DateTime<Tz>> {
    let millis = if n.to_string().len() == 10 {
        n.checked_mul(1000)
            .ok_or_else(|| ToolsError::InvalidDate(n.to_string()))?
    } else {
        n
    };
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(tz))
        .ok_or_else(|| ToolsError::InvalidDate(n.to_string()))
}

/// Parse an RFC 3339 string, or a `YYYY-MM-DD[ HH:MM[:SS]]` string (with `-`
/// or `/` separators) in `tz`.
fn parse_date_string<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(tz));
    }

    let normalized = input.trim().replace('-', "/");
    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&normalized, "%Y/%m/%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ToolsError::InvalidDate(input.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ToolsError::InvalidDate(input.to_string()))
}

// ============================================================================
// parse_time
// ============================================================================

/// Format `time` with `pattern` in the local time zone.
///
/// See [`parse_time_in`].
pub fn parse_time(time: &TimeInput, pattern: Option<&str>) -> Result<Option<String>> {
    parse_time_in(time, pattern, &Local)
}

/// Format `time` with `pattern` in `tz`.
///
/// The pattern uses `{y}` year, `{m}` month, `{d}` day, `{h}` hour, `{i}`
/// minute, `{s}` second and `{a}` weekday. Numeric fields below 10 get a
/// leading zero, the year included (year 5 renders as `05`); negative years
/// are left as they are. Defaults to [`DEFAULT_PATTERN`].
///
/// Returns `Ok(None)` for an empty input (`0` or `""`).
pub fn parse_time_in<Tz: TimeZone>(
    time: &TimeInput,
    pattern: Option<&str>,
    tz: &Tz,
) -> Result<Option<String>> {
    if time.is_empty() {
        return Ok(None);
    }
    let date = time.resolve(tz)?;
    let pattern = pattern.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PATTERN);
    Ok(Some(format_pattern(&date, pattern)))
}

fn format_pattern<Tz: TimeZone>(date: &DateTime<Tz>, pattern: &str) -> String {
    PLACEHOLDER
        .replace_all(pattern, |caps: &Captures| {
            let value = match &caps[1] {
                "y" => i64::from(date.year()),
                "m" => i64::from(date.month()),
                "d" => i64::from(date.day()),
                "h" => i64::from(date.hour()),
                "i" => i64::from(date.minute()),
                "s" => i64::from(date.second()),
                _ => {
                    let weekday = date.weekday().num_days_from_sunday() as usize;
                    return WEEKDAYS[weekday].to_string();
                }
            };
            if (0..10).contains(&value) {
                format!("0{value}")
            } else {
                value.to_string()
            }
        })
        .into_owned()
}

// ============================================================================
// get_timestamp
// ============================================================================

/// Precision of the timestamp returned by [`get_timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPrecision {
    /// 13-digit milliseconds.
    #[default]
    Millis,
    /// 10-digit seconds.
    Seconds,
}

impl TimestampPrecision {
    /// Map a requested digit count to a precision: `10` is seconds, anything
    /// else milliseconds.
    pub fn from_length(length: u32) -> Self {
        if length == 10 {
            TimestampPrecision::Seconds
        } else {
            TimestampPrecision::Millis
        }
    }
}

/// Epoch timestamp of a date string, read in the local time zone.
pub fn get_timestamp(time: &str, precision: TimestampPrecision) -> Result<i64> {
    get_timestamp_in(time, precision, &Local)
}

/// Epoch timestamp of a date string read in `tz`.
///
/// Seconds are truncated toward zero.
pub fn get_timestamp_in<Tz: TimeZone>(
    time: &str,
    precision: TimestampPrecision,
    tz: &Tz,
) -> Result<i64> {
    let millis = parse_date_string(time, tz)?.timestamp_millis();
    Ok(match precision {
        TimestampPrecision::Millis => millis,
        TimestampPrecision::Seconds => millis / 1000,
    })
}

// ============================================================================
// time_ago
// ============================================================================

const MINUTE: i64 = 60 * 1000;
const HOUR: i64 = MINUTE * 60;
const DAY: i64 = HOUR * 24;
const WEEK: i64 = DAY * 7;
const MONTH: i64 = DAY * 30;

/// Describe how long ago `timestamp_ms` was, relative to now, in the local
/// time zone.
pub fn time_ago_now(timestamp_ms: i64) -> Option<String> {
    time_ago_in(timestamp_ms, Utc::now().timestamp_millis(), &Local)
}

/// Describe how long ago `timestamp_ms` was, relative to `now_ms`, in the
/// local time zone.
pub fn time_ago(timestamp_ms: i64, now_ms: i64) -> Option<String> {
    time_ago_in(timestamp_ms, now_ms, &Local)
}

/// Describe how long ago `timestamp_ms` was, relative to `now_ms`.
///
/// Returns `None` for timestamps in the future. Buckets are checked from the
/// largest unit down: 1-3 months (30 days each), 1-3 weeks, 1-6 days, 1-23
/// hours, 1-59 minutes, then "just now" for anything up to a minute. Gaps
/// between buckets (e.g. 59.5 minutes) and anything older fall through to the
/// calendar date `YYYY-MM-DD` in `tz`.
pub fn time_ago_in<Tz: TimeZone>(timestamp_ms: i64, now_ms: i64, tz: &Tz) -> Option<String> {
    let diff = now_ms.checked_sub(timestamp_ms)?;
    if diff < 0 {
        return None;
    }

    let ratio = |unit: i64| diff as f64 / unit as f64;
    let within = |n: f64, max: f64| (1.0..=max).contains(&n);

    let months = ratio(MONTH);
    let weeks = ratio(WEEK);
    let days = ratio(DAY);
    let hours = ratio(HOUR);
    let minutes = ratio(MINUTE);

    let text = if within(months, 3.0) {
        format!(" {}月前", months as i64)
    } else if within(weeks, 3.0) {
        format!(" {}周前", weeks as i64)
    } else if within(days, 6.0) {
        format!(" {}天前", days as i64)
    } else if within(hours, 23.0) {
        format!(" {}小时前", hours as i64)
    } else if within(minutes, 59.0) {
        format!(" {}分钟前", minutes as i64)
    } else if diff <= MINUTE {
        "刚刚".to_string()
    } else {
        let date = DateTime::from_timestamp_millis(timestamp_ms)?.with_timezone(tz);
        format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
    };
    Some(text)
}
