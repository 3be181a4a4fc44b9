//! Lenient ISO-8601-like timestamp parsing.
//!
//! The input is split on every run of non-digit characters and the tokens are
//! read positionally as `year, month, day, hour, minute, second, millisecond`.
//! Any separator works, so `2023-06-15T10:30:00.000Z`, `2023/06/15 10:30:00.000`
//! and `2023.06.15-10h30m00s000` all describe the same instant.
//!
//! Construction follows UTC calendar rules with roll-over: components outside
//! their usual range carry into the next larger unit instead of being rejected.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^0-9]+").expect("static pattern is valid"));

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// What to do when the input carries fewer than seven components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingFields {
    /// Any absent component makes the whole instant invalid.
    #[default]
    Reject,
    /// Year and month are required; a missing day is the 1st and missing
    /// time-of-day fields are zero.
    StartOfPeriod,
}

/// Positional components as read from the input. `month` is 1-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TimestampParts {
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub day: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub second: Option<i64>,
    pub millisecond: Option<i64>,
}

/// Split `s` on every maximal run of non-digit characters.
///
/// Leading or trailing separators produce empty tokens at that end, so the
/// position of every numeric token is preserved.
pub fn split_numeric_tokens(s: &str) -> Vec<&str> {
    NON_DIGITS.split(s).collect()
}

fn coerce_token(token: &str) -> Option<i64> {
    if token.is_empty() {
        return Some(0);
    }
    token.parse::<i64>().ok()
}

impl TimestampParts {
    /// Map tokens onto components by position. Tokens past the seventh are
    /// ignored; an empty token reads as zero and a token too large for `i64`
    /// leaves its field absent.
    pub fn from_tokens(tokens: &[&str]) -> Self {
        let field = |idx: usize| tokens.get(idx).and_then(|t| coerce_token(t));
        Self {
            year: field(0),
            month: field(1),
            day: field(2),
            hour: field(3),
            minute: field(4),
            second: field(5),
            millisecond: field(6),
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::from_tokens(&split_numeric_tokens(s))
    }

    /// Build the UTC instant, or `None` when the components do not describe
    /// a representable one.
    pub fn to_instant(&self, policy: MissingFields) -> Option<DateTime<Utc>> {
        let (day, hour, minute, second, millisecond) = match policy {
            MissingFields::Reject => (
                self.day?,
                self.hour?,
                self.minute?,
                self.second?,
                self.millisecond?,
            ),
            MissingFields::StartOfPeriod => (
                self.day.unwrap_or(1),
                self.hour.unwrap_or(0),
                self.minute.unwrap_or(0),
                self.second.unwrap_or(0),
                self.millisecond.unwrap_or(0),
            ),
        };
        let year = full_year(self.year?);
        // 1-based on input, 0-based from here on
        let month_index = self.month?.checked_sub(1)?;

        let days = make_day(year, month_index, day)?;
        let time = make_time(hour, minute, second, millisecond)?;
        let millis = days.checked_mul(MS_PER_DAY)?.checked_add(time)?;
        DateTime::from_timestamp_millis(millis)
    }
}

/// Two-digit years name the twentieth century.
fn full_year(year: i64) -> i64 {
    if (0..=99).contains(&year) {
        1900 + year
    } else {
        year
    }
}

/// Days since the Unix epoch for `year`, 0-based `month_index` and `day`,
/// carrying overflowing months into years and overflowing days into months.
fn make_day(year: i64, month_index: i64, day: i64) -> Option<i64> {
    let year = year.checked_add(month_index.div_euclid(12))?;
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    let days_to_first = first
        .signed_duration_since(DateTime::<Utc>::UNIX_EPOCH.date_naive())
        .num_days();
    days_to_first.checked_add(day)?.checked_sub(1)
}

fn make_time(hour: i64, minute: i64, second: i64, millisecond: i64) -> Option<i64> {
    hour.checked_mul(MS_PER_HOUR)?
        .checked_add(minute.checked_mul(MS_PER_MINUTE)?)?
        .checked_add(second.checked_mul(MS_PER_SECOND)?)?
        .checked_add(millisecond)
}

/// Parse an ISO-8601-like string into a UTC instant.
///
/// All seven components must be present; `None` is the invalid instant.
/// This never panics and never logs.
///
/// Years are limited to chrono's range (about ±262000). Instants beyond it, up to
/// the ±275760 years a JavaScript `Date` holds, are reported as invalid.
pub fn parse_iso_string(s: &str) -> Option<DateTime<Utc>> {
    parse_iso_string_with(s, MissingFields::Reject)
}

pub fn parse_iso_string_with(s: &str, policy: MissingFields) -> Option<DateTime<Utc>> {
    TimestampParts::parse(s).to_instant(policy)
}
