//! Parsing never fails: unreadable input becomes [`TimeValue::Absent`] (or
//! `None` for durations), which sorts after every present value.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeValue {
    /// Seconds since midnight.
    TimeOfDay(i64),
    /// Wall-clock milliseconds as written; any offset is dropped, not applied.
    Instant(i64),
    Absent,
}

impl TimeValue {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(raw) => Self::from_text(raw),
            None => Self::Absent,
        }
    }

    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Absent;
        }

        let parsed = if trimmed.contains('T') || trimmed.contains('-') {
            parse_instant_millis(trimmed).map(Self::Instant)
        } else {
            parse_clock_seconds(trimmed).map(Self::TimeOfDay)
        };

        parsed.unwrap_or_else(|| {
            debug!(value = trimmed, "unreadable time treated as absent");
            Self::Absent
        })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn same_category(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::TimeOfDay(_), Self::TimeOfDay(_)) | (Self::Instant(_), Self::Instant(_))
        )
    }

    /// Clock times land on `date`; instants keep their own date.
    pub fn on_date(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        match *self {
            Self::TimeOfDay(seconds) => {
                let midnight = date.and_hms_opt(0, 0, 0)?;
                midnight.checked_add_signed(Duration::try_seconds(seconds)?)
            }
            Self::Instant(millis) => {
                DateTime::from_timestamp_millis(millis).map(|instant| instant.naive_utc())
            }
            Self::Absent => None,
        }
    }

    fn numeric_key(&self) -> Option<i64> {
        match *self {
            Self::TimeOfDay(seconds) => Some(seconds),
            Self::Instant(millis) => Some(millis),
            Self::Absent => None,
        }
    }

    fn category_rank(&self) -> u8 {
        match self {
            Self::TimeOfDay(_) => 0,
            Self::Instant(_) => 1,
            Self::Absent => 2,
        }
    }
}

impl Ord for TimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric_key(), other.numeric_key()) {
            (Some(left), Some(right)) => left
                .cmp(&right)
                .then_with(|| self.category_rank().cmp(&other.category_rank())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for TimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn parse_naive_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Reads `"01:30:00"`, `"45:00"` or `"1 day 02:00:00"`; `None` for malformed or negative input.
pub fn parse_duration(raw: Option<&str>) -> Option<Duration> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = parse_interval(trimmed);
    if parsed.is_none() {
        debug!(value = trimmed, "unreadable duration treated as absent");
    }
    parsed
}

pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn humanize_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    match (total_minutes / 60, total_minutes % 60) {
        (0, minutes) => format!("{minutes} min"),
        (hours, 0) => format!("{hours} hr"),
        (hours, minutes) => format!("{hours} hr {minutes} min"),
    }
}

fn parse_instant_millis(raw: &str) -> Option<i64> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local().and_utc().timestamp_millis());
    }

    parse_naive_date_time(raw).map(|naive| naive.and_utc().timestamp_millis())
}

fn parse_clock_seconds(raw: &str) -> Option<i64> {
    let parts = raw.split(':').collect::<Vec<_>>();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let hours = parse_clock_part(parts[0])?;
    let minutes = parse_clock_part(parts[1])?;
    let seconds = match parts.get(2) {
        Some(part) => parse_seconds_part(part)?,
        None => 0,
    };

    if hours >= 24 || minutes >= 60 || seconds >= 60 {
        return None;
    }

    Some(hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds)
}

fn parse_clock_part(raw: &str) -> Option<i64> {
    if raw.len() > 2 {
        return None;
    }
    parse_digits(raw)
}

// Postgres `time` may carry a fraction ("10:00:00.000"); it is truncated.
fn parse_seconds_part(raw: &str) -> Option<i64> {
    match raw.split_once('.') {
        Some((whole, fraction)) => {
            parse_digits(fraction)?;
            parse_clock_part(whole)
        }
        None => parse_clock_part(raw),
    }
}

fn parse_interval(raw: &str) -> Option<Duration> {
    let tokens = raw.split_whitespace().collect::<Vec<_>>();
    let (days, clock) = match tokens.as_slice() {
        [clock] => (0, *clock),
        [days, unit] if is_day_unit(unit) => (parse_digits(days)?, "00:00"),
        [days, unit, clock] if is_day_unit(unit) => (parse_digits(days)?, *clock),
        _ => return None,
    };

    let parts = clock.split(':').collect::<Vec<_>>();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let hours = parse_digits(parts[0])?;
    let minutes = parse_digits(parts[1])?;
    let seconds = match parts.get(2) {
        Some(part) => parse_seconds_part(part)?,
        None => 0,
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    let total = days
        .checked_mul(SECONDS_PER_DAY)?
        .checked_add(hours.checked_mul(SECONDS_PER_HOUR)?)?
        .checked_add(minutes * SECONDS_PER_MINUTE + seconds)?;
    Duration::try_seconds(total)
}

fn is_day_unit(unit: &str) -> bool {
    unit == "day" || unit == "days"
}

fn parse_digits(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
