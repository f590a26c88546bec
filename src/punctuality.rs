use chrono::Duration;

use crate::model::ItineraryEntry;
use crate::time_value::TimeValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuality {
    Early,
    OnTime,
    Late,
}

impl Punctuality {
    pub fn label(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::OnTime => "on time",
            Self::Late => "late",
        }
    }
}

/// Actual minus planned arrival. `None` unless both are present and of the
/// same kind.
pub fn arrival_delay(entry: &ItineraryEntry) -> Option<Duration> {
    let planned = entry.planned_time();
    let actual = entry.actual_time();
    match (planned, actual) {
        (TimeValue::TimeOfDay(planned), TimeValue::TimeOfDay(actual)) => {
            Duration::try_seconds(actual - planned)
        }
        (TimeValue::Instant(planned), TimeValue::Instant(actual)) => {
            Duration::try_milliseconds(actual - planned)
        }
        _ => None,
    }
}

pub fn arrival_punctuality(entry: &ItineraryEntry) -> Option<Punctuality> {
    let delay = arrival_delay(entry)?;
    Some(if delay > Duration::zero() {
        Punctuality::Late
    } else if delay < Duration::zero() {
        Punctuality::Early
    } else {
        Punctuality::OnTime
    })
}
