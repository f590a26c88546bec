//! An entry occupies the half-open window `[start, end)`: planned arrival on
//! its trip day, plus the stay (one hour when none is recorded).

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::model::ItineraryEntry;

pub const DEFAULT_STAY_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveState {
    Upcoming,
    Active,
    Past,
    /// No usable planned arrival; never active.
    Unscheduled,
}

impl ActiveState {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "now",
            Self::Past => "done",
            Self::Unscheduled => "unscheduled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ActiveWindow {
    pub fn state_at(&self, now: NaiveDateTime) -> ActiveState {
        if now < self.start {
            ActiveState::Upcoming
        } else if now < self.end {
            ActiveState::Active
        } else {
            ActiveState::Past
        }
    }
}

pub fn default_stay() -> Duration {
    Duration::minutes(DEFAULT_STAY_MINUTES)
}

/// The window an entry occupies on `day_date`, if it has a planned arrival.
pub fn entry_window(
    entry: &ItineraryEntry,
    day_date: NaiveDate,
    fallback_stay: Duration,
) -> Option<ActiveWindow> {
    let start = entry.planned_time().on_date(day_date)?;
    let stay = entry.stay().unwrap_or(fallback_stay);
    let end = start.checked_add_signed(stay)?;
    Some(ActiveWindow { start, end })
}

pub fn evaluate(entry: &ItineraryEntry, day_date: NaiveDate, now: NaiveDateTime) -> ActiveState {
    evaluate_with_stay(entry, day_date, now, default_stay())
}

pub fn evaluate_with_stay(
    entry: &ItineraryEntry,
    day_date: NaiveDate,
    now: NaiveDateTime,
    fallback_stay: Duration,
) -> ActiveState {
    entry_window(entry, day_date, fallback_stay)
        .map(|window| window.state_at(now))
        .unwrap_or(ActiveState::Unscheduled)
}

/// First entry of an ordered day that is active at `now`.
pub fn current_entry<'a>(
    day_entries: &[&'a ItineraryEntry],
    day_date: NaiveDate,
    now: NaiveDateTime,
    fallback_stay: Duration,
) -> Option<&'a ItineraryEntry> {
    day_entries
        .iter()
        .copied()
        .find(|entry| evaluate_with_stay(entry, day_date, now, fallback_stay).is_active())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use crate::model::ItineraryEntry;

    use super::{ActiveState, current_entry, default_stay, evaluate};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 30).unwrap()
    }

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn default_window_is_one_hour_half_open() {
        let entry = ItineraryEntry::new("a", 0, "Temple").with_planned_arrival("10:00");
        assert_eq!(evaluate(&entry, day(), at(9, 59, 59)), ActiveState::Upcoming);
        assert_eq!(evaluate(&entry, day(), at(10, 0, 0)), ActiveState::Active);
        assert_eq!(evaluate(&entry, day(), at(10, 59, 59)), ActiveState::Active);
        assert_eq!(evaluate(&entry, day(), at(11, 0, 0)), ActiveState::Past);
    }

    #[test]
    fn stay_duration_sets_window_end() {
        let entry = ItineraryEntry::new("a", 0, "Museum")
            .with_planned_arrival("13:00:00")
            .with_stay("02:30:00");
        assert!(evaluate(&entry, day(), at(15, 29, 59)).is_active());
        assert_eq!(evaluate(&entry, day(), at(15, 30, 0)), ActiveState::Past);
    }

    #[test]
    fn unreadable_stay_falls_back_to_default() {
        let entry = ItineraryEntry::new("a", 0, "Museum")
            .with_planned_arrival("13:00")
            .with_stay("a while");
        assert!(evaluate(&entry, day(), at(13, 59, 0)).is_active());
        assert_eq!(evaluate(&entry, day(), at(14, 0, 0)), ActiveState::Past);
    }

    #[test]
    fn zero_stay_is_never_active() {
        let entry = ItineraryEntry::new("a", 0, "Photo stop")
            .with_planned_arrival("10:00")
            .with_stay("00:00:00");
        assert_eq!(evaluate(&entry, day(), at(10, 0, 0)), ActiveState::Past);
    }

    #[test]
    fn missing_arrival_is_unscheduled() {
        let entry = ItineraryEntry::new("a", 0, "Somewhere");
        assert_eq!(evaluate(&entry, day(), at(10, 0, 0)), ActiveState::Unscheduled);
        let entry = entry.with_planned_arrival("whenever");
        assert_eq!(evaluate(&entry, day(), at(10, 0, 0)), ActiveState::Unscheduled);
    }

    #[test]
    fn dated_arrival_ignores_day_date() {
        let entry = ItineraryEntry::new("a", 0, "Airport").with_planned_arrival("2025-03-31T08:00:00");
        assert_eq!(evaluate(&entry, day(), at(8, 30, 0)), ActiveState::Upcoming);
        let next_morning = NaiveDate::from_ymd_opt(2025, 3, 31)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert!(evaluate(&entry, day(), next_morning).is_active());
    }

    #[test]
    fn evaluation_is_repeatable() {
        let entry = ItineraryEntry::new("a", 0, "Temple").with_planned_arrival("10:00");
        let now = at(10, 30, 0);
        assert_eq!(evaluate(&entry, day(), now), evaluate(&entry, day(), now));
    }

    #[test]
    fn current_entry_picks_first_active() {
        let breakfast = ItineraryEntry::new("breakfast", 0, "Cafe")
            .with_planned_arrival("08:00")
            .with_stay("03:00:00");
        let temple = ItineraryEntry::new("temple", 0, "Temple").with_planned_arrival("10:00");
        let day_entries = vec![&breakfast, &temple];

        let found = current_entry(&day_entries, day(), at(10, 15, 0), default_stay());
        assert_eq!(found.map(|entry| entry.id.as_str()), Some("breakfast"));

        let found = current_entry(&day_entries, day(), at(11, 15, 0), Duration::minutes(90));
        assert_eq!(found.map(|entry| entry.id.as_str()), Some("temple"));

        assert!(current_entry(&day_entries, day(), at(20, 0, 0), default_stay()).is_none());
    }
}
