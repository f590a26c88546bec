use chrono::{Duration, NaiveDate};
use tracing::warn;

use crate::model::{Trip, TripDay};

/// Negative indices are accepted; `None` only past chrono's calendar range.
pub fn date_for_day(start_date: NaiveDate, day_index: i64) -> Option<NaiveDate> {
    start_date.checked_add_signed(Duration::try_days(day_index)?)
}

pub fn day_index_for_date(trip: &Trip, date: NaiveDate) -> i64 {
    (date - trip.start_date).num_days()
}

pub fn is_within_trip(trip: &Trip, day_index: i64) -> bool {
    day_index >= 0 && day_index < day_count(trip)
}

pub fn day_count(trip: &Trip) -> i64 {
    if !trip.has_valid_range() {
        return 0;
    }
    (trip.end_date - trip.start_date).num_days() + 1
}

/// Every day from start to end inclusive. An inverted range yields no days.
pub fn trip_days(trip: &Trip) -> Vec<TripDay> {
    if !trip.has_valid_range() {
        warn!(
            trip_id = %trip.id,
            start_date = %trip.start_date,
            end_date = %trip.end_date,
            "trip ends before it starts; no days produced"
        );
        return Vec::new();
    }

    trip.start_date
        .iter_days()
        .take_while(|date| *date <= trip.end_date)
        .enumerate()
        .map(|(index, date)| TripDay {
            index: index as i64,
            date,
        })
        .collect()
}

pub fn today_index(trip: &Trip, today: NaiveDate) -> Option<i64> {
    let index = day_index_for_date(trip, today);
    is_within_trip(trip, index).then_some(index)
}
