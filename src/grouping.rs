use std::collections::BTreeMap;

use tracing::warn;

use crate::day_index::{is_within_trip, trip_days};
use crate::model::{ItineraryEntry, Trip};

pub type DayGroups<'a> = BTreeMap<i64, Vec<&'a ItineraryEntry>>;

#[derive(Debug, Clone, Copy, Default)]
pub struct GroupingOptions {
    /// Also emit an empty group for every trip day without entries.
    pub include_empty_days: bool,
}

/// Untimed and equal-timed entries keep their input order. Entries outside
/// the trip dates are still grouped.
pub fn group_by_day<'a>(
    entries: &'a [ItineraryEntry],
    trip: &Trip,
    options: GroupingOptions,
) -> DayGroups<'a> {
    let mut groups: DayGroups<'a> = BTreeMap::new();

    if options.include_empty_days {
        for day in trip_days(trip) {
            groups.insert(day.index, Vec::new());
        }
    }

    for entry in entries {
        if !is_within_trip(trip, entry.day_index) {
            warn!(
                trip_id = %trip.id,
                entry_id = %entry.id,
                day_index = entry.day_index,
                "itinerary entry falls outside the trip dates"
            );
        }
        groups.entry(entry.day_index).or_default().push(entry);
    }

    for day_entries in groups.values_mut() {
        sort_day(day_entries);
    }

    groups
}

pub fn sort_day(day_entries: &mut [&ItineraryEntry]) {
    day_entries.sort_by_key(|entry| entry.planned_time());
}
