use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::active_state::{ActiveState, evaluate_with_stay};
use crate::budget::{BudgetSummary, CostStatus, cost_status, summarize, total_actual_cost};
use crate::day_index::{date_for_day, is_within_trip};
use crate::grouping::{GroupingOptions, group_by_day};
use crate::model::{ItineraryEntry, Trip};
use crate::move_segment::{MoveSegmentDecision, resolve};
use crate::punctuality::{Punctuality, arrival_punctuality};

#[derive(Debug, Clone)]
pub struct EntryView<'a> {
    pub entry: &'a ItineraryEntry,
    pub state: ActiveState,
    pub cost: CostStatus,
    pub punctuality: Option<Punctuality>,
    /// Segment from the previous stop of the same day; `None` for the first stop.
    pub inbound: Option<MoveSegmentDecision>,
}

#[derive(Debug, Clone)]
pub struct DayView<'a> {
    pub index: i64,
    pub date: Option<NaiveDate>,
    pub within_trip: bool,
    pub entries: Vec<EntryView<'a>>,
    pub actual_cost: f64,
}

#[derive(Debug, Clone)]
pub struct TimelineView<'a> {
    pub now: NaiveDateTime,
    pub days: Vec<DayView<'a>>,
    pub budget: BudgetSummary,
}

impl<'a> TimelineView<'a> {
    pub fn day(&self, index: i64) -> Option<&DayView<'a>> {
        self.days.iter().find(|day| day.index == index)
    }

    pub fn current_entry(&self) -> Option<&EntryView<'a>> {
        self.days
            .iter()
            .flat_map(|day| day.entries.iter())
            .find(|view| view.state.is_active())
    }

    pub fn stray_entries(&self) -> impl Iterator<Item = &EntryView<'a>> {
        self.days
            .iter()
            .filter(|day| !day.within_trip)
            .flat_map(|day| day.entries.iter())
    }
}

pub fn build_timeline<'a>(
    trip: &Trip,
    entries: &'a [ItineraryEntry],
    now: NaiveDateTime,
    fallback_stay: Duration,
) -> TimelineView<'a> {
    let groups = group_by_day(
        entries,
        trip,
        GroupingOptions {
            include_empty_days: true,
        },
    );

    let days = groups
        .iter()
        .map(|(day_index, day_entries)| {
            build_day(trip, *day_index, day_entries, now, fallback_stay)
        })
        .collect::<Vec<_>>();

    debug!(
        trip_id = %trip.id,
        days = days.len(),
        entries = entries.len(),
        %now,
        "timeline built"
    );

    TimelineView {
        now,
        days,
        budget: summarize(trip, entries),
    }
}

fn build_day<'a>(
    trip: &Trip,
    index: i64,
    day_entries: &[&'a ItineraryEntry],
    now: NaiveDateTime,
    fallback_stay: Duration,
) -> DayView<'a> {
    let date = date_for_day(trip.start_date, index);
    let mut views = Vec::with_capacity(day_entries.len());
    let mut previous: Option<&ItineraryEntry> = None;

    for entry in day_entries.iter().copied() {
        let state = match date {
            Some(date) => evaluate_with_stay(entry, date, now, fallback_stay),
            None => ActiveState::Unscheduled,
        };
        views.push(EntryView {
            entry,
            state,
            cost: cost_status(entry),
            punctuality: arrival_punctuality(entry),
            inbound: previous.map(|previous| resolve(previous, entry)),
        });
        previous = Some(entry);
    }

    DayView {
        index,
        date,
        within_trip: is_within_trip(trip, index),
        entries: views,
        actual_cost: total_actual_cost(day_entries.iter().copied()),
    }
}
