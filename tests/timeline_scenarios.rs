use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use trip_timeline::active_state::{default_stay, evaluate};
use trip_timeline::budget::{remaining_budget, total_actual_cost};
use trip_timeline::clock::{Clock, FixedClock};
use trip_timeline::day_index::trip_days;
use trip_timeline::grouping::{GroupingOptions, group_by_day};
use trip_timeline::move_segment::resolve_day;
use trip_timeline::storage::load_snapshot;
use trip_timeline::{ActiveState, ItineraryEntry, TimeValue, Trip, TripDay, build_timeline};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn at(day: NaiveDate, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, second).expect("valid time")
}

fn spring_trip() -> Trip {
    Trip::new("spring", date(2025, 3, 30), date(2025, 4, 1)).with_budget(100_000.0)
}

#[test]
fn day_zero_sorts_timed_entries_then_untimed() {
    let entries = vec![
        ItineraryEntry::new("nine", 0, "Nishiki Market").with_planned_arrival("09:00"),
        ItineraryEntry::new("untimed", 0, "Gion"),
        ItineraryEntry::new("eight", 0, "Kyoto Station").with_planned_arrival("08:00"),
    ];
    let groups = group_by_day(&entries, &spring_trip(), GroupingOptions::default());
    let order = groups[&0]
        .iter()
        .map(|entry| entry.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["eight", "nine", "untimed"]);
}

#[test]
fn untimed_entries_keep_relative_order_in_any_position() {
    let entries = vec![
        ItineraryEntry::new("first", 2, "A"),
        ItineraryEntry::new("timed", 2, "B").with_planned_arrival("18:30:00"),
        ItineraryEntry::new("second", 2, "C"),
        ItineraryEntry::new("third", 2, "D").with_planned_arrival(""),
    ];
    let groups = group_by_day(&entries, &spring_trip(), GroupingOptions::default());
    let order = groups[&2]
        .iter()
        .map(|entry| entry.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["timed", "first", "second", "third"]);
}

#[test]
fn seconds_suffix_does_not_change_time_value() {
    for (short, long) in [("00:00", "00:00:00"), ("14:05", "14:05:00"), ("23:59", "23:59:00")] {
        assert_eq!(TimeValue::from_text(short), TimeValue::from_text(long));
    }
}

#[test]
fn default_one_hour_window_boundaries() {
    let day = date(2025, 3, 30);
    let entry = ItineraryEntry::new("temple", 0, "Kinkaku-ji").with_planned_arrival("10:00");
    assert!(!evaluate(&entry, day, at(day, 9, 59, 59)).is_active());
    assert!(evaluate(&entry, day, at(day, 10, 0, 0)).is_active());
    assert!(evaluate(&entry, day, at(day, 10, 59, 59)).is_active());
    assert!(!evaluate(&entry, day, at(day, 11, 0, 0)).is_active());
}

#[test]
fn fixed_clock_makes_evaluation_repeatable() {
    let trip = spring_trip();
    let entries = vec![
        ItineraryEntry::new("castle", 1, "Nijo Castle")
            .with_planned_arrival("13:00")
            .with_stay("01:30:00"),
    ];
    let clock = FixedClock(at(date(2025, 3, 31), 14, 0, 0));

    let first = build_timeline(&trip, &entries, clock.now(), default_stay());
    let second = build_timeline(&trip, &entries, clock.now(), default_stay());
    let state = |timeline: &trip_timeline::TimelineView<'_>| {
        timeline.day(1).expect("day 1").entries[0].state
    };
    assert_eq!(state(&first), ActiveState::Active);
    assert_eq!(state(&first), state(&second));
}

#[test]
fn over_budget_remaining_is_negative() {
    let trip = spring_trip();
    let entries = vec![
        ItineraryEntry::new("ryokan", 0, "Ryokan").with_costs(Some(80_000.0), Some(90_000.0)),
        ItineraryEntry::new("kaiseki", 1, "Kaiseki dinner").with_costs(None, Some(30_000.0)),
    ];
    let spent = total_actual_cost(&entries);
    assert_eq!(spent, 120_000.0);
    assert_eq!(remaining_budget(&trip, spent), -20_000.0);
}

#[test]
fn trip_days_cross_month_boundary() {
    assert_eq!(
        trip_days(&spring_trip()),
        vec![
            TripDay { index: 0, date: date(2025, 3, 30) },
            TripDay { index: 1, date: date(2025, 3, 31) },
            TripDay { index: 2, date: date(2025, 4, 1) },
        ]
    );
}

#[test]
fn move_segments_follow_sorted_order() {
    let entries = vec![
        ItineraryEntry::new("later", 0, "Arashiyama")
            .with_planned_arrival("11:00")
            .with_address("Arashiyama")
            .with_move("00:40:00"),
        ItineraryEntry::new("earlier", 0, "Kyoto Station")
            .with_planned_arrival("10:00")
            .with_address("Kyoto Station"),
    ];
    let groups = group_by_day(&entries, &spring_trip(), GroupingOptions::default());
    let segments = resolve_day(&groups[&0]);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].from_id, "earlier");
    assert!(segments[0].shows_duration_badge());
    assert_eq!(
        segments[0].route.as_ref().map(|route| route.directions_url()),
        Some(
            "https://www.google.com/maps/dir/?api=1&origin=Kyoto+Station&destination=Arashiyama"
                .to_string()
        )
    );
}

#[test]
fn demo_snapshot_builds_a_timeline() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join("kyoto.toml");
    let snapshot = load_snapshot(&path).expect("demo snapshot should load");
    let now = at(date(2025, 3, 30), 10, 30, 0);
    let timeline = build_timeline(&snapshot.trip, &snapshot.itineraries, now, default_stay());

    assert_eq!(timeline.days.len(), 3);
    let current = timeline.current_entry().expect("inari is under way");
    assert_eq!(current.entry.id, "inari");
    assert_eq!(timeline.budget.total_actual_cost, 1_800.0);
    assert_eq!(timeline.budget.remaining_budget, 98_200.0);
}

#[test]
fn offset_arrivals_use_written_wall_clock() {
    let day = date(2025, 3, 30);
    let entry = ItineraryEntry::new("fushimi", 0, "Fushimi Inari")
        .with_planned_arrival("2025-03-30T10:00:00+09:00");
    assert_eq!(evaluate(&entry, day, at(day, 10, 30, 0)), ActiveState::Active);

    let entries = vec![
        ItineraryEntry::new("ten", 0, "Kiyomizu-dera").with_planned_arrival("2025-03-30T10:00:00+09:00"),
        ItineraryEntry::new("nine", 0, "Yasaka Shrine").with_planned_arrival("2025-03-30T09:00:00"),
    ];
    let groups = group_by_day(&entries, &spring_trip(), GroupingOptions::default());
    let order = groups[&0]
        .iter()
        .map(|entry| entry.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["nine", "ten"]);
}
