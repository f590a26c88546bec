use std::error::Error;
use std::path::PathBuf;
use std::thread;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use trip_timeline::clock::{Clock, FixedClock, SystemClock};
use trip_timeline::config::{TimelineConfig, load_config, resolve_config_path, resolve_trip_path};
use trip_timeline::day_index::trip_days;
use trip_timeline::logging::init_logging;
use trip_timeline::model::TripSnapshot;
use trip_timeline::packing::{PackingFilter, PackingProgress, categorize};
use trip_timeline::report::{print_budget, print_current, print_days, print_packing, print_schedule};
use trip_timeline::storage::load_snapshot;
use trip_timeline::time_value::parse_naive_date_time;
use trip_timeline::timeline::{TimelineView, build_timeline};

#[derive(Debug, Parser)]
#[command(name = "trip-timeline", about = "Day-by-day view of a trip itinerary")]
struct Cli {
	/// Trip snapshot file (TOML, or JSON with a .json extension).
	#[arg(long)]
	trip: Option<PathBuf>,
	#[arg(long)]
	config: Option<PathBuf>,
	/// Evaluate as of this local time instead of the system clock.
	#[arg(long)]
	now: Option<String>,
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	Days,
	Schedule {
		/// Day number, starting at 1.
		#[arg(long)]
		day: Option<i64>,
	},
	Now,
	Budget,
	Packing {
		#[arg(long)]
		category: Option<String>,
		#[arg(long)]
		assigned_to: Option<String>,
		#[arg(long, conflicts_with = "unpacked")]
		packed: bool,
		#[arg(long)]
		unpacked: bool,
	},
	Watch {
		/// Stop after this many refreshes.
		#[arg(long)]
		ticks: Option<u64>,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();

	let config_path = resolve_config_path(cli.config);
	let config = load_config(config_path.as_deref())?;
	if let Err(err) = init_logging(&config.log_filter) {
		eprintln!("warning: failed to initialize logging: {err}");
	}

	let trip_path = resolve_trip_path(cli.trip)?;
	let snapshot = load_snapshot(&trip_path)?;
	info!(path = %trip_path.display(), trip_id = %snapshot.trip.id, "trip loaded");

	let clock: Box<dyn Clock> = match cli.now.as_deref() {
		Some(raw) => Box::new(FixedClock(
			parse_naive_date_time(raw).ok_or_else(|| format!("invalid --now value: {raw}"))?,
		)),
		None => Box::new(SystemClock),
	};

	match cli.command.unwrap_or(Command::Schedule { day: None }) {
		Command::Days => {
			print_days(&snapshot.trip, &trip_days(&snapshot.trip));
		}
		Command::Schedule { day } => {
			let timeline = build_timeline(
				&snapshot.trip,
				&snapshot.itineraries,
				clock.now(),
				config.default_stay(),
			);
			let only_day = day.map(|number| day_index_for_number(&timeline, number)).transpose()?;
			print_schedule(&timeline, only_day);
		}
		Command::Now => {
			let timeline = build_timeline(
				&snapshot.trip,
				&snapshot.itineraries,
				clock.now(),
				config.default_stay(),
			);
			print_current(&timeline);
		}
		Command::Budget => {
			let timeline = build_timeline(
				&snapshot.trip,
				&snapshot.itineraries,
				clock.now(),
				config.default_stay(),
			);
			print_budget(&timeline);
		}
		Command::Packing {
			category,
			assigned_to,
			packed,
			unpacked,
		} => {
			let filter = PackingFilter {
				category,
				assigned_to,
				is_packed: packed_filter(packed, unpacked),
			};
			print_packing_list(&snapshot, &filter, &config);
		}
		Command::Watch { ticks } => {
			check_watch_ticks(cli.now.is_some(), ticks)?;
			watch(&snapshot, clock.as_ref(), &config, ticks);
		}
	}

	Ok(())
}

fn day_index_for_number(timeline: &TimelineView<'_>, number: i64) -> Result<i64, String> {
	if number < 1 {
		return Err(format!("--day starts at 1, got {number}"));
	}
	let index = number - 1;
	match timeline.day(index) {
		Some(_) => Ok(index),
		None => Err(format!("day {number} is not part of this trip")),
	}
}

fn check_watch_ticks(fixed_now: bool, ticks: Option<u64>) -> Result<(), String> {
	if fixed_now && ticks.is_none() {
		return Err("watch with --now never changes; pass --ticks".to_string());
	}
	Ok(())
}

fn packed_filter(packed: bool, unpacked: bool) -> Option<bool> {
	match (packed, unpacked) {
		(true, _) => Some(true),
		(false, true) => Some(false),
		(false, false) => None,
	}
}

fn print_packing_list(snapshot: &TripSnapshot, filter: &PackingFilter, config: &TimelineConfig) {
	let label = config.uncategorized_label.as_str();
	let categories = categorize(&snapshot.packing_items, label);
	let progress = PackingProgress::of(&snapshot.packing_items);
	print_packing(&categories, filter, label, progress);
}

fn watch(snapshot: &TripSnapshot, clock: &dyn Clock, config: &TimelineConfig, ticks: Option<u64>) {
	if snapshot.itineraries.is_empty() {
		warn!(trip_id = %snapshot.trip.id, "watching a trip with no itinerary");
	}

	let mut tick = 0;
	loop {
		let timeline = build_timeline(
			&snapshot.trip,
			&snapshot.itineraries,
			clock.now(),
			config.default_stay(),
		);
		print_current(&timeline);

		tick += 1;
		if ticks.is_some_and(|limit| tick >= limit) {
			break;
		}
		thread::sleep(config.poll_interval());
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use trip_timeline::active_state::default_stay;
	use trip_timeline::model::{ItineraryEntry, Trip};
	use trip_timeline::timeline::build_timeline;

	use super::{check_watch_ticks, day_index_for_number};

	#[test]
	fn day_numbers_outside_the_timeline_are_rejected() {
		let start = NaiveDate::from_ymd_opt(2025, 3, 30).expect("valid date");
		let end = NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date");
		let trip = Trip::new("short", start, end);
		let entries = vec![ItineraryEntry::new("inari", 0, "Fushimi Inari")];
		let now = start.and_hms_opt(9, 0, 0).expect("valid time");
		let timeline = build_timeline(&trip, &entries, now, default_stay());

		assert_eq!(day_index_for_number(&timeline, 1), Ok(0));
		assert_eq!(day_index_for_number(&timeline, 2), Ok(1));
		assert!(day_index_for_number(&timeline, 0).is_err());
		assert!(day_index_for_number(&timeline, -3).is_err());
		assert!(day_index_for_number(&timeline, 3).is_err());
	}

	#[test]
	fn frozen_watch_needs_a_tick_limit() {
		assert!(check_watch_ticks(true, None).is_err());
		assert!(check_watch_ticks(true, Some(2)).is_ok());
		assert!(check_watch_ticks(false, None).is_ok());
	}
}
