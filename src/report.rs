use crate::active_state::ActiveState;
use crate::budget::{BudgetSummary, CostStatus};
use crate::model::{Trip, TripDay};
use crate::move_segment::{MoveSegmentDecision, place_search_url};
use crate::packing::{PackingCategories, PackingFilter, PackingProgress};
use crate::time_value::{format_duration, humanize_duration};
use crate::timeline::{DayView, EntryView, TimelineView};

pub fn print_days(trip: &Trip, days: &[TripDay]) {
	println!("{}", trip.display_name());
	if days.is_empty() {
		println!("no trip days (end date {} is before start date {})", trip.end_date, trip.start_date);
		return;
	}

	for day in days {
		println!("day {:>2} | {}", day.index + 1, day.date.format("%Y-%m-%d %a"));
	}
}

pub fn print_schedule(timeline: &TimelineView<'_>, only_day: Option<i64>) {
	let mut printed = false;
	for day in &timeline.days {
		if only_day.is_some_and(|index| index != day.index) {
			continue;
		}
		print_day(day);
		printed = true;
	}

	if !printed {
		println!("no itinerary yet");
	}
}

pub fn print_current(timeline: &TimelineView<'_>) {
	let now = timeline.now.format("%Y-%m-%d %H:%M");
	match timeline.current_entry() {
		Some(view) => println!("{now} | now at {}", describe_entry(view)),
		None => println!("{now} | nothing scheduled right now"),
	}
}

pub fn print_budget(timeline: &TimelineView<'_>) {
	print_budget_summary(&timeline.budget);

	println!("\nby day:");
	for day in &timeline.days {
		let date = day
			.date
			.map(|date| date.format("%Y-%m-%d").to_string())
			.unwrap_or_else(|| "(no date)".to_string());
		println!("day {:>2} | {} | {}", day.index + 1, date, format_amount(day.actual_cost));
	}

	let over = timeline
		.days
		.iter()
		.flat_map(|day| day.entries.iter())
		.filter(|view| view.cost == CostStatus::Over)
		.collect::<Vec<_>>();
	if !over.is_empty() {
		println!("\nover plan:");
		for view in over {
			println!(
				"{} | planned {} | spent {}",
				view.entry.place_name,
				format_amount(view.entry.planned_budget.unwrap_or(0.0)),
				format_amount(view.entry.actual_cost.unwrap_or(0.0))
			);
		}
	}
}

pub fn print_packing(
	categories: &PackingCategories<'_>,
	filter: &PackingFilter,
	fallback_label: &str,
	progress: PackingProgress,
) {
	println!(
		"packed {}/{} ({}%)",
		progress.packed,
		progress.total,
		progress.percent()
	);

	let mut printed = false;
	for (category, items) in categories.iter() {
		let visible = items
			.iter()
			.filter(|item| filter.matches(item, fallback_label))
			.collect::<Vec<_>>();
		if visible.is_empty() {
			continue;
		}

		println!("\n{category}:");
		for item in visible {
			let mark = if item.is_packed { "x" } else { " " };
			let assignee = item.assigned_to.as_deref().unwrap_or("-");
			println!("[{mark}] {} x{} | {}", item.name, item.quantity, assignee);
		}
		printed = true;
	}

	if !printed {
		println!("no packing items match");
	}
}

fn print_budget_summary(summary: &BudgetSummary) {
	let total = summary
		.budget_total
		.map(format_amount)
		.unwrap_or_else(|| "not set".to_string());
	println!("budget    | {total}");
	println!("planned   | {}", format_amount(summary.total_planned_budget));
	println!("spent     | {}", format_amount(summary.total_actual_cost));
	let marker = if summary.is_over_budget() { " (over budget)" } else { "" };
	println!("remaining | {}{marker}", format_amount(summary.remaining_budget));
}

fn print_day(day: &DayView<'_>) {
	let date = day
		.date
		.map(|date| date.format("%Y-%m-%d %a").to_string())
		.unwrap_or_else(|| "(no date)".to_string());
	let outside = if day.within_trip { "" } else { " (outside trip dates)" };
	println!("\nday {} | {date}{outside}", day.index + 1);

	if day.entries.is_empty() {
		println!("  no stops planned");
		return;
	}

	for view in &day.entries {
		if let Some(segment) = &view.inbound {
			print_segment(segment);
		}
		println!("  {}", describe_entry(view));
		if let Some(address) = view.entry.address() {
			println!("      {address} <{}>", place_search_url(address));
		}
	}
}

fn print_segment(segment: &MoveSegmentDecision) {
	if segment.is_empty() {
		return;
	}

	let mut parts = Vec::new();
	if let Some(duration) = segment.move_duration {
		parts.push(format!("move {}", humanize_duration(duration)));
	}
	if let Some(route) = &segment.route {
		parts.push(format!("route <{}>", route.directions_url()));
	}
	println!("    | {}", parts.join(" | "));
}

fn describe_entry(view: &EntryView<'_>) -> String {
	let entry = view.entry;
	let planned = entry.planned_arrival.as_deref().unwrap_or("--:--");
	let mut line = format!("{planned} {} [{}]", entry.place_name, view.state.label());
	if let Some(stay) = entry.stay() {
		line.push_str(&format!(" stay {}", format_duration(stay)));
	}

	if let Some(actual) = entry.actual_arrival.as_deref() {
		let punctuality = view
			.punctuality
			.map(|punctuality| format!(", {}", punctuality.label()))
			.unwrap_or_default();
		line.push_str(&format!(" arrived {actual}{punctuality}"));
	}

	match view.cost {
		CostStatus::Unrecorded => {
			if let Some(planned) = entry.planned_budget {
				line.push_str(&format!(" | plan {}", format_amount(planned)));
			}
		}
		CostStatus::WithinPlan | CostStatus::Over => {
			let spent = format_amount(entry.actual_cost.unwrap_or(0.0));
			let over = if view.cost == CostStatus::Over { " over" } else { "" };
			line.push_str(&format!(" | spent {spent}{over}"));
		}
	}

	if view.state == ActiveState::Active {
		line.insert_str(0, "> ");
	}
	line
}

fn format_amount(amount: f64) -> String {
	if amount.fract() == 0.0 {
		format!("{amount:.0}")
	} else {
		format!("{amount:.2}")
	}
}
