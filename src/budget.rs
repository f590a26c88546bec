use std::collections::BTreeMap;

use crate::grouping::DayGroups;
use crate::model::{ItineraryEntry, Trip};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSummary {
    pub budget_total: Option<f64>,
    pub total_actual_cost: f64,
    pub total_planned_budget: f64,
    pub remaining_budget: f64,
}

impl BudgetSummary {
    pub fn is_over_budget(&self) -> bool {
        self.remaining_budget < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostStatus {
    /// No actual cost recorded yet.
    Unrecorded,
    WithinPlan,
    Over,
}

pub fn total_actual_cost<'a>(entries: impl IntoIterator<Item = &'a ItineraryEntry>) -> f64 {
    entries
        .into_iter()
        .map(|entry| entry.actual_cost.unwrap_or(0.0))
        .sum()
}

pub fn total_planned_budget<'a>(entries: impl IntoIterator<Item = &'a ItineraryEntry>) -> f64 {
    entries
        .into_iter()
        .map(|entry| entry.planned_budget.unwrap_or(0.0))
        .sum()
}

pub fn remaining_budget(trip: &Trip, total_actual_cost: f64) -> f64 {
    trip.budget_total.unwrap_or(0.0) - total_actual_cost
}

pub fn summarize<'a>(
    trip: &Trip,
    entries: impl IntoIterator<Item = &'a ItineraryEntry> + Clone,
) -> BudgetSummary {
    let total_actual_cost = total_actual_cost(entries.clone());
    BudgetSummary {
        budget_total: trip.budget_total,
        total_actual_cost,
        total_planned_budget: total_planned_budget(entries),
        remaining_budget: remaining_budget(trip, total_actual_cost),
    }
}

pub fn cost_status(entry: &ItineraryEntry) -> CostStatus {
    match entry.actual_cost {
        None => CostStatus::Unrecorded,
        Some(actual) if actual > entry.planned_budget.unwrap_or(0.0) => CostStatus::Over,
        Some(_) => CostStatus::WithinPlan,
    }
}

pub fn day_actual_costs(groups: &DayGroups<'_>) -> BTreeMap<i64, f64> {
    groups
        .iter()
        .map(|(day_index, day_entries)| (*day_index, total_actual_cost(day_entries.iter().copied())))
        .collect()
}
