use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::packing::PackingItem;
use crate::time_value::{TimeValue, parse_duration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub budget_total: Option<f64>,
}

impl Trip {
    pub fn new(id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: None,
            start_date,
            end_date,
            budget_total: None,
        }
    }

    pub fn with_budget(mut self, budget_total: f64) -> Self {
        self.budget_total = Some(budget_total);
        self
    }

    pub fn has_valid_range(&self) -> bool {
        self.end_date >= self.start_date
    }

    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// One planned stop. Time and duration fields stay as the text the store
/// handed over; the accessors below interpret them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub id: String,
    #[serde(default)]
    pub trip_id: Option<String>,
    pub day_index: i64,
    #[serde(default)]
    pub order_in_day: Option<i64>,
    pub place_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub planned_arrival: Option<String>,
    #[serde(default)]
    pub actual_arrival: Option<String>,
    #[serde(default)]
    pub stay_duration: Option<String>,
    /// Travel time from the previous stop to this one.
    #[serde(default)]
    pub move_duration: Option<String>,
    #[serde(default)]
    pub planned_budget: Option<f64>,
    #[serde(default)]
    pub actual_cost: Option<f64>,
}

impl ItineraryEntry {
    pub fn new(id: impl Into<String>, day_index: i64, place_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            trip_id: None,
            day_index,
            order_in_day: None,
            place_name: place_name.into(),
            address: None,
            planned_arrival: None,
            actual_arrival: None,
            stay_duration: None,
            move_duration: None,
            planned_budget: None,
            actual_cost: None,
        }
    }

    pub fn with_planned_arrival(mut self, planned_arrival: impl Into<String>) -> Self {
        self.planned_arrival = Some(planned_arrival.into());
        self
    }

    pub fn with_actual_arrival(mut self, actual_arrival: impl Into<String>) -> Self {
        self.actual_arrival = Some(actual_arrival.into());
        self
    }

    pub fn with_stay(mut self, stay_duration: impl Into<String>) -> Self {
        self.stay_duration = Some(stay_duration.into());
        self
    }

    pub fn with_move(mut self, move_duration: impl Into<String>) -> Self {
        self.move_duration = Some(move_duration.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_costs(mut self, planned_budget: Option<f64>, actual_cost: Option<f64>) -> Self {
        self.planned_budget = planned_budget;
        self.actual_cost = actual_cost;
        self
    }

    pub fn planned_time(&self) -> TimeValue {
        TimeValue::parse(self.planned_arrival.as_deref())
    }

    pub fn actual_time(&self) -> TimeValue {
        TimeValue::parse(self.actual_arrival.as_deref())
    }

    pub fn stay(&self) -> Option<Duration> {
        parse_duration(self.stay_duration.as_deref())
    }

    pub fn move_in(&self) -> Option<Duration> {
        parse_duration(self.move_duration.as_deref())
    }

    /// The address, if it has any non-blank text.
    pub fn address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripDay {
    pub index: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSnapshot {
    pub trip: Trip,
    #[serde(default)]
    pub itineraries: Vec<ItineraryEntry>,
    #[serde(default)]
    pub packing_items: Vec<PackingItem>,
}
