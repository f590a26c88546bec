// `move_duration` belongs to the later stop: travel time into it.

use chrono::Duration;
use url::form_urlencoded;

use crate::model::ItineraryEntry;

const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";
const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLink {
    pub origin: String,
    pub destination: String,
}

impl RouteLink {
    pub fn directions_url(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("api", "1")
            .append_pair("origin", &self.origin)
            .append_pair("destination", &self.destination)
            .finish();
        format!("{MAPS_DIRECTIONS_URL}?{query}")
    }
}

pub fn place_search_url(address: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("api", "1")
        .append_pair("query", address)
        .finish();
    format!("{MAPS_SEARCH_URL}?{query}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSegmentDecision {
    pub from_id: String,
    pub to_id: String,
    /// Travel time badge; only set for a readable, non-zero duration.
    pub move_duration: Option<Duration>,
    /// Route link; only set when both stops have an address.
    pub route: Option<RouteLink>,
}

impl MoveSegmentDecision {
    pub fn shows_duration_badge(&self) -> bool {
        self.move_duration.is_some()
    }

    pub fn shows_route_link(&self) -> bool {
        self.route.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.shows_duration_badge() && !self.shows_route_link()
    }
}

pub fn resolve(previous: &ItineraryEntry, next: &ItineraryEntry) -> MoveSegmentDecision {
    let move_duration = next.move_in().filter(|duration| !duration.is_zero());
    let route = match (previous.address(), next.address()) {
        (Some(origin), Some(destination)) => Some(RouteLink {
            origin: origin.to_string(),
            destination: destination.to_string(),
        }),
        _ => None,
    };

    MoveSegmentDecision {
        from_id: previous.id.clone(),
        to_id: next.id.clone(),
        move_duration,
        route,
    }
}

pub fn resolve_day(day_entries: &[&ItineraryEntry]) -> Vec<MoveSegmentDecision> {
    day_entries
        .windows(2)
        .map(|pair| resolve(pair[0], pair[1]))
        .collect()
}
