pub mod active_state;
pub mod budget;
pub mod clock;
pub mod config;
pub mod day_index;
pub mod grouping;
pub mod logging;
pub mod model;
pub mod move_segment;
pub mod packing;
pub mod punctuality;
pub mod report;
pub mod storage;
pub mod time_value;
pub mod timeline;

pub use active_state::{ActiveState, ActiveWindow};
pub use budget::{BudgetSummary, CostStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TimelineConfig;
pub use grouping::{DayGroups, GroupingOptions};
pub use model::{ItineraryEntry, Trip, TripDay, TripSnapshot};
pub use move_segment::{MoveSegmentDecision, RouteLink};
pub use packing::{PackingFilter, PackingItem, PackingProgress};
pub use punctuality::Punctuality;
pub use time_value::TimeValue;
pub use timeline::{DayView, EntryView, TimelineView, build_timeline};
