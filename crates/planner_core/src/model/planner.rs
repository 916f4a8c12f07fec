//! Planner aggregate.
//!
//! # Responsibility
//! - Hold the whole user state (name, divisions, events) as one unit.
//! - Define the persisted document shape through serde.
//!
//! # Invariants
//! - The aggregate is always persisted as a whole document.
//! - Every `Event::division` should name an entry of `divisions`; deleting a
//!   division restores this by cascading to its events.

use crate::model::event::Event;
use serde::Serialize;

/// In-memory planner state and on-disk document.
///
/// Wire shape: `{"name": .., "divisions": [..], "events": [..]}`.
/// Decoding lives in `repo::planner_repo::decode_document`, which rebuilds
/// events through `Event::from_map` to report the failing position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Planner {
    /// Serialized as `name` to match the document schema.
    #[serde(rename = "name")]
    pub user_name: String,
    /// Ordered division names. Duplicates are allowed.
    pub divisions: Vec<String>,
    /// Events in insertion (storage) order.
    pub events: Vec<Event>,
}

impl Planner {
    pub fn new(user_name: impl Into<String>, divisions: Vec<String>) -> Self {
        Self {
            user_name: user_name.into(),
            divisions,
            events: Vec::new(),
        }
    }

    /// Removes every event assigned to `division`, keeping the relative order
    /// of the remaining events. Returns the number of removed events.
    pub fn remove_events_in(&mut self, division: &str) -> usize {
        let before = self.events.len();
        self.events.retain(|event| event.division != division);
        before - self.events.len()
    }
}
