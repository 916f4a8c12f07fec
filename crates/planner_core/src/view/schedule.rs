//! Read-only schedule projections.
//!
//! # Responsibility
//! - Produce the chronological whole-schedule view.
//! - Produce per-division sections in chronological or alphabetical order.
//! - Render both views to the plain text lines shown by front ends.
//!
//! # Invariants
//! - Sorting is stable: ties keep storage order.
//! - Every division yields a section, even without events.
//! - Each entry keeps its storage position so callers can act on a
//!   displayed row without index drift.

use crate::model::event::Event;
use std::error::Error;
use std::fmt::{Display, Formatter, Write};

/// Invalid view selector input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    InvalidOption(String),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOption(_) => write!(f, "Invalid option."),
        }
    }
}

impl Error for ViewError {}

/// Ordering used inside each division section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOrder {
    /// By `(date, time)` ascending.
    Chronological,
    /// By name, case-insensitive ascending.
    Alphabetical,
}

impl SectionOrder {
    /// Parses the menu choice `1` (chronological) or `2` (alphabetical).
    pub fn from_choice(choice: &str) -> Result<Self, ViewError> {
        match choice.trim() {
            "1" => Ok(Self::Chronological),
            "2" => Ok(Self::Alphabetical),
            other => Err(ViewError::InvalidOption(other.to_string())),
        }
    }
}

/// Which schedule projection to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    WholeSchedule,
    BySection(SectionOrder),
}

impl ViewMode {
    /// Parses the view choice (`1` whole schedule, `2` by section) together
    /// with the section order choice, which is only consulted for `2`.
    ///
    /// Both selectors are validated before any view is built.
    pub fn from_choice(view: &str, order: Option<&str>) -> Result<Self, ViewError> {
        match view.trim() {
            "1" => Ok(Self::WholeSchedule),
            "2" => {
                let order = order.ok_or_else(|| ViewError::InvalidOption(String::new()))?;
                Ok(Self::BySection(SectionOrder::from_choice(order)?))
            }
            other => Err(ViewError::InvalidOption(other.to_string())),
        }
    }
}

/// One displayed event plus its 0-based position in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry<'a> {
    pub position: usize,
    pub event: &'a Event,
}

/// Events of one division in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionSection<'a> {
    pub division: &'a str,
    pub entries: Vec<ScheduleEntry<'a>>,
}

/// All events sorted by `(date, time)`.
pub fn whole_schedule(events: &[Event]) -> Vec<ScheduleEntry<'_>> {
    let mut entries = entries_of(events.iter().enumerate());
    sort_entries(&mut entries, SectionOrder::Chronological);
    entries
}

/// One section per division, in division order.
pub fn by_section<'a>(
    divisions: &'a [String],
    events: &'a [Event],
    order: SectionOrder,
) -> Vec<DivisionSection<'a>> {
    divisions
        .iter()
        .map(|division| {
            let mut entries = entries_of(
                events
                    .iter()
                    .enumerate()
                    .filter(|(_, event)| event.division == *division),
            );
            sort_entries(&mut entries, order);
            DivisionSection {
                division: division.as_str(),
                entries,
            }
        })
        .collect()
}

/// Renders the whole schedule as numbered lines:
/// `1. 2024-04-30 10:00 - Draw (Art)`.
pub fn render_whole_schedule(entries: &[ScheduleEntry<'_>]) -> String {
    let mut out = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let event = entry.event;
        let _ = writeln!(
            out,
            "{}. {} {} - {} ({})",
            index + 1,
            event.date,
            event.time,
            event.name,
            event.division
        );
    }
    out
}

/// Renders sections as a blank line, a `Division:` header, then indented
/// `date time - name` lines.
pub fn render_sections(sections: &[DivisionSection<'_>]) -> String {
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "\n{}:", section.division);
        for entry in &section.entries {
            let event = entry.event;
            let _ = writeln!(out, "  {} {} - {}", event.date, event.time, event.name);
        }
    }
    out
}

fn entries_of<'a>(iter: impl Iterator<Item = (usize, &'a Event)>) -> Vec<ScheduleEntry<'a>> {
    iter.map(|(position, event)| ScheduleEntry { position, event }).collect()
}

fn sort_entries(entries: &mut [ScheduleEntry<'_>], order: SectionOrder) {
    match order {
        SectionOrder::Chronological => {
            entries.sort_by(|a, b| a.event.schedule_key().cmp(&b.event.schedule_key()));
        }
        SectionOrder::Alphabetical => {
            entries.sort_by_cached_key(|entry| entry.event.name.to_lowercase());
        }
    }
}
