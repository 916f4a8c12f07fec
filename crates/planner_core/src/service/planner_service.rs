//! Planner use-case service.
//!
//! # Responsibility
//! - Provide add/delete entry points for events and divisions.
//! - Persist the whole aggregate after every successful mutation.
//! - Hand schedule views to a caller-supplied presenter.
//!
//! # Invariants
//! - All indices taken by this service are 1-based selections.
//! - A rejected selection never mutates state and never saves.
//! - Deleting a division removes exactly the events assigned to it.

use crate::model::event::{Event, EventValidationError};
use crate::repo::planner_repo::{PlannerRepository, RepoError};
use crate::repo::planner_store::PlannerStore;
use crate::view::schedule::{
    by_section, render_sections, render_whole_schedule, whole_schedule, DivisionSection,
    ScheduleEntry, SectionOrder, ViewMode,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from planner service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Division selection is outside `1..=available`.
    InvalidDivisionIndex { index: usize, available: usize },
    /// Event selection is outside `1..=available`.
    InvalidEventIndex { index: usize, available: usize },
    /// Event date/time do not match the expected shapes.
    InvalidEvent(EventValidationError),
    /// Persistence failure. Not recoverable.
    Repo(RepoError),
}

impl ServiceError {
    /// Returns whether the caller may report this error and keep going.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Repo(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDivisionIndex { .. } => write!(f, "Invalid division number."),
            Self::InvalidEventIndex { .. } => write!(f, "Invalid event number."),
            Self::InvalidEvent(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEvent(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<EventValidationError> for ServiceError {
    fn from(value: EventValidationError) -> Self {
        Self::InvalidEvent(value)
    }
}

/// Result of a cascading division delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedDivision {
    pub name: String,
    /// Number of events removed together with the division.
    pub removed_events: usize,
}

/// Presentation callbacks for schedule views.
pub trait SchedulePresenter {
    /// Called instead of any view when the planner has no events.
    fn no_events(&mut self);
    fn whole_schedule(&mut self, entries: &[ScheduleEntry<'_>]);
    fn sections(&mut self, sections: &[DivisionSection<'_>]);
}

/// Presenter that collects rendered text.
#[derive(Debug, Default)]
pub struct TextPresenter {
    buffer: String,
}

impl TextPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn into_text(self) -> String {
        self.buffer
    }
}

impl SchedulePresenter for TextPresenter {
    fn no_events(&mut self) {
        self.buffer.push_str("No events found.\n");
    }

    fn whole_schedule(&mut self, entries: &[ScheduleEntry<'_>]) {
        self.buffer.push_str(&render_whole_schedule(entries));
    }

    fn sections(&mut self, sections: &[DivisionSection<'_>]) {
        self.buffer.push_str(&render_sections(sections));
    }
}

/// Planner service facade over a `PlannerStore`.
pub struct PlannerService<R: PlannerRepository> {
    store: PlannerStore<R>,
}

impl<R: PlannerRepository> PlannerService<R> {
    /// Creates a service around an already loaded or initialized store.
    pub fn new(store: PlannerStore<R>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &PlannerStore<R> {
        &self.store
    }

    pub fn into_store(self) -> PlannerStore<R> {
        self.store
    }

    /// Persists the current state without mutating it.
    pub fn save(&self) -> ServiceResult<()> {
        self.store.save()?;
        Ok(())
    }

    /// Appends an event to the division selected by `division_index`.
    ///
    /// # Contract
    /// - `division_index` is 1-based into the current division list.
    /// - `date` must be `YYYY-MM-DD` and `time` must be `HH:MM`.
    /// - Duplicate events are allowed.
    pub fn add_event(
        &mut self,
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        division_index: usize,
    ) -> ServiceResult<Event> {
        let available = self.store.divisions().len();
        let Some(slot) = checked_slot(division_index, available) else {
            warn!(
                "event=event_add module=service status=error error_code=invalid_division_index index={division_index} available={available}"
            );
            return Err(ServiceError::InvalidDivisionIndex {
                index: division_index,
                available,
            });
        };
        let division = self.store.divisions()[slot].clone();

        let event = Event::new(name, date, time, division);
        if let Err(err) = event.validate() {
            warn!("event=event_add module=service status=error error_code=invalid_event");
            return Err(err.into());
        }

        self.store.planner_mut().events.push(event.clone());
        self.store.save()?;
        info!(
            "event=event_add module=service status=ok division_index={} events={}",
            division_index,
            self.store.events().len()
        );
        Ok(event)
    }

    /// Deletes an event by 1-based position in storage order.
    pub fn delete_event(&mut self, index: usize) -> ServiceResult<Event> {
        let available = self.store.events().len();
        let Some(slot) = checked_slot(index, available) else {
            warn!(
                "event=event_delete module=service status=error error_code=invalid_event_index index={index} available={available}"
            );
            return Err(ServiceError::InvalidEventIndex { index, available });
        };

        let removed = self.store.planner_mut().events.remove(slot);
        self.store.save()?;
        info!(
            "event=event_delete module=service status=ok position={} events={}",
            slot,
            self.store.events().len()
        );
        Ok(removed)
    }

    /// Deletes an event by its 1-based row in the whole-schedule view.
    ///
    /// The row is mapped back to its storage position before deletion, so
    /// the event shown at that row is the one removed.
    pub fn delete_scheduled_event(&mut self, row: usize) -> ServiceResult<Event> {
        let schedule = whole_schedule(self.store.events());
        let Some(slot) = checked_slot(row, schedule.len()) else {
            warn!(
                "event=event_delete module=service status=error error_code=invalid_event_index index={row} available={}",
                schedule.len()
            );
            return Err(ServiceError::InvalidEventIndex {
                index: row,
                available: schedule.len(),
            });
        };
        let position = schedule[slot].position;
        self.delete_event(position + 1)
    }

    /// Appends a division. Duplicate names are allowed.
    pub fn add_division(&mut self, name: impl Into<String>) -> ServiceResult<()> {
        self.store.planner_mut().divisions.push(name.into());
        self.store.save()?;
        info!(
            "event=division_add module=service status=ok divisions={}",
            self.store.divisions().len()
        );
        Ok(())
    }

    /// Deletes a division by 1-based index, cascading to its events.
    ///
    /// # Contract
    /// - Every event whose `division` equals the removed name is removed.
    /// - Remaining events keep content and relative order.
    /// - Saves once after the combined mutation.
    pub fn delete_division(&mut self, index: usize) -> ServiceResult<DeletedDivision> {
        let available = self.store.divisions().len();
        let Some(slot) = checked_slot(index, available) else {
            warn!(
                "event=division_delete module=service status=error error_code=invalid_division_index index={index} available={available}"
            );
            return Err(ServiceError::InvalidDivisionIndex { index, available });
        };

        let planner = self.store.planner_mut();
        let name = planner.divisions.remove(slot);
        let removed_events = planner.remove_events_in(&name);
        self.store.save()?;
        info!(
            "event=division_delete module=service status=ok position={} removed_events={}",
            slot, removed_events
        );
        Ok(DeletedDivision {
            name,
            removed_events,
        })
    }

    /// All events ordered by `(date, time)`.
    pub fn whole_schedule(&self) -> Vec<ScheduleEntry<'_>> {
        whole_schedule(self.store.events())
    }

    /// Events grouped per division in the requested order.
    pub fn by_section(&self, order: SectionOrder) -> Vec<DivisionSection<'_>> {
        by_section(self.store.divisions(), self.store.events(), order)
    }

    /// Builds the requested view and hands it to `presenter`.
    pub fn view<P: SchedulePresenter + ?Sized>(&self, mode: ViewMode, presenter: &mut P) {
        if self.store.events().is_empty() {
            presenter.no_events();
            return;
        }

        match mode {
            ViewMode::WholeSchedule => presenter.whole_schedule(&self.whole_schedule()),
            ViewMode::BySection(order) => presenter.sections(&self.by_section(order)),
        }
    }
}

/// Maps a 1-based selection to a 0-based slot when it is in range.
fn checked_slot(index: usize, len: usize) -> Option<usize> {
    if index >= 1 && index <= len {
        Some(index - 1)
    } else {
        None
    }
}
