//! Core domain logic for the student planner.
//! This crate is the single source of truth for planner invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{Event, EventFieldError, EventValidationError};
pub use model::planner::Planner;
pub use repo::planner_repo::{
    decode_document, encode_document, InMemoryPlannerRepository, JsonFilePlannerRepository,
    PlannerRepository, RepoError, RepoResult,
};
pub use repo::planner_store::{normalize_division_name, PlannerStore, SetupError, SetupRequest};
pub use service::planner_service::{
    DeletedDivision, PlannerService, SchedulePresenter, ServiceError, ServiceResult,
    TextPresenter,
};
pub use view::schedule::{
    by_section, render_sections, render_whole_schedule, whole_schedule, DivisionSection,
    ScheduleEntry, SectionOrder, ViewError, ViewMode,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
