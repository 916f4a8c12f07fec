//! Repository layer: planner document persistence and aggregate ownership.
//!
//! # Responsibility
//! - Define the whole-document storage contract (`PlannerRepository`).
//! - Isolate the JSON codec and file handling from service orchestration.
//!
//! # Invariants
//! - "Document absent" is a normal outcome of `load()`, not an error.
//! - Malformed documents are fatal and never partially applied.

pub mod planner_repo;
pub mod planner_store;
