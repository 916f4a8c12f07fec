//! Planner domain model.
//!
//! # Responsibility
//! - Define the entity (`Event`) and aggregate (`Planner`) types.
//! - Keep the persisted document shape next to the types that own it.
//!
//! # Invariants
//! - Events are identified by position, not by a stored ID.

pub mod event;
pub mod planner;
