//! Schedule view projections.
//!
//! # Responsibility
//! - Build display-ready, read-only orderings of planner events.
//! - Keep sorting rules inside core.

pub mod schedule;
