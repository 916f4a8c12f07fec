//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and persistence into use-case level APIs.
//! - Keep front ends decoupled from storage and sorting details.

pub mod planner_service;
