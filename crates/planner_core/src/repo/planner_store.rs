//! Planner aggregate ownership and persistence.
//!
//! # Responsibility
//! - Own the single long-lived `Planner` value for a session.
//! - Load/save the aggregate as one document through a `PlannerRepository`.
//! - Run first-run setup when no document exists.
//!
//! # Invariants
//! - The document is the unit of durability; there are no partial saves.
//! - Setup validates all input before touching the aggregate or storage.

use crate::model::event::Event;
use crate::model::planner::Planner;
use crate::repo::planner_repo::{PlannerRepository, RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First-run input: user name plus the initial division list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupRequest {
    pub user_name: String,
    pub divisions: Vec<String>,
}

/// Errors from first-run setup.
#[derive(Debug)]
pub enum SetupError {
    /// At least one initial division is required.
    NoDivisions,
    /// Division name is blank after trim. `position` is 1-based.
    EmptyDivisionName { position: usize },
    /// Persisting the new planner failed.
    Repo(RepoError),
}

impl Display for SetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDivisions => write!(f, "at least one division is required"),
            Self::EmptyDivisionName { position } => {
                write!(f, "division name {position} cannot be empty")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SetupError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Trims and checks one division name entered during setup.
///
/// Returns `None` for blank input so callers can re-prompt.
pub fn normalize_division_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Session owner of the planner aggregate.
pub struct PlannerStore<R: PlannerRepository> {
    repo: R,
    planner: Planner,
}

impl<R: PlannerRepository> PlannerStore<R> {
    /// Creates a store with an empty aggregate.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            planner: Planner::default(),
        }
    }

    /// Loads the persisted document into memory.
    ///
    /// Returns `Ok(false)` and leaves the aggregate untouched when no document
    /// exists yet.
    pub fn load(&mut self) -> RepoResult<bool> {
        match self.repo.load()? {
            Some(planner) => {
                self.planner = planner;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Persists the full aggregate.
    pub fn save(&self) -> RepoResult<()> {
        self.repo.save(&self.planner)
    }

    /// Replaces the aggregate with a freshly set-up planner and saves it.
    ///
    /// # Errors
    /// - `NoDivisions` when the division list is empty.
    /// - `EmptyDivisionName` for the first blank name.
    pub fn initialize(&mut self, request: SetupRequest) -> Result<(), SetupError> {
        if request.divisions.is_empty() {
            warn!("event=planner_setup module=store status=error error_code=no_divisions");
            return Err(SetupError::NoDivisions);
        }

        let mut divisions = Vec::with_capacity(request.divisions.len());
        for (index, raw) in request.divisions.iter().enumerate() {
            match normalize_division_name(raw) {
                Some(name) => divisions.push(name),
                None => {
                    warn!(
                        "event=planner_setup module=store status=error error_code=empty_division position={}",
                        index + 1
                    );
                    return Err(SetupError::EmptyDivisionName {
                        position: index + 1,
                    });
                }
            }
        }

        self.planner = Planner::new(request.user_name, divisions);
        self.save()?;
        info!(
            "event=planner_setup module=store status=ok divisions={}",
            self.planner.divisions.len()
        );
        Ok(())
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub(crate) fn planner_mut(&mut self) -> &mut Planner {
        &mut self.planner
    }

    pub fn user_name(&self) -> &str {
        &self.planner.user_name
    }

    pub fn divisions(&self) -> &[String] {
        &self.planner.divisions
    }

    pub fn events(&self) -> &[Event] {
        &self.planner.events
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
