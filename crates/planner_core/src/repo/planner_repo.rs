//! Planner document repository contracts and implementations.
//!
//! # Responsibility
//! - Provide whole-document load/save over a named storage resource.
//! - Keep the JSON codec inside the persistence boundary.
//!
//! # Invariants
//! - `load()` reports an absent resource as `Ok(None)`, never as an error.
//! - Parse failures and missing document keys surface as `RepoError::Malformed`.
//! - File saves go through a sibling temp file and a rename, so a failed save
//!   never leaves a half-written document behind.

use crate::model::event::Event;
use crate::model::planner::Planner;
use log::{error, info};
use serde_json::Value;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for planner documents.
#[derive(Debug)]
pub enum RepoError {
    /// Any I/O failure other than "resource absent" on load.
    Io(std::io::Error),
    /// Document exists but cannot be decoded into a planner.
    Malformed(String),
    /// Planner could not be serialized.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Malformed(message) => write!(f, "malformed planner document: {message}"),
            Self::Encode(err) => write!(f, "failed to encode planner document: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(_) => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Storage backend for the planner document.
pub trait PlannerRepository {
    fn load(&self) -> RepoResult<Option<Planner>>;
    fn save(&self, planner: &Planner) -> RepoResult<()>;
}

/// JSON file-backed planner repository.
#[derive(Debug, Clone)]
pub struct JsonFilePlannerRepository {
    path: PathBuf,
}

impl JsonFilePlannerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

impl PlannerRepository for JsonFilePlannerRepository {
    fn load(&self) -> RepoResult<Option<Planner>> {
        let started_at = Instant::now();
        info!("event=planner_load module=repo status=start mode=file");

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=planner_load module=repo status=ok mode=file found=false duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=planner_load module=repo status=error mode=file duration_ms={} error_code=read_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match decode_document(&text) {
            Ok(planner) => {
                info!(
                    "event=planner_load module=repo status=ok mode=file found=true divisions={} events={} duration_ms={}",
                    planner.divisions.len(),
                    planner.events.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Some(planner))
            }
            Err(err) => {
                error!(
                    "event=planner_load module=repo status=error mode=file duration_ms={} error_code=decode_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, planner: &Planner) -> RepoResult<()> {
        let started_at = Instant::now();
        let text = encode_document(planner)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path();
        let result = fs::write(&tmp_path, text.as_bytes())
            .and_then(|()| fs::rename(&tmp_path, &self.path));

        match result {
            Ok(()) => {
                info!(
                    "event=planner_save module=repo status=ok mode=file bytes={} duration_ms={}",
                    text.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                let _ = fs::remove_file(&tmp_path);
                error!(
                    "event=planner_save module=repo status=error mode=file duration_ms={} error_code=write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// In-memory planner repository holding the serialized document text.
///
/// Goes through the same codec as the file repository, so stored text can be
/// compared byte for byte.
#[derive(Debug, Default)]
pub struct InMemoryPlannerRepository {
    document: RefCell<Option<String>>,
}

impl InMemoryPlannerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `document`.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(document.into())),
        }
    }

    /// Returns the currently stored document text, if any.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl PlannerRepository for InMemoryPlannerRepository {
    fn load(&self) -> RepoResult<Option<Planner>> {
        match self.document.borrow().as_deref() {
            Some(text) => decode_document(text).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, planner: &Planner) -> RepoResult<()> {
        let text = encode_document(planner)?;
        *self.document.borrow_mut() = Some(text);
        info!("event=planner_save module=repo status=ok mode=memory");
        Ok(())
    }
}

impl<R: PlannerRepository + ?Sized> PlannerRepository for &R {
    fn load(&self) -> RepoResult<Option<Planner>> {
        (**self).load()
    }

    fn save(&self, planner: &Planner) -> RepoResult<()> {
        (**self).save(planner)
    }
}

/// Serializes the full aggregate as pretty-printed JSON.
pub fn encode_document(planner: &Planner) -> RepoResult<String> {
    serde_json::to_string_pretty(planner).map_err(RepoError::Encode)
}

/// Decodes a planner document.
///
/// Events are rebuilt through `Event::from_map`, so a missing event key is
/// reported with its position.
pub fn decode_document(text: &str) -> RepoResult<Planner> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| RepoError::Malformed(err.to_string()))?;
    let root = value
        .as_object()
        .ok_or_else(|| malformed("document root must be an object"))?;

    let user_name = match root.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => return Err(malformed("`name` must be a string")),
        None => return Err(malformed("missing field `name`")),
    };

    let divisions = match root.get("divisions") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| malformed(&format!("divisions[{index}] must be a string")))
            })
            .collect::<RepoResult<Vec<_>>>()?,
        Some(_) => return Err(malformed("`divisions` must be an array")),
        None => return Err(malformed("missing field `divisions`")),
    };

    let events = match root.get("events") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let map = item
                    .as_object()
                    .ok_or_else(|| malformed(&format!("events[{index}] must be an object")))?;
                Event::from_map(map)
                    .map_err(|err| RepoError::Malformed(format!("events[{index}]: {err}")))
            })
            .collect::<RepoResult<Vec<_>>>()?,
        Some(_) => return Err(malformed("`events` must be an array")),
        None => return Err(malformed("missing field `events`")),
    };

    Ok(Planner {
        user_name,
        divisions,
        events,
    })
}

fn malformed(message: &str) -> RepoError {
    RepoError::Malformed(message.to_string())
}
