//! Event domain model.
//!
//! # Responsibility
//! - Define the scheduled event record owned by the planner aggregate.
//! - Convert events to and from the plain key/value mapping used on disk.
//!
//! # Invariants
//! - An event has no identity beyond its position in `Planner::events`.
//! - `date`/`time` are compared as strings; ordering is only chronological
//!   when both follow the `YYYY-MM-DD` / `HH:MM` shapes checked by
//!   `Event::validate()`.
//!
//! # See also
//! - crate::view::schedule

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const KEY_NAME: &str = "name";
pub const KEY_DATE: &str = "date";
pub const KEY_TIME: &str = "time";
pub const KEY_DIVISION: &str = "division";

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").expect("valid date regex")
});
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

/// One scheduled entry in a division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    /// Expected shape `YYYY-MM-DD`.
    pub date: String,
    /// Expected shape `HH:MM`, 24h clock.
    pub time: String,
    /// Name of the owning division.
    pub division: String,
}

/// Failure while rebuilding an event from a plain mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFieldError {
    MissingField(&'static str),
    NotAString(&'static str),
}

impl Display for EventFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(key) => write!(f, "event is missing field `{key}`"),
            Self::NotAString(key) => write!(f, "event field `{key}` must be a string"),
        }
    }
}

impl Error for EventFieldError {}

/// Date/time shape violations found by `Event::validate()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    InvalidDate(String),
    InvalidTime(String),
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
        }
    }
}

impl Error for EventValidationError {}

impl Event {
    /// Creates an event from its four scalar fields.
    ///
    /// No format checks happen here; see `validate()`.
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        division: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            time: time.into(),
            division: division.into(),
        }
    }

    /// Checks that `date` and `time` sort chronologically as strings.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if !DATE_RE.is_match(&self.date) {
            return Err(EventValidationError::InvalidDate(self.date.clone()));
        }
        if !TIME_RE.is_match(&self.time) {
            return Err(EventValidationError::InvalidTime(self.time.clone()));
        }
        Ok(())
    }

    /// Composite `(date, time)` sort key.
    pub fn schedule_key(&self) -> (&str, &str) {
        (self.date.as_str(), self.time.as_str())
    }

    /// Converts this event into a mapping keyed `name, date, time, division`.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(KEY_NAME.to_string(), Value::String(self.name.clone()));
        map.insert(KEY_DATE.to_string(), Value::String(self.date.clone()));
        map.insert(KEY_TIME.to_string(), Value::String(self.time.clone()));
        map.insert(
            KEY_DIVISION.to_string(),
            Value::String(self.division.clone()),
        );
        map
    }

    /// Rebuilds an event from a mapping produced by `to_map()`.
    ///
    /// Extra keys are ignored.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, EventFieldError> {
        Ok(Self {
            name: string_field(map, KEY_NAME)?,
            date: string_field(map, KEY_DATE)?,
            time: string_field(map, KEY_TIME)?,
            division: string_field(map, KEY_DIVISION)?,
        })
    }
}

fn string_field(map: &Map<String, Value>, key: &'static str) -> Result<String, EventFieldError> {
    match map.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(EventFieldError::NotAString(key)),
        None => Err(EventFieldError::MissingField(key)),
    }
}
