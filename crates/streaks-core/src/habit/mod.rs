//! Habit records and the streak engine that mutates them.
//!
//! A [`Habit`] is created with zero streak and an empty history, changes only
//! through [`engine::toggle`], and is otherwise immutable. The serde shape of
//! these types is the storage schema: the whole collection is written as one
//! JSON array under a single key (see [`crate::storage::HabitRepository`]).

pub mod engine;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub use engine::{is_completed_on, is_completed_today, notes_newest_first, toggle};

/// Calendar-day format used for stored dates and CLI input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Free-text annotation attached to one completed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNote {
    pub date: NaiveDate,
    pub description: String,
}

/// A tracked habit and its completion history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Consecutive completed days ending at `last_completed`.
    pub streak: u32,
    /// Last element of `completed_dates`, if any.
    pub last_completed: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    /// Completed days in the order they were recorded.
    #[serde(default)]
    pub completed_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub daily_notes: Vec<DailyNote>,
}

/// Input for creating a habit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Habit {
    /// Build a fresh habit from user input.
    ///
    /// The name and description are trimmed; a blank description is dropped.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] if the name is blank.
    pub fn create(input: NewHabit, created_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description,
            streak: 0,
            last_completed: None,
            created_at,
            completed_dates: Vec::new(),
            daily_notes: Vec::new(),
        })
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        is_completed_on(self, date)
    }

    pub fn is_completed_today(&self, today: NaiveDate) -> bool {
        is_completed_today(self, today)
    }

    /// Note recorded for `date`, if the day is completed.
    pub fn note_on(&self, date: NaiveDate) -> Option<&DailyNote> {
        self.daily_notes.iter().find(|n| n.date == date)
    }
}

/// Parse a `YYYY-MM-DD` calendar day.
///
/// # Errors
/// Returns [`ValidationError::InvalidDate`] for anything else.
pub fn parse_day(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            value: value.to_string(),
        }
    })
}
