//! Collection-level access to stored habits.
//!
//! Every mutation is a read-modify-write of the whole collection: load the
//! array stored under the collection key, change one record, write the
//! array back. The streak engine only ever sees a single [`Habit`].

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::{CoreError, Result};
use crate::habit::{self, DailyNote, Habit, NewHabit};

/// Key the habit collection is stored under.
pub const HABITS_KEY: &str = "habits";

/// Habit collection stored as one JSON array in a [`KeyValueStore`].
pub struct HabitRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HabitRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, HABITS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the whole collection.
    ///
    /// A missing key or a value that does not parse as a habit array yields
    /// an empty collection.
    ///
    /// # Errors
    /// Returns an error only if the underlying store fails.
    pub fn load(&self) -> Result<Vec<Habit>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Habit>>(&raw) {
            Ok(habits) => Ok(habits),
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored habits are malformed; starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the stored collection.
    ///
    /// # Errors
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, habits: &[Habit]) -> Result<()> {
        let raw = serde_json::to_string(habits)?;
        self.store.set(&self.key, &raw)
    }

    pub fn list(&self) -> Result<Vec<Habit>> {
        self.load()
    }

    pub fn get(&self, id: &str) -> Result<Option<Habit>> {
        Ok(self.load()?.into_iter().find(|h| h.id == id))
    }

    /// Create a habit and append it to the collection.
    ///
    /// # Errors
    /// Returns a validation error for a blank name, or a store error.
    pub fn add(&self, input: NewHabit, created_at: DateTime<Utc>) -> Result<Habit> {
        let habit = Habit::create(input, created_at)?;
        let mut habits = self.load()?;
        habits.push(habit.clone());
        self.save(&habits)?;
        debug!(habit_id = %habit.id, name = %habit.name, "habit added");
        Ok(habit)
    }

    /// Toggle completion of habit `id` on `today` and persist the result.
    ///
    /// # Errors
    /// - [`CoreError::HabitNotFound`] if no habit has this id.
    /// - [`CoreError::Streak`] if the engine rejects the transition; nothing is
    ///   written in that case.
    pub fn toggle(&self, id: &str, today: NaiveDate, note: Option<&str>) -> Result<Habit> {
        let mut habits = self.load()?;
        let slot = habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))?;

        let updated = habit::toggle(slot, today, note)?;
        *slot = updated.clone();
        self.save(&habits)?;
        Ok(updated)
    }

    /// Remove habit `id`. Returns whether a record was removed.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut habits = self.load()?;
        let before = habits.len();
        habits.retain(|h| h.id != id);
        if habits.len() == before {
            return Ok(false);
        }
        self.save(&habits)?;
        debug!(habit_id = %id, "habit deleted");
        Ok(true)
    }

    /// Daily notes of habit `id`, newest first.
    ///
    /// # Errors
    /// Returns [`CoreError::HabitNotFound`] if no habit has this id.
    pub fn history(&self, id: &str) -> Result<Vec<DailyNote>> {
        let habit = self
            .get(id)?
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))?;
        Ok(habit::notes_newest_first(&habit)
            .into_iter()
            .cloned()
            .collect())
    }
}
