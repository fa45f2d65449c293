//! # Streaks Core Library
//!
//! This library provides the core logic for the Streaks habit tracker.
//! All operations are available through the `streaks` CLI binary, which is a
//! thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Streak Engine**: pure transitions over a single habit. The caller
//!   passes the calendar day explicitly; the engine never reads a clock
//! - **Storage**: the habit collection is one JSON array under a single key
//!   in a key-value store (SQLite by default), plus TOML configuration
//!
//! ## Key Components
//!
//! - [`Habit`]: a tracked habit and its completion history
//! - [`toggle`]: record or retract completion for a day
//! - [`HabitRepository`]: collection-level read-modify-write over a [`KeyValueStore`]
//! - [`Config`]: application configuration management

pub mod error;
pub mod habit;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, StreakError, ValidationError};
pub use habit::{
    is_completed_on, is_completed_today, notes_newest_first, parse_day, toggle, DailyNote, Habit,
    NewHabit,
};
pub use storage::{Config, Database, HabitRepository, KeyValueStore, MemoryStore, HABITS_KEY};
