mod config;
pub mod database;
pub mod memory;
pub mod repository;

pub use config::{Config, DisplayConfig, LoggingConfig, StorageConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use repository::{HabitRepository, HABITS_KEY};

use std::path::PathBuf;

use crate::error::Result;

/// Key-value persistence the habit collection is stored through.
///
/// The whole collection lives under one key, so implementations only need
/// whole-value reads and writes. A failed `set` must leave the previous
/// value in place.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Returns `~/.config/streaks[-dev]/` based on STREAKS_ENV.
///
/// Set STREAKS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STREAKS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("streaks-dev")
    } else {
        base_dir.join("streaks")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
