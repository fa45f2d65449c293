//! Habit commands for CLI.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use serde::Serialize;
use streaks_core::{parse_day, Config, Database, Habit, HabitRepository, NewHabit};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Habit description
        #[arg(long)]
        description: Option<String>,
    },
    /// List habits
    List {
        /// Day used for the completedToday flag (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<String>,
    },
    /// Get habit details
    Get {
        /// Habit ID
        id: String,
    },
    /// Mark a day done, or undo it if already done
    Toggle {
        /// Habit ID
        id: String,
        /// How it went (recorded when completing)
        #[arg(long)]
        note: Option<String>,
        /// Day to toggle (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
    /// Show daily notes, newest first
    History {
        /// Habit ID
        id: String,
        /// Print notes as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A habit as listed, with the state needed to render the toggle.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitView<'a> {
    #[serde(flatten)]
    habit: &'a Habit,
    completed_today: bool,
}

fn open_repo(
    config: &Config,
    db: Option<PathBuf>,
) -> Result<HabitRepository<Database>, Box<dyn std::error::Error>> {
    let path = match db {
        Some(path) => path,
        None => config.db_path()?,
    };
    let database = Database::open_at(path)?;
    Ok(HabitRepository::with_key(
        database,
        config.storage.collection_key.clone(),
    ))
}

/// Explicit `YYYY-MM-DD` day, or the current local (or UTC) calendar day.
fn day_or_today(value: Option<&str>, utc: bool) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match value {
        Some(v) => Ok(parse_day(v)?),
        None if utc => Ok(Utc::now().date_naive()),
        None => Ok(Local::now().date_naive()),
    }
}

fn format_day(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.to_string();
    }
    out
}

pub fn run(
    action: HabitAction,
    config: &Config,
    db: Option<PathBuf>,
    utc: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = open_repo(config, db)?;

    match action {
        HabitAction::Add { name, description } => {
            let input = NewHabit { name, description };
            let habit = repo.add(input, Utc::now())?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List { today } => {
            let today = day_or_today(today.as_deref(), utc)?;
            let habits = repo.list()?;
            let views: Vec<_> = habits
                .iter()
                .map(|habit| HabitView {
                    habit,
                    completed_today: habit.is_completed_today(today),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        HabitAction::Get { id } => {
            let habit = repo.get(&id)?.ok_or(format!("Habit not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Toggle { id, note, date } => {
            let date = day_or_today(date.as_deref(), utc)?;
            let habit = repo.toggle(&id, date, note.as_deref())?;
            if habit.is_completed_on(date) {
                println!("Completed {date}: {} day streak", habit.streak);
            } else {
                println!("Undone {date}: {} day streak", habit.streak);
            }
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Delete { id } => {
            if !repo.delete(&id)? {
                return Err(format!("Habit not found: {id}").into());
            }
            println!("Habit deleted: {id}");
        }
        HabitAction::History { id, json } => {
            let notes = repo.history(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else if notes.is_empty() {
                println!("No daily notes yet.");
            } else {
                for note in notes {
                    println!(
                        "{}: {}",
                        format_day(note.date, &config.display.date_format),
                        note.description
                    );
                }
            }
        }
    }
    Ok(())
}
