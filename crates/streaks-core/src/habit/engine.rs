//! Streak engine.
//!
//! Pure transitions over a single [`Habit`]: given the habit and an explicit
//! calendar day, compute the next value. The engine never reads a clock;
//! callers pass "today" in.
//!
//! Completions only move forward and only the most recent completion can be
//! retracted. Under those two rules `completed_dates` stays in chronological
//! order and the incremental streak bookkeeping below stays consistent, so
//! both are enforced and reported as [`StreakError`] instead of assumed.

use chrono::NaiveDate;
use tracing::debug;

use super::{DailyNote, Habit};
use crate::error::StreakError;

/// Record or retract completion of `habit` on `date`.
///
/// Retracts if `date` is already completed, otherwise records it with
/// `note` (trimmed; a missing note is stored as an empty string).
///
/// # Errors
/// - [`StreakError::NotMostRecent`] when retracting a day other than the last
///   completion.
/// - [`StreakError::OutOfOrder`] when completing a day before the last
///   completion.
pub fn toggle(habit: &Habit, date: NaiveDate, note: Option<&str>) -> Result<Habit, StreakError> {
    let next = if is_completed_on(habit, date) {
        uncomplete(habit, date)?
    } else {
        complete(habit, date, note.unwrap_or_default())?
    };

    debug!(
        habit_id = %habit.id,
        %date,
        completed = next.is_completed_on(date),
        streak_before = habit.streak,
        streak_after = next.streak,
        "habit toggled"
    );
    Ok(next)
}

fn complete(habit: &Habit, date: NaiveDate, note: &str) -> Result<Habit, StreakError> {
    if let Some(last) = habit.last_completed {
        if date < last {
            return Err(StreakError::OutOfOrder { date, last });
        }
    }

    let streak = match habit.last_completed {
        Some(prev) if is_next_day(prev, date) => habit.streak.saturating_add(1),
        _ => 1,
    };

    let mut next = habit.clone();
    next.streak = streak;
    next.last_completed = Some(date);
    next.completed_dates.push(date);
    next.daily_notes.push(DailyNote {
        date,
        description: note.trim().to_string(),
    });
    Ok(next)
}

fn uncomplete(habit: &Habit, date: NaiveDate) -> Result<Habit, StreakError> {
    if let Some(last) = habit.last_completed {
        if last != date {
            return Err(StreakError::NotMostRecent { date, last });
        }
    }

    let mut next = habit.clone();
    next.completed_dates.retain(|d| *d != date);
    next.daily_notes.retain(|n| n.date != date);

    let previous = next.completed_dates.last().copied();
    next.streak = match previous {
        Some(prev) if is_next_day(prev, date) => habit.streak.saturating_sub(1),
        _ => 0,
    };
    next.last_completed = previous;
    Ok(next)
}

/// Whether `date` is one of the habit's completed days.
pub fn is_completed_on(habit: &Habit, date: NaiveDate) -> bool {
    habit.completed_dates.contains(&date)
}

/// Whether the most recent completion is `today`.
pub fn is_completed_today(habit: &Habit, today: NaiveDate) -> bool {
    habit.last_completed == Some(today)
}

/// Note history, newest day first.
pub fn notes_newest_first(habit: &Habit) -> Vec<&DailyNote> {
    let mut notes: Vec<&DailyNote> = habit.daily_notes.iter().collect();
    notes.sort_by(|a, b| b.date.cmp(&a.date));
    notes
}

fn is_next_day(prev: NaiveDate, date: NaiveDate) -> bool {
    date.signed_duration_since(prev).num_days() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{parse_day, NewHabit};
    use chrono::{Duration, Utc};

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn fresh() -> Habit {
        Habit::create(NewHabit::new("Stretch"), Utc::now()).unwrap()
    }

    fn with_history(dates: &[&str], streak: u32) -> Habit {
        let mut habit = fresh();
        habit.completed_dates = dates.iter().map(|d| day(d)).collect();
        habit.daily_notes = habit
            .completed_dates
            .iter()
            .map(|d| DailyNote {
                date: *d,
                description: String::new(),
            })
            .collect();
        habit.last_completed = habit.completed_dates.last().copied();
        habit.streak = streak;
        habit
    }

    #[test]
    fn first_completion_starts_streak_at_one() {
        let habit = toggle(&fresh(), day("2024-03-10"), Some("felt good")).unwrap();
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.last_completed, Some(day("2024-03-10")));
        assert_eq!(habit.completed_dates, vec![day("2024-03-10")]);
        assert_eq!(habit.daily_notes[0].description, "felt good");
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let habit = with_history(&["2024-01-01"], 1);
        let next = toggle(&habit, day("2024-01-02"), Some("done")).unwrap();

        assert_eq!(next.streak, 2);
        assert_eq!(next.last_completed, Some(day("2024-01-02")));
        assert_eq!(next.completed_dates, vec![day("2024-01-01"), day("2024-01-02")]);
    }

    #[test]
    fn gap_restarts_streak() {
        let habit = with_history(&["2024-01-01"], 1);
        let next = toggle(&habit, day("2024-01-05"), Some("done")).unwrap();
        assert_eq!(next.streak, 1);
        assert_eq!(next.last_completed, Some(day("2024-01-05")));

        let two_days = toggle(&habit, day("2024-01-03"), None).unwrap();
        assert_eq!(two_days.streak, 1);
    }

    #[test]
    fn streak_crosses_month_and_leap_day() {
        let habit = with_history(&["2024-02-28"], 4);
        let next = toggle(&habit, day("2024-02-29"), None).unwrap();
        let next = toggle(&next, day("2024-03-01"), None).unwrap();
        assert_eq!(next.streak, 6);
    }

    #[test]
    fn uncomplete_consecutive_decrements() {
        let habit = with_history(&["2024-01-01", "2024-01-02", "2024-01-03"], 3);
        let next = toggle(&habit, day("2024-01-03"), None).unwrap();

        assert_eq!(next.streak, 2);
        assert_eq!(next.last_completed, Some(day("2024-01-02")));
        assert_eq!(next.completed_dates.len(), 2);
        assert!(next.note_on(day("2024-01-03")).is_none());
    }

    #[test]
    fn uncomplete_after_gap_resets_to_zero() {
        let habit = with_history(&["2024-01-01", "2024-01-05"], 1);
        let next = toggle(&habit, day("2024-01-05"), None).unwrap();
        assert_eq!(next.streak, 0);
        assert_eq!(next.last_completed, Some(day("2024-01-01")));
    }

    #[test]
    fn uncomplete_only_entry_clears_history() {
        let habit = with_history(&["2024-01-01"], 1);
        let next = toggle(&habit, day("2024-01-01"), None).unwrap();
        assert_eq!(next.streak, 0);
        assert!(next.last_completed.is_none());
        assert!(next.completed_dates.is_empty());
        assert!(next.daily_notes.is_empty());
    }

    #[test]
    fn toggle_twice_is_identity() {
        let habit = with_history(&["2024-01-01", "2024-01-02"], 2);
        let date = day("2024-01-03");
        let done = toggle(&habit, date, Some("note")).unwrap();
        let undone = toggle(&done, date, Some("ignored")).unwrap();
        assert_eq!(undone, habit);
    }

    #[test]
    fn retracting_older_day_is_rejected() {
        let habit = with_history(&["2024-01-01", "2024-01-02"], 2);
        let err = toggle(&habit, day("2024-01-01"), None).unwrap_err();
        assert_eq!(
            err,
            StreakError::NotMostRecent {
                date: day("2024-01-01"),
                last: day("2024-01-02"),
            }
        );
    }

    #[test]
    fn backfill_is_rejected() {
        let habit = with_history(&["2024-01-05"], 1);
        let err = toggle(&habit, day("2024-01-03"), None).unwrap_err();
        assert!(matches!(err, StreakError::OutOfOrder { .. }));
    }

    #[test]
    fn note_is_trimmed_and_defaults_to_empty() {
        let habit = toggle(&fresh(), day("2024-01-01"), Some("  ran 5k \n")).unwrap();
        assert_eq!(habit.daily_notes[0].description, "ran 5k");

        let habit = toggle(&fresh(), day("2024-01-01"), None).unwrap();
        assert_eq!(habit.daily_notes[0].description, "");
    }

    #[test]
    fn completed_today_tracks_last_completion() {
        let today = day("2024-01-02");
        let habit = with_history(&["2024-01-01", "2024-01-02"], 2);
        assert!(is_completed_today(&habit, today));
        assert!(!is_completed_today(&habit, today + Duration::days(1)));
        assert!(is_completed_on(&habit, day("2024-01-01")));
        assert!(!is_completed_today(&habit, day("2024-01-01")));
    }

    #[test]
    fn notes_are_listed_newest_first() {
        let habit = with_history(&["2024-01-01", "2024-01-03", "2024-01-02"], 0);
        let dates: Vec<_> = notes_newest_first(&habit).iter().map(|n| n.date).collect();
        assert_eq!(dates, vec![day("2024-01-03"), day("2024-01-02"), day("2024-01-01")]);
    }
}
