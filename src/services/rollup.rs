// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Monthly rollups: one summary per calendar day for one user and month.
//!
//! Each source collection is read once for the whole month with a ranged
//! query, then merged in memory by date. A day with no record in some
//! source simply lacks that field; any store error aborts the whole month.

use crate::db::Database;
use crate::error::AppError;
use crate::models::{
    DailyData, DailyNote, DailyView, Habit, HabitCompletion, HabitTally, MoodRating, Note, Todo,
    WorkoutLog,
};
use crate::time_utils::YearMonth;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use uuid::Uuid;

/// Everything one month's daily views are built from.
#[derive(Debug, Clone, Default)]
pub struct MonthSources {
    pub habits: Vec<Habit>,
    pub completions: Vec<HabitCompletion>,
    pub workout_logs: Vec<WorkoutLog>,
    pub mood_ratings: Vec<MoodRating>,
}

/// Everything one month's daily notes are built from.
#[derive(Debug, Clone, Default)]
pub struct NoteSources {
    pub notes: Vec<Note>,
    /// Any order; each day's todos are emitted newest first.
    pub todos: Vec<Todo>,
}

/// Builds monthly rollups from the store.
#[derive(Clone)]
pub struct RollupService {
    db: Database,
}

impl RollupService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Daily views for every day of `month` (`YYYY-MM`), ascending.
    pub async fn rollup_month(&self, user_id: Uuid, month: &str) -> Result<Vec<DailyView>, AppError> {
        let month: YearMonth = month.parse()?;
        let (from, to) = (month.first_day(), month.last_day());

        let sources = MonthSources {
            habits: self.db.list_habits(user_id).await?,
            completions: self.db.completions_between(user_id, from, to).await?,
            workout_logs: self.db.workout_logs_between(user_id, from, to).await?,
            mood_ratings: self.db.mood_ratings_between(user_id, from, to).await?,
        };

        tracing::debug!(
            %user_id,
            %month,
            habits = sources.habits.len(),
            completions = sources.completions.len(),
            workout_logs = sources.workout_logs.len(),
            mood_ratings = sources.mood_ratings.len(),
            "Building monthly rollup"
        );

        Ok(build_daily_views(month, sources))
    }

    /// Note and todos for every day of `month` (`YYYY-MM`), ascending.
    pub async fn rollup_notes_month(
        &self,
        user_id: Uuid,
        month: &str,
    ) -> Result<Vec<DailyNote>, AppError> {
        let month: YearMonth = month.parse()?;
        let (from, to) = (month.first_day(), month.last_day());

        let sources = NoteSources {
            notes: self.db.notes_between(user_id, from, to).await?,
            todos: self.db.todos_between(user_id, from, to).await?,
        };

        tracing::debug!(
            %user_id,
            %month,
            notes = sources.notes.len(),
            todos = sources.todos.len(),
            "Building monthly notes rollup"
        );

        Ok(build_daily_notes(month, sources))
    }
}

/// Merge one month of source rows into exactly `days_in_month` daily views.
pub fn build_daily_views(month: YearMonth, sources: MonthSources) -> Vec<DailyView> {
    let mut logs: HashMap<NaiveDate, WorkoutLog> = HashMap::new();
    for log in sources.workout_logs {
        logs.insert(log.date, log);
    }

    let moods: HashMap<NaiveDate, i64> = sources
        .mood_ratings
        .into_iter()
        .map(|m| (m.date, m.rating))
        .collect();

    // The store keeps one completion per (habit, date); if older data has
    // more, the most recently updated wins.
    let mut completions: HashMap<(Uuid, NaiveDate), &HabitCompletion> = HashMap::new();
    for completion in &sources.completions {
        completions
            .entry((completion.habit_id, completion.date))
            .and_modify(|current| {
                if completion.updated_at > current.updated_at {
                    *current = completion;
                }
            })
            .or_insert(completion);
    }

    month
        .dates()
        .map(|date| {
            let weekday = date.weekday();
            let mut habits = HabitTally::default();
            for habit in sources.habits.iter().filter(|h| h.schedule.contains(weekday)) {
                let done = completions
                    .get(&(habit.id, date))
                    .is_some_and(|c| c.completed);
                habits.record(done);
            }

            let log = logs.remove(&date);
            let view = DailyData {
                workout: log.as_ref().map(|l| l.name.clone()),
                cardio: log.as_ref().and_then(|l| l.cardio.clone()),
                weight: log.as_ref().and_then(|l| l.weight),
                habits,
                mood: moods.get(&date).copied(),
            };

            DailyView {
                day: date.day(),
                view,
            }
        })
        .collect()
}

/// Merge one month of notes and todos into exactly `days_in_month` entries.
pub fn build_daily_notes(month: YearMonth, sources: NoteSources) -> Vec<DailyNote> {
    let mut notes: HashMap<NaiveDate, String> = sources
        .notes
        .into_iter()
        .map(|n| (n.date, n.text))
        .collect();

    let mut todos: HashMap<NaiveDate, Vec<Todo>> = HashMap::new();
    for todo in sources.todos {
        todos.entry(todo.date).or_default().push(todo);
    }

    month
        .dates()
        .map(|date| {
            let mut day_todos = todos.remove(&date).unwrap_or_default();
            day_todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            DailyNote {
                day: date.day(),
                note: notes.remove(&date),
                todos: day_todos,
            }
        })
        .collect()
}
