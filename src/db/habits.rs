// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habits and their per-date completions.

use crate::db::Database;
use crate::error::AppError;
use crate::models::{Habit, HabitCompletion, HabitStatus, WeekdaySet};
use chrono::{Datelike, NaiveDate, Utc};
use std::collections::HashMap;
use uuid::Uuid;

const HABIT_COLUMNS_SQL: &str =
    "SELECT id, user_id, name, scheduled_days, created_at, updated_at FROM habits";

const COMPLETION_COLUMNS_SQL: &str =
    "SELECT id, habit_id, user_id, date, completed, created_at, updated_at FROM habit_completions";

impl Database {
    // ─── Habit Operations ────────────────────────────────────────

    pub async fn list_habits(&self, user_id: Uuid) -> Result<Vec<Habit>, AppError> {
        let sql = format!("{} WHERE user_id = ? ORDER BY created_at", HABIT_COLUMNS_SQL);
        Ok(sqlx::query_as::<_, Habit>(&sql)
            .bind(user_id)
            .fetch_all(self.pool())
            .await?)
    }

    pub async fn get_habit(&self, user_id: Uuid, habit_id: Uuid) -> Result<Option<Habit>, AppError> {
        let sql = format!("{} WHERE id = ? AND user_id = ?", HABIT_COLUMNS_SQL);
        Ok(sqlx::query_as::<_, Habit>(&sql)
            .bind(habit_id)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?)
    }

    pub async fn create_habit(
        &self,
        user_id: Uuid,
        name: &str,
        schedule: WeekdaySet,
    ) -> Result<Habit, AppError> {
        let now = Utc::now();
        let habit = Habit {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            schedule,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO habits (id, user_id, name, scheduled_days, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(habit.id)
        .bind(habit.user_id)
        .bind(&habit.name)
        .bind(habit.schedule.encode())
        .bind(habit.created_at)
        .bind(habit.updated_at)
        .execute(self.pool())
        .await?;

        tracing::debug!(%user_id, habit_id = %habit.id, "Habit created");
        Ok(habit)
    }

    /// Apply `edit` to a habit and persist its name and schedule (always in
    /// the names form). Read, edit and write share one write-locked
    /// transaction; if `edit` fails nothing is written.
    pub async fn edit_habit<T>(
        &self,
        user_id: Uuid,
        habit_id: Uuid,
        edit: impl FnOnce(&mut Habit) -> Result<T, AppError>,
    ) -> Result<(Habit, T), AppError> {
        let mut tx = self.pool().begin().await?;

        let touched = sqlx::query("UPDATE habits SET updated_at = ? WHERE id = ? AND user_id = ?")
            .bind(Utc::now())
            .bind(habit_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if touched != 1 {
            return Err(habit_not_found(habit_id));
        }

        let sql = format!("{} WHERE id = ? AND user_id = ?", HABIT_COLUMNS_SQL);
        let mut habit = sqlx::query_as::<_, Habit>(&sql)
            .bind(habit_id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let outcome = edit(&mut habit)?;

        sqlx::query("UPDATE habits SET name = ?, scheduled_days = ? WHERE id = ? AND user_id = ?")
            .bind(&habit.name)
            .bind(habit.schedule.encode())
            .bind(habit_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((habit, outcome))
    }

    /// Delete a habit; its completions go with it (foreign key cascade).
    pub async fn delete_habit(&self, user_id: Uuid, habit_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM habits WHERE id = ? AND user_id = ?")
            .bind(habit_id)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() == 1)
    }

    // ─── Completions ─────────────────────────────────────────────

    pub async fn get_completion(
        &self,
        habit_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<HabitCompletion>, AppError> {
        let sql = format!(
            "{} WHERE habit_id = ? AND user_id = ? AND date = ?",
            COMPLETION_COLUMNS_SQL
        );
        Ok(sqlx::query_as::<_, HabitCompletion>(&sql)
            .bind(habit_id)
            .bind(user_id)
            .bind(date)
            .fetch_optional(self.pool())
            .await?)
    }

    /// All of a user's completion records with `from <= date <= to`.
    pub async fn completions_between(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HabitCompletion>, AppError> {
        let sql = format!(
            "{} WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date",
            COMPLETION_COLUMNS_SQL
        );
        Ok(sqlx::query_as::<_, HabitCompletion>(&sql)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(self.pool())
            .await?)
    }

    /// Flip a habit's completion on `date`. A first toggle records it as done.
    pub async fn toggle_completion(
        &self,
        user_id: Uuid,
        habit_id: Uuid,
        date: NaiveDate,
    ) -> Result<HabitCompletion, AppError> {
        self.require_habit(user_id, habit_id).await?;

        let now = Utc::now();
        let completion = sqlx::query_as::<_, HabitCompletion>(
            "INSERT INTO habit_completions (id, habit_id, user_id, date, completed, created_at, updated_at)
             VALUES (?, ?, ?, ?, 1, ?, ?)
             ON CONFLICT (habit_id, date) DO UPDATE SET
                 completed = NOT habit_completions.completed,
                 updated_at = excluded.updated_at
             RETURNING id, habit_id, user_id, date, completed, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(habit_id)
        .bind(user_id)
        .bind(date)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await?;

        tracing::debug!(
            %user_id,
            %habit_id,
            %date,
            completed = completion.completed,
            "Habit completion toggled"
        );
        Ok(completion)
    }

    /// Habits due on `date`, each with whether it was completed that day.
    pub async fn habits_due_on(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<HabitStatus>, AppError> {
        let weekday = date.weekday();
        let habits = self.list_habits(user_id).await?;
        let completed: HashMap<Uuid, bool> = self
            .completions_between(user_id, date, date)
            .await?
            .into_iter()
            .map(|c| (c.habit_id, c.completed))
            .collect();

        Ok(habits
            .into_iter()
            .filter(|h| h.schedule.contains(weekday))
            .map(|habit| {
                let completed = completed.get(&habit.id).copied().unwrap_or(false);
                HabitStatus { habit, completed }
            })
            .collect())
    }

    async fn require_habit(&self, user_id: Uuid, habit_id: Uuid) -> Result<Habit, AppError> {
        self.get_habit(user_id, habit_id)
            .await?
            .ok_or_else(|| habit_not_found(habit_id))
    }
}

pub(crate) fn habit_not_found(habit_id: Uuid) -> AppError {
    AppError::NotFound(format!("Habit {} not found", habit_id))
}
