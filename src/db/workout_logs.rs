// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily workout logs.

use crate::db::Database;
use crate::error::AppError;
use crate::models::workout::WorkoutLogRow;
use crate::models::{Cardio, WorkoutLog};
use chrono::{NaiveDate, Utc};
use sqlx::types::Json;
use uuid::Uuid;

const LOG_COLUMNS_SQL: &str = "SELECT id, user_id, date, name, completed_exercises, cardio_name, cardio_minutes, weight, created_at, updated_at FROM workout_logs";

/// Fields a caller supplies when recording a day's workout.
#[derive(Debug, Clone, Default)]
pub struct WorkoutLogInput {
    pub name: String,
    pub completed_exercises: Vec<String>,
    pub cardio: Option<Cardio>,
    pub weight: Option<f64>,
}

impl Database {
    pub async fn get_workout_log(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<WorkoutLog>, AppError> {
        let sql = format!("{} WHERE user_id = ? AND date = ?", LOG_COLUMNS_SQL);
        let row = sqlx::query_as::<_, WorkoutLogRow>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.map(WorkoutLog::from))
    }

    pub async fn workout_logs_between(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WorkoutLog>, AppError> {
        let sql = format!(
            "{} WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date",
            LOG_COLUMNS_SQL
        );
        let rows = sqlx::query_as::<_, WorkoutLogRow>(&sql)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(WorkoutLog::from).collect())
    }

    /// Create or replace the log for `date`.
    pub async fn upsert_workout_log(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        input: &WorkoutLogInput,
    ) -> Result<WorkoutLog, AppError> {
        let now = Utc::now();
        let (cardio_name, cardio_minutes) = match &input.cardio {
            Some(c) => (Some(c.name.as_str()), Some(i64::from(c.minutes))),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, WorkoutLogRow>(
            "INSERT INTO workout_logs
                 (id, user_id, date, name, completed_exercises, cardio_name, cardio_minutes, weight, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (user_id, date) DO UPDATE SET
                 name = excluded.name,
                 completed_exercises = excluded.completed_exercises,
                 cardio_name = excluded.cardio_name,
                 cardio_minutes = excluded.cardio_minutes,
                 weight = excluded.weight,
                 updated_at = excluded.updated_at
             RETURNING id, user_id, date, name, completed_exercises, cardio_name, cardio_minutes, weight, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(&input.name)
        .bind(Json(&input.completed_exercises))
        .bind(cardio_name)
        .bind(cardio_minutes)
        .bind(input.weight)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await?;

        tracing::debug!(%user_id, %date, "Workout log saved");
        Ok(row.into())
    }
}
