// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout plans (ordered per user) and daily workout logs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Day label given to plans created without one.
pub const DEFAULT_PLAN_DAY: &str = "N/A";

/// A workout plan. `display_order` is the plan's rank in the user's list.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub day: String,
    #[sqlx(json)]
    pub exercises: Vec<Exercise>,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One exercise within a plan. `order` is 1-based and gapless within the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub order: u32,
    pub name: String,
}

impl WorkoutPlan {
    /// Append an exercise at the end of the plan.
    pub fn push_exercise(&mut self, name: String) {
        let order = self.exercises.len() as u32 + 1;
        self.exercises.push(Exercise { order, name });
    }

    /// Rename the exercise at `order`.
    /// Returns `false` if no exercise has that order.
    pub fn rename_exercise(&mut self, order: u32, name: String) -> bool {
        match self.exercises.iter_mut().find(|e| e.order == order) {
            Some(exercise) => {
                exercise.name = name;
                true
            }
            None => false,
        }
    }

    /// Remove the exercise at `order` and close the gap.
    /// Returns `false` if no exercise has that order.
    pub fn remove_exercise(&mut self, order: u32) -> bool {
        let before = self.exercises.len();
        self.exercises.retain(|e| e.order != order);
        if self.exercises.len() == before {
            return false;
        }
        for (idx, exercise) in self.exercises.iter_mut().enumerate() {
            exercise.order = idx as u32 + 1;
        }
        true
    }
}

/// Cardio performed as part of a workout log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Cardio {
    pub name: String,
    pub minutes: u32,
}

/// What a user did on one date; at most one per user and date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    pub completed_exercises: Vec<String>,
    pub cardio: Option<Cardio>,
    pub weight: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat row shape of `workout_logs`.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct WorkoutLogRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    #[sqlx(json)]
    pub completed_exercises: Vec<String>,
    pub cardio_name: Option<String>,
    pub cardio_minutes: Option<i64>,
    pub weight: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkoutLogRow> for WorkoutLog {
    fn from(row: WorkoutLogRow) -> Self {
        let cardio = match (row.cardio_name, row.cardio_minutes) {
            (Some(name), Some(minutes)) if !name.is_empty() => {
                let minutes = u32::try_from(minutes).unwrap_or_else(|_| {
                    tracing::warn!(
                        log_id = %row.id,
                        minutes,
                        "Workout log has out-of-range cardio minutes, reading as 0"
                    );
                    0
                });
                Some(Cardio { name, minutes })
            }
            (Some(name), None) if !name.is_empty() => {
                tracing::warn!(
                    log_id = %row.id,
                    cardio = %name,
                    "Workout log has cardio without minutes, dropping cardio"
                );
                None
            }
            _ => None,
        };
        Self {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            name: row.name,
            completed_exercises: row.completed_exercises,
            cardio,
            weight: row.weight,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
