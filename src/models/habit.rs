// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit and habit-completion models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::schedule::WeekdaySet;

/// A recurring habit owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Weekdays the habit recurs on (decoded from either stored shape)
    #[sqlx(rename = "scheduled_days", try_from = "String")]
    pub schedule: WeekdaySet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Completion state of one habit on one calendar date.
///
/// The store keeps at most one row per `(habit_id, date)`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HabitCompletion {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A habit due on a given date, with whether it was completed.
#[derive(Debug, Clone, Serialize)]
pub struct HabitStatus {
    pub habit: Habit,
    pub completed: bool,
}

impl From<String> for WeekdaySet {
    fn from(raw: String) -> Self {
        WeekdaySet::decode(&raw)
    }
}
