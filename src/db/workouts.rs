// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout plans and their per-user rank order.
//!
//! A user's plans always carry ranks (`display_order`) forming exactly
//! `1..=N`. Every rank mutation (create, delete, move up, move down) runs in
//! one transaction whose first statement writes to the user's plans. That
//! write takes SQLite's database write lock before any rank is read, so two
//! rank mutations never interleave. Any error, or dropping the future
//! mid-way, drops the transaction uncommitted and SQLite rolls it back.

use crate::db::Database;
use crate::error::AppError;
use crate::models::workout::DEFAULT_PLAN_DAY;
use crate::models::WorkoutPlan;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Sqlite, SqliteConnection, Transaction};
use uuid::Uuid;

const PLAN_COLUMNS_SQL: &str = "SELECT id, user_id, name, day, exercises, display_order, created_at, updated_at FROM workouts";

/// Result of a move request. Both variants are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMove {
    /// The plan swapped ranks with its neighbour.
    Swapped { with: Uuid },
    /// The plan was already first (up) or last (down); nothing changed.
    AtBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl Database {
    // ─── Plan Operations ─────────────────────────────────────────

    /// All of a user's plans in rank order.
    pub async fn list_workouts(&self, user_id: Uuid) -> Result<Vec<WorkoutPlan>, AppError> {
        let sql = format!(
            "{} WHERE user_id = ? ORDER BY display_order, created_at",
            PLAN_COLUMNS_SQL
        );
        Ok(sqlx::query_as::<_, WorkoutPlan>(&sql)
            .bind(user_id)
            .fetch_all(self.pool())
            .await?)
    }

    pub async fn get_workout(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Option<WorkoutPlan>, AppError> {
        let sql = format!("{} WHERE id = ? AND user_id = ?", PLAN_COLUMNS_SQL);
        Ok(sqlx::query_as::<_, WorkoutPlan>(&sql)
            .bind(plan_id)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?)
    }

    /// Create a plan at the bottom of the user's list (rank `max + 1`).
    pub async fn create_workout(
        &self,
        user_id: Uuid,
        name: &str,
        day: Option<&str>,
    ) -> Result<WorkoutPlan, AppError> {
        let mut tx = self.begin_rank_write(user_id).await?;

        let rank = max_workout_rank(&mut tx, user_id).await? + 1;
        let now = Utc::now();
        let plan = WorkoutPlan {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            day: day.unwrap_or(DEFAULT_PLAN_DAY).to_string(),
            exercises: Vec::new(),
            display_order: rank,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO workouts (id, user_id, name, day, exercises, display_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(plan.id)
        .bind(plan.user_id)
        .bind(&plan.name)
        .bind(&plan.day)
        .bind(Json(&plan.exercises))
        .bind(plan.display_order)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(%user_id, plan_id = %plan.id, rank, "Workout plan created");
        Ok(plan)
    }

    /// Apply `edit` to a plan and persist its name, day label and exercises.
    ///
    /// The read, the edit and the write run in one transaction that holds the
    /// write lock from its first statement, so overlapping edits of the same
    /// plan apply one after the other. If `edit` fails nothing is written.
    /// Rank is never touched here.
    pub async fn edit_workout<T>(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        edit: impl FnOnce(&mut WorkoutPlan) -> Result<T, AppError>,
    ) -> Result<(WorkoutPlan, T), AppError> {
        let mut tx = self.pool().begin().await?;
        let now = Utc::now();

        let touched = sqlx::query("UPDATE workouts SET updated_at = ? WHERE id = ? AND user_id = ?")
            .bind(now)
            .bind(plan_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if touched != 1 {
            return Err(plan_not_found(plan_id));
        }

        let sql = format!("{} WHERE id = ? AND user_id = ?", PLAN_COLUMNS_SQL);
        let mut plan = sqlx::query_as::<_, WorkoutPlan>(&sql)
            .bind(plan_id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let outcome = edit(&mut plan)?;

        sqlx::query("UPDATE workouts SET name = ?, day = ?, exercises = ? WHERE id = ? AND user_id = ?")
            .bind(&plan.name)
            .bind(&plan.day)
            .bind(Json(&plan.exercises))
            .bind(plan_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(%user_id, %plan_id, exercises = plan.exercises.len(), "Workout plan edited");
        Ok((plan, outcome))
    }

    /// Delete a plan and close the gap it leaves in the rank order.
    pub async fn delete_workout(&self, user_id: Uuid, plan_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.begin_rank_write(user_id).await?;

        let rank = workout_rank(&mut tx, user_id, plan_id)
            .await?
            .ok_or_else(|| plan_not_found(plan_id))?;

        sqlx::query("DELETE FROM workouts WHERE id = ? AND user_id = ?")
            .bind(plan_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let shifted = sqlx::query(
            "UPDATE workouts SET display_order = display_order - 1
             WHERE user_id = ? AND display_order > ?",
        )
        .bind(user_id)
        .bind(rank)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::info!(%user_id, %plan_id, rank, shifted, "Workout plan deleted");
        Ok(())
    }

    // ─── Rank Moves ──────────────────────────────────────────────

    /// Swap a plan with the one ranked directly above it.
    pub async fn move_workout_up(&self, user_id: Uuid, plan_id: Uuid) -> Result<RankMove, AppError> {
        self.move_workout(user_id, plan_id, Direction::Up).await
    }

    /// Swap a plan with the one ranked directly below it.
    pub async fn move_workout_down(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<RankMove, AppError> {
        self.move_workout(user_id, plan_id, Direction::Down).await
    }

    async fn move_workout(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        direction: Direction,
    ) -> Result<RankMove, AppError> {
        let mut tx = self.begin_rank_write(user_id).await?;

        let rank = workout_rank(&mut tx, user_id, plan_id)
            .await?
            .ok_or_else(|| plan_not_found(plan_id))?;

        let target_rank = match direction {
            Direction::Up if rank <= 1 => None,
            Direction::Up => Some(rank - 1),
            Direction::Down => {
                let max = max_workout_rank(&mut tx, user_id).await?;
                (rank < max).then_some(rank + 1)
            }
        };

        let Some(target_rank) = target_rank else {
            tx.rollback().await?;
            tracing::debug!(%user_id, %plan_id, rank, ?direction, "Workout already at boundary");
            return Ok(RankMove::AtBoundary);
        };

        // A missing neighbour means the ranks have a gap; treat it as the edge.
        let Some(neighbour_id) = workout_at_rank(&mut tx, user_id, target_rank).await? else {
            tx.rollback().await?;
            tracing::warn!(
                %user_id,
                %plan_id,
                rank,
                target_rank,
                "No workout at neighbouring rank, leaving order unchanged"
            );
            return Ok(RankMove::AtBoundary);
        };

        set_workout_rank(&mut tx, user_id, neighbour_id, rank).await?;
        set_workout_rank(&mut tx, user_id, plan_id, target_rank).await?;

        tx.commit().await?;

        tracing::info!(
            %user_id,
            %plan_id,
            %neighbour_id,
            from = rank,
            to = target_rank,
            "Workout rank swapped"
        );
        Ok(RankMove::Swapped { with: neighbour_id })
    }

    /// Begin a transaction that already holds the write lock.
    ///
    /// The no-op UPDATE is a write statement, so SQLite acquires its write
    /// lock even when the user has no plans yet.
    async fn begin_rank_write(
        &self,
        user_id: Uuid,
    ) -> Result<Transaction<'static, Sqlite>, AppError> {
        let mut tx = self.pool().begin().await?;
        sqlx::query("UPDATE workouts SET display_order = display_order WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

// ─── Rank Helpers (run on a caller-owned transaction) ──────────────

/// Current rank of a plan, if the user owns it.
pub(crate) async fn workout_rank(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    plan_id: Uuid,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT display_order FROM workouts WHERE id = ? AND user_id = ?")
        .bind(plan_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
}

/// Highest rank among the user's plans, 0 if there are none.
pub(crate) async fn max_workout_rank(
    conn: &mut SqliteConnection,
    user_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COALESCE(MAX(display_order), 0) FROM workouts WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
}

async fn workout_at_rank(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    rank: i64,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM workouts WHERE user_id = ? AND display_order = ? LIMIT 1")
        .bind(user_id)
        .bind(rank)
        .fetch_optional(&mut *conn)
        .await
}

/// Set one plan's rank. Fails unless exactly one row changed.
pub(crate) async fn set_workout_rank(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    plan_id: Uuid,
    rank: i64,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE workouts SET display_order = ?, updated_at = ? WHERE id = ? AND user_id = ?",
    )
    .bind(rank)
    .bind(Utc::now())
    .bind(plan_id)
    .bind(user_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() != 1 {
        return Err(AppError::Database(format!(
            "Rank update for workout {} touched {} rows",
            plan_id,
            result.rows_affected()
        )));
    }
    Ok(())
}

fn plan_not_found(plan_id: Uuid) -> AppError {
    AppError::NotFound(format!("Workout {} not found", plan_id))
}

