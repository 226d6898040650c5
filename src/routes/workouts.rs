// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout plan routes: CRUD, rank moves and exercise editing.

use crate::db::RankMove;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::WorkoutPlan;
use crate::routes::parse_id;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
        .route("/api/workouts/{id}/move-up", post(move_up))
        .route("/api/workouts/{id}/move-down", post(move_down))
        .route("/api/workouts/{id}/exercises", post(add_exercise))
        .route(
            "/api/workouts/{id}/exercises/{order}",
            put(rename_exercise).delete(remove_exercise),
        )
}

// ─── Plans ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct CreateWorkoutRequest {
    #[validate(length(min = 1, max = 200))]
    name: String,
    #[validate(length(min = 1, max = 50))]
    day: Option<String>,
}

#[derive(Deserialize, Validate)]
struct UpdateWorkoutRequest {
    #[validate(length(min = 1, max = 200))]
    name: String,
    #[validate(length(min = 1, max = 50))]
    day: String,
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<WorkoutPlan>>> {
    Ok(Json(state.db.list_workouts(user.user_id).await?))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutPlan>)> {
    body.validate()?;
    let plan = state
        .db
        .create_workout(user.user_id, body.name.trim(), body.day.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutPlan>> {
    let plan_id = parse_id(&id)?;
    let plan = state
        .db
        .get_workout(user.user_id, plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", plan_id)))?;
    Ok(Json(plan))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateWorkoutRequest>,
) -> Result<Json<WorkoutPlan>> {
    body.validate()?;
    let plan_id = parse_id(&id)?;
    let name = body.name.trim().to_string();
    let (plan, ()) = state
        .db
        .edit_workout(user.user_id, plan_id, |plan| {
            plan.name = name;
            plan.day = body.day;
            Ok(())
        })
        .await?;
    Ok(Json(plan))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let plan_id = parse_id(&id)?;
    state.db.delete_workout(user.user_id, plan_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Rank Moves ──────────────────────────────────────────────

/// Outcome of a move request.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MoveResponse {
    /// `false` when the plan was already at the top (or bottom)
    pub moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swapped_with: Option<Uuid>,
}

impl From<RankMove> for MoveResponse {
    fn from(outcome: RankMove) -> Self {
        match outcome {
            RankMove::Swapped { with } => MoveResponse {
                moved: true,
                swapped_with: Some(with),
            },
            RankMove::AtBoundary => MoveResponse {
                moved: false,
                swapped_with: None,
            },
        }
    }
}

async fn move_up(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MoveResponse>> {
    let plan_id = parse_id(&id)?;
    let outcome = state.db.move_workout_up(user.user_id, plan_id).await?;
    Ok(Json(outcome.into()))
}

async fn move_down(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MoveResponse>> {
    let plan_id = parse_id(&id)?;
    let outcome = state.db.move_workout_down(user.user_id, plan_id).await?;
    Ok(Json(outcome.into()))
}

// ─── Exercises ───────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct ExerciseRequest {
    #[validate(length(min = 1, max = 200))]
    name: String,
}

async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<ExerciseRequest>,
) -> Result<Json<WorkoutPlan>> {
    body.validate()?;
    let plan_id = parse_id(&id)?;
    let name = body.name.trim().to_string();
    let (plan, ()) = state
        .db
        .edit_workout(user.user_id, plan_id, |plan| {
            plan.push_exercise(name);
            Ok(())
        })
        .await?;
    Ok(Json(plan))
}

async fn rename_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, order)): Path<(String, String)>,
    Json(body): Json<ExerciseRequest>,
) -> Result<Json<WorkoutPlan>> {
    body.validate()?;
    let plan_id = parse_id(&id)?;
    let order = parse_order(&order)?;
    let name = body.name.trim().to_string();
    let (plan, ()) = state
        .db
        .edit_workout(user.user_id, plan_id, |plan| {
            if plan.rename_exercise(order, name) {
                Ok(())
            } else {
                Err(exercise_not_found(order, plan_id))
            }
        })
        .await?;
    Ok(Json(plan))
}

async fn remove_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, order)): Path<(String, String)>,
) -> Result<Json<WorkoutPlan>> {
    let plan_id = parse_id(&id)?;
    let order = parse_order(&order)?;
    let (plan, ()) = state
        .db
        .edit_workout(user.user_id, plan_id, |plan| {
            if plan.remove_exercise(order) {
                Ok(())
            } else {
                Err(exercise_not_found(order, plan_id))
            }
        })
        .await?;
    Ok(Json(plan))
}

fn parse_order(raw: &str) -> Result<u32> {
    raw.parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid exercise order '{}'", raw)))
}

fn exercise_not_found(order: u32, plan_id: Uuid) -> AppError {
    AppError::NotFound(format!("Exercise {} not found in workout {}", order, plan_id))
}
