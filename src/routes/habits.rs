// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit routes: CRUD, schedule toggles and daily completions.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::schedule::weekday_from_name;
use crate::models::{Habit, HabitCompletion, HabitStatus, WeekdaySet};
use crate::routes::parse_id;
use crate::time_utils::parse_date;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/habits", get(list_habits).post(create_habit))
        .route("/api/habits/{id}", put(update_habit).delete(delete_habit))
        .route("/api/habits/{id}/days/{weekday}", post(toggle_day))
        .route("/api/habits/due/{date}", get(habits_due))
        .route(
            "/api/habits/{id}/completions/{date}",
            get(get_completion).post(toggle_completion),
        )
}

#[derive(Deserialize, Validate)]
struct HabitRequest {
    #[validate(length(min = 1, max = 200))]
    name: String,
    /// Weekday names or the legacy boolean array
    #[serde(default)]
    schedule: WeekdaySet,
}

async fn list_habits(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Habit>>> {
    Ok(Json(state.db.list_habits(user.user_id).await?))
}

async fn create_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<HabitRequest>,
) -> Result<(StatusCode, Json<Habit>)> {
    body.validate()?;
    let habit = state
        .db
        .create_habit(user.user_id, body.name.trim(), body.schedule)
        .await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

async fn update_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<HabitRequest>,
) -> Result<Json<Habit>> {
    body.validate()?;
    let habit_id = parse_id(&id)?;
    let name = body.name.trim().to_string();
    let (habit, ()) = state
        .db
        .edit_habit(user.user_id, habit_id, |habit| {
            habit.name = name;
            habit.schedule = body.schedule;
            Ok(())
        })
        .await?;
    Ok(Json(habit))
}

async fn delete_habit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let habit_id = parse_id(&id)?;
    if !state.db.delete_habit(user.user_id, habit_id).await? {
        return Err(AppError::NotFound(format!("Habit {} not found", habit_id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Add or remove one weekday from a habit's schedule.
async fn toggle_day(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, weekday)): Path<(String, String)>,
) -> Result<Json<Habit>> {
    let habit_id = parse_id(&id)?;
    let day = weekday_from_name(&weekday)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid weekday '{}'", weekday)))?;

    let (habit, scheduled) = state
        .db
        .edit_habit(user.user_id, habit_id, |habit| Ok(habit.schedule.toggle(day)))
        .await?;

    tracing::debug!(user_id = %user.user_id, %habit_id, %weekday, scheduled, "Habit day toggled");
    Ok(Json(habit))
}

async fn habits_due(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> Result<Json<Vec<HabitStatus>>> {
    let date = parse_date(&date)?;
    Ok(Json(state.db.habits_due_on(user.user_id, date).await?))
}

async fn get_completion(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, date)): Path<(String, String)>,
) -> Result<Json<Option<HabitCompletion>>> {
    let habit_id = parse_id(&id)?;
    let date = parse_date(&date)?;
    Ok(Json(
        state.db.get_completion(habit_id, user.user_id, date).await?,
    ))
}

async fn toggle_completion(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, date)): Path<(String, String)>,
) -> Result<Json<HabitCompletion>> {
    let habit_id = parse_id(&id)?;
    let date = parse_date(&date)?;
    Ok(Json(
        state.db.toggle_completion(user.user_id, habit_id, date).await?,
    ))
}

