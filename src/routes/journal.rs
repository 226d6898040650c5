// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dated entries: todos, notes, mood ratings and workout logs.

use crate::db::workout_logs::WorkoutLogInput;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Cardio, MoodRating, Note, Todo, WorkoutLog};
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
        .route("/api/todos", post(create_todo))
        .route("/api/todos/{date}", get(list_todos))
        .route("/api/todos/item/{id}", put(update_todo).delete(delete_todo))
        .route(
            "/api/notes/{date}",
            get(get_note).put(put_note).delete(delete_note),
        )
        .route("/api/mood/{date}", get(get_mood).put(put_mood))
        .route(
            "/api/workout-logs/{date}",
            get(get_workout_log).put(put_workout_log),
        )
}

// ─── Todos ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct CreateTodoRequest {
    #[validate(length(min = 1, max = 500))]
    text: String,
    date: String,
}

#[derive(Deserialize, Validate)]
struct UpdateTodoRequest {
    #[validate(length(min = 1, max = 500))]
    text: Option<String>,
    completed: Option<bool>,
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Todo>>> {
    let date = parse_date(&date)?;
    Ok(Json(state.db.list_todos(user.user_id, date).await?))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>)> {
    body.validate()?;
    let date = parse_date(&body.date)?;
    let todo = state
        .db
        .create_todo(user.user_id, date, body.text.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>> {
    body.validate()?;
    let todo_id = parse_id(&id)?;
    let text = body.text.as_deref().map(str::trim);
    let todo = state
        .db
        .update_todo(user.user_id, todo_id, text, body.completed)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Todo {} not found", todo_id)))?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let todo_id = parse_id(&id)?;
    if !state.db.delete_todo(user.user_id, todo_id).await? {
        return Err(AppError::NotFound(format!("Todo {} not found", todo_id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ─── Notes ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct NoteRequest {
    #[validate(length(max = 10000))]
    text: String,
}

async fn get_note(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> Result<Json<Option<Note>>> {
    let date = parse_date(&date)?;
    Ok(Json(state.db.get_note(user.user_id, date).await?))
}

async fn put_note(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
    Json(body): Json<NoteRequest>,
) -> Result<Json<Note>> {
    body.validate()?;
    let date = parse_date(&date)?;
    Ok(Json(state.db.upsert_note(user.user_id, date, &body.text).await?))
}

async fn delete_note(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> Result<StatusCode> {
    let date = parse_date(&date)?;
    if !state.db.delete_note(user.user_id, date).await? {
        return Err(AppError::NotFound(format!("No note on {}", date)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ─── Mood ────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct MoodRequest {
    #[validate(range(min = 0, max = 10))]
    rating: i64,
}

async fn get_mood(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> Result<Json<Option<MoodRating>>> {
    let date = parse_date(&date)?;
    Ok(Json(state.db.get_mood_rating(user.user_id, date).await?))
}

async fn put_mood(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
    Json(body): Json<MoodRequest>,
) -> Result<Json<MoodRating>> {
    body.validate()?;
    let date = parse_date(&date)?;
    Ok(Json(
        state
            .db
            .upsert_mood_rating(user.user_id, date, body.rating)
            .await?,
    ))
}

// ─── Workout Logs ────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct WorkoutLogRequest {
    #[validate(length(min = 1, max = 200))]
    name: String,
    #[serde(default)]
    completed_exercises: Vec<String>,
    cardio: Option<Cardio>,
    #[validate(range(min = 0.0, max = 1000.0))]
    weight: Option<f64>,
}

async fn get_workout_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> Result<Json<Option<WorkoutLog>>> {
    let date = parse_date(&date)?;
    Ok(Json(state.db.get_workout_log(user.user_id, date).await?))
}

async fn put_workout_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
    Json(body): Json<WorkoutLogRequest>,
) -> Result<Json<WorkoutLog>> {
    body.validate()?;
    let date = parse_date(&date)?;
    let input = WorkoutLogInput {
        name: body.name.trim().to_string(),
        completed_exercises: body.completed_exercises,
        cardio: body.cardio.filter(|c| !c.name.trim().is_empty()),
        weight: body.weight,
    };
    Ok(Json(
        state
            .db
            .upsert_workout_log(user.user_id, date, &input)
            .await?,
    ))
}
