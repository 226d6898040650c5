// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Monthly rollup routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{DailyNote, DailyView};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/view/{month}", get(month_view))
        .route("/api/notes/month/{month}", get(month_notes))
}

/// One entry per day of the month.
async fn month_view(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(month): Path<String>,
) -> Result<Json<Vec<DailyView>>> {
    let views = state.rollups.rollup_month(user.user_id, &month).await?;
    Ok(Json(views))
}

async fn month_notes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(month): Path<String>,
) -> Result<Json<Vec<DailyNote>>> {
    let notes = state
        .rollups
        .rollup_notes_month(user.user_id, &month)
        .await?;
    Ok(Json(notes))
}
