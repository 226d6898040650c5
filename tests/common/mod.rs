// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use daybook::config::Config;
use daybook::db::Database;
use daybook::routes::create_router;
use daybook::AppState;
use std::sync::Arc;
use uuid::Uuid;

/// Fresh, migrated in-memory database.
#[allow(dead_code)]
pub async fn test_db() -> Database {
    Database::in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// File-backed database in a temporary directory, with a real pool, for
/// tests that need more than one connection. Keep the `TempDir` alive.
#[allow(dead_code)]
pub async fn test_file_db(max_connections: u32) -> (Database, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("daybook.db");
    let config = Config {
        database_url: format!("sqlite://{}", path.display()),
        db_max_connections: max_connections,
        db_busy_timeout_ms: 10_000,
        ..Config::test_default()
    };
    let db = Database::connect(&config)
        .await
        .expect("Failed to open file database");
    (db, dir)
}

/// Create a test app backed by an in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db().await;
    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state)
}

/// Create a session token for `user_id`.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: Uuid, signing_key: &[u8]) -> String {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = daybook::middleware::auth::Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 86400,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .expect("Failed to create JWT")
}
