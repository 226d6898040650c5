// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite connection pool wrapper.
//!
//! Provides connection setup, schema migration and the pool handle used by
//! the typed per-collection operations in sibling modules.

use crate::config::Config;
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

const MEMORY_URL: &str = "sqlite::memory:";

/// Relational store client.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database named by `config.database_url` and apply migrations.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let in_memory = config.database_url.contains(":memory:");

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| AppError::Database(format!("Invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(config.db_busy_timeout_ms));

        // Under WAL, readers never block on a rank swap and only see committed ranks.
        let options = if in_memory {
            options
        } else {
            options.journal_mode(SqliteJournalMode::Wal)
        };

        // Every connection to `:memory:` is a separate database, so keep
        // exactly one and never let the pool recycle it.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.db_max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        let db = Self { pool };
        db.migrate().await?;

        tracing::info!(
            in_memory,
            max_connections = config.db_max_connections,
            "Connected to database"
        );

        Ok(db)
    }

    /// Fresh, migrated in-memory database (tests and local experiments).
    pub async fn in_memory() -> Result<Self, AppError> {
        let config = Config {
            database_url: MEMORY_URL.to_string(),
            ..Config::test_default()
        };
        Self::connect(&config).await
    }

    /// Apply embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;
        tracing::debug!("Schema migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
