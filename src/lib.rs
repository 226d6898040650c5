// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daybook: personal habit, journal and workout tracking.
//!
//! This crate provides the backend API: per-user collections in SQLite,
//! monthly day-by-day rollups across them, and a rank-ordered list of
//! workout plans that stays dense under concurrent moves.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::RollupService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub rollups: RollupService,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let rollups = RollupService::new(db.clone());
        Self {
            config,
            db,
            rollups,
        }
    }
}
