//! Database layer (SQLite via sqlx).
//!
//! Each collection's operations live in their own module as `impl Database`
//! blocks. Every query is scoped by `user_id`.

pub mod database;
pub mod habits;
pub mod journal;
pub mod workout_logs;
pub mod workouts;

pub use database::Database;
pub use workouts::RankMove;
