// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Todos, notes and mood ratings, all keyed by calendar date.

use crate::db::Database;
use crate::error::AppError;
use crate::models::{MoodRating, Note, Todo};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

const TODO_COLUMNS_SQL: &str =
    "SELECT id, user_id, text, completed, date, created_at, updated_at FROM todos";
const NOTE_COLUMNS_SQL: &str = "SELECT id, user_id, date, text, created_at, updated_at FROM notes";
const MOOD_COLUMNS_SQL: &str =
    "SELECT id, user_id, date, rating, created_at, updated_at FROM mood_ratings";

impl Database {
    // ─── Todos ───────────────────────────────────────────────────

    /// A day's todos, newest first.
    pub async fn list_todos(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<Todo>, AppError> {
        let sql = format!(
            "{} WHERE user_id = ? AND date = ? ORDER BY created_at DESC",
            TODO_COLUMNS_SQL
        );
        Ok(sqlx::query_as::<_, Todo>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_all(self.pool())
            .await?)
    }

    /// Todos dated `from..=to`, ordered by date then newest first.
    pub async fn todos_between(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Todo>, AppError> {
        let sql = format!(
            "{} WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date, created_at DESC",
            TODO_COLUMNS_SQL
        );
        Ok(sqlx::query_as::<_, Todo>(&sql)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(self.pool())
            .await?)
    }

    pub async fn create_todo(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        text: &str,
    ) -> Result<Todo, AppError> {
        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4(),
            user_id,
            text: text.to_string(),
            completed: false,
            date,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO todos (id, user_id, text, completed, date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(todo.id)
        .bind(todo.user_id)
        .bind(&todo.text)
        .bind(todo.completed)
        .bind(todo.date)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(self.pool())
        .await?;

        Ok(todo)
    }

    /// Change a todo's text and/or completion in one statement; fields
    /// passed as `None` keep their stored value. `None` if the todo does
    /// not exist for this user.
    pub async fn update_todo(
        &self,
        user_id: Uuid,
        todo_id: Uuid,
        text: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Option<Todo>, AppError> {
        Ok(sqlx::query_as::<_, Todo>(
            "UPDATE todos SET
                 text = COALESCE(?, text),
                 completed = COALESCE(?, completed),
                 updated_at = ?
             WHERE id = ? AND user_id = ?
             RETURNING id, user_id, text, completed, date, created_at, updated_at",
        )
        .bind(text)
        .bind(completed)
        .bind(Utc::now())
        .bind(todo_id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?)
    }

    pub async fn delete_todo(&self, user_id: Uuid, todo_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
            .bind(todo_id)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() == 1)
    }

    // ─── Notes ───────────────────────────────────────────────────

    pub async fn get_note(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<Note>, AppError> {
        let sql = format!("{} WHERE user_id = ? AND date = ?", NOTE_COLUMNS_SQL);
        Ok(sqlx::query_as::<_, Note>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_optional(self.pool())
            .await?)
    }

    pub async fn notes_between(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Note>, AppError> {
        let sql = format!(
            "{} WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date",
            NOTE_COLUMNS_SQL
        );
        Ok(sqlx::query_as::<_, Note>(&sql)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(self.pool())
            .await?)
    }

    /// Create or replace the note for `date`.
    pub async fn upsert_note(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        text: &str,
    ) -> Result<Note, AppError> {
        let now = Utc::now();
        Ok(sqlx::query_as::<_, Note>(
            "INSERT INTO notes (id, user_id, date, text, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (user_id, date) DO UPDATE SET
                 text = excluded.text,
                 updated_at = excluded.updated_at
             RETURNING id, user_id, date, text, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(text)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await?)
    }

    pub async fn delete_note(&self, user_id: Uuid, date: NaiveDate) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM notes WHERE user_id = ? AND date = ?")
            .bind(user_id)
            .bind(date)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() == 1)
    }

    // ─── Mood Ratings ────────────────────────────────────────────

    pub async fn get_mood_rating(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<MoodRating>, AppError> {
        let sql = format!("{} WHERE user_id = ? AND date = ?", MOOD_COLUMNS_SQL);
        Ok(sqlx::query_as::<_, MoodRating>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_optional(self.pool())
            .await?)
    }

    pub async fn mood_ratings_between(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MoodRating>, AppError> {
        let sql = format!(
            "{} WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date",
            MOOD_COLUMNS_SQL
        );
        Ok(sqlx::query_as::<_, MoodRating>(&sql)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(self.pool())
            .await?)
    }

    /// Create or replace the rating for `date`.
    pub async fn upsert_mood_rating(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        rating: i64,
    ) -> Result<MoodRating, AppError> {
        let now = Utc::now();
        Ok(sqlx::query_as::<_, MoodRating>(
            "INSERT INTO mood_ratings (id, user_id, date, rating, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (user_id, date) DO UPDATE SET
                 rating = excluded.rating,
                 updated_at = excluded.updated_at
             RETURNING id, user_id, date, rating, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(rating)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await?)
    }
}
