// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Monthly rollups against a real (in-memory) store.

use chrono::{NaiveDate, Weekday};
use daybook::db::workout_logs::WorkoutLogInput;
use daybook::error::AppError;
use daybook::models::{Cardio, WeekdaySet};
use daybook::services::RollupService;
use uuid::Uuid;

mod common;

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_month_has_one_entry_per_day() {
    let db = common::test_db().await;
    let rollups = RollupService::new(db);
    let user_id = Uuid::new_v4();

    for (month, days) in [("2024-02", 29), ("2025-02", 28), ("2025-04", 30), ("2025-12", 31)] {
        let views = rollups.rollup_month(user_id, month).await.unwrap();
        assert_eq!(views.len(), days, "{month}");
        for (idx, view) in views.iter().enumerate() {
            assert_eq!(view.day, idx as u32 + 1);
        }
    }
}

#[tokio::test]
async fn test_empty_month_has_no_fields() {
    let db = common::test_db().await;
    let rollups = RollupService::new(db);

    let views = rollups
        .rollup_month(Uuid::new_v4(), "2025-06")
        .await
        .unwrap();
    for view in &views {
        assert!(view.view.workout.is_none());
        assert!(view.view.cardio.is_none());
        assert!(view.view.weight.is_none());
        assert!(view.view.mood.is_none());
        assert_eq!(view.view.habits.to_string(), "0/0");
    }
}

#[tokio::test]
async fn test_monday_habit_completed() {
    let db = common::test_db().await;
    let user_id = Uuid::new_v4();
    let schedule: WeekdaySet = [Weekday::Mon].into_iter().collect();
    let habit = db.create_habit(user_id, "Run", schedule).await.unwrap();

    // 2025-03-03 is a Monday
    db.toggle_completion(user_id, habit.id, date("2025-03-03"))
        .await
        .unwrap();

    let views = RollupService::new(db)
        .rollup_month(user_id, "2025-03")
        .await
        .unwrap();
    assert_eq!(views[2].view.habits.to_string(), "1/1");
    // Next Monday: due, not completed
    assert_eq!(views[9].view.habits.to_string(), "0/1");
    // Tuesday: not due
    assert_eq!(views[3].view.habits.to_string(), "0/0");
}

#[tokio::test]
async fn test_legacy_schedule_is_honoured() {
    let db = common::test_db().await;
    let user_id = Uuid::new_v4();
    let habit = db
        .create_habit(user_id, "Legacy", WeekdaySet::EMPTY)
        .await
        .unwrap();

    sqlx::query("UPDATE habits SET scheduled_days = ? WHERE id = ?")
        .bind("[false,true,false,false,false,false,false]")
        .bind(habit.id)
        .execute(db.pool())
        .await
        .unwrap();

    let views = RollupService::new(db)
        .rollup_month(user_id, "2025-03")
        .await
        .unwrap();
    assert_eq!(views[2].view.habits.to_string(), "0/1");
    assert_eq!(views[3].view.habits.to_string(), "0/0");
}

#[tokio::test]
async fn test_toggle_twice_uncompletes() {
    let db = common::test_db().await;
    let user_id = Uuid::new_v4();
    let schedule: WeekdaySet = [Weekday::Mon].into_iter().collect();
    let habit = db.create_habit(user_id, "Run", schedule).await.unwrap();
    let monday = date("2025-03-03");

    let first = db.toggle_completion(user_id, habit.id, monday).await.unwrap();
    let second = db.toggle_completion(user_id, habit.id, monday).await.unwrap();
    assert!(first.completed);
    assert!(!second.completed);
    assert_eq!(first.id, second.id);

    let rows = db.completions_between(user_id, monday, monday).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_mood_zero_and_workout_fields() {
    let db = common::test_db().await;
    let user_id = Uuid::new_v4();
    let day = date("2025-05-10");

    db.upsert_mood_rating(user_id, day, 0).await.unwrap();
    db.upsert_workout_log(
        user_id,
        day,
        &WorkoutLogInput {
            name: "Pull".to_string(),
            completed_exercises: vec!["Row".to_string()],
            cardio: Some(Cardio {
                name: "Rower".to_string(),
                minutes: 15,
            }),
            weight: Some(72.3),
        },
    )
    .await
    .unwrap();

    let views = RollupService::new(db)
        .rollup_month(user_id, "2025-05")
        .await
        .unwrap();
    let view = &views[9].view;
    assert_eq!(view.mood, Some(0));
    assert_eq!(view.workout.as_deref(), Some("Pull"));
    assert_eq!(
        view.cardio,
        Some(Cardio {
            name: "Rower".to_string(),
            minutes: 15
        })
    );
    assert_eq!(view.weight, Some(72.3));
    assert!(views[10].view.mood.is_none());
}

#[tokio::test]
async fn test_other_users_data_is_invisible() {
    let db = common::test_db().await;
    let owner = Uuid::new_v4();
    let day = date("2025-05-10");
    db.upsert_mood_rating(owner, day, 7).await.unwrap();

    let views = RollupService::new(db)
        .rollup_month(Uuid::new_v4(), "2025-05")
        .await
        .unwrap();
    assert!(views.iter().all(|v| v.view.mood.is_none()));
}

#[tokio::test]
async fn test_invalid_month_is_rejected() {
    let db = common::test_db().await;
    let rollups = RollupService::new(db);

    for month in ["2024-13", "2024-1", "abcd-ef", "2024-00", ""] {
        let err = rollups
            .rollup_month(Uuid::new_v4(), month)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)), "{month}");
    }
}

#[tokio::test]
async fn test_notes_month() {
    let db = common::test_db().await;
    let user_id = Uuid::new_v4();
    let day = date("2025-01-20");

    db.upsert_note(user_id, day, "first").await.unwrap();
    db.upsert_note(user_id, day, "second").await.unwrap();
    db.create_todo(user_id, day, "buy milk").await.unwrap();
    db.create_todo(user_id, date("2025-02-01"), "next month")
        .await
        .unwrap();

    let notes = RollupService::new(db)
        .rollup_notes_month(user_id, "2025-01")
        .await
        .unwrap();
    assert_eq!(notes.len(), 31);
    assert_eq!(notes[19].day, 20);
    assert_eq!(notes[19].note.as_deref(), Some("second"));
    assert_eq!(notes[19].todos.len(), 1);
    assert_eq!(notes[19].todos[0].text, "buy milk");
    assert!(notes.iter().filter(|n| n.day != 20).all(|n| n.todos.is_empty()));
}

#[tokio::test]
async fn test_store_error_aborts_rollup() {
    let db = common::test_db().await;
    let rollups = RollupService::new(db.clone());
    let user_id = Uuid::new_v4();
    db.upsert_mood_rating(user_id, date("2025-03-03"), 7).await.unwrap();

    sqlx::query("DROP TABLE mood_ratings")
        .execute(db.pool())
        .await
        .unwrap();

    let err = rollups.rollup_month(user_id, "2025-03").await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
}
