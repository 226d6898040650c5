// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod habit;
pub mod journal;
pub mod schedule;
pub mod view;
pub mod workout;

pub use habit::{Habit, HabitCompletion, HabitStatus};
pub use journal::{MoodRating, Note, Todo};
pub use schedule::WeekdaySet;
pub use view::{DailyData, DailyNote, DailyView, HabitTally};
pub use workout::{Cardio, Exercise, WorkoutLog, WorkoutPlan};
