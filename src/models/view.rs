// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Computed per-day rollups. These are built fresh for every request and
//! never stored.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::{Cardio, Todo};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Summary of one calendar day of a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyView {
    /// Day of month, 1-based
    pub day: u32,
    pub view: DailyData,
}

/// The merged facts for one day.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyData {
    /// Workout log name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardio: Option<Cardio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Due habits completed, rendered as `"<completed>/<total>"`
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub habits: HabitTally,
    /// `None` means no rating that day; `Some(0)` is a real rating of zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<i64>,
}

/// Completed vs. due habit counts for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HabitTally {
    pub completed: u32,
    pub total: u32,
}

impl HabitTally {
    /// Count one due habit.
    pub fn record(&mut self, completed: bool) {
        self.total += 1;
        if completed {
            self.completed += 1;
        }
    }
}

impl fmt::Display for HabitTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

impl Serialize for HabitTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Note and todos for one calendar day of a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyNote {
    pub day: u32,
    pub note: Option<String>,
    /// Newest first
    pub todos: Vec<Todo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_day_serializes_habits_only() {
        let view = DailyView {
            day: 3,
            view: DailyData::default(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json, serde_json::json!({"day": 3, "view": {"habits": "0/0"}}));
    }

    #[test]
    fn test_zero_mood_is_serialized() {
        let data = DailyData {
            mood: Some(0),
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["mood"], 0);
    }

    #[test]
    fn test_tally_records() {
        let mut tally = HabitTally::default();
        tally.record(true);
        tally.record(false);
        tally.record(true);
        assert_eq!(tally.to_string(), "2/3");
    }
}
