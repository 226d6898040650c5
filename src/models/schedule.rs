// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit schedules: which weekdays a habit recurs on.
//!
//! Schedules are persisted as JSON in one of two shapes:
//! - a list of weekday names, e.g. `["Monday","Wednesday"]` (current)
//! - seven positional booleans indexed Sunday=0..Saturday=6 (legacy)
//!
//! Both are decoded once, at the store boundary, into a [`WeekdaySet`].
//! Malformed data decodes to the empty set so a bad row never aborts a rollup.

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Weekday names in Sunday-first order. Matching is case-exact.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// The two shapes a schedule may take on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StoredSchedule {
    WeekdayNames(Vec<String>),
    LegacyBoolArray(Vec<bool>),
}

impl StoredSchedule {
    /// Normalize to a weekday set.
    pub fn into_set(self) -> WeekdaySet {
        match self {
            StoredSchedule::WeekdayNames(names) => names
                .iter()
                .filter_map(|name| weekday_from_name(name))
                .collect(),
            StoredSchedule::LegacyBoolArray(flags) => flags
                .iter()
                .take(7)
                .enumerate()
                .filter(|(_, on)| **on)
                .filter_map(|(idx, _)| weekday_from_sunday_index(idx))
                .collect(),
        }
    }
}

/// A set of weekdays, stored as a 7-bit mask (bit 0 = Sunday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Decode a raw JSON schedule. Tries the names form first, then the
    /// legacy boolean form; anything else is an empty schedule.
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<StoredSchedule>(raw) {
            Ok(stored) => stored.into_set(),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable habit schedule, treating as never due");
                Self::EMPTY
            }
        }
    }

    /// Encode in the names form (Sunday-first).
    pub fn encode(&self) -> String {
        serde_json::Value::from(self.names()).to_string()
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    /// Flip membership of `day`; returns whether it is now scheduled.
    pub fn toggle(&mut self, day: Weekday) -> bool {
        self.0 ^= bit(day);
        self.contains(day)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn names(&self) -> Vec<&'static str> {
        WEEKDAY_NAMES
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.0 & (1 << idx) != 0)
            .map(|(_, name)| *name)
            .collect()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StoredSchedule::deserialize(deserializer).map(StoredSchedule::into_set)
    }
}

/// Whether a habit with the given raw schedule is due on `day`.
pub fn is_due(raw_schedule: &str, day: Weekday) -> bool {
    WeekdaySet::decode(raw_schedule).contains(day)
}

/// Exact (case-sensitive) weekday name lookup.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .and_then(weekday_from_sunday_index)
}

fn weekday_from_sunday_index(idx: usize) -> Option<Weekday> {
    match idx {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}
