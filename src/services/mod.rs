// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod rollup;

pub use rollup::{build_daily_notes, build_daily_views, MonthSources, NoteSources, RollupService};
