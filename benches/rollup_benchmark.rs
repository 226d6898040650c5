use chrono::{Datelike, Utc, Weekday};
use criterion::{criterion_group, criterion_main, Criterion};
use daybook::models::{Habit, HabitCompletion, MoodRating, WeekdaySet};
use daybook::services::{build_daily_views, MonthSources};
use daybook::time_utils::YearMonth;
use std::hint::black_box;
use uuid::Uuid;

/// A busy month: ten habits on varied schedules, completions for most due
/// days and a mood rating every day.
fn busy_month(month: YearMonth) -> MonthSources {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let weekdays = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    let habits: Vec<Habit> = (0..10)
        .map(|i| Habit {
            id: Uuid::new_v4(),
            user_id,
            name: format!("habit-{i}"),
            schedule: weekdays
                .iter()
                .copied()
                .filter(|d| (d.num_days_from_sunday() + i) % 2 == 0)
                .collect::<WeekdaySet>(),
            created_at: now,
            updated_at: now,
        })
        .collect();

    let mut completions = Vec::new();
    let mut mood_ratings = Vec::new();
    for date in month.dates() {
        for habit in habits.iter().filter(|h| h.schedule.contains(date.weekday())) {
            completions.push(HabitCompletion {
                id: Uuid::new_v4(),
                habit_id: habit.id,
                user_id,
                date,
                completed: date.day() % 3 != 0,
                created_at: now,
                updated_at: now,
            });
        }
        mood_ratings.push(MoodRating {
            id: Uuid::new_v4(),
            user_id,
            date,
            rating: i64::from(date.day() % 11),
            created_at: now,
            updated_at: now,
        });
    }

    MonthSources {
        habits,
        completions,
        workout_logs: Vec::new(),
        mood_ratings,
    }
}

fn benchmark_rollup(c: &mut Criterion) {
    let month: YearMonth = "2025-01".parse().expect("valid month");
    let sources = busy_month(month);

    let mut group = c.benchmark_group("monthly_rollup");

    group.bench_function("build_daily_views_busy_month", |b| {
        b.iter(|| build_daily_views(black_box(month), black_box(sources.clone())))
    });

    group.bench_function("build_daily_views_empty_month", |b| {
        b.iter(|| build_daily_views(black_box(month), MonthSources::default()))
    });

    group.finish();
}

fn benchmark_schedule_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule_decode");

    group.bench_function("weekday_names", |b| {
        b.iter(|| WeekdaySet::decode(black_box(r#"["Monday","Wednesday","Friday"]"#)))
    });

    group.bench_function("legacy_bool_array", |b| {
        b.iter(|| WeekdaySet::decode(black_box("[false,true,false,true,false,true,false]")))
    });

    group.bench_function("malformed", |b| {
        b.iter(|| WeekdaySet::decode(black_box("{not json")))
    });

    group.finish();
}

criterion_group!(benches, benchmark_rollup, benchmark_schedule_decode);
criterion_main!(benches);
