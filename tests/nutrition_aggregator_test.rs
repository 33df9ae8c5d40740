// ABOUTME: Integration tests for daily and weekly nutrition aggregation
// ABOUTME: Covers totals, micronutrient merging, zero-filled weeks, and timezone day boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macrosense::intelligence::nutrition_aggregator::merge_micronutrients;
use macrosense::intelligence::{
    daily_summary, full_extract, group_by_day, weekly_summary, ReportingTimezone, SummaryWindow,
};
use macrosense::models::{MicronutrientEntry, NutritionGoals};
use uuid::Uuid;

mod common;

use common::{at, date, meal, vitamin_c};

// ============================================================================
// DAILY SUMMARY
// ============================================================================

#[test]
fn test_daily_totals_sum_all_meals() {
    common::init_test_logging();
    let user = Uuid::new_v4();
    let records = vec![
        meal(user, at(2024, 6, 15, 8, 0), 450).with_macros(20.0, 60.0, 12.0),
        meal(user, at(2024, 6, 15, 13, 0), 520).with_macros(35.0, 50.0, 18.0),
        meal(user, at(2024, 6, 15, 19, 30), 380).with_macros(30.0, 25.0, 15.0),
    ];

    let summary = daily_summary(&records, date(2024, 6, 15), ReportingTimezone::utc());

    assert_eq!(summary.totals.calories, 1350);
    assert_eq!(summary.meal_count, 3);
    assert!((summary.totals.protein_g - 85.0).abs() < 1e-9);
    assert!((summary.totals.carbs_g - 135.0).abs() < 1e-9);
    assert!((summary.totals.fat_g - 45.0).abs() < 1e-9);
}

#[test]
fn test_micronutrient_summed_over_contributing_meals_only() {
    let user = Uuid::new_v4();
    let records = vec![
        meal(user, at(2024, 6, 15, 8, 0), 450).with_micronutrient(vitamin_c(30.0)),
        meal(user, at(2024, 6, 15, 13, 0), 520),
        meal(user, at(2024, 6, 15, 19, 0), 380)
            .with_micronutrient(vitamin_c(15.0))
            .with_micronutrient(MicronutrientEntry::new("Iron", 4.0, "mg", 22.0)),
    ];

    let summary = daily_summary(&records, date(2024, 6, 15), ReportingTimezone::utc());

    let vitamin = &summary.micronutrients["Vitamin C"];
    assert!((vitamin.amount - 45.0).abs() < 1e-9);
    assert!((vitamin.percent_daily_value - 50.0).abs() < 1e-9);
    assert_eq!(vitamin.unit, "mg");
    assert!((summary.micronutrients["Iron"].amount - 4.0).abs() < 1e-9);
    assert_eq!(summary.micronutrients.len(), 2);
}

#[test]
fn test_micronutrient_names_are_case_sensitive() {
    let user = Uuid::new_v4();
    let records = vec![
        meal(user, at(2024, 6, 15, 8, 0), 100)
            .with_micronutrient(MicronutrientEntry::new("Zinc", 1.0, "mg", 9.0)),
        meal(user, at(2024, 6, 15, 9, 0), 100)
            .with_micronutrient(MicronutrientEntry::new("zinc", 2.0, "mg", 18.0)),
    ];

    let merged = merge_micronutrients(&records);
    assert_eq!(merged.len(), 2);
}

#[test]
fn test_empty_day_is_zero_summary() {
    let summary = daily_summary(&[], date(2024, 6, 15), ReportingTimezone::utc());

    assert_eq!(summary.totals.calories, 0);
    assert_eq!(summary.meal_count, 0);
    assert!(summary.micronutrients.is_empty());
}

#[test]
fn test_meals_on_other_days_are_ignored() {
    let user = Uuid::new_v4();
    let records = vec![
        meal(user, at(2024, 6, 14, 23, 59), 700),
        meal(user, at(2024, 6, 15, 0, 0), 300),
    ];

    let summary = daily_summary(&records, date(2024, 6, 15), ReportingTimezone::utc());
    assert_eq!(summary.totals.calories, 300);
}

// ============================================================================
// TIMEZONE
// ============================================================================

#[test]
fn test_reporting_offset_moves_day_boundary() {
    let user = Uuid::new_v4();
    // 23:30 UTC on the 14th is already the 15th two hours east
    let records = vec![meal(user, at(2024, 6, 14, 23, 30), 500)];
    let east = ReportingTimezone::from_offset_minutes(120).unwrap();

    assert_eq!(
        daily_summary(&records, date(2024, 6, 15), east).totals.calories,
        500
    );
    assert_eq!(
        daily_summary(&records, date(2024, 6, 14), ReportingTimezone::utc())
            .totals
            .calories,
        500
    );
}

#[test]
fn test_offset_outside_fourteen_hours_is_rejected() {
    assert!(ReportingTimezone::from_offset_minutes(14 * 60).is_ok());
    assert!(ReportingTimezone::from_offset_minutes(-14 * 60).is_ok());
    assert!(ReportingTimezone::from_offset_minutes(14 * 60 + 1).is_err());
}

#[test]
fn test_day_bounds_are_half_open() {
    let tz = ReportingTimezone::from_offset_minutes(-300).unwrap();
    let (start, end) = tz.day_bounds(date(2024, 6, 15)).unwrap();

    assert_eq!(start, at(2024, 6, 15, 5, 0));
    assert_eq!(end, at(2024, 6, 16, 5, 0));
}

#[test]
fn test_group_by_day_orders_days() {
    let user = Uuid::new_v4();
    let records = vec![
        meal(user, at(2024, 6, 16, 9, 0), 100),
        meal(user, at(2024, 6, 15, 9, 0), 200),
        meal(user, at(2024, 6, 16, 18, 0), 300),
    ];

    let grouped = group_by_day(&records, ReportingTimezone::utc());
    let days: Vec<_> = grouped.keys().copied().collect();
    assert_eq!(days, vec![date(2024, 6, 15), date(2024, 6, 16)]);
    assert_eq!(grouped[&date(2024, 6, 16)].len(), 2);
}

// ============================================================================
// WEEKLY SUMMARY
// ============================================================================

#[test]
fn test_week_is_zero_filled_to_seven_days() {
    let user = Uuid::new_v4();
    let records = vec![
        meal(user, at(2024, 6, 10, 12, 0), 600),
        meal(user, at(2024, 6, 13, 12, 0), 800),
    ];

    let week = weekly_summary(
        &records,
        SummaryWindow::Trailing { end: date(2024, 6, 15) },
        ReportingTimezone::utc(),
    );

    assert_eq!(week.days.len(), 7);
    assert_eq!(week.start, date(2024, 6, 9));
    assert_eq!(week.end, date(2024, 6, 15));
    assert_eq!(week.totals.calories, 1400);
    assert_eq!(week.days.iter().filter(|d| d.meal_count == 0).count(), 5);
    assert!((week.average_daily_calories() - 200.0).abs() < 1e-9);
}

#[test]
fn test_empty_week_has_seven_zero_days() {
    let week = weekly_summary(
        &[],
        SummaryWindow::Trailing { end: date(2024, 1, 7) },
        ReportingTimezone::utc(),
    );

    assert_eq!(week.days.len(), 7);
    assert!(week.days.iter().all(|d| d.totals.calories == 0));
    assert_eq!(week.days[0].date, date(2024, 1, 1));
}

#[test]
fn test_month_bounded_window_starts_on_first_of_month() {
    let window = SummaryWindow::MonthBounded { end: date(2024, 3, 3) };

    assert_eq!(window.start(), date(2024, 3, 1));
    assert_eq!(window.last_day(), date(2024, 3, 7));
    assert_eq!(window.days().len(), 7);

    let mid_month = SummaryWindow::MonthBounded { end: date(2024, 3, 20) };
    assert_eq!(mid_month.start(), date(2024, 3, 14));
}

// ============================================================================
// FULL EXTRACT
// ============================================================================

#[test]
fn test_full_extract_reports_progress_and_remaining() {
    let user = Uuid::new_v4();
    let records = vec![
        meal(user, at(2024, 6, 15, 19, 0), 800)
            .with_macros(40.0, 90.0, 30.0)
            .with_detected_food("pasta"),
        meal(user, at(2024, 6, 15, 8, 0), 500)
            .with_macros(30.0, 60.0, 15.0)
            .with_image_ref("meals/breakfast.jpg"),
    ];
    let goals = NutritionGoals::new(2000, 150, 200, 67);

    let extract = full_extract(&records, date(2024, 6, 15), &goals, ReportingTimezone::utc());

    assert_eq!(extract.meals.len(), 2);
    assert_eq!(extract.meals[0].calories, 500);
    assert_eq!(extract.meals[0].image_ref.as_deref(), Some("meals/breakfast.jpg"));
    assert_eq!(extract.meals[1].detected_foods, vec!["pasta".to_owned()]);
    assert!((extract.progress.calories_percent.unwrap() - 65.0).abs() < 1e-9);
    assert!((extract.progress.protein_percent.unwrap() - 46.7).abs() < 1e-9);
    assert_eq!(extract.remaining.calories, 700);
    assert!((extract.remaining.carbs_g - 50.0).abs() < 1e-9);
}

#[test]
fn test_full_extract_without_goals_has_no_percentages() {
    let user = Uuid::new_v4();
    let records = vec![meal(user, at(2024, 6, 15, 8, 0), 2500).with_macros(10.0, 10.0, 10.0)];

    let extract = full_extract(
        &records,
        date(2024, 6, 15),
        &NutritionGoals::default(),
        ReportingTimezone::utc(),
    );

    assert!(extract.progress.calories_percent.is_none());
    assert_eq!(extract.remaining.calories, 0);
    assert!(extract.remaining.protein_g.abs() < f64::EPSILON);
}
