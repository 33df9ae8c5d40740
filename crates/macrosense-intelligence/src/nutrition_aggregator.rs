// ABOUTME: Rolls per-meal nutrient records into daily and weekly summaries
// ABOUTME: Micronutrient merging, zero-filled weeks, and goal-relative daily extracts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition aggregator
//!
//! Calendar days are defined by a fixed [`ReportingTimezone`]; the same
//! timezone must be used for store day queries and for aggregation so a meal
//! never lands on two different days. Empty inputs produce zero-valued
//! summaries rather than errors.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use macrosense_core::constants::aggregation::{DAYS_PER_WEEK, MAX_UTC_OFFSET_MINUTES};
use macrosense_core::errors::{AppError, AppResult};
use macrosense_core::models::{MealNutrientRecord, MealType, NutritionGoals};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Fixed UTC offset that defines calendar-day boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingTimezone {
    offset: FixedOffset,
}

impl Default for ReportingTimezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl ReportingTimezone {
    /// UTC day boundaries
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Offset east of UTC, in minutes
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` outside ±14 hours
    pub fn from_offset_minutes(minutes: i32) -> AppResult<Self> {
        if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(AppError::out_of_range(format!(
                "Reporting UTC offset must be within ±{MAX_UTC_OFFSET_MINUTES} minutes, got {minutes}"
            )));
        }
        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or_else(|| AppError::out_of_range(format!("Invalid UTC offset {minutes} minutes")))
    }

    /// Offset east of UTC, in minutes
    #[must_use]
    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// Calendar day an instant falls on
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Half-open UTC range `[start, end)` covering `day`
    ///
    /// # Errors
    ///
    /// Returns an internal error if the day cannot be represented
    pub fn day_bounds(&self, day: NaiveDate) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.start_of_day(day)?;
        Ok((start, start + Duration::days(1)))
    }

    /// Half-open UTC range covering `first ..= last`
    ///
    /// # Errors
    ///
    /// Returns an internal error if a day cannot be represented
    pub fn range_bounds(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, _) = self.day_bounds(first)?;
        let (_, end) = self.day_bounds(last)?;
        Ok((start, end))
    }

    fn start_of_day(&self, day: NaiveDate) -> AppResult<DateTime<Utc>> {
        let midnight = day
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::internal(format!("No midnight for {day}")))?;
        self.offset
            .from_local_datetime(&midnight)
            .single()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| AppError::internal(format!("Ambiguous local midnight for {day}")))
    }
}

/// Summed nutrients
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NutrientTotals {
    /// Energy (kcal)
    pub calories: i32,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbohydrates (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Fiber (g)
    pub fiber_g: f64,
    /// Sugar (g)
    pub sugar_g: f64,
    /// Sodium (mg)
    pub sodium_mg: f64,
}

impl NutrientTotals {
    fn add_record(&mut self, record: &MealNutrientRecord) {
        self.calories = self.calories.saturating_add(record.calories);
        self.protein_g += record.protein_g;
        self.carbs_g += record.carbs_g;
        self.fat_g += record.fat_g;
        self.fiber_g += record.fiber_g;
        self.sugar_g += record.sugar_g;
        self.sodium_mg += record.sodium_mg;
    }

    fn add_totals(&mut self, other: &Self) {
        self.calories = self.calories.saturating_add(other.calories);
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fat_g += other.fat_g;
        self.fiber_g += other.fiber_g;
        self.sugar_g += other.sugar_g;
        self.sodium_mg += other.sodium_mg;
    }
}

/// One micronutrient summed across meals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MergedMicronutrient {
    /// Summed amount
    pub amount: f64,
    /// Unit of the first contributing entry
    pub unit: String,
    /// Summed percent of daily value
    pub percent_daily_value: f64,
}

/// Merge micronutrients by exact (case-sensitive) name
///
/// Amounts and daily-value percentages are summed independently; the unit is
/// taken from the first entry seen for each name.
pub fn merge_micronutrients<'a, I>(records: I) -> BTreeMap<String, MergedMicronutrient>
where
    I: IntoIterator<Item = &'a MealNutrientRecord>,
{
    let mut merged: BTreeMap<String, MergedMicronutrient> = BTreeMap::new();
    for entry in records.into_iter().flat_map(|r| r.micronutrients.iter()) {
        merged
            .entry(entry.name.clone())
            .and_modify(|m| {
                m.amount += entry.amount;
                m.percent_daily_value += entry.percent_daily_value;
            })
            .or_insert_with(|| MergedMicronutrient {
                amount: entry.amount,
                unit: entry.unit.clone(),
                percent_daily_value: entry.percent_daily_value,
            });
    }
    merged
}

/// Nutrients of one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    /// Calendar day in the reporting timezone
    pub date: NaiveDate,
    /// Summed nutrients
    pub totals: NutrientTotals,
    /// Micronutrients keyed by name
    pub micronutrients: BTreeMap<String, MergedMicronutrient>,
    /// Number of meals counted
    pub meal_count: usize,
}

impl DailySummary {
    /// Zero-valued summary
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            totals: NutrientTotals {
                calories: 0,
                protein_g: 0.0,
                carbs_g: 0.0,
                fat_g: 0.0,
                fiber_g: 0.0,
                sugar_g: 0.0,
                sodium_mg: 0.0,
            },
            micronutrients: BTreeMap::new(),
            meal_count: 0,
        }
    }
}

fn summarize(date: NaiveDate, records: &[&MealNutrientRecord]) -> DailySummary {
    let mut totals = NutrientTotals::default();
    for record in records {
        totals.add_record(record);
    }
    DailySummary {
        date,
        totals,
        micronutrients: merge_micronutrients(records.iter().copied()),
        meal_count: records.len(),
    }
}

/// Summarize the records that fall on `day`
///
/// Records on other days are ignored.
#[must_use]
pub fn daily_summary(
    records: &[MealNutrientRecord],
    day: NaiveDate,
    timezone: ReportingTimezone,
) -> DailySummary {
    let on_day: Vec<&MealNutrientRecord> = records
        .iter()
        .filter(|r| timezone.local_date(r.eaten_at) == day)
        .collect();
    summarize(day, &on_day)
}

/// Group records by calendar day
#[must_use]
pub fn group_by_day(
    records: &[MealNutrientRecord],
    timezone: ReportingTimezone,
) -> BTreeMap<NaiveDate, Vec<&MealNutrientRecord>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&MealNutrientRecord>> = BTreeMap::new();
    for record in records {
        by_day
            .entry(timezone.local_date(record.eaten_at))
            .or_default()
            .push(record);
    }
    by_day
}

/// Distance from the first to the last day of a week window
fn window_span() -> Duration {
    Duration::weeks(1) - Duration::days(1)
}

/// Seven-day reporting window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SummaryWindow {
    /// `end - 6 ..= end`
    Trailing {
        /// Last day of the window
        end: NaiveDate,
    },
    /// Seven days ending at `end`, unless that would reach into the previous
    /// month; then seven days starting on the first of `end`'s month, which
    /// may include days after `end`
    MonthBounded {
        /// Reference day
        end: NaiveDate,
    },
}

impl SummaryWindow {
    /// First day of the window
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        let back = window_span();
        match *self {
            Self::Trailing { end } => end - back,
            Self::MonthBounded { end } => {
                let start = end - back;
                if start.month() == end.month() && start.year() == end.year() {
                    start
                } else {
                    NaiveDate::from_ymd_opt(end.year(), end.month(), 1).unwrap_or(start)
                }
            }
        }
    }

    /// The seven days of the window, in order
    #[must_use]
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start().iter_days().take(DAYS_PER_WEEK).collect()
    }

    /// Last day of the window
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.start() + window_span()
    }
}

/// Seven consecutive daily summaries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
    /// Exactly seven entries, zero-filled where no meals were logged
    pub days: Vec<DailySummary>,
    /// Sum over the seven days
    pub totals: NutrientTotals,
}

impl WeeklySummary {
    /// Mean daily calories over the seven days
    #[must_use]
    pub fn average_daily_calories(&self) -> f64 {
        f64::from(self.totals.calories) / DAYS_PER_WEEK as f64
    }
}

/// Summarize seven days
#[must_use]
pub fn weekly_summary(
    records: &[MealNutrientRecord],
    window: SummaryWindow,
    timezone: ReportingTimezone,
) -> WeeklySummary {
    let by_day = group_by_day(records, timezone);
    let days: Vec<DailySummary> = window
        .days()
        .into_iter()
        .map(|day| {
            by_day
                .get(&day)
                .map_or_else(|| DailySummary::empty(day), |meals| summarize(day, meals))
        })
        .collect();

    let mut totals = NutrientTotals::default();
    for day in &days {
        totals.add_totals(&day.totals);
    }

    WeeklySummary {
        start: window.start(),
        end: window.last_day(),
        days,
        totals,
    }
}

/// Condensed view of one meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealDigest {
    /// Record identifier
    pub id: Uuid,
    /// Meal type tag
    pub meal_type: MealType,
    /// When the meal was eaten
    pub eaten_at: DateTime<Utc>,
    /// Energy (kcal)
    pub calories: i32,
    /// Photo reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Recognized food names
    pub detected_foods: Vec<String>,
}

impl From<&MealNutrientRecord> for MealDigest {
    fn from(record: &MealNutrientRecord) -> Self {
        Self {
            id: record.id,
            meal_type: record.meal_type,
            eaten_at: record.eaten_at,
            calories: record.calories,
            image_ref: record.image_ref.clone(),
            detected_foods: record.detected_foods.clone(),
        }
    }
}

/// Consumption as a percentage of each goal
///
/// `None` where the goal is not positive.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    /// Calories consumed / calorie goal × 100
    pub calories_percent: Option<f64>,
    /// Protein consumed / protein goal × 100
    pub protein_percent: Option<f64>,
    /// Carbs consumed / carb goal × 100
    pub carbs_percent: Option<f64>,
    /// Fat consumed / fat goal × 100
    pub fat_percent: Option<f64>,
}

fn percent_of(consumed: f64, goal: i32) -> Option<f64> {
    (goal > 0).then(|| (consumed / f64::from(goal) * 1000.0).round() / 10.0)
}

/// What is left of each goal, floored at zero
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RemainingMacros {
    /// Calories left (kcal)
    pub calories: i32,
    /// Protein left (g)
    pub protein_g: f64,
    /// Carbohydrates left (g)
    pub carbs_g: f64,
    /// Fat left (g)
    pub fat_g: f64,
}

impl RemainingMacros {
    /// Goals minus consumption, never negative
    #[must_use]
    pub fn from_goals(goals: &NutritionGoals, consumed: &NutrientTotals) -> Self {
        Self {
            calories: goals.calories.saturating_sub(consumed.calories).max(0),
            protein_g: (f64::from(goals.protein_g) - consumed.protein_g).max(0.0),
            carbs_g: (f64::from(goals.carbs_g) - consumed.carbs_g).max(0.0),
            fat_g: (f64::from(goals.fat_g) - consumed.fat_g).max(0.0),
        }
    }
}

/// Full daily extract: summary, per-meal view, and progress against goals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyExtract {
    /// Daily totals and micronutrients
    pub summary: DailySummary,
    /// Meals of the day in time order
    pub meals: Vec<MealDigest>,
    /// Goals the progress was computed against
    pub goals: NutritionGoals,
    /// Percentage of each goal consumed
    pub progress: GoalProgress,
    /// What is left of each goal
    pub remaining: RemainingMacros,
}

/// Build the full extract for `day`
#[must_use]
pub fn full_extract(
    records: &[MealNutrientRecord],
    day: NaiveDate,
    goals: &NutritionGoals,
    timezone: ReportingTimezone,
) -> DailyExtract {
    let mut on_day: Vec<&MealNutrientRecord> = records
        .iter()
        .filter(|r| timezone.local_date(r.eaten_at) == day)
        .collect();
    on_day.sort_by_key(|r| r.eaten_at);

    let summary = summarize(day, &on_day);
    let totals = summary.totals;
    let progress = GoalProgress {
        calories_percent: percent_of(f64::from(totals.calories), goals.calories),
        protein_percent: percent_of(totals.protein_g, goals.protein_g),
        carbs_percent: percent_of(totals.carbs_g, goals.carbs_g),
        fat_percent: percent_of(totals.fat_g, goals.fat_g),
    };

    DailyExtract {
        meals: on_day.iter().map(|r| MealDigest::from(*r)).collect(),
        goals: *goals,
        progress,
        remaining: RemainingMacros::from_goals(goals, &totals),
        summary,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_window() {
        let window = SummaryWindow::Trailing { end: date(2024, 3, 3) };
        assert_eq!(window.start(), date(2024, 2, 26));
        assert_eq!(window.days().len(), 7);
    }

    #[test]
    fn test_month_bounded_window_stays_in_month() {
        let window = SummaryWindow::MonthBounded { end: date(2024, 3, 3) };
        assert_eq!(window.start(), date(2024, 3, 1));
        assert_eq!(window.last_day(), date(2024, 3, 7));

        let mid = SummaryWindow::MonthBounded { end: date(2024, 3, 20) };
        assert_eq!(mid.start(), date(2024, 3, 14));
    }

    #[test]
    fn test_offset_bounds() {
        assert!(ReportingTimezone::from_offset_minutes(841).is_err());
        assert!(ReportingTimezone::from_offset_minutes(-840).is_ok());
        assert_eq!(ReportingTimezone::from_offset_minutes(-300).unwrap().offset_minutes(), -300);
    }

    #[test]
    fn test_percent_of_non_positive_goal() {
        assert_eq!(percent_of(100.0, 0), None);
        assert_eq!(percent_of(50.0, 200), Some(25.0));
    }
}
