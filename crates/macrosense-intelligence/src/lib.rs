// ABOUTME: Nutrition intelligence crate root for goal derivation, rebalancing, and aggregation
// ABOUTME: Every component is a pure, synchronous computation over its inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macrosense Intelligence
//!
//! The four computational components of the nutrition engine:
//!
//! - [`goal_calculator`]: baseline daily goals from biometrics (Harris-Benedict + activity)
//! - [`macro_rebalancer`]: keeps calories and macros consistent under single-field edits
//! - [`nutrition_aggregator`]: daily/weekly rollups and micronutrient merging
//! - [`recommendation_filter`]: blacklist filtering of generated meal suggestions
//!
//! None of them perform I/O or hold shared state, so they can be called from any
//! number of concurrent requests.

/// Typed configuration for goal derivation
pub mod config;

/// Baseline goal derivation from biometric data
pub mod goal_calculator;

/// Interactive calorie/macro rebalancing
pub mod macro_rebalancer;

/// Daily and weekly intake aggregation
pub mod nutrition_aggregator;

/// Blacklist filtering of meal suggestions
pub mod recommendation_filter;

pub use config::{ConfigError, NutritionGoalConfig};
pub use goal_calculator::{compute_goals, GoalBreakdown, GoalCallSite, GoalComputation};
pub use macro_rebalancer::{
    balance_status, rebalance, rebalance_raw, BalanceStatus, OverflowWarning, RawGoalInput,
    RawRebalanceOutcome, RebalanceAction, RebalanceOutcome,
};
pub use nutrition_aggregator::{
    daily_summary, full_extract, group_by_day, weekly_summary, DailyExtract, DailySummary,
    ReportingTimezone, SummaryWindow, WeeklySummary,
};
pub use recommendation_filter::{filter_recommendations, FilterOutcome};
