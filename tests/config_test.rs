// ABOUTME: Integration tests for environment-driven engine and goal configuration
// ABOUTME: Serialized because every test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macrosense::config::environment::{
    EngineConfig, WeekWindowMode, REPORTING_OFFSET_ENV, WEEK_WINDOW_ENV, WEIGHT_HISTORY_LIMIT_ENV,
};
use macrosense::config::intelligence::load_goal_config;
use macrosense::errors::{AppError, ErrorCode};
use macrosense::intelligence::{ConfigError, NutritionGoalConfig, SummaryWindow};
use serial_test::serial;
use std::env;

mod common;

const GOAL_VARS: [&str; 3] = [
    "MACROSENSE_GOALS_DEFICIT_KCAL",
    "MACROSENSE_GOALS_FAT_PERCENT",
    "MACROSENSE_GOALS_MULTIPLIER_LIGHT",
];

fn clear_engine_vars() {
    for key in [REPORTING_OFFSET_ENV, WEIGHT_HISTORY_LIMIT_ENV, WEEK_WINDOW_ENV] {
        env::remove_var(key);
    }
}

fn clear_goal_vars() {
    for key in GOAL_VARS {
        env::remove_var(key);
    }
}

// ============================================================================
// ENGINE CONFIGURATION
// ============================================================================

#[test]
#[serial]
fn test_engine_config_defaults() {
    common::init_test_logging();
    clear_engine_vars();

    let config = EngineConfig::from_env().unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.weight_history_limit, 30);
    assert_eq!(config.reporting_timezone.offset_minutes(), 0);
}

#[test]
#[serial]
fn test_engine_config_reads_environment() {
    clear_engine_vars();
    env::set_var(REPORTING_OFFSET_ENV, "-300");
    env::set_var(WEIGHT_HISTORY_LIMIT_ENV, "12");
    env::set_var(WEEK_WINDOW_ENV, "month");

    let config = EngineConfig::from_env().unwrap();
    clear_engine_vars();

    assert_eq!(config.reporting_timezone.offset_minutes(), -300);
    assert_eq!(config.weight_history_limit, 12);
    assert_eq!(config.week_window, WeekWindowMode::MonthBounded);
}

#[test]
#[serial]
fn test_engine_config_rejects_bad_values() {
    clear_engine_vars();

    env::set_var(REPORTING_OFFSET_ENV, "900");
    let err = EngineConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    env::remove_var(REPORTING_OFFSET_ENV);

    env::set_var(WEIGHT_HISTORY_LIMIT_ENV, "0");
    assert!(EngineConfig::from_env().is_err());
    env::set_var(WEIGHT_HISTORY_LIMIT_ENV, "many");
    assert!(EngineConfig::from_env().is_err());
    env::remove_var(WEIGHT_HISTORY_LIMIT_ENV);

    env::set_var(WEEK_WINDOW_ENV, "fortnight");
    assert!(EngineConfig::from_env().is_err());
    clear_engine_vars();
}

#[test]
fn test_week_window_mode_parsing() {
    assert_eq!(
        "trailing".parse::<WeekWindowMode>().unwrap(),
        WeekWindowMode::Trailing
    );
    assert_eq!(
        "Month_Bounded".parse::<WeekWindowMode>().unwrap(),
        WeekWindowMode::MonthBounded
    );
    assert_eq!(WeekWindowMode::MonthBounded.to_string(), "month");
}

#[test]
fn test_week_window_mode_builds_window() {
    let end = common::date(2024, 3, 2);
    assert_eq!(
        WeekWindowMode::Trailing.window(end),
        SummaryWindow::Trailing { end }
    );
    assert_eq!(
        WeekWindowMode::MonthBounded.window(end),
        SummaryWindow::MonthBounded { end }
    );

    let bounded = WeekWindowMode::MonthBounded.window(end);
    assert_eq!(bounded.start(), common::date(2024, 3, 1));
    assert_eq!(bounded.last_day(), common::date(2024, 3, 7));
}

// ============================================================================
// GOAL CONFIGURATION
// ============================================================================

#[test]
#[serial]
fn test_goal_config_defaults_without_overrides() {
    clear_goal_vars();
    assert_eq!(load_goal_config().unwrap(), NutritionGoalConfig::default());
}

#[test]
#[serial]
fn test_goal_config_applies_overrides() {
    clear_goal_vars();
    env::set_var("MACROSENSE_GOALS_DEFICIT_KCAL", "400");
    env::set_var("MACROSENSE_GOALS_FAT_PERCENT", "30");

    let config = load_goal_config().unwrap();
    clear_goal_vars();

    assert_eq!(config.calorie_adjustments.weight_loss_deficit_kcal, 400);
    assert!((config.macros.fat_percent_of_calories - 30.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_goal_config_rejects_unparsable_override() {
    clear_goal_vars();
    env::set_var("MACROSENSE_GOALS_DEFICIT_KCAL", "lots");

    let result = load_goal_config();
    clear_goal_vars();

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
#[serial]
fn test_goal_config_rejects_decreasing_multipliers() {
    clear_goal_vars();
    env::set_var("MACROSENSE_GOALS_MULTIPLIER_LIGHT", "1.1");

    let result = load_goal_config();
    clear_goal_vars();

    assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_config_error_converts_to_config_invalid() {
    let err: AppError = ConfigError::ValueOutOfRange("fat share must be below 100%").into();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}
