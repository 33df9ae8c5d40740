// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup, profile builders, and meal record helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `macrosense`

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use macrosense::config::environment::EngineConfig;
use macrosense::database::InMemoryStore;
use macrosense::intelligence::NutritionGoalConfig;
use macrosense::models::{
    ActivityPattern, MealNutrientRecord, MealType, MicronutrientEntry, ProfileUpdate, Sex,
};
use macrosense::services::NutritionService;
use std::env;
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, hour, minute, 0).unwrap()
}

/// 30-year-old male (on 2024-06-15), 180 cm, 80 kg aiming for 75 kg, runs 3 days a week
pub fn male_runner_update() -> ProfileUpdate {
    ProfileUpdate::default()
        .sex(Sex::Male)
        .birth_date(date(1994, 6, 15))
        .height_cm(180)
        .current_weight_kg(80.0)
        .target_weight_kg(75.0)
        .activity(ActivityPattern::active([("running", 3)]).unwrap())
}

/// 25-year-old female (on 2024-03-01), 165 cm, 60 kg, maintaining, sedentary
pub fn sedentary_female_update() -> ProfileUpdate {
    ProfileUpdate::default()
        .sex(Sex::Female)
        .birth_date(date(1999, 3, 1))
        .height_cm(165)
        .current_weight_kg(60.0)
        .target_weight_kg(60.0)
        .activity(ActivityPattern::Sedentary)
}

pub fn meal(user_id: Uuid, eaten_at: DateTime<Utc>, calories: i32) -> MealNutrientRecord {
    MealNutrientRecord::new(user_id, MealType::Other, eaten_at, calories)
}

pub fn vitamin_c(amount: f64) -> MicronutrientEntry {
    MicronutrientEntry::new("Vitamin C", amount, "mg", amount / 90.0 * 100.0)
}

/// Service over a fresh UTC store with default goal configuration
pub fn create_test_service() -> (Arc<InMemoryStore>, NutritionService) {
    init_test_logging();
    let config = EngineConfig::default();
    let store = Arc::new(InMemoryStore::new());
    let service = NutritionService::from_store(store.clone(), config)
        .with_goal_config(NutritionGoalConfig::default());
    (store, service)
}
