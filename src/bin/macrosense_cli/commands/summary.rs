// ABOUTME: Summary subcommand aggregating a JSON meal log
// ABOUTME: Loads the log into an in-memory store and queries it through the service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::io::{print_json, read_json};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use macrosense::config::environment::EngineConfig;
use macrosense::database::{InMemoryStore, ProfileRepository};
use macrosense::models::{BiometricProfile, MealNutrientRecord, NutritionGoals};
use macrosense::services::NutritionService;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Summarize the meal log for `day`, the week ending on it, or a full extract
pub async fn run(
    meals_path: &Path,
    day: NaiveDate,
    weekly: bool,
    goals: Option<&[i32]>,
) -> Result<()> {
    let config = EngineConfig::from_env()?;
    let store = Arc::new(InMemoryStore::new());
    let user_id = Uuid::nil();

    let records: Vec<MealNutrientRecord> = read_json(meals_path)?;
    let meal_count = records.len();
    for mut record in records {
        record.user_id = user_id;
        store.insert_meal(record);
    }
    info!(meals = meal_count, %day, weekly, "Loaded meal log");

    if let Some(values) = goals {
        let [calories, protein, carbs, fat] = values else {
            bail!("--goals takes exactly four values: calories,protein,carbs,fat");
        };
        let mut profile = BiometricProfile::new(user_id);
        profile.goals = Some(NutritionGoals::new(*calories, *protein, *carbs, *fat));
        store.upsert_profile(profile).await?;
    }

    let service = NutritionService::from_store(store, config);
    if weekly {
        print_json(&service.weekly_summary(user_id, day).await?)
    } else if goals.is_some() {
        print_json(&service.daily_extract(user_id, day).await?)
    } else {
        print_json(&service.daily_summary(user_id, day).await?)
    }
}
