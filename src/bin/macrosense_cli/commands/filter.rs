// ABOUTME: Filter subcommand screening a JSON list of meal suggestions
// ABOUTME: Blocked keywords are stored as a profile blacklist and applied by the service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::io::{print_json, read_json};
use anyhow::Result;
use chrono::Utc;
use macrosense::config::environment::EngineConfig;
use macrosense::database::{InMemoryStore, ProfileRepository};
use macrosense::models::{BiometricProfile, Recommendation};
use macrosense::services::{NutritionService, StaticRecommendationGenerator};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Filter candidates against `blocked` and print the tagged outcome
pub async fn run(candidates_path: &Path, blocked: &[String]) -> Result<()> {
    let config = EngineConfig::from_env()?;
    let store = Arc::new(InMemoryStore::new());
    let user_id = Uuid::nil();

    let mut profile = BiometricProfile::new(user_id);
    profile.blocked_ingredients = blocked.to_vec();
    store.upsert_profile(profile).await?;

    let candidates: Vec<Recommendation> = read_json(candidates_path)?;
    let generator = StaticRecommendationGenerator::new(candidates);
    let service = NutritionService::from_store(store, config);

    let today = config.reporting_timezone.local_date(Utc::now());
    let outcome = service.recommend(user_id, today, None, &generator).await?;
    if outcome.is_fallback() {
        warn!("Every suggestion matched a blocked keyword; showing them unfiltered");
    }
    print_json(&outcome)
}
