// ABOUTME: In-memory store backing profiles, meals, and weight history with DashMap
// ABOUTME: Used by tests, the CLI, and single-process deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{MealRepository, ProfileRepository, WeightRepository};
use crate::errors::{AppError, AppResult};
use crate::intelligence::ReportingTimezone;
use crate::models::{BiometricProfile, MealNutrientRecord, ProfileUpdate, WeightRecord};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use macrosense_core::constants::limits::{MAX_WEIGHT_KG, MIN_WEIGHT_KG};
use tracing::debug;
use uuid::Uuid;

/// Store keeping everything in sharded concurrent maps
///
/// Meals are kept as UTC instants; day queries bucket them in the timezone
/// the caller passes. No map guard is ever held across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: DashMap<Uuid, BiometricProfile>,
    meals: DashMap<Uuid, Vec<MealNutrientRecord>>,
    weights: DashMap<Uuid, Vec<WeightRecord>>,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an analyzed meal
    pub fn insert_meal(&self, record: MealNutrientRecord) {
        debug!(user_id = %record.user_id, meal_id = %record.id, "Stored meal nutrient record");
        self.meals.entry(record.user_id).or_default().push(record);
    }

    /// Store a weight measurement with an explicit timestamp
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for an implausible weight
    pub fn insert_weight_at(
        &self,
        user_id: Uuid,
        weight_kg: f64,
        recorded_at: DateTime<Utc>,
    ) -> AppResult<WeightRecord> {
        validate_weight(weight_kg)?;
        let record = WeightRecord {
            id: Uuid::new_v4(),
            user_id,
            weight_kg,
            recorded_at,
        };
        self.weights
            .entry(user_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn meals_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        timezone: ReportingTimezone,
    ) -> Vec<MealNutrientRecord> {
        let mut found: Vec<MealNutrientRecord> = self
            .meals
            .get(&user_id)
            .map(|meals| {
                meals
                    .iter()
                    .filter(|m| {
                        let day = timezone.local_date(m.eaten_at);
                        start <= day && day <= end
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        found.sort_by_key(|m| m.eaten_at);
        found
    }
}

fn validate_weight(weight_kg: f64) -> AppResult<()> {
    if weight_kg.is_finite() && (MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight_kg) {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "Weight must be between {MIN_WEIGHT_KG} and {MAX_WEIGHT_KG} kg, got {weight_kg}"
        )))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<BiometricProfile>> {
        Ok(self.profiles.get(&user_id).map(|p| p.value().clone()))
    }

    async fn upsert_profile(&self, profile: BiometricProfile) -> AppResult<()> {
        self.profiles.insert(profile.user_id, profile);
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> AppResult<BiometricProfile> {
        update.validate()?;
        let mut entry = self.profiles.get_mut(&user_id).ok_or_else(|| {
            AppError::not_found("Profile").with_resource_id(user_id.to_string())
        })?;
        update.apply_to(entry.value_mut());
        Ok(entry.value().clone())
    }
}

#[async_trait]
impl MealRepository for InMemoryStore {
    async fn get_meals_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
        timezone: ReportingTimezone,
    ) -> AppResult<Vec<MealNutrientRecord>> {
        Ok(self.meals_between(user_id, day, day, timezone))
    }

    async fn get_meals_for_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        timezone: ReportingTimezone,
    ) -> AppResult<Vec<MealNutrientRecord>> {
        if end < start {
            return Err(AppError::invalid_input(format!(
                "Range end {end} precedes start {start}"
            )));
        }
        Ok(self.meals_between(user_id, start, end, timezone))
    }
}

#[async_trait]
impl WeightRepository for InMemoryStore {
    async fn add_weight_record(&self, user_id: Uuid, weight_kg: f64) -> AppResult<WeightRecord> {
        self.insert_weight_at(user_id, weight_kg, Utc::now())
    }

    async fn weight_history(&self, user_id: Uuid, limit: usize) -> AppResult<Vec<WeightRecord>> {
        let Some(records) = self.weights.get(&user_id) else {
            return Ok(Vec::new());
        };
        // Latest insert first among equal timestamps
        let mut history: Vec<WeightRecord> = records.iter().rev().cloned().collect();
        drop(records);
        history.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        history.truncate(limit);
        Ok(history)
    }
}
