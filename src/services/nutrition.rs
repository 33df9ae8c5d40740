// ABOUTME: Nutrition service orchestrating goal derivation, rebalancing, and aggregation
// ABOUTME: Serializes each profile's read-modify-write cycle behind a per-user async lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition service
//!
//! Goal edits are read-modify-write cycles against the profile store. Two
//! concurrent edits for the same user would otherwise race with last write
//! wins, so every mutating operation first takes that user's lock.

use super::recommendations::{RecommendationGenerator, RecommendationRequest};
use crate::config::environment::EngineConfig;
use crate::config::intelligence::global_goal_config;
use crate::database::{InMemoryStore, MealRepository, ProfileRepository, WeightRepository};
use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    compute_goals, daily_summary, filter_recommendations, full_extract, rebalance, rebalance_raw,
    weekly_summary, DailyExtract, DailySummary, FilterOutcome, GoalCallSite, GoalComputation,
    NutritionGoalConfig, OverflowWarning, RawGoalInput, RawRebalanceOutcome, RebalanceAction,
    WeeklySummary,
};
use crate::models::{
    BiometricProfile, GoalField, MealType, NutritionGoals, ProfileUpdate, WeightRecord,
};
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Profile and goal derivation after onboarding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingResult {
    /// Stored profile
    pub profile: BiometricProfile,
    /// Goal derivation result; goals are stored only when computed
    pub computation: GoalComputation,
}

/// Result of a single-field goal edit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalEditResult {
    /// Stored goals
    pub goals: NutritionGoals,
    /// Present when the edited macro was capped
    pub warning: Option<OverflowWarning>,
    /// Rebalancing path taken
    pub action: RebalanceAction,
}

/// Result of recording a weight measurement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightUpdateResult {
    /// Stored measurement
    pub record: WeightRecord,
    /// Recalculated goals; stored only when computed
    pub computation: GoalComputation,
}

/// Holds one user's profile lock and drops the map entry once unused
struct ProfileLock<'a> {
    locks: &'a DashMap<Uuid, Arc<Mutex<()>>>,
    user_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ProfileLock<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map's own handle left: nobody holds or awaits this lock
        self.locks
            .remove_if(&self.user_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Nutrition operations over the stores
pub struct NutritionService {
    profiles: Arc<dyn ProfileRepository>,
    meals: Arc<dyn MealRepository>,
    weights: Arc<dyn WeightRepository>,
    config: EngineConfig,
    goal_config: NutritionGoalConfig,
    profile_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl NutritionService {
    /// Service over separate stores, using the global goal configuration
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        meals: Arc<dyn MealRepository>,
        weights: Arc<dyn WeightRepository>,
        config: EngineConfig,
    ) -> Self {
        Self {
            profiles,
            meals,
            weights,
            config,
            goal_config: global_goal_config().clone(),
            profile_locks: DashMap::new(),
        }
    }

    /// Service over a single in-memory store
    #[must_use]
    pub fn from_store(store: Arc<InMemoryStore>, config: EngineConfig) -> Self {
        Self::new(store.clone(), store.clone(), store, config)
    }

    /// Replace the goal configuration
    #[must_use]
    pub fn with_goal_config(mut self, goal_config: NutritionGoalConfig) -> Self {
        self.goal_config = goal_config;
        self
    }

    /// Engine configuration in use
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Profiles with a lock currently held or awaited
    #[must_use]
    pub fn locked_profile_count(&self) -> usize {
        self.profile_locks.len()
    }

    async fn lock_profile(&self, user_id: Uuid) -> ProfileLock<'_> {
        let lock = self
            .profile_locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        ProfileLock {
            locks: &self.profile_locks,
            user_id,
            guard: Some(lock.lock_owned().await),
        }
    }

    async fn require_profile(&self, user_id: Uuid) -> AppResult<BiometricProfile> {
        self.profiles.get_profile(user_id).await?.ok_or_else(|| {
            AppError::not_found("Profile")
                .with_user_id(user_id)
                .with_resource_id(user_id.to_string())
        })
    }

    /// Derived goals may carry negative carbohydrates; stored goals never do
    fn storable_goals(user_id: Uuid, goals: NutritionGoals) -> NutritionGoals {
        if goals.carbs_g < 0 {
            warn!(
                user_id = %user_id,
                carbs_g = goals.carbs_g,
                "Derived carbohydrate goal is negative, storing 0"
            );
        }
        goals.clamped()
    }

    /// Save onboarding biometrics and seed goals
    ///
    /// Goals are only written when every required biometric is present.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range values or a store error
    pub async fn complete_onboarding(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
        today: NaiveDate,
    ) -> AppResult<OnboardingResult> {
        update.validate()?;
        let _guard = self.lock_profile(user_id).await;

        let mut profile = self
            .profiles
            .get_profile(user_id)
            .await?
            .unwrap_or_else(|| BiometricProfile::new(user_id));
        update.apply_to(&mut profile);

        let computation = compute_goals(&profile, GoalCallSite::Onboarding, today, &self.goal_config);
        if let Some(goals) = computation.goals() {
            profile.goals = Some(Self::storable_goals(user_id, goals));
        }
        self.profiles.upsert_profile(profile.clone()).await?;

        info!(
            user_id = %user_id,
            goals_seeded = computation.is_computed(),
            "Completed onboarding"
        );
        Ok(OnboardingResult {
            profile,
            computation,
        })
    }

    /// Set one goal field and rebalance the rest
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a negative value, `ResourceNotFound` if the
    /// profile does not exist, or a store error
    pub async fn edit_goal(
        &self,
        user_id: Uuid,
        field: GoalField,
        value: i32,
    ) -> AppResult<GoalEditResult> {
        if value < 0 {
            return Err(AppError::out_of_range(format!(
                "Goal {field} must not be negative, got {value}"
            )));
        }
        let _guard = self.lock_profile(user_id).await;
        let profile = self.require_profile(user_id).await?;

        let edited = profile.goals.unwrap_or_default().with_field(field, value);
        let outcome = rebalance(edited, field);
        self.profiles
            .update_profile(user_id, &ProfileUpdate::default().goals(outcome.goals))
            .await?;

        info!(
            user_id = %user_id,
            field = %field,
            value,
            action = ?outcome.action,
            capped = outcome.warning.is_some(),
            "Updated nutrition goal"
        );
        Ok(GoalEditResult {
            goals: outcome.goals,
            warning: outcome.warning,
            action: outcome.action,
        })
    }

    /// Rebalance goals typed as text and store them if anything changed
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the profile does not exist, or a store error
    pub async fn edit_goals_raw(
        &self,
        user_id: Uuid,
        input: &RawGoalInput,
        field: GoalField,
    ) -> AppResult<RawRebalanceOutcome> {
        let _guard = self.lock_profile(user_id).await;
        self.require_profile(user_id).await?;

        let outcome = rebalance_raw(input, field);
        if let RawRebalanceOutcome::Rebalanced(rebalanced) = &outcome {
            self.profiles
                .update_profile(user_id, &ProfileUpdate::default().goals(rebalanced.goals))
                .await?;
            info!(user_id = %user_id, field = %field, action = ?rebalanced.action, "Updated nutrition goals from form input");
        } else {
            debug!(user_id = %user_id, field = %field, "Form input left goals untouched");
        }
        Ok(outcome)
    }

    /// Record a weight measurement and recalculate goals
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the profile does not exist,
    /// `ValueOutOfRange` for an implausible weight, or a store error
    pub async fn record_weight(
        &self,
        user_id: Uuid,
        weight_kg: f64,
        today: NaiveDate,
    ) -> AppResult<WeightUpdateResult> {
        let _guard = self.lock_profile(user_id).await;
        let mut profile = self.require_profile(user_id).await?;

        let record = self.weights.add_weight_record(user_id, weight_kg).await?;
        profile.current_weight_kg = Some(weight_kg);

        let computation =
            compute_goals(&profile, GoalCallSite::Recalculation, today, &self.goal_config);
        let mut update = ProfileUpdate::default().current_weight_kg(weight_kg);
        if let Some(goals) = computation.goals() {
            update = update.goals(Self::storable_goals(user_id, goals));
        }
        self.profiles.update_profile(user_id, &update).await?;

        info!(
            user_id = %user_id,
            weight_kg,
            goals_recalculated = computation.is_computed(),
            "Recorded weight"
        );
        Ok(WeightUpdateResult {
            record,
            computation,
        })
    }

    /// Recent weight measurements, newest first
    ///
    /// # Errors
    ///
    /// Returns a store error
    pub async fn weight_history(
        &self,
        user_id: Uuid,
        limit: Option<usize>,
    ) -> AppResult<Vec<WeightRecord>> {
        let limit = limit.unwrap_or(self.config.weight_history_limit);
        self.weights.weight_history(user_id, limit).await
    }

    /// Summary of one day
    ///
    /// # Errors
    ///
    /// Returns a store error
    pub async fn daily_summary(&self, user_id: Uuid, day: NaiveDate) -> AppResult<DailySummary> {
        let timezone = self.config.reporting_timezone;
        let meals = self.meals.get_meals_for_day(user_id, day, timezone).await?;
        Ok(daily_summary(&meals, day, timezone))
    }

    /// Summary of the configured seven-day window around `end`
    ///
    /// # Errors
    ///
    /// Returns a store error
    pub async fn weekly_summary(&self, user_id: Uuid, end: NaiveDate) -> AppResult<WeeklySummary> {
        let timezone = self.config.reporting_timezone;
        let window = self.config.week_window.window(end);
        let meals = self
            .meals
            .get_meals_for_range(user_id, window.start(), window.last_day(), timezone)
            .await?;
        Ok(weekly_summary(&meals, window, timezone))
    }

    /// Full extract of one day against the stored goals
    ///
    /// A profile without goals yields `None` percentages.
    ///
    /// # Errors
    ///
    /// Returns a store error
    pub async fn daily_extract(&self, user_id: Uuid, day: NaiveDate) -> AppResult<DailyExtract> {
        let goals = self
            .profiles
            .get_profile(user_id)
            .await?
            .and_then(|p| p.goals)
            .unwrap_or_default();
        let timezone = self.config.reporting_timezone;
        let meals = self.meals.get_meals_for_day(user_id, day, timezone).await?;
        Ok(full_extract(&meals, day, &goals, timezone))
    }

    /// Generate suggestions for what is left of `day` and filter them
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the profile does not exist, a store error,
    /// or `ExternalServiceError` if the generator fails
    pub async fn recommend(
        &self,
        user_id: Uuid,
        day: NaiveDate,
        meal_type: Option<MealType>,
        generator: &dyn RecommendationGenerator,
    ) -> AppResult<FilterOutcome> {
        let profile = self.require_profile(user_id).await?;
        let goals = profile.goals.unwrap_or_default();
        let timezone = self.config.reporting_timezone;
        let meals = self.meals.get_meals_for_day(user_id, day, timezone).await?;
        let extract = full_extract(&meals, day, &goals, timezone);

        let request = RecommendationRequest {
            user_id,
            remaining: extract.remaining,
            excluded_keywords: profile.excluded_keywords(),
            meal_type,
        };
        let candidates = generator.generate(&request).await.map_err(|e| {
            let message = e.message.clone();
            AppError::external_service(generator.generator_name(), message)
                .with_user_id(user_id)
                .with_source(e)
        })?;
        debug!(
            user_id = %user_id,
            generator = generator.generator_name(),
            candidates = candidates.len(),
            "Generated meal suggestions"
        );

        Ok(filter_recommendations(
            candidates,
            request.excluded_keywords.as_slice(),
        ))
    }
}
