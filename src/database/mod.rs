// ABOUTME: Store interfaces for profiles, meal nutrient records, and weight history
// ABOUTME: Narrow async traits so services stay independent of the storage backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Storage abstraction
//!
//! The engine only needs a handful of narrow operations from storage. Each
//! concern is its own trait so a backend can implement them separately.

/// In-memory implementation of every store trait
pub mod memory;

use crate::errors::AppResult;
use crate::intelligence::ReportingTimezone;
use crate::models::{BiometricProfile, MealNutrientRecord, ProfileUpdate, WeightRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

pub use memory::InMemoryStore;

/// Biometric profile storage (one profile per user)
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch a profile
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<BiometricProfile>>;

    /// Create or replace a profile
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn upsert_profile(&self, profile: BiometricProfile) -> AppResult<()>;

    /// Apply a partial update; fields left `None` are untouched
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the profile does not exist, or a
    /// validation error for out-of-range values
    async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> AppResult<BiometricProfile>;
}

/// Meal nutrient record storage
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Meals eaten on `day` in `timezone`, oldest first
    ///
    /// The timezone comes from the caller so day queries and aggregation
    /// always agree on where a day starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn get_meals_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
        timezone: ReportingTimezone,
    ) -> AppResult<Vec<MealNutrientRecord>>;

    /// Meals eaten on any day in `start ..= end` in `timezone`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or `end` precedes `start`
    async fn get_meals_for_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        timezone: ReportingTimezone,
    ) -> AppResult<Vec<MealNutrientRecord>>;
}

/// Body weight history storage
#[async_trait]
pub trait WeightRepository: Send + Sync {
    /// Append a measurement taken now
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for an implausible weight
    async fn add_weight_record(&self, user_id: Uuid, weight_kg: f64) -> AppResult<WeightRecord>;

    /// Most recent measurements, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn weight_history(&self, user_id: Uuid, limit: usize) -> AppResult<Vec<WeightRecord>>;
}
