// ABOUTME: Nutrition tracking models for per-meal nutrient records
// ABOUTME: MealNutrientRecord, MealType, and MicronutrientEntry definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Unspecified or other meal type
    Other,
}

impl MealType {
    /// Parse meal type from string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            "snack" => Self::Snack,
            _ => Self::Other,
        }
    }
}

/// One vitamin or mineral reported for a meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MicronutrientEntry {
    /// Nutrient name, matched exactly (case-sensitive) when merging
    pub name: String,
    /// Amount in `unit`
    pub amount: f64,
    /// Unit of `amount` (mg, µg, IU, ...)
    pub unit: String,
    /// Percent of the recommended daily value
    #[serde(default)]
    pub percent_daily_value: f64,
}

impl MicronutrientEntry {
    /// Create an entry
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
        percent_daily_value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            percent_daily_value,
        }
    }
}

/// Nutrients of a single analyzed meal
///
/// Records are produced by the meal analysis pipeline and never modified here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealNutrientRecord {
    /// Record identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Meal type tag
    pub meal_type: MealType,
    /// When the meal was eaten
    pub eaten_at: DateTime<Utc>,
    /// Energy (kcal)
    pub calories: i32,
    /// Protein (g)
    #[serde(default)]
    pub protein_g: f64,
    /// Carbohydrates (g)
    #[serde(default)]
    pub carbs_g: f64,
    /// Fat (g)
    #[serde(default)]
    pub fat_g: f64,
    /// Fiber (g)
    #[serde(default)]
    pub fiber_g: f64,
    /// Sugar (g)
    #[serde(default)]
    pub sugar_g: f64,
    /// Sodium (mg)
    #[serde(default)]
    pub sodium_mg: f64,
    /// Vitamins and minerals
    #[serde(default)]
    pub micronutrients: Vec<MicronutrientEntry>,
    /// Reference to the stored meal photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Food names recognized in the meal
    #[serde(default)]
    pub detected_foods: Vec<String>,
}

impl MealNutrientRecord {
    /// Create a record with calories only
    #[must_use]
    pub fn new(user_id: Uuid, meal_type: MealType, eaten_at: DateTime<Utc>, calories: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            meal_type,
            eaten_at,
            calories,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            fiber_g: 0.0,
            sugar_g: 0.0,
            sodium_mg: 0.0,
            micronutrients: Vec::new(),
            image_ref: None,
            detected_foods: Vec::new(),
        }
    }

    /// Set protein, carbohydrate and fat grams
    #[must_use]
    pub const fn with_macros(mut self, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        self.protein_g = protein_g;
        self.carbs_g = carbs_g;
        self.fat_g = fat_g;
        self
    }

    /// Set fiber, sugar (g) and sodium (mg)
    #[must_use]
    pub const fn with_fiber_sugar_sodium(mut self, fiber_g: f64, sugar_g: f64, sodium_mg: f64) -> Self {
        self.fiber_g = fiber_g;
        self.sugar_g = sugar_g;
        self.sodium_mg = sodium_mg;
        self
    }

    /// Add a micronutrient entry
    #[must_use]
    pub fn with_micronutrient(mut self, entry: MicronutrientEntry) -> Self {
        self.micronutrients.push(entry);
        self
    }

    /// Set the photo reference
    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Add a recognized food name
    #[must_use]
    pub fn with_detected_food(mut self, name: impl Into<String>) -> Self {
        self.detected_foods.push(name.into());
        self
    }
}
