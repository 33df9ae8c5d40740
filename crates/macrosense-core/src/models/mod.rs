// ABOUTME: Core data models for the Macrosense nutrition engine
// ABOUTME: Re-exports profile, goal, meal, weight, and recommendation types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Meal nutrient records and micronutrient entries
pub mod nutrition;
/// Biometric profile, activity pattern, and nutrition goals
pub mod profile;
/// Externally generated meal suggestions
pub mod recommendation;

pub use nutrition::{MealNutrientRecord, MealType, MicronutrientEntry};
pub use profile::{
    parse_birth_date, ActivityPattern, ActivityTag, BiometricField, BiometricProfile, GoalField,
    NutritionGoals, ProfileUpdate, Sex, WeightRecord, SEDENTARY_TAG,
};
pub use recommendation::Recommendation;
