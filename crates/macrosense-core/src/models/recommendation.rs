// ABOUTME: Meal suggestion model produced by the external recommendation generator
// ABOUTME: Carries the text fields the blacklist filter searches plus optional macro estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrition::MealType;
use serde::{Deserialize, Serialize};

/// A suggested meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// Short title
    pub title: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Ingredient names
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Meal slot this suggestion targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    /// Estimated energy (kcal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Estimated protein (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Estimated carbohydrates (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    /// Estimated fat (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
}

impl Recommendation {
    /// Create a suggestion without ingredients or estimates
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ingredients: Vec::new(),
            meal_type: None,
            calories: None,
            protein_g: None,
            carbs_g: None,
            fat_g: None,
        }
    }

    /// Set ingredients
    #[must_use]
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Set the meal slot
    #[must_use]
    pub const fn with_meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = Some(meal_type);
        self
    }
}
