// ABOUTME: Interface to the external meal suggestion generator
// ABOUTME: Requests carry remaining macros, dietary exclusions, and a meal-type hint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use crate::intelligence::nutrition_aggregator::RemainingMacros;
use crate::models::{MealType, Recommendation};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context handed to the generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRequest {
    /// Requesting user
    pub user_id: Uuid,
    /// What is left of today's goals
    pub remaining: RemainingMacros,
    /// Blacklist and allergy keywords, lowercased
    pub excluded_keywords: Vec<String>,
    /// Preferred meal slot
    pub meal_type: Option<MealType>,
}

/// Produces candidate meal suggestions
///
/// Generators are free to ignore the exclusions; the service filters every
/// candidate list afterwards.
#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    /// Generate candidates
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream generator fails
    async fn generate(&self, request: &RecommendationRequest) -> AppResult<Vec<Recommendation>>;

    /// Name used in logs
    fn generator_name(&self) -> &'static str;
}

/// Generator returning a fixed candidate list
///
/// Used by the CLI to filter candidates read from a file, and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRecommendationGenerator {
    candidates: Vec<Recommendation>,
}

impl StaticRecommendationGenerator {
    /// Generator that always returns `candidates`
    #[must_use]
    pub const fn new(candidates: Vec<Recommendation>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl RecommendationGenerator for StaticRecommendationGenerator {
    async fn generate(&self, request: &RecommendationRequest) -> AppResult<Vec<Recommendation>> {
        Ok(self
            .candidates
            .iter()
            .filter(|c| match (request.meal_type, c.meal_type) {
                (Some(wanted), Some(actual)) => wanted == actual,
                _ => true,
            })
            .cloned()
            .collect())
    }

    fn generator_name(&self) -> &'static str {
        "static"
    }
}
