// ABOUTME: Domain service layer wiring nutrition computations to the stores
// ABOUTME: Provides transport-agnostic operations reusable by any entry point
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services load state from the stores, run the pure computations, and persist
//! results. Every read-modify-write of a profile runs under that user's lock.

/// Goal management, weight-driven recalculation, summaries, and suggestions
pub mod nutrition;

/// Meal suggestion generator seam
pub mod recommendations;

pub use nutrition::{GoalEditResult, NutritionService, OnboardingResult, WeightUpdateResult};
pub use recommendations::{
    RecommendationGenerator, RecommendationRequest, StaticRecommendationGenerator,
};
