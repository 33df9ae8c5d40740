// ABOUTME: Configuration types for the nutrition intelligence components
// ABOUTME: Goal derivation coefficients and the configuration error enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration error types
pub mod error;

/// Goal derivation coefficients
pub mod nutrition;

pub use error::ConfigError;
pub use nutrition::{
    ActivityMultiplierConfig, CalorieAdjustmentConfig, HarrisBenedictConfig, MacroGoalConfig,
    NutritionGoalConfig, ProteinFactors,
};
