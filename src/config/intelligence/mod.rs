// ABOUTME: Global nutrition goal configuration with environment variable overrides
// ABOUTME: Loads defaults, applies MACROSENSE_GOALS_* overrides, validates, caches in a OnceLock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Goal derivation configuration
//!
//! [`global_goal_config`] is loaded once per process. An invalid override is
//! logged and the defaults are used instead, so a typo in the environment never
//! prevents goals from being computed.

use crate::intelligence::{ConfigError, NutritionGoalConfig};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static GOAL_CONFIG: OnceLock<NutritionGoalConfig> = OnceLock::new();

/// Process-wide goal configuration
pub fn global_goal_config() -> &'static NutritionGoalConfig {
    GOAL_CONFIG.get_or_init(|| {
        load_goal_config().unwrap_or_else(|e| {
            warn!("Failed to load goal config: {e}, using defaults");
            NutritionGoalConfig::default()
        })
    })
}

/// Build a configuration from defaults plus environment overrides
///
/// # Errors
///
/// Returns an error if an override does not parse or the result fails validation
pub fn load_goal_config() -> Result<NutritionGoalConfig, ConfigError> {
    let config = apply_env_overrides(NutritionGoalConfig::default())?;
    config.validate()?;
    Ok(config)
}

fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(val) = env::var(env_var_name) {
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
    }
    Ok(())
}

fn apply_env_overrides(mut config: NutritionGoalConfig) -> Result<NutritionGoalConfig, ConfigError> {
    // Activity multipliers
    apply_env_var(
        "MACROSENSE_GOALS_MULTIPLIER_SEDENTARY",
        &mut config.activity.sedentary,
    )?;
    apply_env_var(
        "MACROSENSE_GOALS_MULTIPLIER_LIGHT",
        &mut config.activity.lightly_active,
    )?;
    apply_env_var(
        "MACROSENSE_GOALS_MULTIPLIER_MODERATE",
        &mut config.activity.moderately_active,
    )?;
    apply_env_var(
        "MACROSENSE_GOALS_MULTIPLIER_VERY",
        &mut config.activity.very_active,
    )?;

    // Calorie adjustments
    apply_env_var(
        "MACROSENSE_GOALS_DEFICIT_KCAL",
        &mut config.calorie_adjustments.weight_loss_deficit_kcal,
    )?;
    apply_env_var(
        "MACROSENSE_GOALS_MIN_DEFICIT_CALORIES",
        &mut config.calorie_adjustments.minimum_deficit_goal_kcal,
    )?;
    apply_env_var(
        "MACROSENSE_GOALS_SURPLUS_KCAL",
        &mut config.calorie_adjustments.weight_gain_surplus_kcal,
    )?;

    // Macro split
    apply_env_var(
        "MACROSENSE_GOALS_FAT_PERCENT",
        &mut config.macros.fat_percent_of_calories,
    )?;
    apply_env_var(
        "MACROSENSE_GOALS_ONBOARDING_PROTEIN_SEDENTARY",
        &mut config.macros.onboarding_protein.sedentary_g_per_kg,
    )?;
    apply_env_var(
        "MACROSENSE_GOALS_ONBOARDING_PROTEIN_ACTIVE",
        &mut config.macros.onboarding_protein.active_g_per_kg,
    )?;
    apply_env_var(
        "MACROSENSE_GOALS_RECALC_PROTEIN_SEDENTARY",
        &mut config.macros.recalculation_protein.sedentary_g_per_kg,
    )?;
    apply_env_var(
        "MACROSENSE_GOALS_RECALC_PROTEIN_ACTIVE",
        &mut config.macros.recalculation_protein.active_g_per_kg,
    )?;

    Ok(config)
}
