// ABOUTME: Nutrition goal configuration for baseline calorie and macro derivation
// ABOUTME: Harris-Benedict coefficients, activity multipliers, calorie adjustments, protein factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Goal Configuration
//!
//! Every coefficient used when deriving baseline goals from biometrics lives here,
//! so callers pass a single `&NutritionGoalConfig` into the calculator.
//!
//! # Scientific References
//!
//! - BMR: Roza & Shizgal (1984), revised Harris-Benedict equations
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology

use super::error::ConfigError;
use macrosense_core::constants::goal_defaults::{
    onboarding, recalculation, FAT_PERCENT_OF_CALORIES, MAX_WEEKLY_ACTIVITY_DAYS,
    MINIMUM_DEFICIT_GOAL_KCAL, WEIGHT_GAIN_SURPLUS_KCAL, WEIGHT_LOSS_DEFICIT_KCAL,
};
use serde::{Deserialize, Serialize};

/// Nutrition goal derivation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionGoalConfig {
    /// BMR equation coefficients
    pub bmr: HarrisBenedictConfig,
    /// Activity multipliers and their weekly-day thresholds
    pub activity: ActivityMultiplierConfig,
    /// Deficit/surplus applied for weight change goals
    pub calorie_adjustments: CalorieAdjustmentConfig,
    /// Protein factors and fat share
    pub macros: MacroGoalConfig,
}

impl NutritionGoalConfig {
    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first section error found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bmr.validate()?;
        self.activity.validate()?;
        self.calorie_adjustments.validate()?;
        self.macros.validate()
    }
}

/// Revised Harris-Benedict coefficients
///
/// `BMR = constant + weight_coef·kg + height_coef·cm + age_coef·years`.
/// Profiles with sex `other` use the female coefficients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarrisBenedictConfig {
    /// Male constant (88.362)
    pub male_constant: f64,
    /// Male weight coefficient (13.397)
    pub male_weight_coef: f64,
    /// Male height coefficient (4.799)
    pub male_height_coef: f64,
    /// Male age coefficient (-5.677)
    pub male_age_coef: f64,
    /// Female constant (447.593)
    pub female_constant: f64,
    /// Female weight coefficient (9.247)
    pub female_weight_coef: f64,
    /// Female height coefficient (3.098)
    pub female_height_coef: f64,
    /// Female age coefficient (-4.330)
    pub female_age_coef: f64,
}

impl HarrisBenedictConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            self.male_weight_coef,
            self.male_height_coef,
            self.female_weight_coef,
            self.female_height_coef,
        ];
        if positive.iter().any(|c| !c.is_finite() || *c <= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "BMR weight and height coefficients must be positive",
            ));
        }
        if self.male_age_coef > 0.0 || self.female_age_coef > 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR age coefficients must not be positive",
            ));
        }
        Ok(())
    }
}

/// Activity multiplier configuration
///
/// The summed weekly frequency of all non-sedentary activities (capped at
/// `weekly_days_cap`) selects the multiplier: up to `minimal_max_days` →
/// `sedentary`, up to `light_max_days` → `lightly_active`, up to
/// `moderate_max_days` → `moderately_active`, otherwise `very_active`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityMultiplierConfig {
    /// Sedentary or near-sedentary: 1.2
    pub sedentary: f64,
    /// 2-3 days/week: 1.375
    pub lightly_active: f64,
    /// 4-5 days/week: 1.55
    pub moderately_active: f64,
    /// 6-7 days/week: 1.725
    pub very_active: f64,
    /// Highest day count still treated as sedentary (1)
    pub minimal_max_days: u32,
    /// Highest day count treated as lightly active (3)
    pub light_max_days: u32,
    /// Highest day count treated as moderately active (5)
    pub moderate_max_days: u32,
    /// Cap applied to the summed weekly frequency (7)
    pub weekly_days_cap: u32,
}

impl ActivityMultiplierConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sedentary < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "sedentary activity multiplier must be at least 1.0",
            ));
        }
        if self.lightly_active < self.sedentary
            || self.moderately_active < self.lightly_active
            || self.very_active < self.moderately_active
        {
            return Err(ConfigError::InvalidRange(
                "activity multipliers must be non-decreasing",
            ));
        }
        if self.light_max_days <= self.minimal_max_days
            || self.moderate_max_days <= self.light_max_days
            || self.weekly_days_cap <= self.moderate_max_days
        {
            return Err(ConfigError::InvalidRange(
                "activity day thresholds must be strictly increasing and below the weekly cap",
            ));
        }
        Ok(())
    }
}

/// Calorie adjustments for weight-change goals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalorieAdjustmentConfig {
    /// Subtracted from TDEE when the target weight is lower (500)
    pub weight_loss_deficit_kcal: i32,
    /// Lowest calorie goal a deficit may produce (1200)
    pub minimum_deficit_goal_kcal: i32,
    /// Added to TDEE when the target weight is higher (300)
    pub weight_gain_surplus_kcal: i32,
}

impl CalorieAdjustmentConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.weight_loss_deficit_kcal < 0 || self.weight_gain_surplus_kcal < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "calorie deficit and surplus must not be negative",
            ));
        }
        if self.minimum_deficit_goal_kcal <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "minimum deficit calorie goal must be positive",
            ));
        }
        Ok(())
    }
}

/// Protein factor pair (g per kg of current body weight)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProteinFactors {
    /// Used for an exactly sedentary pattern
    pub sedentary_g_per_kg: f64,
    /// Used for any other pattern
    pub active_g_per_kg: f64,
}

impl ProteinFactors {
    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        for factor in [self.sedentary_g_per_kg, self.active_g_per_kg] {
            if !factor.is_finite() || factor <= 0.0 || factor > 4.0 {
                return Err(ConfigError::ValueOutOfRange(name));
            }
        }
        Ok(())
    }
}

/// Macro goal configuration
///
/// Onboarding and later recalculation use different protein factor pairs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacroGoalConfig {
    /// Percent of the calorie goal assigned to fat (25)
    pub fat_percent_of_calories: f64,
    /// Factors used when goals are first seeded (1.2 / 1.6)
    pub onboarding_protein: ProteinFactors,
    /// Factors used on recalculation after a weight update (1.2 / 1.8)
    pub recalculation_protein: ProteinFactors,
}

impl MacroGoalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let fat = self.fat_percent_of_calories;
        if !fat.is_finite() || fat <= 0.0 || fat >= 100.0 {
            return Err(ConfigError::ValueOutOfRange(
                "fat percent of calories must be between 0 and 100",
            ));
        }
        self.onboarding_protein
            .validate("onboarding protein factors must be in (0, 4] g/kg")?;
        self.recalculation_protein
            .validate("recalculation protein factors must be in (0, 4] g/kg")
    }
}

impl Default for HarrisBenedictConfig {
    fn default() -> Self {
        Self {
            male_constant: 88.362,
            male_weight_coef: 13.397,
            male_height_coef: 4.799,
            male_age_coef: -5.677,
            female_constant: 447.593,
            female_weight_coef: 9.247,
            female_height_coef: 3.098,
            female_age_coef: -4.330,
        }
    }
}

impl Default for ActivityMultiplierConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            minimal_max_days: 1,
            light_max_days: 3,
            moderate_max_days: 5,
            weekly_days_cap: MAX_WEEKLY_ACTIVITY_DAYS,
        }
    }
}

impl Default for CalorieAdjustmentConfig {
    fn default() -> Self {
        Self {
            weight_loss_deficit_kcal: WEIGHT_LOSS_DEFICIT_KCAL,
            minimum_deficit_goal_kcal: MINIMUM_DEFICIT_GOAL_KCAL,
            weight_gain_surplus_kcal: WEIGHT_GAIN_SURPLUS_KCAL,
        }
    }
}

impl Default for MacroGoalConfig {
    fn default() -> Self {
        Self {
            fat_percent_of_calories: FAT_PERCENT_OF_CALORIES,
            onboarding_protein: ProteinFactors {
                sedentary_g_per_kg: onboarding::PROTEIN_G_PER_KG_SEDENTARY,
                active_g_per_kg: onboarding::PROTEIN_G_PER_KG_ACTIVE,
            },
            recalculation_protein: ProteinFactors {
                sedentary_g_per_kg: recalculation::PROTEIN_G_PER_KG_SEDENTARY,
                active_g_per_kg: recalculation::PROTEIN_G_PER_KG_ACTIVE,
            },
        }
    }
}
