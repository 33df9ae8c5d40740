// ABOUTME: Baseline nutrition goal derivation from biometric data and weekly activity
// ABOUTME: Harris-Benedict BMR, activity-scaled TDEE, weight-goal adjustment, macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Biometric goal calculator
//!
//! Derives daily calorie, protein, carbohydrate and fat targets:
//!
//! 1. Age in whole years (`floor(days / 365.25)`)
//! 2. BMR from the revised Harris-Benedict equations
//! 3. Activity multiplier from the summed weekly frequency
//! 4. `TDEE = round(BMR × multiplier)`
//! 5. Calorie goal: deficit (floored), surplus, or maintenance
//! 6. Protein from current weight and the call-site factor pair
//! 7. Fat as a fixed share of the calorie goal
//! 8. Carbohydrates fill the remaining energy (may be negative)
//!
//! Computation is pure; callers persist the result.

use crate::config::{ActivityMultiplierConfig, HarrisBenedictConfig, NutritionGoalConfig};
use chrono::{NaiveDate, Utc};
use macrosense_core::constants::energy::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
use macrosense_core::constants::goal_defaults::DAYS_PER_YEAR;
use macrosense_core::models::{ActivityPattern, BiometricField, BiometricProfile, NutritionGoals, Sex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which flow is deriving goals
///
/// Selects the protein factor pair; the two flows intentionally differ.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalCallSite {
    /// First-time seeding at the end of onboarding
    Onboarding,
    /// Recalculation after onboarding, e.g. after a weight update
    Recalculation,
}

/// Derived goals together with the intermediate values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalBreakdown {
    /// Whole years of age
    pub age_years: u32,
    /// Basal metabolic rate (kcal/day, unrounded)
    pub bmr: f64,
    /// Activity multiplier applied to the BMR
    pub activity_multiplier: f64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: i32,
    /// Flow the goals were derived for
    pub call_site: GoalCallSite,
    /// Resulting goals
    pub goals: NutritionGoals,
}

/// Result of a goal computation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalComputation {
    /// All inputs were present
    Computed(GoalBreakdown),
    /// Required biometrics are missing; not an error
    Unavailable {
        /// Fields that must be supplied first
        missing: Vec<BiometricField>,
    },
}

impl GoalComputation {
    /// Goals, if they could be computed
    #[must_use]
    pub const fn goals(&self) -> Option<NutritionGoals> {
        match self {
            Self::Computed(breakdown) => Some(breakdown.goals),
            Self::Unavailable { .. } => None,
        }
    }

    /// Whether goals were computed
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

/// Whole years between `birth_date` and `today`
///
/// A birth date in the future yields 0.
#[must_use]
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - birth_date).num_days() as f64;
    (days / DAYS_PER_YEAR).floor().max(0.0) as u32
}

/// Revised Harris-Benedict BMR (kcal/day)
///
/// `Sex::Other` uses the female coefficients.
#[must_use]
pub fn calculate_harris_benedict(
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    config: &HarrisBenedictConfig,
) -> f64 {
    let (constant, weight_coef, height_coef, age_coef) = match sex {
        Sex::Male => (
            config.male_constant,
            config.male_weight_coef,
            config.male_height_coef,
            config.male_age_coef,
        ),
        Sex::Female | Sex::Other => (
            config.female_constant,
            config.female_weight_coef,
            config.female_height_coef,
            config.female_age_coef,
        ),
    };

    let weight_component = weight_coef * weight_kg;
    let height_component = height_coef * height_cm;
    let age_component = age_coef * f64::from(age_years);

    constant + weight_component + height_component + age_component
}

/// Multiplier for a weekly activity pattern
///
/// An exactly sedentary pattern always gets the sedentary multiplier. Otherwise
/// the summed weekly frequency is capped and bucketed.
#[must_use]
pub fn activity_multiplier(pattern: &ActivityPattern, config: &ActivityMultiplierConfig) -> f64 {
    if pattern.is_sedentary() {
        return config.sedentary;
    }

    let days = pattern.weekly_activity_days().min(config.weekly_days_cap);
    if days <= config.minimal_max_days {
        config.sedentary
    } else if days <= config.light_max_days {
        config.lightly_active
    } else if days <= config.moderate_max_days {
        config.moderately_active
    } else {
        config.very_active
    }
}

/// `round(BMR × multiplier)`
#[must_use]
pub fn calculate_tdee(bmr: f64, multiplier: f64) -> i32 {
    (bmr * multiplier).round() as i32
}

/// Calorie goal from TDEE and the direction of the weight goal
#[must_use]
pub fn calorie_goal(
    tdee: i32,
    current_weight_kg: f64,
    target_weight_kg: f64,
    config: &NutritionGoalConfig,
) -> i32 {
    let adjustments = &config.calorie_adjustments;
    if target_weight_kg < current_weight_kg {
        (tdee - adjustments.weight_loss_deficit_kcal).max(adjustments.minimum_deficit_goal_kcal)
    } else if target_weight_kg > current_weight_kg {
        tdee + adjustments.weight_gain_surplus_kcal
    } else {
        tdee
    }
}

/// Protein goal (g) from current weight, activity and call site
#[must_use]
pub fn protein_goal(
    current_weight_kg: f64,
    pattern: &ActivityPattern,
    call_site: GoalCallSite,
    config: &NutritionGoalConfig,
) -> i32 {
    let factors = match call_site {
        GoalCallSite::Onboarding => config.macros.onboarding_protein,
        GoalCallSite::Recalculation => config.macros.recalculation_protein,
    };
    let factor = if pattern.is_sedentary() {
        factors.sedentary_g_per_kg
    } else {
        factors.active_g_per_kg
    };
    (current_weight_kg * factor).round() as i32
}

/// Fat goal (g) as a fixed share of the calorie goal
#[must_use]
pub fn fat_goal(calorie_goal: i32, config: &NutritionGoalConfig) -> i32 {
    (f64::from(calorie_goal) * config.macros.fat_percent_of_calories
        / (100.0 * KCAL_PER_GRAM_FAT))
        .round() as i32
}

/// Carbohydrate goal (g) from the energy left after protein and fat
///
/// Not clamped: a high protein target at a low calorie goal gives a negative value.
#[must_use]
pub fn carb_goal(calorie_goal: i32, protein_g: i32, fat_g: i32) -> i32 {
    let protein_kcal = f64::from(protein_g) * KCAL_PER_GRAM_PROTEIN;
    let fat_kcal = f64::from(fat_g) * KCAL_PER_GRAM_FAT;
    let remaining = f64::from(calorie_goal) - protein_kcal - fat_kcal;
    (remaining / KCAL_PER_GRAM_CARBS).round() as i32
}

/// Derive goals for a profile as of `today`
#[must_use]
pub fn compute_goals(
    profile: &BiometricProfile,
    call_site: GoalCallSite,
    today: NaiveDate,
    config: &NutritionGoalConfig,
) -> GoalComputation {
    let (Some(sex), Some(birth_date), Some(height_cm), Some(current_kg), Some(target_kg)) = (
        profile.sex,
        profile.birth_date,
        profile.height_cm,
        profile.current_weight_kg,
        profile.target_weight_kg,
    ) else {
        let missing = profile.missing_biometrics();
        debug!(user_id = %profile.user_id, ?missing, "Goal computation unavailable");
        return GoalComputation::Unavailable { missing };
    };

    let age_years = age_in_years(birth_date, today);
    let bmr = calculate_harris_benedict(
        sex,
        current_kg,
        f64::from(height_cm),
        age_years,
        &config.bmr,
    );
    let multiplier = activity_multiplier(&profile.activity, &config.activity);
    let tdee = calculate_tdee(bmr, multiplier);

    let calories = calorie_goal(tdee, current_kg, target_kg, config);
    let protein_g = protein_goal(current_kg, &profile.activity, call_site, config);
    let fat_g = fat_goal(calories, config);
    let carbs_g = carb_goal(calories, protein_g, fat_g);

    debug!(
        user_id = %profile.user_id,
        ?call_site,
        age_years,
        bmr,
        multiplier,
        tdee,
        calories,
        protein_g,
        carbs_g,
        fat_g,
        "Derived nutrition goals"
    );

    GoalComputation::Computed(GoalBreakdown {
        age_years,
        bmr,
        activity_multiplier: multiplier,
        tdee,
        call_site,
        goals: NutritionGoals::new(calories, protein_g, carbs_g, fat_g),
    })
}

/// [`compute_goals`] using the current UTC date
#[must_use]
pub fn compute_goals_today(
    profile: &BiometricProfile,
    call_site: GoalCallSite,
    config: &NutritionGoalConfig,
) -> GoalComputation {
    compute_goals(profile, call_site, Utc::now().date_naive(), config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_floors_partial_years() {
        assert_eq!(age_in_years(date(1994, 6, 15), date(2024, 6, 15)), 30);
        assert_eq!(age_in_years(date(1994, 6, 15), date(2024, 6, 14)), 29);
        assert_eq!(age_in_years(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_multiplier_buckets() {
        let config = ActivityMultiplierConfig::default();
        let cases = [(1, 1.2), (2, 1.375), (3, 1.375), (4, 1.55), (5, 1.55), (6, 1.725), (7, 1.725)];
        for (days, expected) in cases {
            let pattern = ActivityPattern::active([("running", days)]).unwrap();
            assert!((activity_multiplier(&pattern, &config) - expected).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_multiplier_caps_summed_days() {
        let config = ActivityMultiplierConfig::default();
        let pattern = ActivityPattern::active([("running", 5), ("gym", 5)]).unwrap();
        assert_eq!(pattern.weekly_activity_days(), 10);
        assert!((activity_multiplier(&pattern, &config) - 1.725).abs() < f64::EPSILON);
    }

    #[test]
    fn test_carbs_may_go_negative() {
        assert_eq!(carb_goal(1200, 270, 33), -44);
    }

    #[test]
    fn test_fat_share_rounding() {
        let config = NutritionGoalConfig::default();
        assert_eq!(fat_goal(2000, &config), 56);
        assert_eq!(fat_goal(2049, &config), 57);
    }
}
