// ABOUTME: Integration tests for biometric goal derivation
// ABOUTME: Covers BMR, activity buckets, weight-goal adjustments, and call-site protein factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macrosense::intelligence::config::ActivityMultiplierConfig;
use macrosense::intelligence::goal_calculator::{
    activity_multiplier, age_in_years, calculate_harris_benedict, calculate_tdee, calorie_goal,
    carb_goal, fat_goal, protein_goal,
};
use macrosense::intelligence::{compute_goals, GoalCallSite, GoalComputation, NutritionGoalConfig};
use macrosense::models::{
    ActivityPattern, BiometricField, BiometricProfile, NutritionGoals, ProfileUpdate, Sex,
};
use uuid::Uuid;

mod common;

use common::{date, male_runner_update, sedentary_female_update};

fn profile_from(update: &ProfileUpdate) -> BiometricProfile {
    let mut profile = BiometricProfile::new(Uuid::new_v4());
    update.apply_to(&mut profile);
    profile
}

// ============================================================================
// BMR AND TDEE
// ============================================================================

#[test]
fn test_harris_benedict_male() {
    let config = NutritionGoalConfig::default();
    let bmr = calculate_harris_benedict(Sex::Male, 80.0, 180.0, 30, &config.bmr);

    // 88.362 + 13.397*80 + 4.799*180 - 5.677*30
    assert!((bmr - 1853.632).abs() < 1e-6, "got {bmr}");
}

#[test]
fn test_harris_benedict_other_uses_female_coefficients() {
    let config = NutritionGoalConfig::default();
    let female = calculate_harris_benedict(Sex::Female, 60.0, 165.0, 25, &config.bmr);
    let other = calculate_harris_benedict(Sex::Other, 60.0, 165.0, 25, &config.bmr);

    assert!((female - 1405.333).abs() < 1e-6, "got {female}");
    assert!((female - other).abs() < f64::EPSILON);
}

#[test]
fn test_age_uses_365_25_day_years() {
    assert_eq!(age_in_years(date(1994, 6, 15), date(2024, 6, 15)), 30);
    assert_eq!(age_in_years(date(2000, 1, 1), date(2000, 12, 31)), 0);
}

#[test]
fn test_activity_multiplier_buckets() {
    let config = ActivityMultiplierConfig::default();
    let cases = [
        (1, 1.2),
        (2, 1.375),
        (3, 1.375),
        (4, 1.55),
        (5, 1.55),
        (6, 1.725),
        (7, 1.725),
    ];
    for (days, expected) in cases {
        let pattern = ActivityPattern::active([("cycling", days)]).unwrap();
        let multiplier = activity_multiplier(&pattern, &config);
        assert!(
            (multiplier - expected).abs() < f64::EPSILON,
            "{days} days gave {multiplier}"
        );
    }
}

#[test]
fn test_activity_days_are_summed_and_capped() {
    let config = ActivityMultiplierConfig::default();
    let pattern = ActivityPattern::active([("running", 3), ("gym", 3)]).unwrap();
    assert!((activity_multiplier(&pattern, &config) - 1.725).abs() < f64::EPSILON);

    let saturated = ActivityPattern::active([("running", 7), ("gym", 7)]).unwrap();
    assert_eq!(saturated.weekly_activity_days(), 14);
    assert!((activity_multiplier(&saturated, &config) - 1.725).abs() < f64::EPSILON);
}

#[test]
fn test_sedentary_and_empty_active_patterns_use_base_multiplier() {
    let config = ActivityMultiplierConfig::default();
    let empty = ActivityPattern::active(Vec::<(&str, u8)>::new()).unwrap();

    assert!((activity_multiplier(&ActivityPattern::Sedentary, &config) - 1.2).abs() < f64::EPSILON);
    assert!((activity_multiplier(&empty, &config) - 1.2).abs() < f64::EPSILON);
}

#[test]
fn test_tdee_rounds_half_away_from_zero() {
    assert_eq!(calculate_tdee(1000.0, 1.2), 1200);
    assert_eq!(calculate_tdee(1853.632, 1.375), 2549);
    assert_eq!(calculate_tdee(1000.5, 1.0), 1001);
}

// ============================================================================
// CALORIE AND MACRO GOALS
// ============================================================================

#[test]
fn test_calorie_goal_directions() {
    let config = NutritionGoalConfig::default();

    assert_eq!(calorie_goal(2549, 80.0, 75.0, &config), 2049);
    assert_eq!(calorie_goal(2000, 70.0, 75.0, &config), 2300);
    assert_eq!(calorie_goal(2000, 70.0, 70.0, &config), 2000);
}

#[test]
fn test_deficit_never_drops_below_floor() {
    let config = NutritionGoalConfig::default();
    assert_eq!(calorie_goal(1500, 60.0, 55.0, &config), 1200);
    assert_eq!(calorie_goal(1100, 60.0, 55.0, &config), 1200);
}

#[test]
fn test_protein_factors_differ_by_call_site() {
    let config = NutritionGoalConfig::default();
    let active = ActivityPattern::active([("running", 3)]).unwrap();

    assert_eq!(protein_goal(80.0, &active, GoalCallSite::Onboarding, &config), 128);
    assert_eq!(protein_goal(80.0, &active, GoalCallSite::Recalculation, &config), 144);
    assert_eq!(
        protein_goal(80.0, &ActivityPattern::Sedentary, GoalCallSite::Onboarding, &config),
        96
    );
    assert_eq!(
        protein_goal(80.0, &ActivityPattern::Sedentary, GoalCallSite::Recalculation, &config),
        96
    );
}

#[test]
fn test_fat_is_quarter_of_calories() {
    let config = NutritionGoalConfig::default();
    assert_eq!(fat_goal(2049, &config), 57);
    assert_eq!(fat_goal(1800, &config), 50);
}

#[test]
fn test_carbs_can_go_negative() {
    assert_eq!(carb_goal(2049, 128, 57), 256);
    assert_eq!(carb_goal(1200, 250, 40), -40);
}

// ============================================================================
// FULL COMPUTATION
// ============================================================================

#[test]
fn test_male_runner_onboarding_goals() {
    let profile = profile_from(&male_runner_update());
    let computation = compute_goals(
        &profile,
        GoalCallSite::Onboarding,
        date(2024, 6, 15),
        &NutritionGoalConfig::default(),
    );

    let GoalComputation::Computed(breakdown) = computation else {
        panic!("expected computed goals, got {computation:?}");
    };
    assert_eq!(breakdown.age_years, 30);
    assert_eq!(breakdown.tdee, 2549);
    assert!((breakdown.activity_multiplier - 1.375).abs() < f64::EPSILON);
    assert_eq!(breakdown.goals, NutritionGoals::new(2049, 128, 256, 57));
}

#[test]
fn test_male_runner_recalculation_goals() {
    let profile = profile_from(&male_runner_update());
    let computation = compute_goals(
        &profile,
        GoalCallSite::Recalculation,
        date(2024, 6, 15),
        &NutritionGoalConfig::default(),
    );

    assert_eq!(computation.goals(), Some(NutritionGoals::new(2049, 144, 240, 57)));
}

#[test]
fn test_sedentary_female_maintenance_goals() {
    let profile = profile_from(&sedentary_female_update());
    let computation = compute_goals(
        &profile,
        GoalCallSite::Onboarding,
        date(2024, 3, 1),
        &NutritionGoalConfig::default(),
    );

    assert_eq!(computation.goals(), Some(NutritionGoals::new(1686, 72, 244, 47)));
}

#[test]
fn test_missing_biometrics_is_unavailable_not_error() {
    let update = ProfileUpdate::default().sex(Sex::Female).height_cm(170);
    let profile = profile_from(&update);
    let computation = compute_goals(
        &profile,
        GoalCallSite::Onboarding,
        date(2024, 1, 1),
        &NutritionGoalConfig::default(),
    );

    assert!(!computation.is_computed());
    assert_eq!(
        computation,
        GoalComputation::Unavailable {
            missing: vec![
                BiometricField::BirthDate,
                BiometricField::CurrentWeight,
                BiometricField::TargetWeight,
            ],
        }
    );
}

#[test]
fn test_custom_configuration_changes_result() {
    let mut config = NutritionGoalConfig::default();
    config.calorie_adjustments.weight_loss_deficit_kcal = 250;

    let profile = profile_from(&male_runner_update());
    let goals = compute_goals(&profile, GoalCallSite::Onboarding, date(2024, 6, 15), &config)
        .goals()
        .unwrap();

    assert_eq!(goals.calories, 2299);
}

#[test]
fn test_computation_serializes_with_status_tag() {
    let profile = profile_from(&sedentary_female_update());
    let computation = compute_goals(
        &profile,
        GoalCallSite::Onboarding,
        date(2024, 3, 1),
        &NutritionGoalConfig::default(),
    );

    let json = serde_json::to_value(&computation).unwrap();
    assert_eq!(json["status"], "computed");
    assert_eq!(json["goals"]["calories"], 1686);
    assert_eq!(json["call_site"], "onboarding");
}
