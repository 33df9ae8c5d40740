// ABOUTME: Integration tests for blacklist filtering of meal suggestions
// ABOUTME: Covers case-insensitive matching across fields and the unfiltered fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macrosense::intelligence::{filter_recommendations, FilterOutcome};
use macrosense::models::Recommendation;

mod common;

fn candidates() -> Vec<Recommendation> {
    vec![
        Recommendation::new("Peanut Noodles", "Cold sesame noodles")
            .with_ingredients(["noodles", "peanut butter"]),
        Recommendation::new("Grilled Salmon", "With lemon and dill")
            .with_ingredients(["salmon", "lemon"]),
        Recommendation::new("Shrimp Tacos", "Spicy and quick")
            .with_ingredients(["Shrimp", "tortilla"]),
    ]
}

#[test]
fn test_blocked_candidates_are_removed() {
    common::init_test_logging();
    let outcome = filter_recommendations(candidates(), &["peanut"]);

    assert!(!outcome.is_fallback());
    let titles: Vec<&str> = outcome
        .recommendations()
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Grilled Salmon", "Shrimp Tacos"]);
}

#[test]
fn test_matching_is_case_insensitive_substring() {
    let outcome = filter_recommendations(candidates(), &["SHRIMP", "Dill"]);

    assert_eq!(outcome.recommendations().len(), 1);
    assert_eq!(outcome.recommendations()[0].title, "Peanut Noodles");
}

#[test]
fn test_ingredient_only_match_is_blocked() {
    let outcome = filter_recommendations(candidates(), &["tortilla"]);
    assert!(outcome
        .recommendations()
        .iter()
        .all(|r| r.title != "Shrimp Tacos"));
}

#[test]
fn test_all_blocked_falls_back_to_full_list() {
    let outcome = filter_recommendations(candidates(), &["peanut", "salmon", "shrimp"]);

    assert!(outcome.is_fallback());
    assert_eq!(outcome.recommendations().len(), 3);
    assert_eq!(outcome.clone().into_recommendations(), candidates());
}

#[test]
fn test_no_keywords_keeps_everything() {
    let outcome = filter_recommendations::<&str>(candidates(), &[]);
    assert_eq!(outcome, FilterOutcome::Filtered(candidates()));
}

#[test]
fn test_empty_candidates_are_not_a_fallback() {
    let outcome = filter_recommendations(Vec::new(), &["peanut"]);
    assert_eq!(outcome, FilterOutcome::Filtered(Vec::new()));
}

#[test]
fn test_outcome_serializes_with_status_tag() {
    let outcome = filter_recommendations(candidates(), &["peanut", "salmon", "shrimp"]);
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["status"], "fallback_unfiltered");
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
}
