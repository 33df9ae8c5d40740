// ABOUTME: Integration tests for the in-memory profile, meal, and weight stores
// ABOUTME: Covers partial updates, birth-date idempotence, day queries, and weight history order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macrosense::database::{InMemoryStore, MealRepository, ProfileRepository, WeightRepository};
use macrosense::errors::ErrorCode;
use macrosense::intelligence::ReportingTimezone;
use macrosense::models::{BiometricProfile, NutritionGoals, ProfileUpdate};
use uuid::Uuid;

mod common;

use common::{at, date, meal};

#[tokio::test]
async fn test_upsert_then_get_profile() {
    common::init_test_logging();
    let store = InMemoryStore::default();
    let user = Uuid::new_v4();

    assert!(store.get_profile(user).await.unwrap().is_none());
    store.upsert_profile(BiometricProfile::new(user)).await.unwrap();
    assert_eq!(store.get_profile(user).await.unwrap().unwrap().user_id, user);
}

#[tokio::test]
async fn test_update_leaves_omitted_fields_untouched() {
    let store = InMemoryStore::default();
    let user = Uuid::new_v4();
    store.upsert_profile(BiometricProfile::new(user)).await.unwrap();

    store
        .update_profile(user, &ProfileUpdate::default().height_cm(172))
        .await
        .unwrap();
    let updated = store
        .update_profile(
            user,
            &ProfileUpdate::default().goals(NutritionGoals::new(2000, 150, 200, 67)),
        )
        .await
        .unwrap();

    assert_eq!(updated.height_cm, Some(172));
    assert_eq!(updated.goals, Some(NutritionGoals::new(2000, 150, 200, 67)));
    assert!(updated.sex.is_none());
}

#[tokio::test]
async fn test_saving_same_birth_date_is_idempotent() {
    let store = InMemoryStore::default();
    let user = Uuid::new_v4();
    store.upsert_profile(BiometricProfile::new(user)).await.unwrap();

    for _ in 0..3 {
        let update = ProfileUpdate::default()
            .birth_date_str("1990-02-28")
            .unwrap();
        store.update_profile(user, &update).await.unwrap();
        let profile = store.get_profile(user).await.unwrap().unwrap();
        assert_eq!(profile.birth_date, Some(date(1990, 2, 28)));
    }
}

#[tokio::test]
async fn test_timestamp_birth_date_keeps_calendar_day() {
    let update = ProfileUpdate::default()
        .birth_date_str("1990-02-28T23:30:00-05:00")
        .unwrap();
    assert_eq!(update.birth_date, Some(date(1990, 2, 28)));
}

#[tokio::test]
async fn test_update_missing_profile_is_not_found() {
    let store = InMemoryStore::default();
    let err = store
        .update_profile(Uuid::new_v4(), &ProfileUpdate::default().height_cm(170))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_invalid_update_is_rejected() {
    let store = InMemoryStore::default();
    let user = Uuid::new_v4();
    store.upsert_profile(BiometricProfile::new(user)).await.unwrap();

    let result = store
        .update_profile(user, &ProfileUpdate::default().height_cm(20))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_day_query_uses_requested_timezone() {
    let store = InMemoryStore::new();
    let west = ReportingTimezone::from_offset_minutes(-300).unwrap();
    let user = Uuid::new_v4();
    // 02:00 UTC on the 16th is still the 15th five hours west
    store.insert_meal(meal(user, at(2024, 6, 16, 2, 0), 400));
    store.insert_meal(meal(user, at(2024, 6, 15, 12, 0), 300));
    store.insert_meal(meal(Uuid::new_v4(), at(2024, 6, 15, 12, 0), 999));

    let meals = store
        .get_meals_for_day(user, date(2024, 6, 15), west)
        .await
        .unwrap();
    let calories: Vec<i32> = meals.iter().map(|m| m.calories).collect();
    assert_eq!(calories, vec![300, 400]);

    let utc_meals = store
        .get_meals_for_day(user, date(2024, 6, 15), ReportingTimezone::utc())
        .await
        .unwrap();
    assert_eq!(utc_meals.len(), 1);
}

#[tokio::test]
async fn test_range_query_is_inclusive_and_validated() {
    let store = InMemoryStore::default();
    let user = Uuid::new_v4();
    for day in 10..=16 {
        store.insert_meal(meal(user, at(2024, 6, day, 12, 0), 100));
    }

    let meals = store
        .get_meals_for_range(user, date(2024, 6, 11), date(2024, 6, 13), ReportingTimezone::utc())
        .await
        .unwrap();
    assert_eq!(meals.len(), 3);

    let err = store
        .get_meals_for_range(user, date(2024, 6, 13), date(2024, 6, 11), ReportingTimezone::utc())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_weight_history_is_newest_first_and_limited() {
    let store = InMemoryStore::default();
    let user = Uuid::new_v4();
    store.insert_weight_at(user, 82.0, at(2024, 6, 1, 7, 0)).unwrap();
    store.insert_weight_at(user, 80.5, at(2024, 6, 15, 7, 0)).unwrap();
    store.insert_weight_at(user, 81.2, at(2024, 6, 8, 7, 0)).unwrap();

    let history = store.weight_history(user, 2).await.unwrap();
    let weights: Vec<f64> = history.iter().map(|r| r.weight_kg).collect();
    assert_eq!(weights, vec![80.5, 81.2]);

    assert!(store.weight_history(Uuid::new_v4(), 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_implausible_weight_is_rejected() {
    let store = InMemoryStore::default();
    let err = store.add_weight_record(Uuid::new_v4(), 5.0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}
