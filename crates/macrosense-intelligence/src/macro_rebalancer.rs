// ABOUTME: Keeps calorie and macro goals consistent when one field is edited
// ABOUTME: Default split, proportional redistribution, overflow capping with a typed warning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Macro rebalancer
//!
//! `(goals, edited_field) -> (goals', warning?)`, with no hidden state.
//!
//! - Calories edited: protein/carbs/fat are reset to a 30/40/30 energy split.
//! - A macro edited: if the set is already balanced (within 5 kcal) nothing
//!   changes. Otherwise the energy left after the edited macro is redistributed
//!   to the other two with a fixed ratio. If the edited macro alone exceeds the
//!   calorie goal it is capped to a maximum share first and a warning is emitted.
//!
//! All rounding is half away from zero.

use macrosense_core::constants::energy::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
use macrosense_core::constants::rebalance::{
    BALANCED_TOLERANCE_KCAL, CARBS_EDIT_FAT_PERCENT, CARBS_EDIT_PROTEIN_PERCENT,
    DEFAULT_CARBS_PERCENT, DEFAULT_FAT_PERCENT, DEFAULT_PROTEIN_PERCENT,
    DISPLAY_MISMATCH_THRESHOLD_KCAL, FAT_EDIT_CARBS_PERCENT, FAT_EDIT_PROTEIN_PERCENT,
    MAX_CARBS_PERCENT, MAX_FAT_PERCENT, MAX_PROTEIN_PERCENT, PROTEIN_EDIT_CARBS_PERCENT,
    PROTEIN_EDIT_FAT_PERCENT,
};
use macrosense_core::models::{GoalField, NutritionGoals};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// What the rebalancer did
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RebalanceAction {
    /// Calories were not a positive number; input returned as-is
    Unchanged,
    /// Macros already matched calories within tolerance
    AlreadyBalanced,
    /// Calories edited; macros reset to the default split
    DefaultSplit,
    /// Remaining energy redistributed to the two other macros
    Redistributed,
    /// Edited macro capped, then the remainder redistributed
    Capped,
}

/// Emitted when an edited macro alone exceeded the calorie goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverflowWarning {
    /// Macro that was reduced
    pub field: GoalField,
    /// Grams the user entered
    pub requested_grams: i32,
    /// Grams kept after capping
    pub capped_grams: i32,
    /// Maximum share of calories the macro may take
    pub max_share_percent: u8,
}

impl fmt::Display for OverflowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} reduced from {} g to {} g: it exceeded the calorie goal, so it is capped at {}% of calories",
            self.field, self.requested_grams, self.capped_grams, self.max_share_percent
        )
    }
}

/// Result of a numeric rebalance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RebalanceOutcome {
    /// Goals after rebalancing
    pub goals: NutritionGoals,
    /// Present only when the edited macro was capped
    pub warning: Option<OverflowWarning>,
    /// Which path was taken
    pub action: RebalanceAction,
}

impl RebalanceOutcome {
    const fn untouched(goals: NutritionGoals, action: RebalanceAction) -> Self {
        Self {
            goals,
            warning: None,
            action,
        }
    }

    /// Whether any goal value differs from the input
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(
            self.action,
            RebalanceAction::Unchanged | RebalanceAction::AlreadyBalanced
        )
    }
}

/// Split of the remaining energy after one macro is fixed
struct Redistribution {
    edited_kcal_per_gram: f64,
    max_share_percent: f64,
    first: (GoalField, f64, f64),
    second: (GoalField, f64, f64),
}

const fn redistribution_for(field: GoalField) -> Option<Redistribution> {
    match field {
        GoalField::Calories => None,
        GoalField::Protein => Some(Redistribution {
            edited_kcal_per_gram: KCAL_PER_GRAM_PROTEIN,
            max_share_percent: MAX_PROTEIN_PERCENT,
            first: (GoalField::Carbs, PROTEIN_EDIT_CARBS_PERCENT, KCAL_PER_GRAM_CARBS),
            second: (GoalField::Fat, PROTEIN_EDIT_FAT_PERCENT, KCAL_PER_GRAM_FAT),
        }),
        GoalField::Carbs => Some(Redistribution {
            edited_kcal_per_gram: KCAL_PER_GRAM_CARBS,
            max_share_percent: MAX_CARBS_PERCENT,
            first: (GoalField::Protein, CARBS_EDIT_PROTEIN_PERCENT, KCAL_PER_GRAM_PROTEIN),
            second: (GoalField::Fat, CARBS_EDIT_FAT_PERCENT, KCAL_PER_GRAM_FAT),
        }),
        GoalField::Fat => Some(Redistribution {
            edited_kcal_per_gram: KCAL_PER_GRAM_FAT,
            max_share_percent: MAX_FAT_PERCENT,
            first: (GoalField::Protein, FAT_EDIT_PROTEIN_PERCENT, KCAL_PER_GRAM_PROTEIN),
            second: (GoalField::Carbs, FAT_EDIT_CARBS_PERCENT, KCAL_PER_GRAM_CARBS),
        }),
    }
}

/// Grams of a macro carrying `percent` of `kcal`
fn grams_for_share(kcal: f64, percent: f64, kcal_per_gram: f64) -> i32 {
    (kcal * percent / (100.0 * kcal_per_gram)).round() as i32
}

fn is_balanced(goals: &NutritionGoals) -> bool {
    (goals.energy_from_macros() - f64::from(goals.calories)).abs() <= BALANCED_TOLERANCE_KCAL
}

fn default_split(calories: i32) -> NutritionGoals {
    let kcal = f64::from(calories);
    NutritionGoals::new(
        calories,
        grams_for_share(kcal, DEFAULT_PROTEIN_PERCENT, KCAL_PER_GRAM_PROTEIN),
        grams_for_share(kcal, DEFAULT_CARBS_PERCENT, KCAL_PER_GRAM_CARBS),
        grams_for_share(kcal, DEFAULT_FAT_PERCENT, KCAL_PER_GRAM_FAT),
    )
}

/// Rebalance `goals` after `edited` was changed
///
/// Negative macro values are treated as 0.
#[must_use]
pub fn rebalance(goals: NutritionGoals, edited: GoalField) -> RebalanceOutcome {
    if goals.calories <= 0 {
        return RebalanceOutcome::untouched(goals, RebalanceAction::Unchanged);
    }

    let Some(split) = redistribution_for(edited) else {
        let rebalanced = default_split(goals.calories);
        debug!(calories = goals.calories, ?rebalanced, "Applied default macro split");
        return RebalanceOutcome {
            goals: rebalanced,
            warning: None,
            action: RebalanceAction::DefaultSplit,
        };
    };

    let goals = NutritionGoals {
        protein_g: goals.protein_g.max(0),
        carbs_g: goals.carbs_g.max(0),
        fat_g: goals.fat_g.max(0),
        ..goals
    };
    if is_balanced(&goals) {
        return RebalanceOutcome::untouched(goals, RebalanceAction::AlreadyBalanced);
    }

    let calories = f64::from(goals.calories);
    let requested = goals.get(edited);
    let mut edited_grams = requested;
    let mut remaining = f64::from(edited_grams).mul_add(-split.edited_kcal_per_gram, calories);
    let mut warning = None;

    if remaining < 0.0 {
        edited_grams =
            grams_for_share(calories, split.max_share_percent, split.edited_kcal_per_gram);
        remaining = f64::from(edited_grams).mul_add(-split.edited_kcal_per_gram, calories);
        let overflow = OverflowWarning {
            field: edited,
            requested_grams: requested,
            capped_grams: edited_grams,
            max_share_percent: split.max_share_percent as u8,
        };
        debug!(%overflow, calories = goals.calories, "Capped overflowing macro edit");
        warning = Some(overflow);
    }

    let (first_field, first_percent, first_kcal_per_gram) = split.first;
    let (second_field, second_percent, second_kcal_per_gram) = split.second;
    let rebalanced = goals
        .with_field(edited, edited_grams)
        .with_field(
            first_field,
            grams_for_share(remaining, first_percent, first_kcal_per_gram),
        )
        .with_field(
            second_field,
            grams_for_share(remaining, second_percent, second_kcal_per_gram),
        );

    RebalanceOutcome {
        goals: rebalanced,
        action: if warning.is_some() {
            RebalanceAction::Capped
        } else {
            RebalanceAction::Redistributed
        },
        warning,
    }
}

/// Goal values exactly as typed into a form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawGoalInput {
    /// Calories text
    pub calories: String,
    /// Protein grams text
    pub protein: String,
    /// Carbohydrate grams text
    pub carbs: String,
    /// Fat grams text
    pub fat: String,
}

impl RawGoalInput {
    /// Build from four text values
    pub fn new(
        calories: impl Into<String>,
        protein: impl Into<String>,
        carbs: impl Into<String>,
        fat: impl Into<String>,
    ) -> Self {
        Self {
            calories: calories.into(),
            protein: protein.into(),
            carbs: carbs.into(),
            fat: fat.into(),
        }
    }

    /// Calories, if they parse to a positive number
    #[must_use]
    pub fn parsed_calories(&self) -> Option<i32> {
        parse_number(&self.calories)
            .filter(|kcal| *kcal > 0.0)
            .map(|kcal| kcal.round() as i32)
            .filter(|kcal| *kcal > 0)
    }

    /// Numeric goals; unparsable or negative macros count as 0
    #[must_use]
    pub fn to_goals(&self, calories: i32) -> NutritionGoals {
        NutritionGoals::new(
            calories,
            parse_macro(&self.protein),
            parse_macro(&self.carbs),
            parse_macro(&self.fat),
        )
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_macro(raw: &str) -> i32 {
    parse_number(raw).map_or(0, |grams| grams.max(0.0).round() as i32)
}

/// Result of a raw-text rebalance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RawRebalanceOutcome {
    /// Nothing to do; the input is returned as typed
    Untouched {
        /// Original text values
        input: RawGoalInput,
        /// `Unchanged` or `AlreadyBalanced`
        action: RebalanceAction,
    },
    /// Goals were recomputed
    Rebalanced(RebalanceOutcome),
}

/// Rebalance goals typed as text
#[must_use]
pub fn rebalance_raw(input: &RawGoalInput, edited: GoalField) -> RawRebalanceOutcome {
    let Some(calories) = input.parsed_calories() else {
        return RawRebalanceOutcome::Untouched {
            input: input.clone(),
            action: RebalanceAction::Unchanged,
        };
    };

    let outcome = rebalance(input.to_goals(calories), edited);
    if outcome.changed() {
        RawRebalanceOutcome::Rebalanced(outcome)
    } else {
        RawRebalanceOutcome::Untouched {
            input: input.clone(),
            action: outcome.action,
        }
    }
}

/// Presentation-only macro/calorie consistency indicator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BalanceStatus {
    /// Energy implied by the macro goals (kcal)
    pub macro_kcal: f64,
    /// `macro_kcal - calories`
    pub difference_kcal: f64,
    /// Whether the mismatch is large enough to show
    pub exceeds_display_threshold: bool,
}

/// Compare macro energy against the calorie goal
#[must_use]
pub fn balance_status(goals: &NutritionGoals) -> BalanceStatus {
    let macro_kcal = goals.energy_from_macros();
    let difference_kcal = macro_kcal - f64::from(goals.calories);
    BalanceStatus {
        macro_kcal,
        difference_kcal,
        exceeds_display_threshold: difference_kcal.abs() > DISPLAY_MISMATCH_THRESHOLD_KCAL,
    }
}
