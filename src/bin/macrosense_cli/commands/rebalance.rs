// ABOUTME: Rebalance subcommand recomputing goals typed as text
// ABOUTME: Prints the outcome together with the macro/calorie balance indicator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::io::print_json;
use anyhow::Result;
use macrosense::intelligence::{
    balance_status, rebalance_raw, BalanceStatus, RawGoalInput, RawRebalanceOutcome,
};
use macrosense::models::GoalField;
use serde::Serialize;
use tracing::warn;

#[derive(Serialize)]
struct RebalanceReport {
    outcome: RawRebalanceOutcome,
    balance: Option<BalanceStatus>,
}

/// Rebalance the four values and print the result
pub fn run(
    calories: String,
    protein: String,
    carbs: String,
    fat: String,
    field: GoalField,
) -> Result<()> {
    let input = RawGoalInput::new(calories, protein, carbs, fat);
    let outcome = rebalance_raw(&input, field);

    let goals = match &outcome {
        RawRebalanceOutcome::Rebalanced(rebalanced) => {
            if let Some(warning) = &rebalanced.warning {
                warn!("{warning}");
            }
            Some(rebalanced.goals)
        }
        RawRebalanceOutcome::Untouched { .. } => {
            input.parsed_calories().map(|kcal| input.to_goals(kcal))
        }
    };

    print_json(&RebalanceReport {
        balance: goals.as_ref().map(balance_status),
        outcome,
    })
}
