// ABOUTME: Macrosense CLI - offline access to goal derivation, rebalancing, and summaries
// ABOUTME: Reads flags and JSON files, prints results as pretty JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Derive goals from biometrics
//! macrosense-cli goals --sex male --birth-date 1994-06-15 --height-cm 180 \
//!     --weight-kg 80 --target-kg 75 --activity running:3
//!
//! # Rebalance after editing protein
//! macrosense-cli rebalance 2000 600 200 67 --field protein
//!
//! # Daily summary of a meal log, or the week ending on a day
//! macrosense-cli summary --meals meals.json --day 2024-06-15
//! macrosense-cli summary --meals meals.json --day 2024-06-15 --weekly
//!
//! # Filter suggestions against blocked keywords
//! macrosense-cli filter --candidates suggestions.json --block peanut,shellfish
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use macrosense::constants::service_names;
use macrosense::intelligence::GoalCallSite;
use macrosense::logging::LoggingConfig;
use macrosense::models::GoalField;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "macrosense-cli",
    about = "Macrosense nutrition goal CLI",
    long_about = "Derive nutrition goals, rebalance edited goals, summarize meal logs, and screen meal suggestions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Derive daily goals from biometrics
    Goals {
        /// Biological sex (male, female, other)
        #[arg(long)]
        sex: String,

        /// Birth date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        birth_date: String,

        /// Height in centimeters
        #[arg(long)]
        height_cm: u16,

        /// Current weight in kilograms
        #[arg(long)]
        weight_kg: f64,

        /// Target weight in kilograms
        #[arg(long)]
        target_kg: f64,

        /// Activity as `tag:days` (repeatable); omit or pass `sedentary` for none
        #[arg(long = "activity")]
        activities: Vec<String>,

        /// Which protein factors to use
        #[arg(long, value_enum, default_value = "onboarding")]
        call_site: CallSiteArg,

        /// Evaluation date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Rebalance four goal values after one was edited
    Rebalance {
        /// Calories as typed
        calories: String,
        /// Protein grams as typed
        protein: String,
        /// Carbohydrate grams as typed
        carbs: String,
        /// Fat grams as typed
        fat: String,

        /// The field that was edited
        #[arg(long)]
        field: GoalField,
    },

    /// Summarize a JSON file of meal records
    Summary {
        /// JSON array of meal records
        #[arg(long)]
        meals: PathBuf,

        /// Day to summarize, or the anchor day of the week
        #[arg(long)]
        day: NaiveDate,

        /// Summarize seven days instead of one
        #[arg(long)]
        weekly: bool,

        /// Goals as `calories,protein,carbs,fat` for a full daily extract
        #[arg(long, value_delimiter = ',')]
        goals: Option<Vec<i32>>,
    },

    /// Filter a JSON file of meal suggestions
    Filter {
        /// JSON array of suggestions
        #[arg(long)]
        candidates: PathBuf,

        /// Blocked keywords (comma-separated or repeated)
        #[arg(long, value_delimiter = ',')]
        block: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CallSiteArg {
    Onboarding,
    Recalculation,
}

impl From<CallSiteArg> for GoalCallSite {
    fn from(arg: CallSiteArg) -> Self {
        match arg {
            CallSiteArg::Onboarding => Self::Onboarding,
            CallSiteArg::Recalculation => Self::Recalculation,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_service(service_names::MACROSENSE_CLI);
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    match cli.command {
        Command::Goals {
            sex,
            birth_date,
            height_cm,
            weight_kg,
            target_kg,
            activities,
            call_site,
            today,
        } => {
            let request = commands::goals::GoalsRequest {
                sex,
                birth_date,
                height_cm,
                weight_kg,
                target_kg,
                activities,
                call_site: call_site.into(),
                today,
            };
            commands::goals::run(&request)?;
        }
        Command::Rebalance {
            calories,
            protein,
            carbs,
            fat,
            field,
        } => {
            commands::rebalance::run(calories, protein, carbs, fat, field)?;
        }
        Command::Summary {
            meals,
            day,
            weekly,
            goals,
        } => {
            commands::summary::run(&meals, day, weekly, goals.as_deref()).await?;
        }
        Command::Filter { candidates, block } => {
            commands::filter::run(&candidates, &block).await?;
        }
    }

    debug!("Command completed");
    Ok(())
}
