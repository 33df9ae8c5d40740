// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Energy densities, goal defaults, and rebalancing thresholds for the nutrition engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single list.

/// Energy density of the three macronutrients (kcal per gram)
pub mod energy {
    /// Protein: 4 kcal/g
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Carbohydrate: 4 kcal/g
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Fat: 9 kcal/g
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
}

/// Baseline goal derivation defaults
pub mod goal_defaults {
    /// Days per year used for whole-year age
    pub const DAYS_PER_YEAR: f64 = 365.25;
    /// Daily calorie deficit applied when the target weight is below current weight
    pub const WEIGHT_LOSS_DEFICIT_KCAL: i32 = 500;
    /// Calorie floor for a deficit goal
    pub const MINIMUM_DEFICIT_GOAL_KCAL: i32 = 1200;
    /// Daily calorie surplus applied when the target weight is above current weight
    pub const WEIGHT_GAIN_SURPLUS_KCAL: i32 = 300;
    /// Percentage of the calorie goal assigned to fat
    pub const FAT_PERCENT_OF_CALORIES: f64 = 25.0;
    /// Upper bound on summed weekly activity days
    pub const MAX_WEEKLY_ACTIVITY_DAYS: u32 = 7;

    /// Protein factors (g/kg) used when goals are first seeded during onboarding
    pub mod onboarding {
        /// Sedentary profile
        pub const PROTEIN_G_PER_KG_SEDENTARY: f64 = 1.2;
        /// Any non-sedentary profile
        pub const PROTEIN_G_PER_KG_ACTIVE: f64 = 1.6;
    }

    /// Protein factors (g/kg) used when goals are recalculated after onboarding
    pub mod recalculation {
        /// Sedentary profile
        pub const PROTEIN_G_PER_KG_SEDENTARY: f64 = 1.2;
        /// Any non-sedentary profile
        pub const PROTEIN_G_PER_KG_ACTIVE: f64 = 1.8;
    }
}

/// Macro rebalancing policy
pub mod rebalance {
    /// A goal set whose macro energy is within this many kcal of the calorie goal is balanced
    pub const BALANCED_TOLERANCE_KCAL: f64 = 5.0;
    /// Presentation-only indicator threshold for a visible macro/calorie mismatch
    pub const DISPLAY_MISMATCH_THRESHOLD_KCAL: f64 = 50.0;

    // Shares are whole percentages: `kcal * percent` stays exact, so the single
    // division by `100 * kcal_per_gram` rounds x.5 ties away from zero.

    /// Default protein share applied when the calorie goal itself is edited
    pub const DEFAULT_PROTEIN_PERCENT: f64 = 30.0;
    /// Default carbohydrate share
    pub const DEFAULT_CARBS_PERCENT: f64 = 40.0;
    /// Default fat share
    pub const DEFAULT_FAT_PERCENT: f64 = 30.0;

    /// Protein edited: remaining energy to carbs
    pub const PROTEIN_EDIT_CARBS_PERCENT: f64 = 57.0;
    /// Protein edited: remaining energy to fat
    pub const PROTEIN_EDIT_FAT_PERCENT: f64 = 43.0;
    /// Carbs edited: remaining energy to protein
    pub const CARBS_EDIT_PROTEIN_PERCENT: f64 = 50.0;
    /// Carbs edited: remaining energy to fat
    pub const CARBS_EDIT_FAT_PERCENT: f64 = 50.0;
    /// Fat edited: remaining energy to protein
    pub const FAT_EDIT_PROTEIN_PERCENT: f64 = 30.0;
    /// Fat edited: remaining energy to carbs
    pub const FAT_EDIT_CARBS_PERCENT: f64 = 70.0;

    /// Maximum share of calories protein may take after an overflowing edit
    pub const MAX_PROTEIN_PERCENT: f64 = 50.0;
    /// Maximum share of calories carbohydrate may take after an overflowing edit
    pub const MAX_CARBS_PERCENT: f64 = 50.0;
    /// Maximum share of calories fat may take after an overflowing edit
    pub const MAX_FAT_PERCENT: f64 = 30.0;
}

/// Aggregation windows
pub mod aggregation {
    /// Number of entries in a weekly summary
    pub const DAYS_PER_WEEK: usize = 7;
    /// Largest accepted reporting offset from UTC, in minutes (UTC+14:00)
    pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;
}

/// Store defaults
pub mod limits {
    /// Default number of weight records returned by a history query
    pub const DEFAULT_WEIGHT_HISTORY_LIMIT: usize = 30;
    /// Accepted body weight range (kg)
    pub const MIN_WEIGHT_KG: f64 = 20.0;
    /// Accepted body weight range (kg)
    pub const MAX_WEIGHT_KG: f64 = 400.0;
    /// Accepted height range (cm)
    pub const MIN_HEIGHT_CM: u16 = 50;
    /// Accepted height range (cm)
    pub const MAX_HEIGHT_CM: u16 = 272;
    /// Highest weekly frequency for a single activity
    pub const MAX_ACTIVITY_DAYS_PER_WEEK: u8 = 7;
}

/// Service names for structured logging
pub mod service_names {
    /// Main library / service
    pub const MACROSENSE: &str = "macrosense";
    /// Management CLI
    pub const MACROSENSE_CLI: &str = "macrosense-cli";
}
