// ABOUTME: Goals subcommand deriving daily nutrition goals from biometric flags
// ABOUTME: Parses activity flags into an activity pattern before computing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::io::print_json;
use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use macrosense::config::intelligence::global_goal_config;
use macrosense::intelligence::{compute_goals, GoalCallSite};
use macrosense::models::{ActivityPattern, BiometricProfile, ProfileUpdate, Sex, SEDENTARY_TAG};
use tracing::info;
use uuid::Uuid;

/// Flags of the goals subcommand
pub struct GoalsRequest {
    pub sex: String,
    pub birth_date: String,
    pub height_cm: u16,
    pub weight_kg: f64,
    pub target_kg: f64,
    pub activities: Vec<String>,
    pub call_site: GoalCallSite,
    pub today: Option<NaiveDate>,
}

/// Derive goals and print the breakdown
pub fn run(request: &GoalsRequest) -> Result<()> {
    let sex: Sex = request.sex.parse()?;
    let update = ProfileUpdate::default()
        .sex(sex)
        .birth_date_str(&request.birth_date)?
        .height_cm(request.height_cm)
        .current_weight_kg(request.weight_kg)
        .target_weight_kg(request.target_kg)
        .activity(parse_activities(&request.activities)?);
    update.validate()?;

    let mut profile = BiometricProfile::new(Uuid::nil());
    update.apply_to(&mut profile);

    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    let computation = compute_goals(&profile, request.call_site, today, global_goal_config());
    info!(
        call_site = ?request.call_site,
        computed = computation.is_computed(),
        "Derived goals"
    );
    print_json(&computation)
}

/// Parse `tag:days` flags; no flags or a lone `sedentary` is sedentary
fn parse_activities(flags: &[String]) -> Result<ActivityPattern> {
    match flags {
        [] => return Ok(ActivityPattern::Sedentary),
        [only] if only.trim().eq_ignore_ascii_case(SEDENTARY_TAG) => {
            return Ok(ActivityPattern::Sedentary);
        }
        _ => {}
    }

    let mut pairs = Vec::with_capacity(flags.len());
    for flag in flags {
        let (tag, days) = flag
            .split_once(':')
            .ok_or_else(|| anyhow!("activity '{flag}' must be written as tag:days"))?;
        let days: u8 = days
            .trim()
            .parse()
            .with_context(|| format!("activity '{flag}' has an invalid day count"))?;
        pairs.push((tag.to_owned(), days));
    }
    Ok(ActivityPattern::active(pairs)?)
}
