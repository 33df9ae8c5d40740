// ABOUTME: Environment configuration for deployment-specific engine settings
// ABOUTME: Reporting timezone, weight history limit, and weekly summary window mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based engine configuration

use crate::errors::{AppError, AppResult};
use crate::intelligence::{ReportingTimezone, SummaryWindow};
use chrono::NaiveDate;
use macrosense_core::constants::limits::DEFAULT_WEIGHT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Env var holding the reporting offset from UTC in minutes
pub const REPORTING_OFFSET_ENV: &str = "MACROSENSE_REPORTING_UTC_OFFSET_MINUTES";
/// Env var holding the default weight history page size
pub const WEIGHT_HISTORY_LIMIT_ENV: &str = "MACROSENSE_WEIGHT_HISTORY_LIMIT";
/// Env var selecting the weekly window mode
pub const WEEK_WINDOW_ENV: &str = "MACROSENSE_WEEK_WINDOW";

/// How weekly summary windows are placed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekWindowMode {
    /// The seven days ending on the reference day
    #[default]
    Trailing,
    /// Like `Trailing` until the window would reach into the previous month;
    /// then it starts on the 1st and can run past the reference day
    /// (2024-03-02 covers 03-01 ..= 03-07)
    MonthBounded,
}

impl WeekWindowMode {
    /// Window for a reference day
    #[must_use]
    pub const fn window(self, end: NaiveDate) -> SummaryWindow {
        match self {
            Self::Trailing => SummaryWindow::Trailing { end },
            Self::MonthBounded => SummaryWindow::MonthBounded { end },
        }
    }
}

impl FromStr for WeekWindowMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trailing" => Ok(Self::Trailing),
            "month" | "month_bounded" => Ok(Self::MonthBounded),
            other => Err(AppError::config(format!(
                "Invalid {WEEK_WINDOW_ENV} '{other}': expected 'trailing' or 'month'"
            ))),
        }
    }
}

impl fmt::Display for WeekWindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trailing => f.write_str("trailing"),
            Self::MonthBounded => f.write_str("month"),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Timezone defining calendar days for aggregation and day queries
    pub reporting_timezone: ReportingTimezone,
    /// Weight records returned when no limit is given
    pub weight_history_limit: usize,
    /// Weekly window placement
    pub week_window: WeekWindowMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reporting_timezone: ReportingTimezone::utc(),
            weight_history_limit: DEFAULT_WEIGHT_HISTORY_LIMIT,
            week_window: WeekWindowMode::Trailing,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a variable is set to an unparsable or
    /// out-of-range value
    pub fn from_env() -> AppResult<Self> {
        let offset_minutes: i32 = parse_env_or(REPORTING_OFFSET_ENV, 0)?;
        let reporting_timezone = ReportingTimezone::from_offset_minutes(offset_minutes)
            .map_err(|e| AppError::config(format!("Invalid {REPORTING_OFFSET_ENV}: {}", e.message)))?;

        let weight_history_limit: usize =
            parse_env_or(WEIGHT_HISTORY_LIMIT_ENV, DEFAULT_WEIGHT_HISTORY_LIMIT)?;
        if weight_history_limit == 0 {
            return Err(AppError::config(format!(
                "{WEIGHT_HISTORY_LIMIT_ENV} must be at least 1"
            )));
        }

        let week_window = match env::var(WEEK_WINDOW_ENV) {
            Ok(raw) => raw.parse()?,
            Err(_) => WeekWindowMode::default(),
        };

        let config = Self {
            reporting_timezone,
            weight_history_limit,
            week_window,
        };
        info!(
            reporting_offset_minutes = offset_minutes,
            weight_history_limit,
            week_window = %week_window,
            "Loaded engine configuration"
        );
        Ok(config)
    }
}

fn parse_env_or<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("Invalid {key} value '{raw}'"))),
        Err(_) => Ok(default),
    }
}
