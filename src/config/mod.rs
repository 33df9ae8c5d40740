// ABOUTME: Configuration management module for engine settings and goal coefficients
// ABOUTME: Environment-driven engine config and the validated global goal configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Macrosense
//!
//! - **Environment**: reporting timezone, history limits, weekly window mode
//! - **Intelligence**: goal derivation coefficients with `MACROSENSE_GOALS_*` overrides

/// Environment-driven engine configuration
pub mod environment;

/// Global goal configuration with environment overrides
pub mod intelligence;

pub use environment::{EngineConfig, WeekWindowMode};
pub use intelligence::{global_goal_config, load_goal_config};
