// ABOUTME: Main library entry point for the Macrosense nutrition engine
// ABOUTME: Wires goal derivation, rebalancing, aggregation, and filtering to the stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macrosense
//!
//! Tracks nutritional intake against personalized goals derived from biometric
//! data, and keeps those goals internally consistent as they are edited.
//!
//! ## Architecture
//!
//! - **`macrosense-core`**: error model, constants, domain models
//! - **`macrosense-intelligence`**: the pure computations (goal calculator,
//!   macro rebalancer, nutrition aggregator, recommendation filter)
//! - **This crate**: configuration, logging, store traits with in-memory
//!   implementations, and the [`services::NutritionService`] that runs each
//!   read-modify-write of a profile under a per-user lock
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use macrosense::config::environment::EngineConfig;
//! use macrosense::database::memory::InMemoryStore;
//! use macrosense::errors::AppResult;
//! use macrosense::services::NutritionService;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = EngineConfig::from_env()?;
//!     let store = Arc::new(InMemoryStore::new());
//!     let _service = NutritionService::from_store(store, config);
//!     Ok(())
//! }
//! ```

/// Environment and goal configuration
pub mod config;

/// Store interfaces and the in-memory implementation
pub mod database;

/// Unified error handling
pub mod errors;

/// Nutrition computations re-exported from `macrosense-intelligence`
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Application services over the stores
pub mod services;

/// Domain constants re-exported from `macrosense-core`
pub use macrosense_core::constants;

/// Domain models re-exported from `macrosense-core`
pub use macrosense_core::models;
