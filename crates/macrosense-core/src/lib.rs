// ABOUTME: Core types and constants for the Macrosense nutrition goal engine
// ABOUTME: Foundation crate with error handling, domain models, and nutrition constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macrosense Core
//!
//! Foundation crate providing shared types and constants for the Macrosense
//! nutrition engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Energy densities, rebalancing thresholds, and goal defaults
//! - **models**: Biometric profiles, nutrition goals, meal records, and recommendations

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profiles, goals, meals, recommendations)
pub mod models;
