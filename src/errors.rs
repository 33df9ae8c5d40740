// ABOUTME: Re-exports the unified error types from macrosense-core
// ABOUTME: Keeps `crate::errors::*` paths stable for services and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Error types live in `macrosense-core` so the intelligence crate can return
//! them too; this module re-exports them for the application layer.

pub use macrosense_core::errors::{AppError, AppResult, ErrorCode, ErrorContext};
