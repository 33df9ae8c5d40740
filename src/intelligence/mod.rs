// ABOUTME: Re-exports the nutrition computations from macrosense-intelligence
// ABOUTME: Goal calculator, macro rebalancer, nutrition aggregator, recommendation filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition intelligence
//!
//! All computation lives in the `macrosense-intelligence` crate; the
//! application layer only adds configuration and persistence around it.

pub use macrosense_intelligence::*;
