// ABOUTME: Subcommand implementations for macrosense-cli
// ABOUTME: Each module parses its inputs, runs one computation, and prints JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod filter;
pub mod goals;
pub mod rebalance;
pub mod summary;
