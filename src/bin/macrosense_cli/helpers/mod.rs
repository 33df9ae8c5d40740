// ABOUTME: Shared helpers for macrosense-cli
// ABOUTME: JSON file loading and stdout rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod io;
