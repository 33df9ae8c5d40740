// ABOUTME: JSON input and output helpers for macrosense-cli
// ABOUTME: Reads typed arrays from files and prints pretty JSON to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::{fs, io};
use tracing::debug;

/// Deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), bytes = raw.len(), "Loaded JSON input");
    Ok(value)
}

/// Print a value as pretty JSON followed by a newline
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
