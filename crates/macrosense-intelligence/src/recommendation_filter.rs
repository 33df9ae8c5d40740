// ABOUTME: Drops generated meal suggestions that mention blacklisted or allergenic ingredients
// ABOUTME: Falls back to the unfiltered list, tagged, when every candidate would be removed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recommendation filter
//!
//! Keyword matching is a case-insensitive substring test over the suggestion's
//! title, description and ingredient names. When every candidate matches a
//! keyword the original list is returned as [`FilterOutcome::FallbackUnfiltered`]
//! so callers can surface that the suggestions were not screened.

use macrosense_core::models::Recommendation;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result of filtering suggestions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", content = "recommendations", rename_all = "snake_case")]
pub enum FilterOutcome {
    /// Candidates that passed the blacklist
    Filtered(Vec<Recommendation>),
    /// Every candidate was blocked; the unscreened list is returned
    FallbackUnfiltered(Vec<Recommendation>),
}

impl FilterOutcome {
    /// Suggestions regardless of tag
    #[must_use]
    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            Self::Filtered(list) | Self::FallbackUnfiltered(list) => list,
        }
    }

    /// Consume into the suggestion list
    #[must_use]
    pub fn into_recommendations(self) -> Vec<Recommendation> {
        match self {
            Self::Filtered(list) | Self::FallbackUnfiltered(list) => list,
        }
    }

    /// Whether the blacklist could not be applied
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackUnfiltered(_))
    }
}

/// Lowercased title, description and ingredients joined by spaces
#[must_use]
pub fn searchable_text(recommendation: &Recommendation) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(recommendation.ingredients.len() + 2);
    parts.push(&recommendation.title);
    parts.push(&recommendation.description);
    parts.extend(recommendation.ingredients.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn is_blocked(recommendation: &Recommendation, keywords: &[String]) -> bool {
    let text = searchable_text(recommendation);
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}

/// Remove candidates mentioning any blocked keyword
///
/// Blank keywords are ignored. An empty candidate list is `Filtered(vec![])`.
#[must_use]
pub fn filter_recommendations<S: AsRef<str>>(
    candidates: Vec<Recommendation>,
    blocked_keywords: &[S],
) -> FilterOutcome {
    let keywords = normalize_keywords(blocked_keywords);
    if keywords.is_empty() || candidates.is_empty() {
        return FilterOutcome::Filtered(candidates);
    }

    let total = candidates.len();
    let kept: Vec<Recommendation> = candidates
        .iter()
        .filter(|candidate| !is_blocked(candidate, &keywords))
        .cloned()
        .collect();

    if kept.is_empty() {
        warn!(
            candidates = total,
            keywords = keywords.len(),
            "All recommendations matched blocked keywords; returning unfiltered list"
        );
        return FilterOutcome::FallbackUnfiltered(candidates);
    }

    debug!(
        candidates = total,
        kept = kept.len(),
        "Filtered recommendations against blocked keywords"
    );
    FilterOutcome::Filtered(kept)
}
