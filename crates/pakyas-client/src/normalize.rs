// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Field normalization shared by the accessors and the reconcilers.
//!
//! Both functions are idempotent so that state written after one pass
//! compares equal on the next.

/// Sort tags lexicographically (case-sensitive) and drop duplicates.
///
/// An empty input yields an empty list, never an absent one.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut sorted: Vec<String> = tags.into_iter().map(Into::into).collect();
    sorted.sort();
    sorted.dedup();
    sorted
}

/// Treat an empty description as no description.
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.is_empty())
}
