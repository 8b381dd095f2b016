// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! In-progress edits held locally until a field is submitted or cancelled.
//!
//! Scalar drafts simply replace; link drafts accumulate per-platform so that
//! editing one platform never discards another platform's pending entry.

use std::collections::BTreeMap;

use crate::model::{FieldValue, SocialLink, SocialPlatform};

/// A field-scoped pending value, created on edit-open and destroyed on
/// submit success or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Text(String),
    Links(BTreeMap<SocialPlatform, SocialLink>),
}

impl Draft {
    /// Seeds a draft from the committed value so the editor opens showing
    /// what is currently saved.
    pub fn from_value(value: &FieldValue) -> Self {
        match value {
            FieldValue::Empty => Self::Text(String::new()),
            FieldValue::Text(text) => Self::Text(text.clone()),
            FieldValue::Links(links) => Self::Links(
                links.iter().map(|link| (link.platform(), link.clone())).collect(),
            ),
        }
    }

    /// Seeds a link draft even when the committed value is empty, so every
    /// known platform slot is addressable in the editor.
    pub fn links_from_value(value: &FieldValue) -> Self {
        match value {
            FieldValue::Links(_) => Self::from_value(value),
            _ => Self::Links(BTreeMap::new()),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::Text(text.into());
    }

    /// Substitutes the incoming entry for its platform, carrying over all
    /// other platforms' pending entries unchanged.
    pub fn merge_link(&mut self, incoming: SocialLink) {
        let entries = match self {
            Self::Links(entries) => entries,
            Self::Text(_) => {
                *self = Self::Links(BTreeMap::new());
                let Self::Links(entries) = self else { unreachable!() };
                entries
            }
        };
        entries.insert(incoming.platform(), incoming);
    }

    /// The value this draft would submit. Link entries come out in canonical
    /// platform order regardless of edit order; entries with an unset url are
    /// retained rather than dropped.
    pub fn to_value(&self) -> FieldValue {
        match self {
            Self::Text(text) => FieldValue::text(text.clone()),
            Self::Links(entries) => FieldValue::Links(merged_links(entries, None)),
        }
    }
}

/// Merges one incoming link entry against previously-known per-platform
/// drafts, preserving the canonical platform order.
pub fn merge_with_drafts(
    drafts: &BTreeMap<SocialPlatform, SocialLink>,
    incoming: SocialLink,
) -> Vec<SocialLink> {
    merged_links(drafts, Some(incoming))
}

fn merged_links(
    drafts: &BTreeMap<SocialPlatform, SocialLink>,
    incoming: Option<SocialLink>,
) -> Vec<SocialLink> {
    let mut merged = Vec::with_capacity(SocialPlatform::ALL.len());
    for platform in SocialPlatform::ALL {
        if let Some(link) = incoming.as_ref().filter(|link| link.platform() == platform) {
            merged.push(link.clone());
        } else if let Some(existing) = drafts.get(&platform) {
            merged.push(existing.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests;
