//! Conflict aggregator
//!
//! Scans an incoming batch against the full existing set and classifies
//! each record. Key equality is case-insensitive name match for categories
//! and exact identifier match for items.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ReconcileConfig;
use crate::conflict::diff::{diff_categories, diff_items, CategoryField, ItemField};
use crate::models::{Category, GroceryItem};

/// A name collision between an incoming category and an existing one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConflict {
    /// The record already present in the target list
    pub existing: Category,
    /// The record arriving from the import/copy source
    pub incoming: Category,
    /// Fields whose values differ (may be empty for an exact duplicate)
    pub changed: Vec<CategoryField>,
}

/// Classification of one incoming category against the existing set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryClassification {
    /// No existing category shares the incoming name
    Clean(Category),
    /// An existing category shares the incoming name
    Conflict(CategoryConflict),
}

/// An id collision between a local item and an incoming remote version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemConflict {
    /// The locally stored version
    pub local: GroceryItem,
    /// The incoming remote version
    pub remote: GroceryItem,
    /// Fields whose values differ (never empty)
    pub changed: Vec<ItemField>,
}

/// Classification of one incoming item against the existing set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemClassification {
    /// No existing item shares the incoming id
    Clean(GroceryItem),
    /// An existing item shares the id and at least one field differs
    Conflict(ItemConflict),
    /// An existing item shares the id with identical field values
    Unchanged(GroceryItem),
}

/// Classify a batch of incoming categories against the existing set.
///
/// Each incoming record is evaluated independently; two batch records with
/// the same name both pair against the same existing record unless
/// `config.dedupe_batch` is set, in which case only the first occurrence of
/// a name survives classification.
#[must_use]
pub fn classify_categories(
    incoming: &[Category],
    existing: &[Category],
    config: &ReconcileConfig,
) -> Vec<CategoryClassification> {
    let mut seen_in_batch: HashSet<String> = HashSet::new();
    let mut classified = Vec::with_capacity(incoming.len());

    for candidate in incoming {
        if config.dedupe_batch && !seen_in_batch.insert(candidate.name.to_lowercase()) {
            tracing::debug!(name = %candidate.name, "dropping duplicate batch entry");
            continue;
        }

        match existing.iter().find(|c| c.name_matches(&candidate.name)) {
            Some(matched) => classified.push(CategoryClassification::Conflict(CategoryConflict {
                existing: matched.clone(),
                incoming: candidate.clone(),
                changed: diff_categories(matched, candidate),
            })),
            None => classified.push(CategoryClassification::Clean(candidate.clone())),
        }
    }

    classified
}

/// Classify a batch of incoming items against the existing set by exact id.
#[must_use]
pub fn classify_items(incoming: &[GroceryItem], existing: &[GroceryItem]) -> Vec<ItemClassification> {
    incoming
        .iter()
        .map(|candidate| match existing.iter().find(|i| i.id == candidate.id) {
            Some(matched) => {
                let changed = diff_items(matched, candidate);
                if changed.is_empty() {
                    ItemClassification::Unchanged(matched.clone())
                } else {
                    ItemClassification::Conflict(ItemConflict {
                        local: matched.clone(),
                        remote: candidate.clone(),
                        changed,
                    })
                }
            }
            None => ItemClassification::Clean(candidate.clone()),
        })
        .collect()
}
