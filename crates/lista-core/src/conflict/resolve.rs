//! Resolution selector
//!
//! Turns a conflict plus a user-chosen strategy into a merged record (or a
//! skip). Whole-record strategies apply to categories; item conflicts are
//! resolved field by field.

use serde::{Deserialize, Serialize};

use crate::config::ReconcileConfig;
use crate::conflict::aggregate::{CategoryConflict, ItemConflict};
use crate::error::{Error, Result};
use crate::models::{Category, GroceryItem};
use crate::util::names_match;

/// How a category conflict should be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "strategy")]
pub enum CategoryStrategy {
    /// Keep the existing record; the incoming one is dropped
    Skip,
    /// Replace the existing record's values, keeping its identifier
    Overwrite,
    /// Create the incoming record under a fresh non-colliding name
    Rename {
        /// Explicit new name; defaults to the configured suffix when `None`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_name: Option<String>,
    },
    /// Fill the existing record's color/icon from the incoming values
    Merge,
}

/// Outcome of resolving one category conflict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryResolution {
    /// The record to persist
    Merged(Category),
    /// Nothing to persist
    Skip,
}

/// Which side a resolved item field is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Local,
    Remote,
}

/// Per-field choices for resolving an item conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFieldChoices {
    pub name: Side,
    pub quantity: Side,
    pub category: Side,
    pub notes: Side,
    pub gotten: Side,
}

impl ItemFieldChoices {
    /// Take every tracked field from the local version
    #[must_use]
    pub const fn all_local() -> Self {
        Self {
            name: Side::Local,
            quantity: Side::Local,
            category: Side::Local,
            notes: Side::Local,
            gotten: Side::Local,
        }
    }

    /// Take every tracked field from the remote version
    #[must_use]
    pub const fn all_remote() -> Self {
        Self {
            name: Side::Remote,
            quantity: Side::Remote,
            category: Side::Remote,
            notes: Side::Remote,
            gotten: Side::Remote,
        }
    }
}

/// Resolve a category conflict with the chosen strategy.
///
/// `existing` is the full set of categories already in the target list; a
/// rename whose target name still collides (case-insensitively) with any of
/// them fails with [`Error::NameCollision`]. Callers applying a batch must
/// re-check after each committed record, since earlier applies may claim a
/// name this resolution assumed free.
pub fn resolve_category(
    conflict: &CategoryConflict,
    strategy: &CategoryStrategy,
    existing: &[Category],
    config: &ReconcileConfig,
) -> Result<CategoryResolution> {
    match strategy {
        CategoryStrategy::Skip => Ok(CategoryResolution::Skip),
        CategoryStrategy::Overwrite => {
            // Incoming values under the existing identity
            let mut merged = conflict.incoming.clone();
            merged.id = conflict.existing.id;
            merged.list_id = conflict.existing.list_id;
            merged.created_at = conflict.existing.created_at;
            Ok(CategoryResolution::Merged(merged))
        }
        CategoryStrategy::Rename { new_name } => {
            let name = match new_name {
                Some(name) => name.trim().to_string(),
                None => config.rename_suffix.apply(&conflict.incoming.name),
            };
            if name.is_empty() {
                return Err(Error::InvalidInput("Renamed name must not be empty".into()));
            }
            if existing.iter().any(|c| names_match(&c.name, &name)) {
                return Err(Error::NameCollision(name));
            }

            let mut merged = conflict.incoming.clone();
            merged.list_id = conflict.existing.list_id;
            merged.name = name;
            Ok(CategoryResolution::Merged(merged))
        }
        CategoryStrategy::Merge => {
            let mut merged = conflict.existing.clone();
            if conflict.incoming.color.is_some() {
                merged.color.clone_from(&conflict.incoming.color);
            }
            if conflict.incoming.icon.is_some() {
                merged.icon.clone_from(&conflict.incoming.icon);
            }
            Ok(CategoryResolution::Merged(merged))
        }
    }
}

/// Resolve an item conflict field by field.
///
/// `user_id` and `list_id` always come from the remote side, `created_at`
/// always from the local side (preserving original creation time), and
/// `updated_at` from the remote side.
#[must_use]
pub fn resolve_item(conflict: &ItemConflict, choices: &ItemFieldChoices) -> GroceryItem {
    let local = &conflict.local;
    let remote = &conflict.remote;

    let pick = |side: Side| match side {
        Side::Local => local,
        Side::Remote => remote,
    };

    GroceryItem {
        id: local.id,
        list_id: remote.list_id,
        user_id: remote.user_id.clone(),
        name: pick(choices.name).name.clone(),
        quantity: pick(choices.quantity).quantity,
        category: pick(choices.category).category.clone(),
        notes: pick(choices.notes).notes.clone(),
        gotten: pick(choices.gotten).gotten,
        created_at: local.created_at,
        updated_at: remote.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::diff::{diff_categories, diff_items};
    use crate::models::ListId;

    fn conflict_pair(
        existing: (&str, Option<&str>, Option<&str>),
        incoming: (&str, Option<&str>, Option<&str>),
    ) -> CategoryConflict {
        let list_id = ListId::new();
        let existing = Category::new(
            list_id,
            existing.0,
            existing.1.map(String::from),
            existing.2.map(String::from),
        )
        .unwrap();
        let incoming = Category::new(
            ListId::new(),
            incoming.0,
            incoming.1.map(String::from),
            incoming.2.map(String::from),
        )
        .unwrap();
        let changed = diff_categories(&existing, &incoming);
        CategoryConflict {
            existing,
            incoming,
            changed,
        }
    }

    #[test]
    fn skip_produces_no_record() {
        let conflict = conflict_pair(("Produce", None, None), ("Produce", Some("#000"), None));
        let resolution = resolve_category(
            &conflict,
            &CategoryStrategy::Skip,
            &[conflict.existing.clone()],
            &ReconcileConfig::default(),
        )
        .unwrap();
        assert_eq!(resolution, CategoryResolution::Skip);
    }

    #[test]
    fn overwrite_keeps_existing_identity() {
        let conflict = conflict_pair(("Produce", Some("#fff"), None), ("Produce", Some("#000"), None));
        let CategoryResolution::Merged(merged) = resolve_category(
            &conflict,
            &CategoryStrategy::Overwrite,
            &[conflict.existing.clone()],
            &ReconcileConfig::default(),
        )
        .unwrap() else {
            panic!("expected merged record");
        };

        assert_eq!(merged.id, conflict.existing.id);
        assert_eq!(merged.list_id, conflict.existing.list_id);
        assert_eq!(merged.created_at, conflict.existing.created_at);
        assert_eq!(merged.color.as_deref(), Some("#000"));
    }

    #[test]
    fn rename_defaults_to_configured_suffix() {
        let conflict = conflict_pair(("Produce", None, None), ("Produce", None, None));
        let config = ReconcileConfig::for_import();

        let CategoryResolution::Merged(merged) = resolve_category(
            &conflict,
            &CategoryStrategy::Rename { new_name: None },
            &[conflict.existing.clone()],
            &config,
        )
        .unwrap() else {
            panic!("expected merged record");
        };

        assert_eq!(merged.name, "Produce (Imported)");
        assert_eq!(merged.list_id, conflict.existing.list_id);
    }

    #[test]
    fn rename_rejects_colliding_target() {
        let list_id = ListId::new();
        let taken = Category::new(list_id, "Produce (Copy)", None, None).unwrap();
        let conflict = conflict_pair(("Produce", None, None), ("Produce", None, None));

        let error = resolve_category(
            &conflict,
            &CategoryStrategy::Rename { new_name: None },
            &[conflict.existing.clone(), taken],
            &ReconcileConfig::for_copy(),
        )
        .unwrap_err();
        assert!(matches!(error, Error::NameCollision(name) if name == "Produce (Copy)"));
    }

    #[test]
    fn rename_honors_explicit_name() {
        let conflict = conflict_pair(("Produce", None, None), ("Produce", None, None));
        let CategoryResolution::Merged(merged) = resolve_category(
            &conflict,
            &CategoryStrategy::Rename {
                new_name: Some(" Fresh Produce ".to_string()),
            },
            &[conflict.existing.clone()],
            &ReconcileConfig::default(),
        )
        .unwrap() else {
            panic!("expected merged record");
        };
        assert_eq!(merged.name, "Fresh Produce");
    }

    #[test]
    fn merge_overwrites_color_and_icon_but_never_name() {
        let conflict = conflict_pair(
            ("Produce", Some("#fff"), Some("🍎")),
            ("produce", Some("#000"), None),
        );

        let CategoryResolution::Merged(merged) = resolve_category(
            &conflict,
            &CategoryStrategy::Merge,
            &[conflict.existing.clone()],
            &ReconcileConfig::default(),
        )
        .unwrap() else {
            panic!("expected merged record");
        };

        assert_eq!(merged.id, conflict.existing.id);
        assert_eq!(merged.name, "Produce");
        assert_eq!(merged.color.as_deref(), Some("#000"));
        // Incoming icon was empty, existing value kept
        assert_eq!(merged.icon.as_deref(), Some("🍎"));
    }

    #[test]
    fn item_resolution_pins_ownership_and_creation_fields() {
        let local = GroceryItem::new(ListId::new(), "user-local", "Milk")
            .unwrap()
            .with_quantity(1);
        let mut remote = local.clone();
        remote.list_id = ListId::new();
        remote.user_id = "user-remote".to_string();
        remote.quantity = 3;
        remote.gotten = true;
        remote.updated_at = local.updated_at + 500;

        let conflict = ItemConflict {
            changed: diff_items(&local, &remote),
            local: local.clone(),
            remote: remote.clone(),
        };

        let choices = ItemFieldChoices {
            quantity: Side::Remote,
            ..ItemFieldChoices::all_local()
        };
        let merged = resolve_item(&conflict, &choices);

        assert_eq!(merged.id, local.id);
        assert_eq!(merged.user_id, "user-remote");
        assert_eq!(merged.list_id, remote.list_id);
        assert_eq!(merged.created_at, local.created_at);
        assert_eq!(merged.updated_at, remote.updated_at);
        assert_eq!(merged.quantity, 3);
        assert!(!merged.gotten); // local side chosen
    }
}
