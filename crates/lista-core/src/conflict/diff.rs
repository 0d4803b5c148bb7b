//! Field differ
//!
//! Pure comparisons between two versions of a record. Values are compared
//! case-sensitively; only the logical-key name check (`names_match`) is
//! case-insensitive, and that lives in `util`.

use serde::{Deserialize, Serialize};

use crate::models::{Category, GroceryItem};

/// Fields of a category tracked by the differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryField {
    Name,
    Color,
    Icon,
}

/// Fields of a grocery item tracked by the differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Name,
    Quantity,
    Category,
    Notes,
    Gotten,
}

/// Return the category fields whose values differ between two versions.
///
/// Identifiers and timestamps are not compared; an empty result means the
/// two versions carry the same user-visible values.
#[must_use]
pub fn diff_categories(existing: &Category, incoming: &Category) -> Vec<CategoryField> {
    let mut changed = Vec::new();

    if existing.name != incoming.name {
        changed.push(CategoryField::Name);
    }
    if existing.color != incoming.color {
        changed.push(CategoryField::Color);
    }
    if existing.icon != incoming.icon {
        changed.push(CategoryField::Icon);
    }

    changed
}

/// Return the item fields whose values differ between two versions.
#[must_use]
pub fn diff_items(local: &GroceryItem, remote: &GroceryItem) -> Vec<ItemField> {
    let mut changed = Vec::new();

    if local.name != remote.name {
        changed.push(ItemField::Name);
    }
    if local.quantity != remote.quantity {
        changed.push(ItemField::Quantity);
    }
    if local.category != remote.category {
        changed.push(ItemField::Category);
    }
    if local.notes != remote.notes {
        changed.push(ItemField::Notes);
    }
    if local.gotten != remote.gotten {
        changed.push(ItemField::Gotten);
    }

    changed
}
