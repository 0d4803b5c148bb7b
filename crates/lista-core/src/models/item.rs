//! Grocery item model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::ListId;
use crate::util::normalize_text_option;

/// A unique identifier for a grocery item, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Create a new unique item ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An entry on a grocery list
///
/// The logical key of an item is its `id`; restore and import flows match
/// items by exact identifier, never by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Unique identifier
    pub id: ItemId,
    /// Owning list
    pub list_id: ListId,
    /// Account that last wrote the item
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Desired quantity
    pub quantity: u32,
    /// Optional category name the item is filed under
    pub category: Option<String>,
    /// Optional free-form notes
    pub notes: Option<String>,
    /// Whether the item has been picked up
    pub gotten: bool,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl GroceryItem {
    /// Create a new item with the given name, normalizing optional fields.
    pub fn new(list_id: ListId, user_id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidInput("Item name must not be empty".into()));
        }

        let now = chrono::Utc::now().timestamp_millis();
        Ok(Self {
            id: ItemId::new(),
            list_id,
            user_id: user_id.into(),
            name,
            quantity: 1,
            category: None,
            notes: None,
            gotten: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Builder-style quantity setter
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Builder-style category setter (empty values become `None`)
    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = normalize_text_option(category);
        self
    }

    /// Builder-style notes setter (empty values become `None`)
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = normalize_text_option(notes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_unique() {
        let id1 = ItemId::new();
        let id2 = ItemId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_item_new_defaults() {
        let item = GroceryItem::new(ListId::new(), "user-1", "Milk").unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 1);
        assert!(!item.gotten);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_item_new_rejects_empty_name() {
        let result = GroceryItem::new(ListId::new(), "user-1", "  ");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_item_builders_normalize_empties() {
        let item = GroceryItem::new(ListId::new(), "user-1", "Milk")
            .unwrap()
            .with_quantity(3)
            .with_category(Some("  Dairy ".to_string()))
            .with_notes(Some("   ".to_string()));

        assert_eq!(item.quantity, 3);
        assert_eq!(item.category.as_deref(), Some("Dairy"));
        assert_eq!(item.notes, None);
    }
}
