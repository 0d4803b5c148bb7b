//! Category model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::ListId;
use crate::util::{is_hex_color, names_match, normalize_text_option};

/// A unique identifier for a category, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Create a new unique category ID using UUID v7
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

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A custom grocery category within a list
///
/// The logical key of a category is its name, compared case-insensitively
/// within the owning list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,
    /// Owning list
    pub list_id: ListId,
    /// Display name (unique within the list, case-insensitive)
    pub name: String,
    /// Optional hex color, e.g. `#ff8800`
    pub color: Option<String>,
    /// Optional short icon string or emoji
    pub icon: Option<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Category {
    /// Create a new category, normalizing and validating its fields.
    ///
    /// The name is trimmed and must not be empty; a color, when present,
    /// must be a `#rgb` or `#rrggbb` hex string.
    pub fn new(
        list_id: ListId,
        name: impl Into<String>,
        color: Option<String>,
        icon: Option<String>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidInput("Category name must not be empty".into()));
        }

        let color = normalize_text_option(color);
        if let Some(value) = &color {
            if !is_hex_color(value) {
                return Err(Error::InvalidInput(format!(
                    "'{value}' is not a valid hex color"
                )));
            }
        }

        Ok(Self {
            id: CategoryId::new(),
            list_id,
            name,
            color,
            icon: normalize_text_option(icon),
            created_at: chrono::Utc::now().timestamp_millis(),
        })
    }

    /// Case-insensitive logical-key comparison against another name
    #[must_use]
    pub fn name_matches(&self, other: &str) -> bool {
        names_match(&self.name, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_id_unique() {
        let id1 = CategoryId::new();
        let id2 = CategoryId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_category_id_parse() {
        let id = CategoryId::new();
        let parsed: CategoryId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_category_new_normalizes_fields() {
        let category = Category::new(
            ListId::new(),
            "  Produce  ",
            Some(" #00ff00 ".to_string()),
            Some("   ".to_string()),
        )
        .unwrap();

        assert_eq!(category.name, "Produce");
        assert_eq!(category.color.as_deref(), Some("#00ff00"));
        assert_eq!(category.icon, None);
        assert!(category.created_at > 0);
    }

    #[test]
    fn test_category_new_rejects_empty_name() {
        let result = Category::new(ListId::new(), "   ", None, None);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_category_new_rejects_bad_color() {
        let result = Category::new(ListId::new(), "Produce", Some("green".to_string()), None);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_name_matches_ignores_case() {
        let category = Category::new(ListId::new(), "Produce", None, None).unwrap();
        assert!(category.name_matches("pRoDuCe"));
        assert!(!category.name_matches("Dairy"));
    }
}
