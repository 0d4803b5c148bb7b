//! Grocery list model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a grocery list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListId(Uuid);

impl ListId {
    /// Create a new unique list ID using UUID v7
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

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ListId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A shared grocery list - the collection scope for categories and items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryList {
    /// Unique identifier
    pub id: ListId,
    /// Display name
    pub name: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl GroceryList {
    /// Create a new list with the given name (trimmed)
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ListId::new(),
            name: name.into().trim().to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
