//! Data models for lista

mod category;
mod item;
mod list;

pub use category::{Category, CategoryId};
pub use item::{GroceryItem, ItemId};
pub use list::{GroceryList, ListId};
