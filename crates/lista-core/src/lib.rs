//! lista-core - Core library for lista
//!
//! This crate contains the shared models, reconciliation engine, backup
//! format, and database layer used by all lista interfaces.

pub mod backup;
pub mod config;
pub mod conflict;
pub mod db;
pub mod error;
pub mod models;
pub mod util;

pub use config::{ReconcileConfig, RenameSuffix};
pub use error::{Error, Result};
pub use models::{Category, CategoryId, GroceryItem, GroceryList, ItemId, ListId};
