//! Category/item conflict reconciliation
//!
//! Import, restore, and copy flows share this engine: a field differ, a
//! batch classifier, strategy-driven resolution, and a sequential apply
//! step that commits decisions through a store trait.

mod aggregate;
mod apply;
mod diff;
mod phase;
mod resolve;

pub use aggregate::{
    classify_categories, classify_items, CategoryClassification, CategoryConflict,
    ItemClassification, ItemConflict,
};
pub use apply::{apply_categories, CategoryDecision, CategoryStore, ImportReport};
pub use diff::{diff_categories, diff_items, CategoryField, ItemField};
pub use phase::ImportPhase;
pub use resolve::{
    resolve_category, resolve_item, CategoryResolution, CategoryStrategy, ItemFieldChoices, Side,
};
