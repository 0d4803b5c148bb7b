//! Apply/commit step
//!
//! Executes resolved decisions against the mutation collaborator, one call
//! per decision, in input order. A failed record is recorded and the batch
//! continues; nothing aborts mid-way.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::conflict::aggregate::CategoryConflict;
use crate::error::Result;
use crate::models::Category;

/// The external mutation collaborator for categories.
///
/// The sqlite repository implements this for real persistence; tests plug
/// in in-memory or failing stores.
pub trait CategoryStore {
    /// Persist a new category
    fn create(&self, category: &Category) -> Result<Category>;

    /// Persist new field values for an existing category
    fn update(&self, category: &Category) -> Result<Category>;
}

/// One resolved record, ready to commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryDecision {
    /// Create a record that does not exist in the target list
    Create(Category),
    /// Replace field values of a record that already exists
    Update(Category),
    /// Persist nothing for this record
    Skip,
}

/// Result of one import/restore/copy operation, returned for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Records created or updated
    pub imported: usize,
    /// Records intentionally not persisted
    pub skipped: usize,
    /// Conflicts detected during preview
    pub conflicts: Vec<CategoryConflict>,
    /// Human-readable per-record failures
    pub errors: Vec<String>,
}

impl ImportReport {
    /// An operation counts as successful when anything was imported
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.imported > 0
    }
}

/// Commit decisions sequentially through the store.
///
/// A running case-insensitive name set (seeded from `existing`) keeps later
/// creates honest about names claimed earlier in the same batch; a create
/// whose name is already taken is recorded as an error without touching the
/// store. Store rejections are recorded per record and iteration continues.
pub fn apply_categories<S: CategoryStore>(
    store: &S,
    decisions: &[CategoryDecision],
    existing: &[Category],
) -> ImportReport {
    let mut taken: HashSet<String> = existing.iter().map(|c| c.name.to_lowercase()).collect();
    let mut report = ImportReport::default();

    for decision in decisions {
        match decision {
            CategoryDecision::Create(category) => {
                if taken.contains(&category.name.to_lowercase()) {
                    report
                        .errors
                        .push(format!("Name already in use: {}", category.name));
                    continue;
                }
                match store.create(category) {
                    Ok(created) => {
                        taken.insert(created.name.to_lowercase());
                        report.imported += 1;
                    }
                    Err(error) => report.errors.push(error.to_string()),
                }
            }
            CategoryDecision::Update(category) => match store.update(category) {
                Ok(_) => report.imported += 1,
                Err(error) => report.errors.push(error.to_string()),
            },
            CategoryDecision::Skip => report.skipped += 1,
        }
    }

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        errors = report.errors.len(),
        "batch apply finished"
    );
    report
}
