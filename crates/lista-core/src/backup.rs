//! Category backup format and restore pipeline
//!
//! Backups are JSON documents with camelCase keys, matching the files the
//! web client produces. Parsing is strict: a malformed document blocks the
//! preview instead of importing a partial batch.

use serde::{Deserialize, Serialize};

use crate::config::ReconcileConfig;
use crate::conflict::{
    apply_categories, classify_categories, resolve_category, CategoryClassification,
    CategoryDecision, CategoryResolution, CategoryStore, CategoryStrategy, ImportReport,
};
use crate::error::{Error, Result};
use crate::models::{Category, GroceryList, ListId};
use crate::util::{is_hex_color, normalize_text_option};

/// Backup document schema version
const BACKUP_SCHEMA_VERSION: u32 = 1;

/// A category as stored in a backup file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupCategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A full category backup document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListBackup {
    pub schema_version: u32,
    pub list_id: String,
    pub list_name: String,
    /// Export timestamp (Unix ms)
    pub exported_at: i64,
    pub categories: Vec<BackupCategory>,
}

/// Build a backup document for a list's categories.
#[must_use]
pub fn build_backup(list: &GroceryList, categories: &[Category]) -> ListBackup {
    ListBackup {
        schema_version: BACKUP_SCHEMA_VERSION,
        list_id: list.id.to_string(),
        list_name: list.name.clone(),
        exported_at: chrono::Utc::now().timestamp_millis(),
        categories: categories
            .iter()
            .map(|category| BackupCategory {
                name: category.name.clone(),
                color: category.color.clone(),
                icon: category.icon.clone(),
            })
            .collect(),
    }
}

/// Render a backup document as pretty-printed JSON.
pub fn render_backup(backup: &ListBackup) -> Result<String> {
    Ok(serde_json::to_string_pretty(backup)?)
}

/// Parse and validate a backup document.
///
/// Malformed JSON, unknown fields, an unsupported schema version, empty
/// category names, and invalid hex colors all fail with
/// [`Error::Validation`] before any preview is shown.
pub fn parse_backup(payload: &str) -> Result<ListBackup> {
    let backup: ListBackup = serde_json::from_str(payload)
        .map_err(|error| Error::Validation(format!("malformed backup JSON: {error}")))?;

    if backup.schema_version != BACKUP_SCHEMA_VERSION {
        return Err(Error::Validation(format!(
            "unsupported backup schemaVersion {} (expected {BACKUP_SCHEMA_VERSION})",
            backup.schema_version
        )));
    }

    for category in &backup.categories {
        if category.name.trim().is_empty() {
            return Err(Error::Validation(
                "backup contains a category with an empty name".into(),
            ));
        }
        if let Some(color) = &category.color {
            if !is_hex_color(color.trim()) {
                return Err(Error::Validation(format!(
                    "'{color}' is not a valid hex color"
                )));
            }
        }
    }

    Ok(backup)
}

/// Convert backup entries into category records targeting `list_id`.
pub fn backup_to_categories(backup: &ListBackup, list_id: ListId) -> Result<Vec<Category>> {
    backup
        .categories
        .iter()
        .map(|entry| {
            Category::new(
                list_id,
                entry.name.clone(),
                normalize_text_option(entry.color.clone()),
                normalize_text_option(entry.icon.clone()),
            )
        })
        .collect()
}

/// Classify incoming categories without touching the store (preview step).
#[must_use]
pub fn preview_restore(
    incoming: &[Category],
    existing: &[Category],
    config: &ReconcileConfig,
) -> Vec<CategoryClassification> {
    classify_categories(incoming, existing, config)
}

/// Run a full restore: classify, resolve every conflict with one strategy,
/// and commit sequentially through the store.
///
/// Resolution failures (e.g. a rename target still in use) are recorded in
/// the report's error list; they never abort the batch.
pub fn restore_categories<S: CategoryStore>(
    store: &S,
    incoming: &[Category],
    existing: &[Category],
    strategy: &CategoryStrategy,
    config: &ReconcileConfig,
) -> ImportReport {
    let classified = classify_categories(incoming, existing, config);

    let mut decisions = Vec::with_capacity(classified.len());
    let mut conflicts = Vec::new();
    let mut resolution_errors = Vec::new();

    for classification in classified {
        match classification {
            CategoryClassification::Clean(category) => {
                decisions.push(CategoryDecision::Create(category));
            }
            CategoryClassification::Conflict(conflict) => {
                match resolve_category(&conflict, strategy, existing, config) {
                    Ok(CategoryResolution::Skip) => decisions.push(CategoryDecision::Skip),
                    Ok(CategoryResolution::Merged(merged)) => {
                        // Renames create a fresh record; the other
                        // strategies rewrite the existing one.
                        let decision = if matches!(strategy, CategoryStrategy::Rename { .. }) {
                            CategoryDecision::Create(merged)
                        } else {
                            CategoryDecision::Update(merged)
                        };
                        decisions.push(decision);
                    }
                    Err(error) => resolution_errors.push(error.to_string()),
                }
                conflicts.push(conflict);
            }
        }
    }

    let mut report = apply_categories(store, &decisions, existing);
    report.conflicts = conflicts;
    report.errors.extend(resolution_errors);
    report
}

/// Build a deterministic default file name for backup exports.
#[must_use]
pub fn suggested_backup_file_name(list_name: &str, timestamp_ms: i64) -> String {
    let slug = list_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>();
    format!("lista-backup-{slug}-{timestamp_ms}.json")
}
