//! Reconciliation configuration
//!
//! Import, restore, and copy flows take an explicit `ReconcileConfig` value
//! instead of reading ambient feature-flag state.

use serde::{Deserialize, Serialize};

/// Suffix applied when a conflict is resolved by renaming the incoming record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenameSuffix {
    /// `"<name> (Copy)"` - used by copy flows
    #[default]
    Copy,
    /// `"<name> (Imported)"` - used by import/restore flows
    Imported,
}

impl RenameSuffix {
    /// The literal suffix text, including the leading space
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Copy => " (Copy)",
            Self::Imported => " (Imported)",
        }
    }

    /// Apply this suffix to a name
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        format!("{name}{}", self.as_str())
    }
}

/// Settings that shape one reconciliation operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReconcileConfig {
    /// Default rename suffix when no explicit new name is supplied
    pub rename_suffix: RenameSuffix,
    /// Collapse same-key duplicates within one incoming batch to the first
    /// occurrence before conflict classification. Off by default: each
    /// duplicate is classified independently against the existing set.
    pub dedupe_batch: bool,
}

impl ReconcileConfig {
    /// Config used by import/restore flows
    #[must_use]
    pub const fn for_import() -> Self {
        Self {
            rename_suffix: RenameSuffix::Imported,
            dedupe_batch: false,
        }
    }

    /// Config used by copy flows
    #[must_use]
    pub const fn for_copy() -> Self {
        Self {
            rename_suffix: RenameSuffix::Copy,
            dedupe_batch: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_suffix_applies_expected_text() {
        assert_eq!(RenameSuffix::Copy.apply("Produce"), "Produce (Copy)");
        assert_eq!(RenameSuffix::Imported.apply("Produce"), "Produce (Imported)");
    }

    #[test]
    fn default_config_preserves_observed_duplicate_handling() {
        let config = ReconcileConfig::default();
        assert!(!config.dedupe_batch);
    }
}
