//! Import operation state machine
//!
//! One enum with an explicit transition table instead of free-form view
//! strings. Once applying starts there is no way out except completion.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Phase of one import/restore/copy operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImportPhase {
    /// Nothing in flight
    #[default]
    Idle,
    /// Aggregation done, awaiting user strategy choices
    Previewing,
    /// Iterating commits
    Applying,
    /// Every record committed or skipped cleanly
    Completed,
    /// Finished, but at least one record failed
    CompletedWithErrors,
}

impl ImportPhase {
    /// Whether `next` is a legal successor of this phase
    #[must_use]
    pub const fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Previewing)
                | (Self::Previewing, Self::Applying | Self::Idle)
                | (Self::Applying, Self::Completed | Self::CompletedWithErrors)
                | (Self::Completed | Self::CompletedWithErrors, Self::Idle)
        )
    }

    /// Move to `next`, rejecting illegal transitions
    pub fn advance(self, next: Self) -> Result<Self> {
        if self.can_transition(next) {
            Ok(next)
        } else {
            Err(Error::InvalidInput(format!(
                "illegal phase transition {self:?} -> {next:?}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_legal() {
        let phase = ImportPhase::Idle
            .advance(ImportPhase::Previewing)
            .and_then(|p| p.advance(ImportPhase::Applying))
            .and_then(|p| p.advance(ImportPhase::Completed))
            .and_then(|p| p.advance(ImportPhase::Idle))
            .unwrap();
        assert_eq!(phase, ImportPhase::Idle);
    }

    #[test]
    fn preview_can_be_abandoned() {
        assert!(ImportPhase::Previewing.can_transition(ImportPhase::Idle));
    }

    #[test]
    fn applying_cannot_be_cancelled() {
        assert!(!ImportPhase::Applying.can_transition(ImportPhase::Idle));
        assert!(!ImportPhase::Applying.can_transition(ImportPhase::Previewing));
        assert!(ImportPhase::Applying.can_transition(ImportPhase::CompletedWithErrors));
    }

    #[test]
    fn advance_rejects_illegal_transition() {
        let error = ImportPhase::Idle.advance(ImportPhase::Applying).unwrap_err();
        assert!(matches!(error, Error::InvalidInput(_)));
    }
}
