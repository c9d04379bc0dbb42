//! Types shared across preprocessing steps.

use thiserror::Error;

use crate::models::{PreprocessStep, Sentence, StoreError, TaggedSentence};
use crate::services::ner::TaggerError;

/// Outcome of running a step on one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran and its result was stored and committed.
    Completed { occurrences: usize },
    /// A prerequisite step has not run yet; nothing was touched.
    MissingPrerequisite(PreprocessStep),
    /// The step already ran and override is off; nothing was touched.
    AlreadyDone,
}

impl StepOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Events emitted during batch preprocessing.
/// Used by callers to drive progress bars and status messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreprocessEvent {
    Started {
        step: PreprocessStep,
        total_documents: usize,
    },
    DocumentStarted {
        document_id: String,
    },
    DocumentCompleted {
        document_id: String,
        occurrences: usize,
    },
    DocumentFailed {
        document_id: String,
        error: String,
    },
    DocumentSkipped {
        document_id: String,
    },
    Complete {
        succeeded: usize,
        failed: usize,
        skipped: usize,
    },
}

/// Result of a batch preprocessing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Errors that abort a step on one document.
///
/// Nothing is stored or committed for a document whose step fails.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Sentence length mismatch {sentence:?} / {tagged:?}")]
    LengthMismatch {
        sentence: Sentence,
        tagged: TaggedSentence,
    },

    #[error("Tagger returned {got} tagged sentences for {expected} sentences")]
    SentenceCountMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Tagger(#[from] TaggerError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
