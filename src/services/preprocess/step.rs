//! Step runner trait: shared abstraction for preprocessing steps.

use crate::models::{PreprocessDocument, PreprocessStep};

use super::types::{PreprocessError, StepOutcome};

/// A preprocessing step that can run on documents.
///
/// Implementations decide on their own whether a document is ready and
/// whether it needs work, returning a non-completed `StepOutcome` instead of
/// an error when it doesn't. This lets the `PreprocessManager` feed them
/// documents at any pipeline stage.
pub trait PreprocessStepRunner {
    /// The step whose result this runner records.
    fn step(&self) -> PreprocessStep;

    /// Human-readable name for progress output.
    fn display_name(&self) -> &str;

    /// Run the step on one document.
    fn execute<D>(&self, doc: &mut D) -> Result<StepOutcome, PreprocessError>
    where
        D: PreprocessDocument + ?Sized;
}
