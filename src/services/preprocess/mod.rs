//! Preprocessing pipeline steps.
//!
//! Each step implements `PreprocessStepRunner`. `NerRunner` is the NER step;
//! `PreprocessManager` runs any step over a batch of documents.

mod manager;
mod ner_runner;
mod step;
mod types;

pub use manager::PreprocessManager;
pub use ner_runner::NerRunner;
pub use step::PreprocessStepRunner;
pub use types::{BatchResult, PreprocessError, PreprocessEvent, StepOutcome};
