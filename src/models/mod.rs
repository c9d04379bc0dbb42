//! Data models for docner.

mod document;
mod occurrence;
mod step;

pub use document::{Document, PreprocessDocument, Sentence, StepRecord, StoreError};
pub use occurrence::{EntityKind, EntityOccurrence, TaggedSentence, TaggedToken, OUTSIDE_TAG};
pub use step::{PreprocessResult, PreprocessStep};
