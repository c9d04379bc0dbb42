//! docner - named entity recognition step for document preprocessing pipelines.
//!
//! Runs a pluggable NER tagger over a document's sentences and turns the
//! per-token tag stream into entity occurrences with document token offsets.
//!
//! ```
//! use docner::models::{Document, PreprocessStep, PreprocessDocument};
//! use docner::services::{NerRunner, PreprocessStepRunner, StepOutcome};
//!
//! let mut doc = Document::from_sentences("doc-1", [vec!["The", "FBI", "met", "in", "Paris"]]);
//! let runner = NerRunner::with_default_backend(false);
//!
//! let outcome = runner.execute(&mut doc).unwrap();
//! assert_eq!(outcome, StepOutcome::Completed { occurrences: 2 });
//! assert!(doc.was_preprocess_done(PreprocessStep::Nerc));
//! assert_eq!(doc.entity_occurrences[1].alias, "Paris");
//! ```

// Model types use `from_str` methods that return Option<Self>,
// not Result<Self, Error> as std::str::FromStr requires.
#![allow(clippy::should_implement_trait)]

pub mod config;
pub mod models;
pub mod services;

pub use config::StanfordConfig;
pub use models::{Document, EntityKind, EntityOccurrence, PreprocessDocument, PreprocessStep};
pub use services::{NerRunner, NerTagger, PreprocessManager, PreprocessStepRunner, StepOutcome};
