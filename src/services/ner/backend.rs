//! Tagger trait shared by NER backends.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Sentence, TaggedSentence};

/// Errors from NER tagger backends.
#[derive(Debug, Error)]
pub enum TaggerError {
    /// Required model or binary assets are missing. Raised at construction.
    #[error("NER assets not found at {}: {hint}", path.display())]
    Setup { path: PathBuf, hint: String },

    #[error("Unsupported encoding {0:?}: only UTF-8 is supported")]
    UnsupportedEncoding(String),

    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("Tagging failed: {0}")]
    TaggingFailed(String),

    #[error("Token cannot be passed to the tagger: {0:?}")]
    InvalidToken(String),

    #[error("Tagger returned {got} tagged tokens, expected {expected}")]
    OutputMismatch { expected: usize, got: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for pluggable NER tagging backends.
///
/// `tag_sentences` receives every sentence of a document at once and must
/// return one tagged sentence per input sentence, in order, each with one
/// `(token, tag)` pair per input token.
///
/// Any `Fn(&[Sentence]) -> Result<Vec<TaggedSentence>, TaggerError>` closure
/// is a tagger as well.
pub trait NerTagger: Send + Sync {
    /// Human-readable backend identifier (e.g. "stanford", "gazetteer").
    fn backend_id(&self) -> &str;

    /// Tag a batch of tokenized sentences.
    fn tag_sentences(&self, sentences: &[Sentence]) -> Result<Vec<TaggedSentence>, TaggerError>;
}

impl<F> NerTagger for F
where
    F: Fn(&[Sentence]) -> Result<Vec<TaggedSentence>, TaggerError> + Send + Sync,
{
    fn backend_id(&self) -> &str {
        "callable"
    }

    fn tag_sentences(&self, sentences: &[Sentence]) -> Result<Vec<TaggedSentence>, TaggerError> {
        self(sentences)
    }
}
