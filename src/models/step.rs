//! Preprocessing step identifiers and their typed results.

use serde::{Deserialize, Serialize};

use super::occurrence::EntityOccurrence;

/// A named stage of the document preprocessing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreprocessStep {
    Tokenization,
    Sentencer,
    Tagging,
    Nerc,
    Segmentation,
}

impl PreprocessStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tokenization => "tokenization",
            Self::Sentencer => "sentencer",
            Self::Tagging => "tagging",
            Self::Nerc => "nerc",
            Self::Segmentation => "segmentation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tokenization" => Some(Self::Tokenization),
            "sentencer" => Some(Self::Sentencer),
            "tagging" => Some(Self::Tagging),
            "nerc" | "ner" => Some(Self::Nerc),
            "segmentation" => Some(Self::Segmentation),
            _ => None,
        }
    }
}

impl std::fmt::Display for PreprocessStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result value produced by a preprocessing step.
///
/// Each variant belongs to exactly one step; storing a result under the
/// wrong step is rejected by the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PreprocessResult {
    /// Document tokens, in order.
    Tokens(Vec<String>),
    /// Sentence start offsets into the token list, plus the final end offset.
    Sentences(Vec<usize>),
    /// One part-of-speech tag per token.
    Tags(Vec<String>),
    /// Entity occurrences found by the NER step.
    EntityOccurrences(Vec<EntityOccurrence>),
    /// Segment boundaries as `(start, end)` token offsets.
    Segments(Vec<(usize, usize)>),
}

impl PreprocessResult {
    /// The step this result belongs to.
    pub fn step(&self) -> PreprocessStep {
        match self {
            Self::Tokens(_) => PreprocessStep::Tokenization,
            Self::Sentences(_) => PreprocessStep::Sentencer,
            Self::Tags(_) => PreprocessStep::Tagging,
            Self::EntityOccurrences(_) => PreprocessStep::Nerc,
            Self::Segments(_) => PreprocessStep::Segmentation,
        }
    }
}
