//! Document model consumed by preprocessing steps.
//!
//! Steps only see documents through [`PreprocessDocument`]; [`Document`] is
//! the in-memory implementation used by callers that keep documents around
//! as plain values (and by the tests).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::occurrence::EntityOccurrence;
use super::step::{PreprocessResult, PreprocessStep};

/// Ordered tokens of one sentence.
pub type Sentence = Vec<String>;

/// Errors raised by a document while storing step results or committing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid result for step {step}: {reason}")]
    InvalidResult {
        step: PreprocessStep,
        reason: String,
    },

    #[error("Commit failed: {0}")]
    Commit(String),
}

/// Document access needed by preprocessing step runners.
pub trait PreprocessDocument {
    /// Stable identifier, used for logging and progress events.
    fn id(&self) -> &str;

    /// All sentences of the document, in order.
    ///
    /// Returned as an owned list so taggers may walk it more than once.
    fn sentences(&self) -> Vec<Sentence>;

    /// Whether `step` has a recorded result.
    fn was_preprocess_done(&self, step: PreprocessStep) -> bool;

    /// Record `result` as the completed output of `step`, replacing any
    /// previous result for that step.
    fn set_preprocess_result(
        &mut self,
        step: PreprocessStep,
        result: PreprocessResult,
    ) -> Result<(), StoreError>;

    /// Commit the document's current state.
    fn save(&mut self) -> Result<(), StoreError>;
}

/// Completion record for a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub done_at: DateTime<Utc>,
}

/// An in-memory document with its preprocessing state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub tokens: Vec<String>,
    /// Sentence start offsets into `tokens`, followed by the end offset of
    /// the last sentence.
    pub sentences: Vec<usize>,
    pub postags: Vec<String>,
    pub segments: Vec<(usize, usize)>,
    pub entity_occurrences: Vec<EntityOccurrence>,
    pub preprocess_metadata: BTreeMap<PreprocessStep, StepRecord>,
    /// Number of successful commits.
    pub revision: u64,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Build a document that already went through tokenization and sentence
    /// splitting, with one entry per sentence.
    pub fn from_sentences<S, T>(id: impl Into<String>, sentences: S) -> Self
    where
        S: IntoIterator,
        S::Item: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut doc = Self::new(id, "");
        let mut starts = vec![0];
        for sentence in sentences {
            doc.tokens.extend(sentence.into_iter().map(Into::into));
            starts.push(doc.tokens.len());
        }
        doc.sentences = starts;

        let now = Utc::now();
        doc.preprocess_metadata
            .insert(PreprocessStep::Tokenization, StepRecord { done_at: now });
        doc.preprocess_metadata
            .insert(PreprocessStep::Sentencer, StepRecord { done_at: now });
        doc
    }

    /// When `step` was last completed, if ever.
    pub fn preprocess_done_at(&self, step: PreprocessStep) -> Option<DateTime<Utc>> {
        self.preprocess_metadata.get(&step).map(|r| r.done_at)
    }

    fn validate_sentences(&self, starts: &[usize]) -> Result<(), String> {
        if starts.first() != Some(&0) {
            return Err("sentence offsets must start at token 0".to_string());
        }
        if starts.windows(2).any(|w| w[0] > w[1]) {
            return Err("sentence offsets are not sorted".to_string());
        }
        match starts.last() {
            Some(&last) if last > self.tokens.len() => Err(format!(
                "sentence offset {} is past the last token ({})",
                last,
                self.tokens.len()
            )),
            _ => Ok(()),
        }
    }
}

impl PreprocessDocument for Document {
    fn id(&self) -> &str {
        &self.id
    }

    fn sentences(&self) -> Vec<Sentence> {
        self.sentences
            .windows(2)
            .map(|w| {
                self.tokens
                    .get(w[0]..w[1])
                    .map(<[String]>::to_vec)
                    .unwrap_or_default()
            })
            .collect()
    }

    fn was_preprocess_done(&self, step: PreprocessStep) -> bool {
        self.preprocess_metadata.contains_key(&step)
    }

    fn set_preprocess_result(
        &mut self,
        step: PreprocessStep,
        result: PreprocessResult,
    ) -> Result<(), StoreError> {
        if result.step() != step {
            return Err(StoreError::InvalidResult {
                step,
                reason: format!("got a {} result", result.step()),
            });
        }

        match result {
            PreprocessResult::Tokens(tokens) => {
                let covered = self.sentences.last().copied().unwrap_or(0);
                if tokens.len() < covered {
                    return Err(StoreError::InvalidResult {
                        step,
                        reason: format!(
                            "{} tokens, but sentences cover {}",
                            tokens.len(),
                            covered
                        ),
                    });
                }
                self.tokens = tokens;
            }
            PreprocessResult::Sentences(starts) => {
                self.validate_sentences(&starts)
                    .map_err(|reason| StoreError::InvalidResult { step, reason })?;
                self.sentences = starts;
            }
            PreprocessResult::Tags(tags) => {
                if tags.len() != self.tokens.len() {
                    return Err(StoreError::InvalidResult {
                        step,
                        reason: format!(
                            "{} tags for {} tokens",
                            tags.len(),
                            self.tokens.len()
                        ),
                    });
                }
                self.postags = tags;
            }
            PreprocessResult::EntityOccurrences(occurrences) => {
                self.entity_occurrences = occurrences;
            }
            PreprocessResult::Segments(segments) => self.segments = segments,
        }

        self.preprocess_metadata
            .insert(step, StepRecord { done_at: Utc::now() });
        Ok(())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.revision += 1;
        tracing::debug!("Saved document {} (revision {})", self.id, self.revision);
        Ok(())
    }
}
