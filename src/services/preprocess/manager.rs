//! Preprocess manager: batch orchestration for any `PreprocessStepRunner`.

use std::sync::mpsc;

use crate::models::PreprocessDocument;

use super::step::PreprocessStepRunner;
use super::types::{BatchResult, PreprocessError, PreprocessEvent, StepOutcome};

/// Runs a step over many documents, one at a time.
///
/// A failure on one document is recorded and reported, then the batch moves
/// on. Progress goes to an optional event channel; the caller owns the
/// receiver and decides how to present it.
#[derive(Default)]
pub struct PreprocessManager {
    event_tx: Option<mpsc::Sender<PreprocessEvent>>,
}

impl PreprocessManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(event_tx: mpsc::Sender<PreprocessEvent>) -> Self {
        Self {
            event_tx: Some(event_tx),
        }
    }

    fn emit(&self, event: PreprocessEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event);
        }
    }

    /// Run `runner` over `docs`. A `limit` of 0 processes every document.
    pub fn run_batch<R, D>(&self, runner: &R, docs: &mut [D], limit: usize) -> BatchResult
    where
        R: PreprocessStepRunner,
        D: PreprocessDocument,
    {
        let effective_limit = if limit > 0 {
            limit.min(docs.len())
        } else {
            docs.len()
        };

        self.emit(PreprocessEvent::Started {
            step: runner.step(),
            total_documents: effective_limit,
        });

        let mut result = BatchResult::default();
        for doc in docs.iter_mut().take(effective_limit) {
            match self.run_one(runner, doc) {
                Ok(outcome) if outcome.is_completed() => result.succeeded += 1,
                Ok(_) => result.skipped += 1,
                Err(_) => result.failed += 1,
            }
        }

        tracing::info!(
            "{}: {} succeeded, {} failed, {} skipped",
            runner.display_name(),
            result.succeeded,
            result.failed,
            result.skipped
        );

        self.emit(PreprocessEvent::Complete {
            succeeded: result.succeeded,
            failed: result.failed,
            skipped: result.skipped,
        });

        result
    }

    /// Run `runner` on a single document, returning its error if it fails.
    pub fn process_single<R, D>(
        &self,
        runner: &R,
        doc: &mut D,
    ) -> Result<StepOutcome, PreprocessError>
    where
        R: PreprocessStepRunner,
        D: PreprocessDocument + ?Sized,
    {
        self.emit(PreprocessEvent::Started {
            step: runner.step(),
            total_documents: 1,
        });

        let outcome = self.run_one(runner, doc);

        let (succeeded, failed, skipped) = match &outcome {
            Ok(o) if o.is_completed() => (1, 0, 0),
            Ok(_) => (0, 0, 1),
            Err(_) => (0, 1, 0),
        };
        self.emit(PreprocessEvent::Complete {
            succeeded,
            failed,
            skipped,
        });

        outcome
    }

    fn run_one<R, D>(&self, runner: &R, doc: &mut D) -> Result<StepOutcome, PreprocessError>
    where
        R: PreprocessStepRunner,
        D: PreprocessDocument + ?Sized,
    {
        let document_id = doc.id().to_string();
        self.emit(PreprocessEvent::DocumentStarted {
            document_id: document_id.clone(),
        });

        match runner.execute(doc) {
            Ok(StepOutcome::Completed { occurrences }) => {
                self.emit(PreprocessEvent::DocumentCompleted {
                    document_id,
                    occurrences,
                });
                Ok(StepOutcome::Completed { occurrences })
            }
            Ok(outcome) => {
                self.emit(PreprocessEvent::DocumentSkipped { document_id });
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!("{} failed for {}: {}", runner.display_name(), document_id, e);
                self.emit(PreprocessEvent::DocumentFailed {
                    document_id,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, PreprocessStep, Sentence, TaggedSentence};
    use crate::services::ner::TaggerError;
    use crate::services::preprocess::NerRunner;

    fn failing_on(word: &'static str) -> NerRunner {
        NerRunner::new(
            move |sentences: &[Sentence]| -> Result<Vec<TaggedSentence>, TaggerError> {
                if sentences.iter().flatten().any(|t| t == word) {
                    return Err(TaggerError::TaggingFailed(format!("cannot tag {}", word)));
                }
                Ok(sentences
                    .iter()
                    .map(|s| s.iter().map(|t| (t.clone(), "O".to_string())).collect())
                    .collect())
            },
            false,
        )
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let runner = failing_on("poison");
        let mut docs = vec![
            Document::from_sentences("ok-1", [vec!["fine"]]),
            Document::from_sentences("bad", [vec!["poison"]]),
            Document::from_sentences("ok-2", [vec!["also", "fine"]]),
            Document::new("raw", "not split"),
        ];

        let result = PreprocessManager::new().run_batch(&runner, &mut docs, 0);

        assert_eq!(
            result,
            BatchResult {
                succeeded: 2,
                failed: 1,
                skipped: 1
            }
        );
        assert!(docs[0].was_preprocess_done(PreprocessStep::Nerc));
        assert!(!docs[1].was_preprocess_done(PreprocessStep::Nerc));
        assert!(docs[2].was_preprocess_done(PreprocessStep::Nerc));
    }

    #[test]
    fn test_batch_emits_events() {
        let (tx, rx) = mpsc::channel();
        let runner = failing_on("poison");
        let mut docs = vec![
            Document::from_sentences("a", [vec!["x"]]),
            Document::from_sentences("b", [vec!["poison"]]),
        ];

        PreprocessManager::with_events(tx).run_batch(&runner, &mut docs, 0);
        let events: Vec<PreprocessEvent> = rx.try_iter().collect();

        assert_eq!(
            events.first(),
            Some(&PreprocessEvent::Started {
                step: PreprocessStep::Nerc,
                total_documents: 2
            })
        );
        assert!(events.contains(&PreprocessEvent::DocumentCompleted {
            document_id: "a".to_string(),
            occurrences: 0
        }));
        assert!(events.iter().any(|e| matches!(
            e,
            PreprocessEvent::DocumentFailed { document_id, .. } if document_id == "b"
        )));
        assert_eq!(
            events.last(),
            Some(&PreprocessEvent::Complete {
                succeeded: 1,
                failed: 1,
                skipped: 0
            })
        );
    }

    #[test]
    fn test_batch_limit() {
        let runner = NerRunner::with_default_backend(false);
        let mut docs = vec![
            Document::from_sentences("a", [vec!["x"]]),
            Document::from_sentences("b", [vec!["y"]]),
            Document::from_sentences("c", [vec!["z"]]),
        ];

        let result = PreprocessManager::new().run_batch(&runner, &mut docs, 2);

        assert_eq!(result.succeeded, 2);
        assert!(!docs[2].was_preprocess_done(PreprocessStep::Nerc));
    }

    #[test]
    fn test_process_single_returns_error() {
        let runner = failing_on("poison");
        let mut doc = Document::from_sentences("bad", [vec!["poison"]]);

        let result = PreprocessManager::new().process_single(&runner, &mut doc);

        assert!(matches!(result, Err(PreprocessError::Tagger(_))));
        assert_eq!(doc.revision, 0);
    }
}
