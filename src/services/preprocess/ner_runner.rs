//! Named Entity Recognition step: wraps a `NerTagger` behind `PreprocessStepRunner`.

use crate::config::StanfordConfig;
use crate::models::{
    EntityOccurrence, PreprocessDocument, PreprocessResult, PreprocessStep, Sentence,
};
use crate::services::ner::{
    extract_occurrences, GazetteerTagger, NerTagger, StanfordTagger, TaggerError,
};

use super::step::PreprocessStepRunner;
use super::types::{PreprocessError, StepOutcome};

/// Step runner that tags document sentences and records entity occurrences.
///
/// Accepts any `NerTagger`, including plain closures. Requires the sentencer
/// step; does not require part-of-speech tagging.
pub struct NerRunner {
    tagger: Box<dyn NerTagger>,
    override_existing: bool,
}

impl NerRunner {
    /// Create a runner. With `override_existing`, documents that already have
    /// a NER result are re-tagged and their result replaced.
    pub fn new<T>(tagger: T, override_existing: bool) -> Self
    where
        T: NerTagger + 'static,
    {
        Self::from_boxed(Box::new(tagger), override_existing)
    }

    pub fn from_boxed(tagger: Box<dyn NerTagger>, override_existing: bool) -> Self {
        Self {
            tagger,
            override_existing,
        }
    }

    /// Runner using the built-in `GazetteerTagger`.
    pub fn with_default_backend(override_existing: bool) -> Self {
        Self::new(GazetteerTagger::default(), override_existing)
    }

    /// Runner backed by Stanford NER. Fails if the Stanford assets are missing.
    pub fn stanford(config: StanfordConfig, override_existing: bool) -> Result<Self, TaggerError> {
        Ok(Self::new(StanfordTagger::new(config)?, override_existing))
    }

    pub fn overrides(&self) -> bool {
        self.override_existing
    }

    pub fn tagger(&self) -> &dyn NerTagger {
        self.tagger.as_ref()
    }

    /// Tag `sentences` and collect entity occurrences with document offsets,
    /// in sentence order.
    pub fn tag_document(
        &self,
        sentences: &[Sentence],
    ) -> Result<Vec<EntityOccurrence>, PreprocessError> {
        let tagged = self.tagger.tag_sentences(sentences)?;
        if tagged.len() != sentences.len() {
            return Err(PreprocessError::SentenceCountMismatch {
                expected: sentences.len(),
                got: tagged.len(),
            });
        }

        let mut occurrences = Vec::new();
        let mut sentence_offset = 0;
        for (sentence, tagged_sentence) in sentences.iter().zip(&tagged) {
            let (found, next_offset) =
                extract_occurrences(sentence, tagged_sentence, sentence_offset)?;
            occurrences.extend(found);
            sentence_offset = next_offset;
        }

        Ok(occurrences)
    }
}

impl PreprocessStepRunner for NerRunner {
    fn step(&self) -> PreprocessStep {
        PreprocessStep::Nerc
    }

    fn display_name(&self) -> &str {
        "Named Entity Recognition"
    }

    fn execute<D>(&self, doc: &mut D) -> Result<StepOutcome, PreprocessError>
    where
        D: PreprocessDocument + ?Sized,
    {
        if !doc.was_preprocess_done(PreprocessStep::Sentencer) {
            tracing::debug!("Skipping NER for {}: sentences not split yet", doc.id());
            return Ok(StepOutcome::MissingPrerequisite(PreprocessStep::Sentencer));
        }
        if !self.override_existing && doc.was_preprocess_done(PreprocessStep::Nerc) {
            tracing::debug!("Skipping NER for {}: already done", doc.id());
            return Ok(StepOutcome::AlreadyDone);
        }

        let sentences = doc.sentences();
        let occurrences = self.tag_document(&sentences)?;
        let count = occurrences.len();

        doc.set_preprocess_result(
            PreprocessStep::Nerc,
            PreprocessResult::EntityOccurrences(occurrences),
        )?;
        doc.save()?;

        tracing::info!(
            "NER ({}) found {} entity occurrences in {}",
            self.tagger.backend_id(),
            count,
            doc.id()
        );

        Ok(StepOutcome::Completed { occurrences: count })
    }
}
