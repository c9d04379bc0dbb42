pub mod ner;
pub mod preprocess;

pub use ner::{extract_occurrences, GazetteerTagger, NerTagger, StanfordTagger, TaggerError};
pub use preprocess::{
    BatchResult, NerRunner, PreprocessError, PreprocessEvent, PreprocessManager,
    PreprocessStepRunner, StepOutcome,
};
