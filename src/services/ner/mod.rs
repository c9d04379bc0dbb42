//! Named Entity Recognition backends and tag-stream conversion.
//!
//! A `NerTagger` batch-tags already tokenized sentences; `extract_occurrences`
//! turns one tagged sentence into entity occurrences with document offsets.

mod backend;
mod extractor;
mod gazetteer;
mod stanford;

pub use backend::{NerTagger, TaggerError};
pub use extractor::extract_occurrences;
pub use gazetteer::GazetteerTagger;
pub use stanford::StanfordTagger;
