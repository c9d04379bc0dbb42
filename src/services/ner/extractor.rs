//! Conversion of per-token tag streams into entity occurrences.

use crate::models::{EntityKind, EntityOccurrence, TaggedToken, OUTSIDE_TAG};
use crate::services::preprocess::PreprocessError;

/// Extract entity occurrences from one tagged sentence.
///
/// Every maximal run of identical non-outside tags becomes one occurrence.
/// A change of tag value always closes the current run, even between two
/// entity tags. Offsets are shifted by `sentence_offset`, the number of
/// document tokens before this sentence.
///
/// Returns the occurrences together with the offset of the next sentence.
pub fn extract_occurrences(
    sentence: &[String],
    tagged: &[TaggedToken],
    sentence_offset: usize,
) -> Result<(Vec<EntityOccurrence>, usize), PreprocessError> {
    if sentence.len() != tagged.len() {
        return Err(PreprocessError::LengthMismatch {
            sentence: sentence.to_vec(),
            tagged: tagged.to_vec(),
        });
    }

    let mut occurrences = Vec::new();
    let mut i = 0;
    while i < tagged.len() {
        let tag = tagged[i].1.as_str();
        if tag == OUTSIDE_TAG {
            i += 1;
            continue;
        }

        let start = i;
        while i < tagged.len() && tagged[i].1 == tag {
            i += 1;
        }

        let name = sentence[start..i].join(" ");
        occurrences.push(EntityOccurrence::new(
            name.clone(),
            EntityKind::from_tag(tag),
            name,
            sentence_offset + start,
            sentence_offset + i,
        ));
    }

    Ok((occurrences, sentence_offset + sentence.len()))
}
