//! Entity occurrence records produced by the NER step.

use serde::{Deserialize, Serialize};

/// Tag value marking a token that is not part of any entity.
pub const OUTSIDE_TAG: &str = "O";

/// A token paired with the tag the tagger assigned to it.
pub type TaggedToken = (String, String);

/// One tagged token per source token, in order.
pub type TaggedSentence = Vec<TaggedToken>;

/// Lower-cased entity kind as emitted by the tagger.
///
/// Kinds are free-form: taggers may emit labels beyond the well-known set,
/// and they are kept verbatim (lower-cased) rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKind(String);

impl EntityKind {
    pub const PERSON: &'static str = "person";
    pub const LOCATION: &'static str = "location";
    pub const ORGANIZATION: &'static str = "organization";

    /// Build a kind from a raw tag value.
    pub fn from_tag(tag: &str) -> Self {
        Self(tag.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this kind is one of the labels produced by the stock
    /// three-class English models.
    pub fn is_well_known(&self) -> bool {
        matches!(
            self.0.as_str(),
            Self::PERSON | Self::LOCATION | Self::ORGANIZATION
        )
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for EntityKind {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A single mention of an entity inside a document.
///
/// Offsets are token positions counted across the whole document,
/// `offset_end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityOccurrence {
    /// Surface text: the covered tokens joined by single spaces.
    pub alias: String,
    pub kind: EntityKind,
    /// Key of the entity this mention refers to.
    pub canonical: String,
    pub offset: usize,
    pub offset_end: usize,
}

impl EntityOccurrence {
    pub fn new(
        alias: impl Into<String>,
        kind: EntityKind,
        canonical: impl Into<String>,
        offset: usize,
        offset_end: usize,
    ) -> Self {
        Self {
            alias: alias.into(),
            kind,
            canonical: canonical.into(),
            offset,
            offset_end,
        }
    }

    /// Number of tokens covered.
    pub fn len(&self) -> usize {
        self.offset_end.saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.offset_end <= self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_lowercased() {
        let kind = EntityKind::from_tag("PERSON");
        assert_eq!(kind.as_str(), "person");
        assert!(kind.is_well_known());
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let kind = EntityKind::from_tag("MISC");
        assert_eq!(kind, "misc");
        assert!(!kind.is_well_known());
    }

    #[test]
    fn test_occurrence_serializes_kind_as_string() {
        let occ = EntityOccurrence::new("Paris", EntityKind::from_tag("LOCATION"), "Paris", 3, 4);
        let json = serde_json::to_value(&occ).unwrap();
        assert_eq!(json["kind"], "location");
        assert_eq!(json["offset_end"], 4);
        assert_eq!(occ.len(), 1);
    }

    #[test]
    fn test_inverted_span_has_zero_len() {
        let occ = EntityOccurrence::new("Paris", EntityKind::from_tag("LOCATION"), "Paris", 4, 3);
        assert_eq!(occ.len(), 0);
        assert!(occ.is_empty());
    }
}
