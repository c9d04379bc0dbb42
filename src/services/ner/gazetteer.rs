//! Gazetteer tagger: built-in, dependency-free NER backend.
//!
//! Tags known phrases from a phrase → kind table. Matching is exact and
//! case-sensitive on tokens, longest phrase first.

use std::collections::HashMap;

use crate::models::{Sentence, TaggedSentence, OUTSIDE_TAG};

use super::backend::{NerTagger, TaggerError};

static DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("Central Intelligence Agency", "ORGANIZATION"),
    ("Federal Bureau of Investigation", "ORGANIZATION"),
    ("National Security Agency", "ORGANIZATION"),
    ("Department of Defense", "ORGANIZATION"),
    ("Department of State", "ORGANIZATION"),
    ("United Nations", "ORGANIZATION"),
    ("White House", "ORGANIZATION"),
    ("CIA", "ORGANIZATION"),
    ("FBI", "ORGANIZATION"),
    ("NSA", "ORGANIZATION"),
    ("NATO", "ORGANIZATION"),
    ("Washington D.C.", "LOCATION"),
    ("United States", "LOCATION"),
    ("New York", "LOCATION"),
    ("California", "LOCATION"),
    ("Virginia", "LOCATION"),
    ("Berlin", "LOCATION"),
    ("London", "LOCATION"),
    ("Moscow", "LOCATION"),
    ("Paris", "LOCATION"),
    ("Tokyo", "LOCATION"),
];

/// Phrase-table NER backend.
pub struct GazetteerTagger {
    phrases: HashMap<Vec<String>, String>,
    max_len: usize,
}

impl GazetteerTagger {
    /// Create an empty gazetteer; every token is tagged outside.
    pub fn new() -> Self {
        Self {
            phrases: HashMap::new(),
            max_len: 0,
        }
    }

    /// Add a phrase. Whitespace in `phrase` separates tokens; `kind` is
    /// emitted upper-cased as the tag of every matched token.
    pub fn with_phrase(mut self, phrase: &str, kind: &str) -> Self {
        self.insert(phrase, kind);
        self
    }

    pub fn insert(&mut self, phrase: &str, kind: &str) {
        let tokens: Vec<String> = phrase.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return;
        }
        self.max_len = self.max_len.max(tokens.len());
        self.phrases.insert(tokens, kind.to_uppercase());
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    fn tag_sentence(&self, sentence: &[String]) -> TaggedSentence {
        let mut tags = vec![OUTSIDE_TAG; sentence.len()];
        let mut i = 0;
        while i < sentence.len() {
            let longest = (sentence.len() - i).min(self.max_len);
            let matched = (1..=longest)
                .rev()
                .find_map(|n| self.phrases.get(&sentence[i..i + n]).map(|tag| (n, tag)));

            match matched {
                Some((n, tag)) => {
                    for slot in &mut tags[i..i + n] {
                        *slot = tag.as_str();
                    }
                    i += n;
                }
                None => i += 1,
            }
        }

        sentence
            .iter()
            .zip(tags)
            .map(|(token, tag)| (token.clone(), tag.to_string()))
            .collect()
    }
}

impl Default for GazetteerTagger {
    /// Gazetteer preloaded with common organizations and locations.
    fn default() -> Self {
        DEFAULT_ENTRIES
            .iter()
            .fold(Self::new(), |g, (phrase, kind)| g.with_phrase(phrase, kind))
    }
}

impl NerTagger for GazetteerTagger {
    fn backend_id(&self) -> &str {
        "gazetteer"
    }

    fn tag_sentences(&self, sentences: &[Sentence]) -> Result<Vec<TaggedSentence>, TaggerError> {
        Ok(sentences.iter().map(|s| self.tag_sentence(s)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str) -> Sentence {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn tags_of(tagged: &TaggedSentence) -> Vec<&str> {
        tagged.iter().map(|(_, t)| t.as_str()).collect()
    }

    #[test]
    fn test_multi_token_phrase() {
        let tagger = GazetteerTagger::default();
        let tagged = tagger
            .tag_sentences(&[sentence("The Central Intelligence Agency met in Berlin")])
            .unwrap();
        assert_eq!(
            tags_of(&tagged[0]),
            vec!["O", "ORGANIZATION", "ORGANIZATION", "ORGANIZATION", "O", "O", "LOCATION"]
        );
    }

    #[test]
    fn test_longest_match_wins() {
        let tagger = GazetteerTagger::new()
            .with_phrase("New York", "location")
            .with_phrase("New York Times", "organization");
        let tagged = tagger
            .tag_sentences(&[sentence("the New York Times in New York")])
            .unwrap();
        assert_eq!(
            tags_of(&tagged[0]),
            vec!["O", "ORGANIZATION", "ORGANIZATION", "ORGANIZATION", "O", "LOCATION", "LOCATION"]
        );
    }

    #[test]
    fn test_output_is_parallel_to_input() {
        let tagger = GazetteerTagger::default();
        let input = vec![sentence("FBI agents"), Vec::new(), sentence("in Paris")];
        let tagged = tagger.tag_sentences(&input).unwrap();

        assert_eq!(tagged.len(), input.len());
        for (s, t) in input.iter().zip(&tagged) {
            assert_eq!(s.len(), t.len());
            for (token, (tagged_token, _)) in s.iter().zip(t) {
                assert_eq!(token, tagged_token);
            }
        }
    }

    #[test]
    fn test_empty_gazetteer_tags_everything_outside() {
        let tagger = GazetteerTagger::new().with_phrase("   ", "person");
        assert!(tagger.is_empty());
        let tagged = tagger.tag_sentences(&[sentence("Paris")]).unwrap();
        assert_eq!(tags_of(&tagged[0]), vec!["O"]);
    }
}
