//! Stanford NER backend.
//!
//! Runs the Stanford CRF classifier as a Java subprocess over the whole
//! batch of sentences. Sentences are already tokenized, so the classifier is
//! told to split on whitespace only and never re-tokenize.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use tempfile::NamedTempFile;

use crate::config::StanfordConfig;
use crate::models::{Sentence, TaggedSentence, TaggedToken};

use super::backend::{NerTagger, TaggerError};

const CLASSIFIER_MAIN: &str = "edu.stanford.nlp.ie.crf.CRFClassifier";
const WHITESPACE_TOKENIZER: &str = "edu.stanford.nlp.process.WhitespaceTokenizer";

/// Separator between token and tag in `slashTags` output.
const TAG_SEPARATOR: char = '/';

/// Stanford NER tagger backed by the Java CRF classifier.
#[derive(Debug)]
pub struct StanfordTagger {
    config: StanfordConfig,
    java: PathBuf,
    classifier: PathBuf,
    jar: PathBuf,
}

impl StanfordTagger {
    /// Create a tagger from `config`.
    ///
    /// Fails if the encoding is not UTF-8, if the distribution, its classifier
    /// model or its jar is missing, or if no Java runtime can be found.
    pub fn new(config: StanfordConfig) -> Result<Self, TaggerError> {
        if !config.is_utf8_encoding() {
            return Err(TaggerError::UnsupportedEncoding(config.encoding));
        }

        let distribution = config.distribution_dir();
        if !distribution.is_dir() {
            return Err(TaggerError::Setup {
                path: distribution,
                hint: format!(
                    "Stanford NER not found. Download and unpack {} into {}",
                    config.distribution,
                    config.data_dir.display()
                ),
            });
        }

        let classifier = config.classifier_path();
        let jar = config.jar_path();
        for asset in [&classifier, &jar] {
            if !asset.is_file() {
                return Err(TaggerError::Setup {
                    path: asset.clone(),
                    hint: format!(
                        "Stanford NER distribution at {} is incomplete; reinstall {}",
                        distribution.display(),
                        config.distribution
                    ),
                });
            }
        }

        let java = which::which(&config.java).map_err(|_| {
            TaggerError::BackendNotAvailable(format!(
                "{} not found (install a Java runtime)",
                config.java
            ))
        })?;

        tracing::debug!(
            "Stanford NER ready: classifier={}, java={}",
            classifier.display(),
            java.display()
        );

        Ok(Self {
            config,
            java,
            classifier,
            jar,
        })
    }

    /// Create a tagger from the default asset location.
    pub fn with_defaults() -> Result<Self, TaggerError> {
        Self::new(StanfordConfig::default())
    }

    pub fn config(&self) -> &StanfordConfig {
        &self.config
    }

    fn write_input(&self, sentences: &[Sentence]) -> Result<NamedTempFile, TaggerError> {
        let mut file = NamedTempFile::new()?;
        for sentence in sentences {
            writeln!(file, "{}", sentence.join(" "))?;
        }
        file.flush()?;
        Ok(file)
    }

    fn run_classifier(&self, input: &NamedTempFile) -> Result<String, TaggerError> {
        let output = Command::new(&self.java)
            .arg(format!("-mx{}", self.config.java_memory))
            .arg("-cp")
            .arg(&self.jar)
            .arg(CLASSIFIER_MAIN)
            .arg("-loadClassifier")
            .arg(&self.classifier)
            .arg("-textFile")
            .arg(input.path())
            .args(["-outputFormat", "slashTags"])
            .args(["-encoding", self.config.encoding.as_str()])
            .args(["-tokenizerFactory", WHITESPACE_TOKENIZER])
            .args(["-tokenizerOptions", "tokenizeNLs=false"])
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(TaggerError::TaggingFailed(format!(
                        "Stanford NER exited with {}: {}",
                        output.status,
                        stderr.trim()
                    )))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                TaggerError::BackendNotAvailable(format!("{} not found", self.java.display())),
            ),
            Err(e) => Err(TaggerError::Io(e)),
        }
    }
}

/// Reject tokens the whitespace tokenizer would split or drop.
fn check_tokens(sentences: &[Sentence]) -> Result<(), TaggerError> {
    for token in sentences.iter().flatten() {
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(TaggerError::InvalidToken(token.clone()));
        }
    }
    Ok(())
}

/// Parse `token/TAG` pairs from classifier output.
///
/// Sentence boundaries in the output are not trusted; pairs are read as one
/// flat stream.
fn parse_slash_tags(output: &str) -> Result<Vec<TaggedToken>, TaggerError> {
    output
        .split_whitespace()
        .map(|item| {
            item.rsplit_once(TAG_SEPARATOR)
                .map(|(token, tag)| (token.to_string(), tag.to_string()))
                .ok_or_else(|| {
                    TaggerError::TaggingFailed(format!("malformed tagger output {:?}", item))
                })
        })
        .collect()
}

/// Split a flat tagged stream back into sentences of the given lengths.
fn rechunk(
    sentences: &[Sentence],
    tagged: Vec<TaggedToken>,
) -> Result<Vec<TaggedSentence>, TaggerError> {
    let expected: usize = sentences.iter().map(Vec::len).sum();
    if tagged.len() != expected {
        return Err(TaggerError::OutputMismatch {
            expected,
            got: tagged.len(),
        });
    }

    let mut stream = tagged.into_iter();
    Ok(sentences
        .iter()
        .map(|s| stream.by_ref().take(s.len()).collect())
        .collect())
}

impl NerTagger for StanfordTagger {
    fn backend_id(&self) -> &str {
        "stanford"
    }

    fn tag_sentences(&self, sentences: &[Sentence]) -> Result<Vec<TaggedSentence>, TaggerError> {
        check_tokens(sentences)?;

        if sentences.iter().all(Vec::is_empty) {
            return Ok(vec![Vec::new(); sentences.len()]);
        }

        let start = Instant::now();
        let input = self.write_input(sentences)?;
        let output = self.run_classifier(&input)?;
        let tagged = rechunk(sentences, parse_slash_tags(&output)?)?;

        tracing::debug!(
            "Stanford NER tagged {} sentences in {}ms",
            sentences.len(),
            start.elapsed().as_millis()
        );

        Ok(tagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str) -> Sentence {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_missing_distribution_is_setup_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StanfordTagger::new(StanfordConfig::with_data_dir(dir.path())).unwrap_err();
        match err {
            TaggerError::Setup { path, hint } => {
                assert!(path.ends_with("stanford-ner-2014-01-04"));
                assert!(hint.contains("Download"));
            }
            other => panic!("expected setup error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_utf8_encoding_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StanfordConfig::with_data_dir(dir.path());
        config.encoding = "latin1".to_string();

        let err = StanfordTagger::new(config).unwrap_err();

        assert!(matches!(err, TaggerError::UnsupportedEncoding(enc) if enc == "latin1"));
    }

    #[test]
    fn test_missing_jar_is_setup_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = StanfordConfig::with_data_dir(dir.path());
        let classifier = config.classifier_path();
        std::fs::create_dir_all(classifier.parent().unwrap()).unwrap();
        std::fs::write(&classifier, b"model").unwrap();

        let err = StanfordTagger::new(config).unwrap_err();
        match err {
            TaggerError::Setup { path, .. } => assert!(path.ends_with("stanford-ner.jar")),
            other => panic!("expected setup error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_slash_tags() {
        let parsed = parse_slash_tags("Barack/PERSON Obama/PERSON\nvisited/O AC/DC/O\n").unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0], ("Barack".to_string(), "PERSON".to_string()));
        assert_eq!(parsed[3], ("AC/DC".to_string(), "O".to_string()));
    }

    #[test]
    fn test_parse_rejects_untagged_items() {
        assert!(matches!(
            parse_slash_tags("Barack/PERSON Obama"),
            Err(TaggerError::TaggingFailed(_))
        ));
    }

    #[test]
    fn test_rechunk_restores_sentence_lengths() {
        let sentences = vec![sentence("a b"), Vec::new(), sentence("c")];
        let flat = parse_slash_tags("a/O b/O c/LOCATION").unwrap();
        let tagged = rechunk(&sentences, flat).unwrap();
        assert_eq!(tagged.len(), 3);
        assert_eq!(tagged[0].len(), 2);
        assert!(tagged[1].is_empty());
        assert_eq!(tagged[2][0].1, "LOCATION");
    }

    #[test]
    fn test_rechunk_detects_missing_tokens() {
        let sentences = vec![sentence("a b c")];
        let flat = parse_slash_tags("a/O b/O").unwrap();
        assert!(matches!(
            rechunk(&sentences, flat),
            Err(TaggerError::OutputMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_tokens_with_whitespace_rejected() {
        let sentences = vec![vec!["New York".to_string()]];
        assert!(matches!(
            check_tokens(&sentences),
            Err(TaggerError::InvalidToken(_))
        ));
        assert!(check_tokens(&[sentence("fine tokens")]).is_ok());
    }
}
