//! Tagger backend configuration.
//!
//! Configuration is always passed explicitly to the backend constructors.
//! These types derive serde so a host application can embed them in its own
//! config file; nothing here reads files or environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default Stanford NER distribution directory name.
pub const DEFAULT_STANFORD_DISTRIBUTION: &str = "stanford-ner-2014-01-04";

/// Default classifier model, relative to the distribution directory.
pub const DEFAULT_STANFORD_CLASSIFIER: &str = "classifiers/english.all.3class.distsim.crf.ser.gz";

/// Default jar, relative to the distribution directory.
pub const DEFAULT_STANFORD_JAR: &str = "stanford-ner.jar";

/// Subdirectory of the platform data dir holding third-party assets.
const DATA_SUBDIR: &str = "docner";

/// Stanford NER backend configuration.
///
/// ```toml
/// [stanford]
/// data_dir = "/opt/nlp"
/// java_memory = "2g"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StanfordConfig {
    /// Directory containing the unpacked distribution.
    pub data_dir: PathBuf,
    /// Name of the distribution directory under `data_dir`.
    pub distribution: String,
    /// Classifier model path, relative to the distribution directory.
    pub classifier: PathBuf,
    /// Jar path, relative to the distribution directory.
    pub jar: PathBuf,
    /// Java executable, either a name looked up in PATH or a path.
    pub java: String,
    /// Max heap passed as `-mx<value>`.
    pub java_memory: String,
    /// Encoding passed to the classifier. Sentences are written and output is
    /// read as UTF-8, so only UTF-8 spellings (`utf8`, `UTF-8`) are accepted.
    pub encoding: String,
}

impl Default for StanfordConfig {
    fn default() -> Self {
        Self::with_data_dir(default_data_dir())
    }
}

impl StanfordConfig {
    /// Default configuration rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            distribution: DEFAULT_STANFORD_DISTRIBUTION.to_string(),
            classifier: PathBuf::from(DEFAULT_STANFORD_CLASSIFIER),
            jar: PathBuf::from(DEFAULT_STANFORD_JAR),
            java: "java".to_string(),
            java_memory: "1000m".to_string(),
            encoding: "utf8".to_string(),
        }
    }

    /// Directory of the unpacked distribution.
    pub fn distribution_dir(&self) -> PathBuf {
        self.data_dir.join(&self.distribution)
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.distribution_dir().join(&self.classifier)
    }

    pub fn jar_path(&self) -> PathBuf {
        self.distribution_dir().join(&self.jar)
    }

    pub fn is_utf8_encoding(&self) -> bool {
        matches!(self.encoding.to_ascii_lowercase().as_str(), "utf8" | "utf-8")
    }
}

/// Platform user-data directory for third-party assets.
///
/// Falls back to the home directory, then the working directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(DATA_SUBDIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_encoding_spellings() {
        let mut config = StanfordConfig::with_data_dir("/opt/nlp");
        assert!(config.is_utf8_encoding());
        config.encoding = "UTF-8".to_string();
        assert!(config.is_utf8_encoding());
        config.encoding = "latin1".to_string();
        assert!(!config.is_utf8_encoding());
    }

    #[test]
    fn test_asset_paths() {
        let config = StanfordConfig::with_data_dir("/opt/nlp");
        assert_eq!(
            config.distribution_dir(),
            PathBuf::from("/opt/nlp/stanford-ner-2014-01-04")
        );
        assert_eq!(
            config.jar_path(),
            PathBuf::from("/opt/nlp/stanford-ner-2014-01-04/stanford-ner.jar")
        );
        assert!(config
            .classifier_path()
            .ends_with("classifiers/english.all.3class.distsim.crf.ser.gz"));
    }

    #[test]
    fn test_default_data_dir_is_namespaced() {
        assert!(default_data_dir().ends_with("docner"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: StanfordConfig =
            serde_json::from_str(r#"{"data_dir": "/srv/nlp", "java_memory": "2g"}"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/nlp"));
        assert_eq!(config.java_memory, "2g");
        assert_eq!(config.distribution, DEFAULT_STANFORD_DISTRIBUTION);
        assert_eq!(config.java, "java");
    }
}
