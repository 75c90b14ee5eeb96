//! Console configuration
//!
//! A TOML file naming the data files the file-backed store works on and the
//! language selection new model drafts start with:
//!
//! ```toml
//! models_path = "data/models.json"
//! access_path = "data/access.json"
//! instances_path = "data/instances.json"
//! outbox_path = "data/outbox.jsonl"
//! default_languages = ["ru", "en"]
//! ```

use crate::args::PathArgs;
use console_core::{ConsoleError, ConsoleResult, Language, LanguageSet, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub models_path: PathBuf,
    pub access_path: PathBuf,
    pub instances_path: PathBuf,
    pub outbox_path: PathBuf,

    /// Initial language selection of a new model draft
    pub default_languages: LanguageSet,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            models_path: PathBuf::from("models.json"),
            access_path: PathBuf::from("access.json"),
            instances_path: PathBuf::from("instances.json"),
            outbox_path: PathBuf::from("outbox.jsonl"),
            default_languages: LanguageSet::from(vec![Language::Ru]),
        }
    }
}

impl ConsoleConfig {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> ConsoleResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file; using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConsoleError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content).with_context(path.display().to_string())?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> ConsoleResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConsoleError::InvalidConfig(e.to_string()))?;
        if config.default_languages.is_empty() {
            return Err(ConsoleError::EmptyLanguageSet);
        }
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ConsoleResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConsoleError::InvalidConfig(e.to_string()))
    }

    /// Apply path overrides from flags or environment
    pub fn with_overrides(mut self, paths: &PathArgs) -> Self {
        if let Some(path) = &paths.models {
            self.models_path = path.clone();
        }
        if let Some(path) = &paths.access {
            self.access_path = path.clone();
        }
        if let Some(path) = &paths.instances {
            self.instances_path = path.clone();
        }
        if let Some(path) = &paths.outbox {
            self.outbox_path = path.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConsoleConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.default_languages.codes(), "ru");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = ConsoleConfig::from_toml_str(
            r#"
            models_path = "data/models.json"
            default_languages = ["ru", "en"]
            "#,
        )
        .unwrap();

        assert_eq!(config.models_path, PathBuf::from("data/models.json"));
        assert_eq!(config.outbox_path, PathBuf::from("outbox.jsonl"));
        assert_eq!(config.default_languages.codes(), "ru, en");
    }

    #[test]
    fn test_rejects_bad_languages() {
        let err = ConsoleConfig::from_toml_str("default_languages = []").unwrap_err();
        assert!(err.is_validation());

        let err = ConsoleConfig::from_toml_str(r#"default_languages = ["fr"]"#).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "models_path = [").unwrap();

        let err = ConsoleConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_overrides_win() {
        let paths = PathArgs {
            outbox: Some(PathBuf::from("/tmp/out.jsonl")),
            ..PathArgs::default()
        };
        let config = ConsoleConfig::default().with_overrides(&paths);
        assert_eq!(config.outbox_path, PathBuf::from("/tmp/out.jsonl"));
        assert_eq!(config.models_path, PathBuf::from("models.json"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ConsoleConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(ConsoleConfig::from_toml_str(&text).unwrap(), config);
    }
}
