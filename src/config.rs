use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::guard::CounterScope;
use crate::loader::DEFAULT_ALIGNMENT_COLUMN;

pub const CONFIG_FILE_NAME: &str = ".magic-translate.json";

/// Run settings, loaded from `.magic-translate.json` and overridden by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one sub-directory per language
    #[serde(default = "default_lang_root")]
    pub lang_root: PathBuf,
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    /// Table file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_alignment_column")]
    pub alignment_column: usize,
    /// Ask for confirmation of every new translation
    #[serde(default = "default_validation")]
    pub validation: bool,
    #[serde(default)]
    pub counter_scope: CounterScope,
}

fn default_lang_root() -> PathBuf {
    PathBuf::from("lang")
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_extension() -> String {
    "php".to_string()
}

fn default_alignment_column() -> usize {
    DEFAULT_ALIGNMENT_COLUMN
}

fn default_validation() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang_root: default_lang_root(),
            source_locale: default_source_locale(),
            extension: default_extension(),
            alignment_column: default_alignment_column(),
            validation: default_validation(),
            counter_scope: CounterScope::default(),
        }
    }
}

impl Config {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }

    /// Load the nearest config file above `start_dir`, or the defaults
    pub fn discover(start_dir: &Path) -> Result<Self> {
        match find_config_file(start_dir) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.contains(['/', '\\', '.']) {
            return Err(Error::Config(format!(
                "Invalid table extension: \"{}\"",
                self.extension
            )));
        }
        Ok(())
    }

    /// `<langRoot>/<locale>/<file>.<ext>`
    pub fn table_path(&self, file: &str, locale: &str) -> PathBuf {
        self.lang_root
            .join(locale)
            .join(format!("{}.{}", file, self.extension))
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.lang_root, PathBuf::from("lang"));
        assert_eq!(config.source_locale, "en");
        assert_eq!(config.alignment_column, 30);
        assert!(config.validation);
        assert_eq!(config.counter_scope, CounterScope::PerRun);
    }

    #[test]
    fn test_table_path() {
        let config = Config::default();
        assert_eq!(
            config.table_path("auth", "fr"),
            PathBuf::from("lang/fr/auth.php")
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "langRoot": "resources/lang", "counterScope": "entry" }"#)
                .unwrap();
        assert_eq!(config.lang_root, PathBuf::from("resources/lang"));
        assert_eq!(config.counter_scope, CounterScope::PerEntry);
        assert_eq!(config.extension, "php");
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "sourceLocale": "de", "validation": false }"#,
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = Config::discover(&nested).unwrap();
        assert_eq!(config.source_locale, "de");
        assert!(!config.validation);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_extension() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.extension = "../php".to_string();
        assert!(config.validate().is_err());
    }
}
