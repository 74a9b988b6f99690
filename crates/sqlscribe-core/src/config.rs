//! Configuration schema (sqlscribe.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Input file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Transformation export (workflow, dataset, version, date modified, SQL)
    #[serde(default = "default_transformations")]
    pub transformations: PathBuf,

    /// Additional known table names, one per row
    #[serde(default = "default_table_names")]
    pub table_names: PathBuf,
}

fn default_transformations() -> PathBuf {
    PathBuf::from("transformations.csv")
}

fn default_table_names() -> PathBuf {
    PathBuf::from("table_names.csv")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            transformations: default_transformations(),
            table_names: default_table_names(),
        }
    }
}

/// Output location and which artifacts to write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// Write one document per dataset
    #[serde(default = "default_true")]
    pub documents: bool,

    /// Write direct/full dependency JSON files
    #[serde(default = "default_true")]
    pub json: bool,

    /// Write direct/full dependency spreadsheets
    #[serde(default = "default_true")]
    pub spreadsheets: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Output")
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            documents: true,
            json: true,
            spreadsheets: true,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Project root path (for resolving relative paths)
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            output: OutputConfig::default(),
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        // Set project root to parent of config file
        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.project_root = std::env::current_dir().unwrap_or_default();
        Ok(config)
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Resolve a possibly relative path against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    pub fn transformations_path(&self) -> PathBuf {
        self.resolve(&self.input.transformations)
    }

    pub fn table_names_path(&self) -> PathBuf {
        self.resolve(&self.input.table_names)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.output.directory)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.input.transformations, PathBuf::from("transformations.csv"));
        assert_eq!(config.input.table_names, PathBuf::from("table_names.csv"));
        assert_eq!(config.output.directory, PathBuf::from("Output"));
        assert!(config.output.documents && config.output.json && config.output.spreadsheets);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [output]
            directory = "docs"
            documents = false
            "#,
        )
        .unwrap();

        assert_eq!(config.output.directory, PathBuf::from("docs"));
        assert!(!config.output.documents);
        assert!(config.output.json);
        assert_eq!(config.input, InputConfig::default());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::from_toml("[output\ndirectory = 1").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlscribe.toml");
        std::fs::write(&path, "[input]\ntransformations = \"data/t.csv\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.project_root, dir.path());
        assert_eq!(config.transformations_path(), dir.path().join("data/t.csv"));
        assert_eq!(config.output_dir(), dir.path().join("Output"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlscribe.toml");

        let mut config = Config::default();
        config.output.spreadsheets = false;
        config.save_to_file(&path).unwrap();

        let parsed = Config::from_file(&path).unwrap();
        assert_eq!(parsed.input, config.input);
        assert_eq!(parsed.output, config.output);
    }
}
