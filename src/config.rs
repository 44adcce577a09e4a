//! Inspector configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[serde(default)]` fills every missing field from `Default::default()`,
//! so a config file only needs the settings it changes. An empty file is a
//! valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use textview_core::{Comparison, InvariantCollation, UnitSet};

/// Main inspector configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Comparison settings for `find` and `compare`
    pub compare: CompareConfig,

    /// What each command prints
    pub output: OutputConfig,

    /// Settings for `trim`
    pub trim: TrimConfig,
}

impl InspectConfig {
    /// Loads the config at `path`, or from the default location when no
    /// path is given.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the default config.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from_default_path(),
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("textview").join("config.toml"))
    }
}

/// How text is compared.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonKind {
    /// Code unit by code unit
    #[default]
    Ordinal,
    /// Code unit by code unit, ignoring case
    OrdinalIgnoreCase,
    /// Invariant collation, by scalar value
    Invariant,
    /// Invariant collation, ignoring case
    InvariantIgnoreCase,
}

impl ComparisonKind {
    /// The comparison mode this setting selects.
    pub fn comparison(self) -> Comparison<'static> {
        match self {
            Self::Ordinal => Comparison::Ordinal,
            Self::OrdinalIgnoreCase => Comparison::OrdinalIgnoreCase,
            Self::Invariant => Comparison::Culture(&InvariantCollation::CASE_SENSITIVE),
            Self::InvariantIgnoreCase => Comparison::Culture(&InvariantCollation::IGNORE_CASE),
        }
    }

    /// The case-insensitive counterpart of this setting.
    pub fn ignoring_case(self) -> Self {
        match self {
            Self::Ordinal | Self::OrdinalIgnoreCase => Self::OrdinalIgnoreCase,
            Self::Invariant | Self::InvariantIgnoreCase => Self::InvariantIgnoreCase,
        }
    }
}

/// Comparison configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Mode used when the command line doesn't pick one
    pub mode: ComparisonKind,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print buffer offsets next to each item
    pub show_offsets: bool,

    /// Print the text of each line
    pub show_text: bool,

    /// Maximum number of items a listing prints (0 = unlimited)
    pub max_items: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_offsets: true,
            show_text: true,
            max_items: 0,
        }
    }
}

impl OutputConfig {
    /// The item limit as a count usable with `Iterator::take`.
    pub fn limit(&self) -> usize {
        if self.max_items == 0 {
            usize::MAX
        } else {
            self.max_items
        }
    }
}

/// Trim configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    /// Characters removed from both ends in addition to white space
    pub extra: String,
}

impl TrimConfig {
    /// The extra characters as a search set.
    pub fn extra_units(&self) -> UnitSet {
        UnitSet::from(self.extra.as_str())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = InspectConfig::default();
        assert_eq!(config.compare.mode, ComparisonKind::Ordinal);
        assert!(config.output.show_offsets);
        assert_eq!(config.output.limit(), usize::MAX);
        assert!(config.trim.extra_units().is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = InspectConfig::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: InspectConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[compare]\nmode = \"ordinal-ignore-case\"\n\n[output]\nmax_items = 3").unwrap();

        let config = InspectConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.compare.mode, ComparisonKind::OrdinalIgnoreCase);
        assert_eq!(config.output.limit(), 3);
        assert!(config.output.show_text);
        assert_eq!(config.trim, TrimConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = InspectConfig::load_from(file.path()).unwrap();
        assert_eq!(config, InspectConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = InspectConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_mode_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[compare]\nmode = \"phonetic\"").unwrap();
        let result = InspectConfig::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_comparison_kinds() {
        assert!(matches!(ComparisonKind::Ordinal.comparison(), Comparison::Ordinal));
        assert!(matches!(
            ComparisonKind::Invariant.comparison(),
            Comparison::Culture(_)
        ));
        assert_eq!(
            ComparisonKind::Invariant.ignoring_case(),
            ComparisonKind::InvariantIgnoreCase
        );
        assert_eq!(
            ComparisonKind::Ordinal.ignoring_case(),
            ComparisonKind::OrdinalIgnoreCase
        );
    }
}
