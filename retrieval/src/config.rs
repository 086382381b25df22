//! Configuration for related-post generation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};

/// Number of related posts listed per post unless configured otherwise.
pub const DEFAULT_NEIGHBORS: usize = 2;

/// Configuration for a related-post run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedConfig {
    /// Directory holding one embedding record per post.
    pub data_dir: PathBuf,

    /// How many related posts to list for each post.
    pub neighbors: usize,

    /// Rank posts on the rayon thread pool.
    pub parallel: bool,

    /// Report format.
    pub format: OutputFormat,

    /// Where to write the report (stdout when unset).
    pub output: Option<PathBuf>,
}

impl RelatedConfig {
    /// Create a new configuration with default values.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RetrievalError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Set the number of related posts per post.
    pub fn with_neighbors(mut self, neighbors: usize) -> Self {
        self.neighbors = neighbors;
        self
    }

    /// Enable or disable parallel ranking.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the report format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Write the report to a file instead of stdout.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Check the configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(RetrievalError::Config("data_dir is not set".to_string()));
        }
        if self.neighbors == 0 {
            return Err(RetrievalError::Config(
                "neighbors must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            neighbors: DEFAULT_NEIGHBORS,
            parallel: false,
            format: OutputFormat::default(),
            output: None,
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Plain `permalink:` blocks with a dashed list of related permalinks.
    #[default]
    Text,
    /// Pretty-printed JSON array.
    Json,
    /// YAML mapping of permalink to related permalinks.
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RelatedConfig::new("data");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.neighbors, 2);
        assert!(!config.parallel);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.output, None);
    }

    #[test]
    fn test_from_toml() {
        let config = RelatedConfig::from_toml_str(
            r#"
            data_dir = "scripts/generate-related/data"
            neighbors = 3
            format = "yaml"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("scripts/generate-related/data"));
        assert_eq!(config.neighbors, 3);
        assert_eq!(config.format, OutputFormat::Yaml);
        assert!(!config.parallel);
    }

    #[test]
    fn test_invalid_toml() {
        let result = RelatedConfig::from_toml_str("format = \"xml\"");
        assert!(matches!(result, Err(RetrievalError::Config(_))));
    }

    #[test]
    fn test_validate() {
        assert!(RelatedConfig::new("data").validate().is_ok());
        assert!(RelatedConfig::default().validate().is_err());
        assert!(
            RelatedConfig::new("data")
                .with_neighbors(0)
                .validate()
                .is_err()
        );
    }
}
