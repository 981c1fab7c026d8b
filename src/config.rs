//! YAML configuration for the ASTrED pipeline.
//!
//! Every section is optional and falls back to its defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "en-nl evaluation"
//!
//! grouping:
//!   allow_mwe: true
//!   attribution: movement   # or `shared`
//!
//! costs:
//!   rename: 1
//!   deletion: 1
//!   insertion: 1
//!
//! check_symmetry: false
//! parallel: true
//! ```

use std::fs;
use std::path::Path;

use align::GroupingConfig;
use serde::{Deserialize, Serialize};
use ted::EditCosts;
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Settings for building [`AlignedSentences`](crate::AlignedSentences).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AstredConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    pub name: Option<String>,

    pub grouping: GroupingConfig,

    /// Edit costs for both the plain and the merged-label tree distance.
    pub costs: EditCosts,

    /// Recompute every metric with source and target swapped and fail on any
    /// difference. On by default in debug builds.
    pub check_symmetry: bool,

    /// Fan batches out over the rayon pool.
    pub parallel: bool,
}

impl AstredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AstredConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_grouping(mut self, grouping: GroupingConfig) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_allow_mwe(mut self, allow_mwe: bool) -> Self {
        self.grouping.allow_mwe = allow_mwe;
        self
    }

    pub fn with_costs(mut self, costs: EditCosts) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_symmetry_check(mut self, check_symmetry: bool) -> Self {
        self.check_symmetry = check_symmetry;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.costs
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("costs: {err}")))?;

        Ok(())
    }
}

impl Default for AstredConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            grouping: GroupingConfig::default(),
            costs: EditCosts::default(),
            check_symmetry: cfg!(debug_assertions),
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use align::CrossAttribution;
    use std::io::Write;

    #[test]
    fn parses_full_document() {
        let yaml = r#"
version: "1.0"
name: "en-nl"
grouping:
  allow_mwe: false
  attribution: shared
costs:
  rename: 2
  deletion: 1
  insertion: 1
check_symmetry: true
parallel: false
"#;
        let cfg = AstredConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.name.as_deref(), Some("en-nl"));
        assert!(!cfg.grouping.allow_mwe);
        assert_eq!(cfg.grouping.attribution, CrossAttribution::Shared);
        assert_eq!(cfg.costs.rename, 2);
        assert!(cfg.check_symmetry);
        assert!(!cfg.parallel);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg = AstredConfig::from_yaml("version: \"1\"\n").unwrap();
        assert!(cfg.grouping.allow_mwe);
        assert_eq!(cfg.costs, EditCosts::default());
    }

    #[test]
    fn rejects_unknown_version() {
        let err = AstredConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn rejects_asymmetric_costs() {
        let yaml = "version: \"1.0\"\ncosts:\n  insertion: 2\n";
        let err = AstredConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "version: \"1.0\"\ngrouping:\n  allow_mwe: false").unwrap();
        let cfg = AstredConfig::from_file(file.path()).unwrap();
        assert!(!cfg.grouping.allow_mwe);
    }

    #[test]
    fn yaml_round_trip_preserves_settings() {
        let cfg = AstredConfig::default().with_allow_mwe(false).with_parallel(false);
        let back = AstredConfig::from_yaml(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
