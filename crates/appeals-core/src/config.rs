//! Mapper configuration
//!
//! Loaded once at startup (TOML or defaults) and carried into every
//! submapper context.

use crate::error::ConfigError;
use appeals_components::format::{validate_date_pattern, DEFAULT_DATE_PATTERN};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Feature switches; a disabled feature renders `display: {}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FeatureFlags {
    /// Costs decision folder row
    pub costs_decision: bool,
    /// Hearing rows
    pub hearing: bool,
    /// Inquiry rows
    pub inquiry: bool,
    /// Final comments rows (and their side-load)
    pub final_comments: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            costs_decision: true,
            hearing: true,
            inquiry: true,
            final_comments: true,
        }
    }
}

/// Mapper configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct MapperConfig {
    /// strftime pattern for display dates
    pub date_format: String,
    /// Feature switches
    pub feature_flags: FeatureFlags,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_PATTERN.to_string(),
            feature_flags: FeatureFlags::default(),
        }
    }
}

impl MapperConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With date pattern
    #[inline]
    #[must_use]
    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    /// With feature flags
    #[inline]
    #[must_use]
    pub fn with_feature_flags(mut self, flags: FeatureFlags) -> Self {
        self.feature_flags = flags;
        self
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// [`ConfigError::Toml`] for syntax errors, [`ConfigError::InvalidValue`]
    /// for a malformed date pattern.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded mapper config");
        Self::from_toml_str(&source)
    }

    /// Check values serde cannot
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] for an empty or malformed date pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "date_format",
                reason: "empty pattern".to_string(),
            });
        }
        validate_date_pattern(&self.date_format).map_err(|e| ConfigError::InvalidValue {
            field: "date_format",
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_enable_everything() {
        let config = MapperConfig::new();
        assert_eq!(config.date_format, "%-d %B %Y");
        assert!(config.feature_flags.costs_decision);
        assert!(config.feature_flags.final_comments);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = MapperConfig::from_toml_str(
            r#"
            [feature_flags]
            hearing = false
            "#,
        )
        .unwrap();
        assert!(!config.feature_flags.hearing);
        assert!(config.feature_flags.inquiry);
        assert_eq!(config.date_format, DEFAULT_DATE_PATTERN);
    }

    #[test]
    fn bad_pattern_is_rejected() {
        let err = MapperConfig::from_toml_str(r#"date_format = "%Q""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "date_format", .. }));
    }

    #[test]
    fn bad_toml_is_rejected() {
        assert!(matches!(
            MapperConfig::from_toml_str("date_format = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"date_format = "%d/%m/%Y""#).unwrap();
        let config = MapperConfig::from_file(file.path()).unwrap();
        assert_eq!(config.date_format, "%d/%m/%Y");
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            MapperConfig::from_file("/nonexistent/appeals.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
