//! Error types for Appeals Core
//!
//! Provides error handling for:
//! - Aggregate loading and normalisation
//! - Configuration loading
//! - Side-loaded data
//! - Mapping failures

use appeals_mapping::MappingError;
use std::path::PathBuf;

/// Main core error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Aggregate could not be loaded
    #[error("aggregate error: {0}")]
    Aggregate(#[from] AggregateError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Mapping failed
    #[error("mapping failed: {0}")]
    Mapping(#[from] MappingError),

    /// Side-loaded data unavailable
    #[error("side-load failed for appeal {appeal_id}: {reason}")]
    SideLoad {
        /// Appeal id
        appeal_id: u64,
        /// What went wrong
        reason: String,
    },
}

impl CoreError {
    /// Whether the failure is a malformed case record rather than an outage
    #[inline]
    #[must_use]
    pub fn is_input_defect(&self) -> bool {
        match self {
            Self::Aggregate(_) => true,
            Self::Mapping(e) => e.is_input_defect(),
            Self::Config(_) | Self::SideLoad { .. } => false,
        }
    }
}

/// Aggregate load/normalisation errors
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// JSON did not match the aggregate shape
    #[error("malformed aggregate: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Required value blank after normalisation
    #[error("required field '{0}' is blank")]
    BlankField(&'static str),

    /// Date field is not ISO-8601
    #[error("field '{field}' is not an ISO-8601 date: {value}")]
    InvalidDate {
        /// Dotted field path
        field: &'static str,
        /// Offending value
        value: String,
    },
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML did not parse
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Value rejected
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Setting name
        field: &'static str,
        /// What was wrong
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_error_display() {
        let err = CoreError::SideLoad {
            appeal_id: 7,
            reason: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "side-load failed for appeal 7: timeout");
    }

    #[test]
    fn input_defects_are_classified() {
        assert!(CoreError::from(AggregateError::BlankField("appealReference")).is_input_defect());
        assert!(CoreError::from(MappingError::missing_field("x", "y")).is_input_defect());
        assert!(!CoreError::from(MappingError::ContextResolution("down".to_string()))
            .is_input_defect());
        assert!(!CoreError::SideLoad {
            appeal_id: 1,
            reason: "down".to_string()
        }
        .is_input_defect());
    }
}
