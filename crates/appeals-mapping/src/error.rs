//! Mapping errors
//!
//! Two categories stay distinct: a field that is legitimately empty is not an
//! error at all (builders render a default text), while a context missing
//! something a submapper requires is a defect reported here and never caught
//! by the factory.

/// Mapping failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// Context lacks a value the submapper requires
    #[error("submapper '{submapper}' requires missing field '{field}'")]
    MissingField {
        /// Submapper id
        submapper: String,
        /// Dotted path of the missing field
        field: String,
    },

    /// Context holds a value the submapper cannot interpret
    #[error("submapper '{submapper}' got invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Submapper id
        submapper: String,
        /// Dotted path of the field
        field: String,
        /// What was wrong
        reason: String,
    },

    /// Two submappers registered under one id
    #[error("duplicate submapper id: {0}")]
    DuplicateSubmapper(String),

    /// The shared context could not be built
    #[error("context resolution failed: {0}")]
    ContextResolution(String),
}

impl MappingError {
    /// Create missing field error
    #[inline]
    #[must_use]
    pub fn missing_field(submapper: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            submapper: submapper.into(),
            field: field.into(),
        }
    }

    /// Create invalid value error
    #[inline]
    #[must_use]
    pub fn invalid_value(
        submapper: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            submapper: submapper.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is a malformed-input defect raised by a submapper
    #[inline]
    #[must_use]
    pub fn is_input_defect(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidValue { .. })
    }

    /// Submapper that raised the error, if any
    #[must_use]
    pub fn submapper(&self) -> Option<&str> {
        match self {
            Self::MissingField { submapper, .. } | Self::InvalidValue { submapper, .. } => {
                Some(submapper)
            }
            Self::DuplicateSubmapper(_) | Self::ContextResolution(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = MappingError::missing_field("validation-outcome", "appellantCase");
        assert_eq!(
            err.to_string(),
            "submapper 'validation-outcome' requires missing field 'appellantCase'"
        );
        assert!(err.is_input_defect());
        assert_eq!(err.submapper(), Some("validation-outcome"));
    }

    #[test]
    fn registry_errors_are_not_input_defects() {
        assert!(!MappingError::DuplicateSubmapper("x".to_string()).is_input_defect());
        assert!(!MappingError::ContextResolution("down".to_string()).is_input_defect());
        assert_eq!(MappingError::ContextResolution("down".to_string()).submapper(), None);
    }
}
