//! Error types and result handling for value generation.

use std::fmt;

use crate::config::ConfigError;

/// Comprehensive error type for generation failures
///
/// Every variant is raised at the point of violation and is final for the
/// call that produced it. Shared state (the [`BitSource`](crate::BitSource)
/// and any unique tracker) stays usable for the next call.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Invalid or degenerate range bounds
    Range { message: String },

    /// A pick was requested from an empty collection
    EmptyCollection { context: Option<String> },

    /// A cycling generator was constructed from an empty sequence
    EmptySequence,

    /// A filter exhausted its draw budget without a matching value
    PredicateExhausted { threshold: usize },

    /// An argument was outside of its accepted domain
    Argument { name: String, message: String },

    /// Every value of a finite unique domain has already been produced
    CombinationsExhausted {
        domain: String,
        attempts: usize,
    },

    /// Invalid configuration
    Config(ConfigError),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Range { message } => write!(f, "Invalid range: {}", message),
            GenerationError::EmptyCollection { context } => {
                write!(f, "Cannot pick from an empty collection")?;
                if let Some(ctx) = context {
                    write!(f, " (context: {})", ctx)?;
                }
                Ok(())
            }
            GenerationError::EmptySequence => {
                write!(f, "Cannot cycle an empty sequence")
            }
            GenerationError::PredicateExhausted { threshold } => {
                write!(
                    f,
                    "No value satisfied the predicate after {} attempts",
                    threshold
                )
            }
            GenerationError::Argument { name, message } => {
                write!(f, "Invalid argument `{}`: {}", name, message)
            }
            GenerationError::CombinationsExhausted { domain, attempts } => {
                write!(
                    f,
                    "All combinations exhausted for {} after {} attempts",
                    domain, attempts
                )
            }
            GenerationError::Config(err) => write!(f, "Configuration error: {}", err),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for GenerationError {
    fn from(err: ConfigError) -> Self {
        GenerationError::Config(err)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Helper functions for creating GenerationError instances
impl GenerationError {
    /// Create a range error
    pub fn range(message: impl Into<String>) -> Self {
        Self::Range {
            message: message.into(),
        }
    }

    /// Create a range error for `min > max`
    pub fn inverted_bounds<T: fmt::Debug>(min: &T, max: &T) -> Self {
        Self::Range {
            message: format!("min {:?} is greater than max {:?}", min, max),
        }
    }

    /// Create an empty collection error
    pub fn empty_collection() -> Self {
        Self::EmptyCollection { context: None }
    }

    /// Create an empty collection error with context
    pub fn empty_collection_with_context(context: impl Into<String>) -> Self {
        Self::EmptyCollection {
            context: Some(context.into()),
        }
    }

    /// Create a predicate exhausted error
    pub fn predicate_exhausted(threshold: usize) -> Self {
        Self::PredicateExhausted { threshold }
    }

    /// Create an argument error
    pub fn argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Argument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a combinations exhausted error
    pub fn combinations_exhausted(domain: impl Into<String>, attempts: usize) -> Self {
        Self::CombinationsExhausted {
            domain: domain.into(),
            attempts,
        }
    }

    /// Whether this error reports an exhausted unique domain
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::CombinationsExhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GenerationError::range("min 5 is greater than max 1");
        assert_eq!(
            format!("{}", error),
            "Invalid range: min 5 is greater than max 1"
        );

        let error = GenerationError::predicate_exhausted(10);
        assert_eq!(
            format!("{}", error),
            "No value satisfied the predicate after 10 attempts"
        );

        let error = GenerationError::empty_collection_with_context("mail providers");
        assert_eq!(
            format!("{}", error),
            "Cannot pick from an empty collection (context: mail providers)"
        );

        let error = GenerationError::argument("n", "must be > 0");
        assert_eq!(format!("{}", error), "Invalid argument `n`: must be > 0");
    }

    #[test]
    fn test_inverted_bounds_message() {
        let error = GenerationError::inverted_bounds(&5, &1);
        assert_eq!(
            error,
            GenerationError::Range {
                message: "min 5 is greater than max 1".to_string()
            }
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let error: GenerationError = ConfigError::InvalidFilterThreshold(0).into();
        assert!(matches!(error, GenerationError::Config(_)));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_is_exhausted() {
        assert!(GenerationError::combinations_exhausted("emails", 4).is_exhausted());
        assert!(!GenerationError::EmptySequence.is_exhausted());
    }
}
