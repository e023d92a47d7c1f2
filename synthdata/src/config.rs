//! Configuration for sampling, filtering and uniqueness limits.

use crate::error::Result;
use crate::generator::{DEFAULT_FILTER_THRESHOLD, Filter, Generator};
use crate::range::{Inclusivity, Range};
use crate::rng::{BitSource, DefaultRngProvider, RngProvider};
use crate::sampler::Sample;
use crate::unique::DEFAULT_CYCLE_LIMIT;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid filter threshold (must be > 0)
    InvalidFilterThreshold(usize),
    /// Invalid unique cycle limit (must be > 0)
    InvalidCycleLimit(usize),
    /// The configuration document could not be parsed
    Parse(String),
    /// The configuration file could not be read
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidFilterThreshold(n) => {
                write!(f, "Invalid filter threshold: {} (must be > 0)", n)
            }
            ConfigError::InvalidCycleLimit(n) => {
                write!(f, "Invalid unique cycle limit: {} (must be > 0)", n)
            }
            ConfigError::Parse(message) => write!(f, "Invalid configuration: {}", message),
            ConfigError::Io(message) => write!(f, "Cannot read configuration: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration shared by a generation run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Seed for the run's bit source; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Draw budget for filters built from this configuration
    pub filter_threshold: usize,
    /// Full passes over a finite alternative space before a unique builder
    /// augments its candidate or gives up
    pub unique_cycle_limit: usize,
    /// Inclusivity applied by [`GeneratorConfig::range`]
    pub default_rule: Inclusivity,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            filter_threshold: DEFAULT_FILTER_THRESHOLD,
            unique_cycle_limit: DEFAULT_CYCLE_LIMIT,
            default_rule: Inclusivity::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with validation
    pub fn new(
        seed: Option<u64>,
        filter_threshold: usize,
        unique_cycle_limit: usize,
        default_rule: Inclusivity,
    ) -> std::result::Result<Self, ConfigError> {
        let config = Self {
            seed,
            filter_threshold,
            unique_cycle_limit,
            default_rule,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration pinned to `seed`
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.filter_threshold == 0 {
            return Err(ConfigError::InvalidFilterThreshold(self.filter_threshold));
        }
        if self.unique_cycle_limit == 0 {
            return Err(ConfigError::InvalidCycleLimit(self.unique_cycle_limit));
        }
        Ok(())
    }

    /// Merge with a base configuration; fields left at their defaults take
    /// the base's value
    pub fn merge_with(self, base: &GeneratorConfig) -> Self {
        let default = GeneratorConfig::default();
        Self {
            seed: self.seed.or(base.seed),
            filter_threshold: if self.filter_threshold == default.filter_threshold {
                base.filter_threshold
            } else {
                self.filter_threshold
            },
            unique_cycle_limit: if self.unique_cycle_limit == default.unique_cycle_limit {
                base.unique_cycle_limit
            } else {
                self.unique_cycle_limit
            },
            default_rule: if self.default_rule == default.default_rule {
                base.default_rule
            } else {
                self.default_rule
            },
        }
    }

    /// Create the run's bit source
    pub fn create_source(&self) -> BitSource {
        self.create_source_with(&DefaultRngProvider)
    }

    /// Create the run's bit source through a specific provider
    pub fn create_source_with<P: RngProvider>(&self, provider: &P) -> BitSource {
        provider.create_source(self.seed)
    }

    /// Build a range using the configured default rule
    pub fn range<T: Sample>(&self, min: T, max: T) -> Result<Range<T>> {
        Range::new(min, max, self.default_rule)
    }

    /// Filter a generator with the configured draw budget
    pub fn filter<G, P>(&self, generator: G, predicate: P) -> Filter<G, P>
    where
        G: Generator,
        P: Fn(&G::Value) -> bool,
    {
        generator.filter_with_threshold(predicate, self.filter_threshold)
    }

    /// Parse a JSON configuration document
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    #[cfg(feature = "serde")]
    pub fn from_file<P: AsRef<std::path::Path>>(
        path: P,
    ) -> std::result::Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.filter_threshold, 100_000);
        assert_eq!(config.unique_cycle_limit, 2);
        assert_eq!(config.default_rule, Inclusivity::InclusiveExclusive);
    }

    #[test]
    fn test_validation() {
        assert!(GeneratorConfig::new(None, 10, 2, Inclusivity::Inclusive).is_ok());
        assert!(matches!(
            GeneratorConfig::new(None, 0, 2, Inclusivity::Inclusive),
            Err(ConfigError::InvalidFilterThreshold(0))
        ));
        assert!(matches!(
            GeneratorConfig::new(None, 10, 0, Inclusivity::Inclusive),
            Err(ConfigError::InvalidCycleLimit(0))
        ));
    }

    #[test]
    fn test_merge_precedence() {
        let base = GeneratorConfig {
            seed: Some(123),
            filter_threshold: 50,
            unique_cycle_limit: 3,
            default_rule: Inclusivity::Inclusive,
        };

        let merged = GeneratorConfig::default().merge_with(&base);
        assert_eq!(merged, base);

        let override_config = GeneratorConfig {
            seed: Some(456),
            filter_threshold: 7,
            unique_cycle_limit: 4,
            default_rule: Inclusivity::Exclusive,
        };
        let merged = override_config.clone().merge_with(&base);
        assert_eq!(merged, override_config);
    }

    #[test]
    fn test_seeded_config_replays_source() {
        let config = GeneratorConfig::seeded(99);
        let mut a = config.create_source();
        let mut b = config.create_source();
        assert_eq!(a.seed(), 99);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_range_uses_default_rule() {
        let config = GeneratorConfig {
            default_rule: Inclusivity::Exclusive,
            ..GeneratorConfig::default()
        };
        assert!(config.range(0, 1).is_err());
        assert_eq!(config.range(0, 5).unwrap().rule(), Inclusivity::Exclusive);
    }

    #[test]
    fn test_filter_uses_configured_threshold() {
        let config = GeneratorConfig {
            filter_threshold: 3,
            ..GeneratorConfig::default()
        };
        let filtered = config.filter(crate::generator::just(1), |_| false);
        let mut src = BitSource::seeded(1);
        assert_eq!(
            filtered.produce(&mut src),
            Err(crate::GenerationError::PredicateExhausted { threshold: 3 })
        );
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidFilterThreshold(0).to_string(),
            "Invalid filter threshold: 0 (must be > 0)"
        );
        assert_eq!(
            ConfigError::InvalidCycleLimit(0).to_string(),
            "Invalid unique cycle limit: 0 (must be > 0)"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip_through_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"seed": 42, "filter_threshold": 10, "default_rule": "exclusive"}}"#
        )
        .unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.filter_threshold, 10);
        assert_eq!(config.unique_cycle_limit, 2);
        assert_eq!(config.default_rule, Inclusivity::Exclusive);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_validation_errors() {
        assert!(matches!(
            GeneratorConfig::from_json_str(r#"{"filter_threshold": 0}"#),
            Err(ConfigError::InvalidFilterThreshold(0))
        ));
        assert!(matches!(
            GeneratorConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
