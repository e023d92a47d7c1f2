//! Bounded ranges with explicit boundary inclusivity.

use std::fmt;

use crate::error::{GenerationError, Result};
use crate::sampler::Sample;

/// Whether a range's lower and upper bounds may themselves be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Inclusivity {
    /// `[min, max]`
    Inclusive,
    /// `(min, max)`; requires at least two units between the bounds
    Exclusive,
    /// `[min, max)`
    #[default]
    InclusiveExclusive,
    /// `(min, max]`
    ExclusiveInclusive,
}

impl Inclusivity {
    /// Whether `min` may be produced
    pub fn includes_min(self) -> bool {
        matches!(self, Self::Inclusive | Self::InclusiveExclusive)
    }

    /// Whether `max` may be produced
    pub fn includes_max(self) -> bool {
        matches!(self, Self::Inclusive | Self::ExclusiveInclusive)
    }
}

impl fmt::Display for Inclusivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Inclusive => "[min, max]",
            Self::Exclusive => "(min, max)",
            Self::InclusiveExclusive => "[min, max)",
            Self::ExclusiveInclusive => "(min, max]",
        };
        f.write_str(text)
    }
}

/// A validated `(min, max, rule)` triple
///
/// Construction checks `min <= max`. When `min == max` the range collapses to
/// that single value, except under [`Inclusivity::Exclusive`], which needs at
/// least two of the type's smallest units between the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range<T> {
    min: T,
    max: T,
    #[cfg_attr(feature = "serde", serde(default))]
    rule: Inclusivity,
}

impl<T: Sample> Range<T> {
    /// Create a range with an explicit inclusivity rule
    pub fn new(min: T, max: T, rule: Inclusivity) -> Result<Self> {
        match min.partial_cmp(&max) {
            Some(std::cmp::Ordering::Greater) => {
                return Err(GenerationError::inverted_bounds(&min, &max));
            }
            None => {
                return Err(GenerationError::range(format!(
                    "bounds {:?} and {:?} are not comparable",
                    min, max
                )));
            }
            _ => {}
        }

        if rule == Inclusivity::Exclusive && !T::spans_two_units(min, max) {
            return Err(GenerationError::range(format!(
                "exclusive range ({:?}, {:?}) has no interior value",
                min, max
            )));
        }

        Ok(Self { min, max, rule })
    }

    /// Create a `[min, max)` range
    pub fn half_open(min: T, max: T) -> Result<Self> {
        Self::new(min, max, Inclusivity::InclusiveExclusive)
    }

    /// Create a `[min, max]` range
    pub fn inclusive(min: T, max: T) -> Result<Self> {
        Self::new(min, max, Inclusivity::Inclusive)
    }

    /// Create a `(min, max)` range
    pub fn exclusive(min: T, max: T) -> Result<Self> {
        Self::new(min, max, Inclusivity::Exclusive)
    }

    /// Create a single-value range
    pub fn single(value: T) -> Self {
        Self {
            min: value,
            max: value,
            rule: Inclusivity::Inclusive,
        }
    }

    /// Replace the inclusivity rule, re-validating the bounds
    pub fn with_rule(self, rule: Inclusivity) -> Result<Self> {
        Self::new(self.min, self.max, rule)
    }

    /// Check whether `value` lies inside this range under its rule
    pub fn contains(&self, value: &T) -> bool {
        if self.min == self.max && self.rule != Inclusivity::Exclusive {
            return *value == self.min;
        }
        let above_min = if self.rule.includes_min() {
            *value >= self.min
        } else {
            *value > self.min
        };
        let below_max = if self.rule.includes_max() {
            *value <= self.max
        } else {
            *value < self.max
        };
        above_min && below_max
    }
}

impl<T: Copy> Range<T> {
    /// Lower bound
    pub fn min(&self) -> T {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> T {
        self.max
    }

    /// Inclusivity rule
    pub fn rule(&self) -> Inclusivity {
        self.rule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_is_half_open() {
        assert_eq!(Inclusivity::default(), Inclusivity::InclusiveExclusive);
        let range = Range::half_open(1, 10).unwrap();
        assert_eq!(range.rule(), Inclusivity::InclusiveExclusive);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = Range::half_open(10, 1).unwrap_err();
        assert!(matches!(err, GenerationError::Range { .. }));
    }

    #[test]
    fn test_nan_bounds_rejected() {
        assert!(Range::half_open(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_exclusive_needs_two_units() {
        assert!(Range::exclusive(0, 0).is_err());
        assert!(Range::exclusive(0, 1).is_err());
        assert!(Range::exclusive(0, 2).is_ok());
    }

    #[test]
    fn test_degenerate_ranges_allowed_for_other_rules() {
        assert!(Range::half_open(5, 5).is_ok());
        assert!(Range::inclusive(5, 5).is_ok());
        assert!(Range::new(5, 5, Inclusivity::ExclusiveInclusive).is_ok());
    }

    #[test]
    fn test_contains() {
        let range = Range::exclusive(0, 5).unwrap();
        assert!(!range.contains(&0));
        assert!(range.contains(&1));
        assert!(!range.contains(&5));

        let range = Range::new(0, 5, Inclusivity::ExclusiveInclusive).unwrap();
        assert!(!range.contains(&0));
        assert!(range.contains(&5));

        assert!(Range::single(3).contains(&3));
        assert!(Range::half_open(3, 3).unwrap().contains(&3));
    }

    #[test]
    fn test_with_rule_revalidates() {
        let range = Range::half_open(0, 1).unwrap();
        assert!(range.with_rule(Inclusivity::Exclusive).is_err());
        assert!(range.with_rule(Inclusivity::Inclusive).is_ok());
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Inclusivity::Exclusive.to_string(), "(min, max)");
        assert_eq!(Inclusivity::ExclusiveInclusive.to_string(), "(min, max]");
    }
}
