//! Unique national security numbers
//!
//! A number is the birth date as `DDMMYY` followed by a four digit control
//! number. Control numbers for a date start at a random value, increment on
//! collision and wrap from `9999` to `0000`.

use chrono::NaiveDate;
use synthdata::{
    BitSource, DEFAULT_CYCLE_LIMIT, GeneratorConfig, Range, Result, Sample, UniqueValueTracker,
    WrappingCounterPolicy,
};

/// Number of distinct control numbers per birth date
pub const CONTROL_SPACE: u64 = 10_000;

/// Builds security numbers that never repeat within one builder
#[derive(Debug, Clone)]
pub struct SecurityNumberBuilder {
    cycle_limit: usize,
    tracker: UniqueValueTracker<String>,
}

impl Default for SecurityNumberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityNumberBuilder {
    /// Create a builder with the default wrap-around limit
    pub fn new() -> Self {
        Self {
            cycle_limit: DEFAULT_CYCLE_LIMIT,
            tracker: UniqueValueTracker::new(),
        }
    }

    /// Take the wrap-around limit from a configuration
    pub fn with_config(mut self, config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        self.cycle_limit = config.unique_cycle_limit;
        Ok(self)
    }

    /// Number of security numbers handed out so far
    pub fn issued(&self) -> usize {
        self.tracker.len()
    }

    /// Build a unique security number for a birth date
    ///
    /// Fails with `CombinationsExhausted` once every control number for
    /// `date` is taken.
    pub fn for_date(&mut self, src: &mut BitSource, date: NaiveDate) -> Result<String> {
        let prefix = date.format("%d%m%y").to_string();
        let mut policy = WrappingCounterPolicy::new(
            "security numbers",
            CONTROL_SPACE,
            self.cycle_limit,
            |control: u64| format!("{}{:04}", prefix, control),
        )?;
        self.tracker.try_produce(src, &mut policy)
    }

    /// Build a unique security number for a birth date drawn from `dates`
    pub fn random(&mut self, src: &mut BitSource, dates: &Range<NaiveDate>) -> Result<String> {
        let date = NaiveDate::sample_in(src, dates)?;
        self.for_date(src, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use synthdata::GenerationError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format() {
        let mut builder = SecurityNumberBuilder::new();
        let mut src = BitSource::seeded(1);
        let number = builder.for_date(&mut src, date(1984, 3, 7)).unwrap();
        assert_eq!(number.len(), 10);
        assert!(number.starts_with("070384"));
        assert!(number.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_one_date_exhausts_after_full_space() {
        let mut builder = SecurityNumberBuilder::new();
        let mut src = BitSource::seeded(2);
        let birth = date(1990, 12, 31);

        let mut seen = HashSet::new();
        for _ in 0..CONTROL_SPACE {
            let number = builder.for_date(&mut src, birth).unwrap();
            assert!(seen.insert(number));
        }
        assert_eq!(builder.issued(), 10_000);

        let err = builder.for_date(&mut src, birth).unwrap_err();
        assert!(matches!(err, GenerationError::CombinationsExhausted { .. }));
        assert!(err.to_string().contains("security numbers"));

        // other dates are unaffected
        assert!(builder.for_date(&mut src, date(1991, 1, 1)).is_ok());
    }

    #[test]
    fn test_random_dates_within_range() {
        let mut builder = SecurityNumberBuilder::new();
        let mut src = BitSource::seeded(3);
        let dates = Range::inclusive(date(2000, 1, 1), date(2000, 1, 31)).unwrap();
        for _ in 0..50 {
            let number = builder.random(&mut src, &dates).unwrap();
            assert_eq!(&number[2..6], "0100");
        }
    }

    #[test]
    fn test_seeded_builders_agree() {
        let birth = date(1975, 6, 15);
        let run = |seed| {
            let mut builder = SecurityNumberBuilder::new();
            let mut src = BitSource::seeded(seed);
            (0..5)
                .map(|_| builder.for_date(&mut src, birth).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }
}
