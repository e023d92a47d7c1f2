//! Phone numbers from digit patterns
//!
//! A pattern is literal text with `#` marking a digit slot, for example
//! `"+47 ### ## ###"`. [`PhoneNumberGenerator`] fills the slots freely;
//! [`PhoneNumberBuilder`] never hands out the same number twice.

use synthdata::sampler::sample_unsigned;
use synthdata::{
    BitSource, DEFAULT_CYCLE_LIMIT, GenerationError, Generator, GeneratorConfig, Result,
    UniquePolicy, UniqueValueTracker,
};

/// Placeholder for one random digit
pub const DIGIT_SLOT: char = '#';

/// Most digit slots a pattern may hold
pub const MAX_DIGIT_SLOTS: usize = 18;

/// Redraw budget ceiling per unique request
const MAX_REDRAWS: usize = 1_000_000;

/// Fills `#` slots in a pattern with random digits
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneNumberGenerator {
    pattern: String,
    slots: usize,
}

impl PhoneNumberGenerator {
    /// Create a generator, failing when the pattern has no slots or more
    /// than [`MAX_DIGIT_SLOTS`]
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let slots = pattern.chars().filter(|&c| c == DIGIT_SLOT).count();
        if slots == 0 || slots > MAX_DIGIT_SLOTS {
            return Err(GenerationError::argument(
                "pattern",
                format!(
                    "{:?} must contain between 1 and {} `#` slots",
                    pattern, MAX_DIGIT_SLOTS
                ),
            ));
        }
        Ok(Self { pattern, slots })
    }

    /// Eight-digit mobile number
    pub fn mobile() -> Self {
        Self {
            pattern: "### ## ###".to_string(),
            slots: 8,
        }
    }

    /// The pattern with its `#` digit slots
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of distinct numbers the pattern can produce
    pub fn capacity(&self) -> u64 {
        10u64.pow(self.slots as u32)
    }

    /// Render the number at `index` within `0..capacity()`
    ///
    /// The index's zero-padded digits fill the slots left to right.
    pub fn render(&self, index: u64) -> String {
        let digits = format!("{:0width$}", index, width = self.slots);
        let mut digits = digits.chars();
        self.pattern
            .chars()
            .map(|c| match c {
                DIGIT_SLOT => digits.next().unwrap_or('0'),
                other => other,
            })
            .collect()
    }
}

impl Generator for PhoneNumberGenerator {
    type Value = String;

    fn produce(&self, src: &mut BitSource) -> Result<String> {
        let index = sample_unsigned(src, 0, self.capacity())?;
        Ok(self.render(index))
    }
}

/// Redraws random numbers, then scans forward from the last draw
///
/// The scan wraps once around the whole number space, so a request only
/// runs dry when every number is taken.
struct PhoneNumberPolicy<'g> {
    generator: &'g PhoneNumberGenerator,
    max_redraws: usize,
}

/// Position of a [`PhoneNumberPolicy`] within one request
struct PhoneCursor {
    redraws: usize,
    last: u64,
    scanned: u64,
}

impl UniquePolicy<String> for PhoneNumberPolicy<'_> {
    type Cursor = PhoneCursor;

    fn domain(&self) -> &str {
        "phone numbers"
    }

    fn capacity(&self) -> Option<usize> {
        Some(usize::try_from(self.generator.capacity()).unwrap_or(usize::MAX))
    }

    fn start(&mut self, _src: &mut BitSource) -> Result<PhoneCursor> {
        Ok(PhoneCursor {
            redraws: 0,
            last: 0,
            scanned: 0,
        })
    }

    fn next_candidate(
        &mut self,
        cursor: &mut PhoneCursor,
        src: &mut BitSource,
    ) -> Result<Option<String>> {
        let capacity = self.generator.capacity();
        if cursor.redraws < self.max_redraws {
            cursor.redraws += 1;
            cursor.last = sample_unsigned(src, 0, capacity)?;
        } else if cursor.scanned < capacity {
            if cursor.scanned == 0 {
                tracing::trace!(redraws = cursor.redraws, "phone redraws spent, scanning");
            }
            cursor.scanned += 1;
            cursor.last = (cursor.last + 1) % capacity;
        } else {
            return Ok(None);
        }
        Ok(Some(self.generator.render(cursor.last)))
    }
}

/// Hands out phone numbers that never repeat within one builder
#[derive(Debug, Clone)]
pub struct PhoneNumberBuilder {
    generator: PhoneNumberGenerator,
    cycle_limit: usize,
    tracker: UniqueValueTracker<String>,
}

impl PhoneNumberBuilder {
    /// Create a builder over a pattern generator
    pub fn new(generator: PhoneNumberGenerator) -> Self {
        Self {
            generator,
            cycle_limit: DEFAULT_CYCLE_LIMIT,
            tracker: UniqueValueTracker::new(),
        }
    }

    /// Take the pass limit from a configuration
    pub fn with_config(mut self, config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        self.cycle_limit = config.unique_cycle_limit;
        Ok(self)
    }

    /// Number of phone numbers handed out so far
    pub fn issued(&self) -> usize {
        self.tracker.len()
    }

    /// Produce a phone number not handed out before
    ///
    /// Random redraws come first; once they are spent the remaining space is
    /// scanned in order. Fails only when every number of the pattern is taken.
    pub fn next_number(&mut self, src: &mut BitSource) -> Result<String> {
        let capacity = usize::try_from(self.generator.capacity()).unwrap_or(usize::MAX);
        let mut policy = PhoneNumberPolicy {
            generator: &self.generator,
            max_redraws: capacity.saturating_mul(self.cycle_limit).min(MAX_REDRAWS),
        };
        self.tracker.try_produce(src, &mut policy)
    }
}
