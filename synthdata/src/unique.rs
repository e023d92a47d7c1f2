//! Retry-bounded uniqueness over candidate-producing policies.
//!
//! A [`UniqueValueTracker`] remembers every value it has handed out. Each
//! request asks a [`UniquePolicy`] for candidates until one is unseen or the
//! policy declares its alternative space exhausted. Policies decide how to
//! walk that space (cycle a list, increment a counter, redraw) and when to
//! augment a candidate with extra entropy.

use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{GenerationError, Result};
use crate::generator::Generator;
use crate::rng::BitSource;
use crate::sampler::sample_unsigned;

/// Default number of full passes over a finite alternative space
pub const DEFAULT_CYCLE_LIMIT: usize = 2;

/// A strategy that proposes candidates for one unique request
pub trait UniquePolicy<T> {
    /// Per-request walking state
    type Cursor;

    /// Name of the domain, used in exhaustion errors
    fn domain(&self) -> &str {
        "values"
    }

    /// Total number of distinct values, when the domain is finite and known
    fn capacity(&self) -> Option<usize> {
        None
    }

    /// Start a request
    fn start(&mut self, src: &mut BitSource) -> Result<Self::Cursor>;

    /// Propose the next candidate, or `None` once the space is exhausted
    fn next_candidate(
        &mut self,
        cursor: &mut Self::Cursor,
        src: &mut BitSource,
    ) -> Result<Option<T>>;
}

/// Hands out values that were never handed out before
///
/// The seen set only grows; drop the tracker (or call [`reset`](Self::reset))
/// to start over. A failed request leaves the set unchanged.
#[derive(Debug, Clone)]
pub struct UniqueValueTracker<T> {
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> UniqueValueTracker<T> {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Produce a value not yet seen by this tracker
    ///
    /// The value is recorded as seen before it is returned.
    pub fn try_produce<P>(&mut self, src: &mut BitSource, policy: &mut P) -> Result<T>
    where
        P: UniquePolicy<T>,
    {
        if let Some(capacity) = policy.capacity() {
            if self.seen.len() >= capacity {
                tracing::debug!(domain = policy.domain(), capacity, "unique domain fully consumed");
                return Err(GenerationError::combinations_exhausted(policy.domain(), 0));
            }
        }

        let mut cursor = policy.start(src)?;
        let mut attempts = 0;
        while let Some(candidate) = policy.next_candidate(&mut cursor, src)? {
            attempts += 1;
            if self.seen.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }

        tracing::debug!(domain = policy.domain(), attempts, "unique candidates exhausted");
        Err(GenerationError::combinations_exhausted(
            policy.domain(),
            attempts,
        ))
    }

    /// Whether `value` has been handed out
    pub fn contains(&self, value: &T) -> bool {
        self.seen.contains(value)
    }

    /// Record `value` as seen without producing it
    ///
    /// Returns `false` when it was already recorded.
    pub fn mark_seen(&mut self, value: T) -> bool {
        self.seen.insert(value)
    }

    /// Number of values handed out
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been handed out yet
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forget every value handed out so far
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

impl<T: Eq + Hash + Clone> Default for UniqueValueTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Redraws from a generator up to a fixed number of attempts
pub struct RedrawPolicy<'g, G> {
    generator: &'g G,
    max_attempts: usize,
    capacity: Option<usize>,
    domain: String,
}

impl<'g, G: Generator> RedrawPolicy<'g, G> {
    /// Create a policy that draws at most `max_attempts` candidates per request
    pub fn new(generator: &'g G, max_attempts: usize) -> Self {
        Self {
            generator,
            max_attempts,
            capacity: None,
            domain: "values".to_string(),
        }
    }

    /// Name the domain reported in exhaustion errors
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Declare the size of the generator's value space
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

impl<G: Generator> UniquePolicy<G::Value> for RedrawPolicy<'_, G> {
    type Cursor = usize;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn start(&mut self, _src: &mut BitSource) -> Result<usize> {
        Ok(0)
    }

    fn next_candidate(
        &mut self,
        drawn: &mut usize,
        src: &mut BitSource,
    ) -> Result<Option<G::Value>> {
        if *drawn >= self.max_attempts {
            return Ok(None);
        }
        *drawn += 1;
        self.generator.produce(src).map(Some)
    }
}

/// Walks a counter space from a random start, wrapping at `modulus`
///
/// Each request seeds the counter from the bit source, increments it on
/// every collision, wraps `modulus - 1` back to `0`, and gives up after
/// `cycles` full wrap-arounds.
pub struct WrappingCounterPolicy<F> {
    domain: String,
    modulus: u64,
    cycles: usize,
    render: F,
}

impl<F> WrappingCounterPolicy<F> {
    /// Create a policy over `0..modulus`, rendering counters with `render`
    pub fn new(domain: impl Into<String>, modulus: u64, cycles: usize, render: F) -> Result<Self> {
        if modulus == 0 {
            return Err(GenerationError::argument("modulus", "must be > 0"));
        }
        if cycles == 0 {
            return Err(GenerationError::argument("cycles", "must be > 0"));
        }
        Ok(Self {
            domain: domain.into(),
            modulus,
            cycles,
            render,
        })
    }
}

/// Position of a [`WrappingCounterPolicy`] within one request
#[derive(Debug, Clone, Copy)]
pub struct CounterCursor {
    value: u64,
    visited: u64,
}

impl<T, F> UniquePolicy<T> for WrappingCounterPolicy<F>
where
    F: Fn(u64) -> T,
{
    type Cursor = CounterCursor;

    fn domain(&self) -> &str {
        &self.domain
    }

    fn start(&mut self, src: &mut BitSource) -> Result<CounterCursor> {
        Ok(CounterCursor {
            value: sample_unsigned(src, 0, self.modulus)?,
            visited: 0,
        })
    }

    fn next_candidate(
        &mut self,
        cursor: &mut CounterCursor,
        _src: &mut BitSource,
    ) -> Result<Option<T>> {
        if cursor.visited >= self.modulus.saturating_mul(self.cycles as u64) {
            return Ok(None);
        }
        let candidate = (self.render)(cursor.value);
        cursor.value = (cursor.value + 1) % self.modulus;
        cursor.visited += 1;
        Ok(Some(candidate))
    }
}

/// A generator that never repeats a value, see [`Generator::unique`]
pub struct Unique<G: Generator>
where
    G::Value: Eq + Hash + Clone,
{
    generator: G,
    max_attempts: usize,
    tracker: RefCell<UniqueValueTracker<G::Value>>,
}

impl<G: Generator> Unique<G>
where
    G::Value: Eq + Hash + Clone,
{
    pub(crate) fn new(generator: G, max_attempts: usize) -> Self {
        Self {
            generator,
            max_attempts,
            tracker: RefCell::new(UniqueValueTracker::new()),
        }
    }

    /// Number of distinct values produced so far
    pub fn produced(&self) -> usize {
        self.tracker.borrow().len()
    }
}

impl<G: Generator> Generator for Unique<G>
where
    G::Value: Eq + Hash + Clone,
{
    type Value = G::Value;

    fn produce(&self, src: &mut BitSource) -> Result<G::Value> {
        let mut policy = RedrawPolicy::new(&self.generator, self.max_attempts);
        self.tracker.borrow_mut().try_produce(src, &mut policy)
    }
}
