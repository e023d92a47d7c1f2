//! Composable, pull-based generators.
//!
//! A [`Generator`] is a repeatable production of a value. Generators are
//! built once and then pulled as often as needed; every pull threads the
//! caller's [`BitSource`] through the whole composition, so draw order equals
//! call order and a seed replays the same values.
//!
//! Combinators take `self` and return a new adaptor; the receiver is never
//! mutated. Generators that memoize ([`Deferred`]) or keep a cursor
//! ([`Cycle`]) use `Cell`-based interior state and are not `Sync`.

use std::cell::{Cell, OnceCell};
use std::hash::Hash;
use std::rc::Rc;

use crate::error::{GenerationError, Result};
use crate::picker::pick_index;
use crate::range::Range;
use crate::rng::BitSource;
use crate::sampler::Sample;
use crate::unique::Unique;

/// Draw budget used by [`Generator::filter`]
pub const DEFAULT_FILTER_THRESHOLD: usize = 100_000;

/// A repeatable production of values
pub trait Generator {
    /// The type of values this generator produces
    type Value;

    /// Produce one value, drawing from `src`
    fn produce(&self, src: &mut BitSource) -> Result<Self::Value>;

    /// Transform every produced value
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Value) -> U,
    {
        Map {
            generator: self,
            mapper: f,
        }
    }

    /// Produce a generator from each value and pull from it
    fn flat_map<F, G>(self, f: F) -> FlatMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Value) -> G,
        G: Generator,
    {
        FlatMap {
            generator: self,
            binder: f,
        }
    }

    /// Like [`flat_map`](Self::flat_map), combining outer and inner values
    /// in the same production
    fn flat_map_with<F, G, C, U>(self, f: F, combine: C) -> FlatMapWith<Self, F, C>
    where
        Self: Sized,
        F: Fn(&Self::Value) -> G,
        G: Generator,
        C: Fn(Self::Value, G::Value) -> U,
    {
        FlatMapWith {
            generator: self,
            binder: f,
            combine,
        }
    }

    /// Keep only values satisfying `predicate`, drawing at most
    /// [`DEFAULT_FILTER_THRESHOLD`] times per production
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Value) -> bool,
    {
        self.filter_with_threshold(predicate, DEFAULT_FILTER_THRESHOLD)
    }

    /// Keep only values satisfying `predicate`, drawing at most `threshold`
    /// times per production before failing with
    /// [`GenerationError::PredicateExhausted`]
    fn filter_with_threshold<P>(self, predicate: P, threshold: usize) -> Filter<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Value) -> bool,
    {
        Filter {
            generator: self,
            predicate,
            threshold,
        }
    }

    /// Pair this generator with another; the left side is drawn first
    fn zip<G>(self, other: G) -> Zip<Self, G>
    where
        Self: Sized,
        G: Generator,
    {
        Zip {
            left: self,
            right: other,
        }
    }

    /// Combine this generator with another; the left side is drawn first
    fn zip_with<G, C, U>(self, other: G, combine: C) -> ZipWith<Self, G, C>
    where
        Self: Sized,
        G: Generator,
        C: Fn(Self::Value, G::Value) -> U,
    {
        ZipWith {
            left: self,
            right: other,
            combine,
        }
    }

    /// Observe every produced value without changing it
    fn inspect<F>(self, effect: F) -> Inspect<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Value),
    {
        Inspect {
            generator: self,
            effect,
        }
    }

    /// Reject values already produced by this adaptor, redrawing at most
    /// `max_attempts` times per production
    fn unique(self, max_attempts: usize) -> Unique<Self>
    where
        Self: Sized,
        Self::Value: Eq + Hash + Clone,
    {
        Unique::new(self, max_attempts)
    }

    /// Lazily produce exactly `n` values in call order
    ///
    /// Fails with [`GenerationError::Argument`] when `n` is zero.
    fn take<'a>(&'a self, src: &'a mut BitSource, n: usize) -> Result<Take<'a, Self>>
    where
        Self: Sized,
    {
        if n == 0 {
            return Err(GenerationError::argument("n", "must be > 0"));
        }
        Ok(Take {
            generator: self,
            src,
            remaining: n,
        })
    }

    /// An unbounded lazy stream of productions
    fn samples<'a>(&'a self, src: &'a mut BitSource) -> Samples<'a, Self>
    where
        Self: Sized,
    {
        Samples {
            generator: self,
            src,
        }
    }

    /// Erase the concrete adaptor type
    fn boxed(self) -> BoxedGenerator<Self::Value>
    where
        Self: Sized + 'static,
    {
        BoxedGenerator {
            inner: Box::new(self),
        }
    }
}

impl<G: Generator + ?Sized> Generator for &G {
    type Value = G::Value;

    fn produce(&self, src: &mut BitSource) -> Result<Self::Value> {
        (**self).produce(src)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    type Value = G::Value;

    fn produce(&self, src: &mut BitSource) -> Result<Self::Value> {
        (**self).produce(src)
    }
}

impl<G: Generator + ?Sized> Generator for Rc<G> {
    type Value = G::Value;

    fn produce(&self, src: &mut BitSource) -> Result<Self::Value> {
        (**self).produce(src)
    }
}

/// A type-erased generator
pub struct BoxedGenerator<T> {
    inner: Box<dyn Generator<Value = T>>,
}

impl<T> Generator for BoxedGenerator<T> {
    type Value = T;

    fn produce(&self, src: &mut BitSource) -> Result<T> {
        self.inner.produce(src)
    }
}

/// A generator that always produces the same value
#[derive(Debug, Clone)]
pub struct Just<T> {
    value: T,
}

impl<T: Clone> Generator for Just<T> {
    type Value = T;

    fn produce(&self, _src: &mut BitSource) -> Result<T> {
        Ok(self.value.clone())
    }
}

/// A generator backed by a production function, invoked on every pull
#[derive(Clone)]
pub struct FromFn<F> {
    producer: F,
}

impl<F, T> Generator for FromFn<F>
where
    F: Fn(&mut BitSource) -> Result<T>,
{
    type Value = T;

    fn produce(&self, src: &mut BitSource) -> Result<T> {
        (self.producer)(src)
    }
}

/// A generator whose production function runs once and is replayed
pub struct Deferred<T, F> {
    producer: F,
    value: OnceCell<T>,
}

impl<T, F> Deferred<T, F> {
    /// Whether the production function has already run
    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T, F> Generator for Deferred<T, F>
where
    T: Clone,
    F: Fn(&mut BitSource) -> Result<T>,
{
    type Value = T;

    fn produce(&self, src: &mut BitSource) -> Result<T> {
        if let Some(value) = self.value.get() {
            return Ok(value.clone());
        }
        let value = (self.producer)(src)?;
        Ok(self.value.get_or_init(|| value).clone())
    }
}

/// A generator that cycles through a finite sequence
#[derive(Debug, Clone)]
pub struct Cycle<T> {
    items: Vec<T>,
    position: Cell<usize>,
}

impl<T: Clone> Generator for Cycle<T> {
    type Value = T;

    fn produce(&self, _src: &mut BitSource) -> Result<T> {
        let position = self.position.get();
        self.position.set((position + 1) % self.items.len());
        Ok(self.items[position].clone())
    }
}

/// A generator that picks uniformly from a fixed set of values
#[derive(Debug, Clone)]
pub struct OneOf<T> {
    values: Vec<T>,
}

impl<T: Clone> Generator for OneOf<T> {
    type Value = T;

    fn produce(&self, src: &mut BitSource) -> Result<T> {
        let index = pick_index(src, self.values.len())?;
        Ok(self.values[index].clone())
    }
}

/// A generator of vectors whose length is drawn from a range
pub struct VecOf<G> {
    element: G,
    length: Range<usize>,
}

impl<G: Generator> Generator for VecOf<G> {
    type Value = Vec<G::Value>;

    fn produce(&self, src: &mut BitSource) -> Result<Self::Value> {
        let length = usize::sample_in(src, &self.length)?;
        (0..length).map(|_| self.element.produce(src)).collect()
    }
}

impl<T: Sample> Generator for Range<T> {
    type Value = T;

    fn produce(&self, src: &mut BitSource) -> Result<T> {
        T::sample_in(src, self)
    }
}

/// A generator that maps values from one type to another
pub struct Map<G, F> {
    generator: G,
    mapper: F,
}

impl<G, F, U> Generator for Map<G, F>
where
    G: Generator,
    F: Fn(G::Value) -> U,
{
    type Value = U;

    fn produce(&self, src: &mut BitSource) -> Result<U> {
        let value = self.generator.produce(src)?;
        Ok((self.mapper)(value))
    }
}

/// A generator that flattens a generator of generators
pub struct FlatMap<G, F> {
    generator: G,
    binder: F,
}

impl<G, F, H> Generator for FlatMap<G, F>
where
    G: Generator,
    F: Fn(G::Value) -> H,
    H: Generator,
{
    type Value = H::Value;

    fn produce(&self, src: &mut BitSource) -> Result<H::Value> {
        let outer = self.generator.produce(src)?;
        (self.binder)(outer).produce(src)
    }
}

/// A flattening generator that also combines outer and inner values
pub struct FlatMapWith<G, F, C> {
    generator: G,
    binder: F,
    combine: C,
}

impl<G, F, H, C, U> Generator for FlatMapWith<G, F, C>
where
    G: Generator,
    F: Fn(&G::Value) -> H,
    H: Generator,
    C: Fn(G::Value, H::Value) -> U,
{
    type Value = U;

    fn produce(&self, src: &mut BitSource) -> Result<U> {
        let outer = self.generator.produce(src)?;
        let inner = (self.binder)(&outer).produce(src)?;
        Ok((self.combine)(outer, inner))
    }
}

/// A generator that filters values based on a predicate
pub struct Filter<G, P> {
    generator: G,
    predicate: P,
    threshold: usize,
}

impl<G, P> Filter<G, P> {
    /// Maximum draws per production
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl<G, P> Generator for Filter<G, P>
where
    G: Generator,
    P: Fn(&G::Value) -> bool,
{
    type Value = G::Value;

    fn produce(&self, src: &mut BitSource) -> Result<G::Value> {
        for _ in 0..self.threshold {
            let value = self.generator.produce(src)?;
            if (self.predicate)(&value) {
                return Ok(value);
            }
        }
        tracing::debug!(threshold = self.threshold, "filter exhausted its draw budget");
        Err(GenerationError::predicate_exhausted(self.threshold))
    }
}

/// A generator that pairs two generators
pub struct Zip<L, R> {
    left: L,
    right: R,
}

impl<L, R> Generator for Zip<L, R>
where
    L: Generator,
    R: Generator,
{
    type Value = (L::Value, R::Value);

    fn produce(&self, src: &mut BitSource) -> Result<Self::Value> {
        let left = self.left.produce(src)?;
        let right = self.right.produce(src)?;
        Ok((left, right))
    }
}

/// A generator that combines two generators with a function
pub struct ZipWith<L, R, C> {
    left: L,
    right: R,
    combine: C,
}

impl<L, R, C, U> Generator for ZipWith<L, R, C>
where
    L: Generator,
    R: Generator,
    C: Fn(L::Value, R::Value) -> U,
{
    type Value = U;

    fn produce(&self, src: &mut BitSource) -> Result<U> {
        let left = self.left.produce(src)?;
        let right = self.right.produce(src)?;
        Ok((self.combine)(left, right))
    }
}

/// A generator that runs a side effect on each produced value
pub struct Inspect<G, F> {
    generator: G,
    effect: F,
}

impl<G, F> Generator for Inspect<G, F>
where
    G: Generator,
    F: Fn(&G::Value),
{
    type Value = G::Value;

    fn produce(&self, src: &mut BitSource) -> Result<G::Value> {
        let value = self.generator.produce(src)?;
        (self.effect)(&value);
        Ok(value)
    }
}

/// A finite lazy sequence of productions, see [`Generator::take`]
///
/// Yields at most `n` items and stops after the first error.
pub struct Take<'a, G> {
    generator: &'a G,
    src: &'a mut BitSource,
    remaining: usize,
}

impl<G: Generator> Iterator for Take<'_, G> {
    type Item = Result<G::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.generator.produce(self.src);
        self.remaining = if item.is_err() { 0 } else { self.remaining - 1 };
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// An unbounded lazy stream of productions, see [`Generator::samples`]
pub struct Samples<'a, G> {
    generator: &'a G,
    src: &'a mut BitSource,
}

impl<G: Generator> Iterator for Samples<'_, G> {
    type Item = Result<G::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generator.produce(self.src))
    }
}

/// Create a generator that always produces `value` without drawing
pub fn just<T: Clone>(value: T) -> Just<T> {
    Just { value }
}

/// Create a generator from an infallible production function
pub fn from_fn<T, F>(f: F) -> FromFn<impl Fn(&mut BitSource) -> Result<T>>
where
    F: Fn(&mut BitSource) -> T,
{
    FromFn {
        producer: move |src: &mut BitSource| Ok(f(src)),
    }
}

/// Create a generator from a fallible production function
pub fn try_from_fn<T, F>(f: F) -> FromFn<F>
where
    F: Fn(&mut BitSource) -> Result<T>,
{
    FromFn { producer: f }
}

/// Create a generator that runs `f` on first pull and replays its value
pub fn deferred<T, F>(f: F) -> Deferred<T, impl Fn(&mut BitSource) -> Result<T>>
where
    F: Fn(&mut BitSource) -> T,
{
    Deferred {
        producer: move |src: &mut BitSource| Ok(f(src)),
        value: OnceCell::new(),
    }
}

/// Fallible form of [`deferred`]; a failed first run leaves it unevaluated
pub fn try_deferred<T, F>(f: F) -> Deferred<T, F>
where
    F: Fn(&mut BitSource) -> Result<T>,
{
    Deferred {
        producer: f,
        value: OnceCell::new(),
    }
}

/// Create a generator cycling `items` in order, forever
pub fn cycle<T: Clone>(items: Vec<T>) -> Result<Cycle<T>> {
    if items.is_empty() {
        return Err(GenerationError::EmptySequence);
    }
    Ok(Cycle {
        items,
        position: Cell::new(0),
    })
}

/// Create a generator picking uniformly from `values`
pub fn one_of<T: Clone>(values: Vec<T>) -> Result<OneOf<T>> {
    if values.is_empty() {
        return Err(GenerationError::empty_collection_with_context("one_of"));
    }
    Ok(OneOf { values })
}

/// Create a generator of vectors with a length drawn from `length`
pub fn vec_of<G: Generator>(element: G, length: Range<usize>) -> VecOf<G> {
    VecOf { element, length }
}
