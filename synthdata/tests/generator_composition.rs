//! Integration tests for composing generators and enforcing uniqueness

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use synthdata::sampler::sample_int;
use synthdata::{
    BitSource, GenerationError, Generator, GeneratorConfig, Range, UniqueValueTracker,
    WrappingCounterPolicy, cycle, deferred, just, one_of, pick_from_arguments, pick_one,
    try_from_fn, vec_of,
};

#[derive(Debug, Clone, PartialEq)]
struct Customer {
    id: u32,
    tier: &'static str,
    score: f64,
}

// A realistic record assembled from several generators
#[test]
fn test_record_composition() {
    let ids = Range::inclusive(1u32, 10_000).unwrap();
    let tiers = one_of(vec!["free", "pro", "enterprise"]).unwrap();
    let scores = Range::half_open(0.0, 100.0).unwrap();

    let customers = ids
        .zip(tiers)
        .zip_with(scores, |(id, tier), score| Customer { id, tier, score });

    let mut src = BitSource::seeded(1);
    let batch: Vec<Customer> = customers
        .take(&mut src, 100)
        .unwrap()
        .collect::<synthdata::Result<_>>()
        .unwrap();

    assert_eq!(batch.len(), 100);
    for customer in &batch {
        assert!((1..=10_000).contains(&customer.id));
        assert!(["free", "pro", "enterprise"].contains(&customer.tier));
        assert!((0.0..100.0).contains(&customer.score));
    }

    let mut replay = BitSource::seeded(1);
    let again: Vec<Customer> = customers
        .take(&mut replay, 100)
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(batch, again);
}

#[test]
fn test_dependent_generation_with_flat_map() {
    // a length first, then a vector of exactly that length
    let sized = Range::inclusive(1usize, 5)
        .unwrap()
        .flat_map_with(
            |&len| vec_of(just('x'), Range::single(len)),
            |len, items| (len, items),
        );

    let mut src = BitSource::seeded(2);
    for _ in 0..50 {
        let (len, items) = sized.produce(&mut src).unwrap();
        assert_eq!(items.len(), len);
    }
}

#[test]
fn test_filter_threshold_counts_draws() {
    let draws = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&draws);
    let impossible = Range::half_open(0, 100)
        .unwrap()
        .inspect(move |_| counter.set(counter.get() + 1))
        .filter_with_threshold(|n| n % 2 == 0 && n % 2 == 1, 10);

    let mut src = BitSource::seeded(3);
    assert_eq!(
        impossible.produce(&mut src),
        Err(GenerationError::PredicateExhausted { threshold: 10 })
    );
    assert_eq!(draws.get(), 10);
}

#[test]
fn test_config_filter_and_range() {
    let config = GeneratorConfig {
        filter_threshold: 500,
        ..GeneratorConfig::seeded(4)
    };
    let evens = config.filter(config.range(0, 1_000).unwrap(), |n| n % 2 == 0);
    let mut src = config.create_source();
    for value in evens.take(&mut src, 100).unwrap() {
        assert_eq!(value.unwrap() % 2, 0);
    }
}

#[test]
fn test_deferred_and_cycle() {
    let evaluations = Rc::new(Cell::new(0));
    let seen = Rc::clone(&evaluations);
    let expensive = deferred(move |src: &mut BitSource| {
        seen.set(seen.get() + 1);
        sample_int(src, 0, 1_000).unwrap_or_default()
    });

    let mut src = BitSource::seeded(5);
    let first = expensive.produce(&mut src).unwrap();
    assert_eq!(expensive.produce(&mut src).unwrap(), first);
    assert_eq!(evaluations.get(), 1);

    let weekdays = cycle(vec!["mon", "tue", "wed"]).unwrap();
    let order: Vec<_> = weekdays
        .take(&mut src, 4)
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(order, vec!["mon", "tue", "wed", "mon"]);
}

#[test]
fn test_argument_pickers() {
    let mut src = BitSource::seeded(6);
    let mut seen = HashSet::new();
    for _ in 0..500 {
        seen.insert(pick_from_arguments(&mut src, ["a", "b"], vec!["c", "d"]).unwrap());
        let choice = pick_one!(&mut src; 1, 2, 3).unwrap();
        assert!((1..=3).contains(&choice));
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn test_unique_counter_domain() {
    let mut tracker = UniqueValueTracker::new();
    let mut policy =
        WrappingCounterPolicy::new("ticket codes", 50, 2, |n: u64| format!("T{:02}", n)).unwrap();
    let mut src = BitSource::seeded(7);

    let codes: HashSet<String> = (0..50)
        .map(|_| tracker.try_produce(&mut src, &mut policy).unwrap())
        .collect();
    assert_eq!(codes.len(), 50);

    let err = tracker.try_produce(&mut src, &mut policy).unwrap_err();
    assert_eq!(
        err.to_string(),
        "All combinations exhausted for ticket codes after 100 attempts"
    );
}

#[test]
fn test_unique_adaptor_over_fallible_generator() {
    let dice = try_from_fn(|src: &mut BitSource| sample_int(src, 1, 7)).unique(1_000);
    let mut src = BitSource::seeded(8);
    let mut faces: Vec<i32> = (0..6).map(|_| dice.produce(&mut src).unwrap()).collect();
    faces.sort_unstable();
    assert_eq!(faces, vec![1, 2, 3, 4, 5, 6]);
    assert!(dice.produce(&mut src).unwrap_err().is_exhausted());
}
