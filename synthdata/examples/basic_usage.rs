//! Basic usage examples demonstrating the core synthdata API
//!
//! Shows seeded sampling, inclusivity rules, picking and generator
//! composition.

use synthdata::sampler::{sample_decimal, sample_double, sample_int};
use synthdata::{
    BitSource, Decimal, Generator, GeneratorConfig, Inclusivity, Range, one_of, pick,
    sample_with_rule,
};

// Example 1: Sampling from ranges
fn example_1_sampling(src: &mut BitSource) -> synthdata::Result<()> {
    println!("=== Example 1: Sampling ===");

    println!("int in [0, 10):        {}", sample_int(src, 0, 10)?);
    println!("double in [0, 1):      {:.4}", sample_double(src, 0.0, 1.0)?);
    println!(
        "price in [1.00, 9.99): {}",
        sample_decimal(src, Decimal::new(100, 2), Decimal::new(999, 2))?
    );

    for rule in [
        Inclusivity::Inclusive,
        Inclusivity::Exclusive,
        Inclusivity::InclusiveExclusive,
        Inclusivity::ExclusiveInclusive,
    ] {
        let values: Vec<i32> = (0..8)
            .map(|_| sample_with_rule(src, 0, 3, rule))
            .collect::<synthdata::Result<_>>()?;
        println!("{} over 0..3: {:?}", rule, values);
    }
    Ok(())
}

// Example 2: Picking from collections
fn example_2_picking(src: &mut BitSource) -> synthdata::Result<()> {
    println!("\n=== Example 2: Picking ===");

    let colours = ["red", "green", "blue"];
    println!("picked colour: {}", pick(src, &colours)?);
    println!(
        "picked argument: {}",
        synthdata::pick_one!(src; "north", "south"; vec!["east", "west"])?
    );
    Ok(())
}

// Example 3: Composing generators
fn example_3_composition(src: &mut BitSource) -> synthdata::Result<()> {
    println!("\n=== Example 3: Composition ===");

    let orders = Range::inclusive(1u32, 20)?
        .zip(one_of(vec!["pending", "shipped", "delivered"])?)
        .filter(|(quantity, _)| quantity % 5 != 0)
        .map(|(quantity, status)| format!("{} item(s), {}", quantity, status));

    for order in orders.take(src, 3)? {
        println!("order: {}", order?);
    }
    Ok(())
}

fn main() -> synthdata::Result<()> {
    println!("synthdata - Basic Usage Examples");
    println!("================================");

    let config = GeneratorConfig::seeded(42);
    let mut src = config.create_source();
    println!("seed: {}\n", src.seed());

    example_1_sampling(&mut src)?;
    example_2_picking(&mut src)?;
    example_3_composition(&mut src)?;
    Ok(())
}
