//! Uniform selection from slices and argument lists.

use crate::error::{GenerationError, Result};
use crate::rng::BitSource;
use crate::sampler::{sample_long, sample_unsigned};

/// Pick a uniform index in `0..len`
///
/// A single-element collection returns `0` without drawing, so a constant
/// pick leaves the [`BitSource`] untouched.
pub fn pick_index(src: &mut BitSource, len: usize) -> Result<usize> {
    match len {
        0 => Err(GenerationError::empty_collection()),
        1 => Ok(0),
        _ => Ok(sample_unsigned(src, 0, len as u64)? as usize),
    }
}

/// Pick a uniform element from a list or span
pub fn pick<'a, T>(src: &mut BitSource, items: &'a [T]) -> Result<&'a T> {
    let index = pick_index(src, items.len())?;
    Ok(&items[index])
}

/// Pick a uniform element and clone it out
pub fn pick_cloned<T: Clone>(src: &mut BitSource, items: &[T]) -> Result<T> {
    pick(src, items).cloned()
}

/// Pick uniformly among `K` explicit arguments and a variadic tail
///
/// `K` must be between 2 and 5. One index is drawn from the `K + rest.len()`
/// wide space `[-(K-1), rest.len()]`: non-positive indices select a fixed
/// slot, positive ones select from `rest`, and nothing is concatenated.
pub fn pick_from_arguments<T, const K: usize>(
    src: &mut BitSource,
    fixed: [T; K],
    rest: Vec<T>,
) -> Result<T> {
    if !(2..=5).contains(&K) {
        return Err(GenerationError::argument(
            "fixed",
            format!("expected between 2 and 5 fixed arguments, got {}", K),
        ));
    }

    let low = -(K as i64 - 1);
    let high = rest.len() as i64 + 1;
    let index = sample_long(src, low, high)?;

    let picked = if index <= 0 {
        fixed.into_iter().nth((-index) as usize)
    } else {
        rest.into_iter().nth(index as usize - 1)
    };
    picked.ok_or_else(|| GenerationError::range(format!("index {} is out of bounds", index)))
}

/// Shuffle a slice in place (Fisher–Yates)
pub fn shuffle<T>(src: &mut BitSource, items: &mut [T]) -> Result<()> {
    for i in (1..items.len()).rev() {
        let j = pick_index(src, i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}

/// Pick one of several arguments
///
/// ```rust
/// use synthdata::{BitSource, pick_one};
///
/// let mut src = BitSource::seeded(7);
/// let day = pick_one!(&mut src; "mon", "tue", "wed").unwrap();
/// assert!(["mon", "tue", "wed"].contains(&day));
///
/// let extra = vec!["sat", "sun"];
/// let any = pick_one!(&mut src; "thu", "fri"; extra).unwrap();
/// assert!(["thu", "fri", "sat", "sun"].contains(&any));
/// ```
#[macro_export]
macro_rules! pick_one {
    ($src:expr; $($item:expr),+ $(,)?) => {
        $crate::picker::pick_from_arguments($src, [$($item),+], ::std::vec::Vec::new())
    };
    ($src:expr; $($item:expr),+ ; $rest:expr) => {
        $crate::picker::pick_from_arguments($src, [$($item),+], $rest)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;
    use std::collections::HashMap;

    #[test]
    fn test_empty_collection_fails() {
        let mut src = BitSource::seeded(1);
        let empty: Vec<i32> = Vec::new();
        assert!(matches!(
            pick(&mut src, &empty),
            Err(GenerationError::EmptyCollection { .. })
        ));
    }

    #[test]
    fn test_single_element_consumes_no_entropy() {
        let mut src = BitSource::seeded(1);
        let mut reference = BitSource::seeded(1);
        assert_eq!(*pick(&mut src, &["only"]).unwrap(), "only");
        assert_eq!(src.next_u64(), reference.next_u64());
    }

    #[test]
    fn test_pick_covers_all_elements() {
        let mut src = BitSource::seeded(2);
        let items = vec!['a', 'b', 'c', 'd'];
        let mut counts: HashMap<char, usize> = HashMap::new();
        for _ in 0..4_000 {
            *counts.entry(pick_cloned(&mut src, &items).unwrap()).or_default() += 1;
        }
        assert_eq!(counts.len(), 4);
        for count in counts.values() {
            assert!(*count > 800 && *count < 1200);
        }
    }

    #[test]
    fn test_pick_from_arguments_covers_fixed_and_tail() {
        let mut src = BitSource::seeded(3);
        let mut counts: HashMap<u8, usize> = HashMap::new();
        for _ in 0..7_000 {
            let value = pick_from_arguments(&mut src, [1u8, 2, 3], vec![4, 5, 6, 7]).unwrap();
            *counts.entry(value).or_default() += 1;
        }
        assert_eq!(counts.len(), 7);
        for count in counts.values() {
            assert!(*count > 800 && *count < 1200, "count {}", count);
        }
    }

    #[test]
    fn test_pick_from_arguments_arity() {
        let mut src = BitSource::seeded(4);
        assert!(pick_from_arguments(&mut src, [1], vec![2]).is_err());
        assert!(pick_from_arguments(&mut src, [1, 2, 3, 4, 5, 6], vec![]).is_err());
        let value = pick_from_arguments(&mut src, [1, 2, 3, 4, 5], vec![]).unwrap();
        assert!((1..=5).contains(&value));
    }

    #[test]
    fn test_pick_one_macro() {
        let mut src = BitSource::seeded(5);
        let value = crate::pick_one!(&mut src; 10, 20).unwrap();
        assert!(value == 10 || value == 20);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut src = BitSource::seeded(6);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut src, &mut items).unwrap();
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted);
    }
}
