//! Bias-free range sampling for numeric, character and temporal domains.
//!
//! Every function here draws from a [`BitSource`] and samples the half-open
//! interval `[min, max)` unless a rule says otherwise. `min == max` returns
//! `min` without failing; `min > max` is a [`GenerationError::Range`].
//!
//! The [`Sample`] trait collapses the per-type functions into one generic
//! capability so callers write `T::sample_in(src, &range)` for any supported
//! value type.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use num_traits::Float;
use rand::RngCore;
use rust_decimal::Decimal;

use crate::error::{GenerationError, Result};
use crate::range::{Inclusivity, Range};
use crate::rng::BitSource;

/// A value type that can be sampled uniformly from a range
pub trait Sample: Copy + PartialOrd + fmt::Debug {
    /// Sample uniformly from `[min, max)`
    fn sample(src: &mut BitSource, min: Self, max: Self) -> Result<Self>;

    /// The next representable value above `self`, one smallest unit away
    fn step_up(self) -> Option<Self>;

    /// The next representable value below `self`, one smallest unit away
    fn step_down(self) -> Option<Self>;

    /// Whether at least two smallest units separate `min` and `max`
    fn spans_two_units(min: Self, max: Self) -> bool {
        min.step_up().is_some_and(|next| next < max)
    }

    /// Sample uniformly from `[min, max]`, bounds already checked and distinct
    ///
    /// Discrete types draw from `[min, max + 1)`, or from `[min - 1, max)`
    /// with `min - 1` mapped to `max` at the type's upper limit, and fall
    /// back to [`apply_rule`] when neither neighbour exists.
    fn sample_closed(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
        if let Some(upper) = max.step_up() {
            return Self::sample(src, min, upper);
        }
        if let Some(lower) = min.step_down() {
            let value = Self::sample(src, lower, max)?;
            return Ok(if value == lower { max } else { value });
        }
        let value = Self::sample(src, min, max)?;
        apply_rule(src, value, min, max, Inclusivity::Inclusive)
    }

    /// Sample uniformly from `(min, max)`, at least two units apart
    fn sample_open(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
        let lower = min
            .step_up()
            .ok_or_else(|| GenerationError::range(format!("{:?} has no successor", min)))?;
        Self::sample(src, lower, max)
    }

    /// Sample from a validated range, honoring its inclusivity rule
    fn sample_in(src: &mut BitSource, range: &Range<Self>) -> Result<Self> {
        sample_with_rule(src, range.min(), range.max(), range.rule())
    }
}

/// Returns `Ok(true)` when the bounds collapse to one value.
fn check_bounds<T: PartialOrd + fmt::Debug>(min: &T, max: &T) -> Result<bool> {
    match min.partial_cmp(max) {
        Some(std::cmp::Ordering::Less) => Ok(false),
        Some(std::cmp::Ordering::Equal) => Ok(true),
        Some(std::cmp::Ordering::Greater) => Err(GenerationError::inverted_bounds(min, max)),
        None => Err(GenerationError::range(format!(
            "bounds {:?} and {:?} are not comparable",
            min, max
        ))),
    }
}

/// Draw uniformly from `[0, span)` without modulo bias.
///
/// Raw draws below `2^64 mod span` are rejected: they are the surplus that
/// would otherwise make the low residues more likely.
fn bounded_u64(src: &mut BitSource, span: u64) -> u64 {
    debug_assert!(span > 0);
    let threshold = span.wrapping_neg() % span;
    loop {
        let raw = src.next_u64();
        if raw >= threshold {
            return raw % span;
        }
        tracing::trace!(raw, span, "rejected biased draw");
    }
}

/// Sample an `i32` from `[min, max)`
pub fn sample_int(src: &mut BitSource, min: i32, max: i32) -> Result<i32> {
    Ok(sample_long(src, min as i64, max as i64)? as i32)
}

/// Sample an `i64` from `[min, max)`
///
/// The span is computed in unsigned space so `i64::MIN..i64::MAX` does not
/// overflow.
pub fn sample_long(src: &mut BitSource, min: i64, max: i64) -> Result<i64> {
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    let span = (max as u64).wrapping_sub(min as u64);
    Ok(min.wrapping_add(bounded_u64(src, span) as i64))
}

/// Sample a `u64` from `[min, max)`
pub fn sample_unsigned(src: &mut BitSource, min: u64, max: u64) -> Result<u64> {
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    Ok(min + bounded_u64(src, max - min))
}

/// Scale a unit draw onto `[min, max)`.
///
/// Spans wider than the type (e.g. `MIN..MAX`) overflow to infinity, so they
/// are computed as a weighted sum instead. Rounding can land exactly on the
/// excluded `max`; that result is re-mapped to `min`.
fn scale_unit<F: Float>(min: F, max: F, unit: F) -> F {
    let width = max - min;
    let value = if width.is_finite() {
        min + width * unit
    } else {
        min * (F::one() - unit) + max * unit
    };
    if value >= max || value < min {
        min
    } else {
        value
    }
}

fn check_finite<F: Float + fmt::Debug>(min: F, max: F) -> Result<()> {
    if min.is_finite() && max.is_finite() {
        Ok(())
    } else {
        Err(GenerationError::range(format!(
            "bounds {:?} and {:?} must be finite",
            min, max
        )))
    }
}

/// Sample an `f64` from `[min, max)`
pub fn sample_double(src: &mut BitSource, min: f64, max: f64) -> Result<f64> {
    check_finite(min, max)?;
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    Ok(scale_unit(min, max, src.next_unit_f64()))
}

/// Sample an `f32` from `[min, max)`
pub fn sample_float(src: &mut BitSource, min: f32, max: f32) -> Result<f32> {
    check_finite(min, max)?;
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    Ok(scale_unit(min, max, src.next_unit_f32()))
}

/// Draw a uniform decimal in `[0, 1)`, or `[0, 1]` when `closed`.
///
/// Three 32-bit words form a 96-bit mantissa at scale 28, which covers
/// `[0, ~7.92)`; anything past the unit interval is discarded.
fn unit_decimal(src: &mut BitSource, closed: bool) -> Decimal {
    loop {
        let lo = src.next_u32();
        let mid = src.next_u32();
        let hi = src.next_u32();
        let candidate = Decimal::from_parts(lo, mid, hi, false, 28);
        if candidate < Decimal::ONE || (closed && candidate == Decimal::ONE) {
            return candidate;
        }
    }
}

/// `min + (max - min) * unit`, with the weighted form when the width
/// overflows.
fn scale_decimal(min: Decimal, max: Decimal, unit: Decimal) -> Result<Decimal> {
    let scaled = max
        .checked_sub(min)
        .and_then(|width| width.checked_mul(unit))
        .and_then(|offset| min.checked_add(offset));
    match scaled {
        Some(value) => Ok(value),
        None => (Decimal::ONE - unit)
            .checked_mul(min)
            .zip(unit.checked_mul(max))
            .and_then(|(low, high)| low.checked_add(high))
            .ok_or_else(|| {
                GenerationError::range(format!("decimal span {} .. {} overflows", min, max))
            }),
    }
}

/// Sample a [`Decimal`] from `[min, max)`
pub fn sample_decimal(src: &mut BitSource, min: Decimal, max: Decimal) -> Result<Decimal> {
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    let value = scale_decimal(min, max, unit_decimal(src, false))?;
    if value >= max || value < min {
        Ok(min)
    } else {
        Ok(value)
    }
}

/// Sample a [`Decimal`] from `[min, max]`
pub fn sample_decimal_closed(
    src: &mut BitSource,
    min: Decimal,
    max: Decimal,
) -> Result<Decimal> {
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    let value = scale_decimal(min, max, unit_decimal(src, true))?;
    Ok(value.clamp(min, max))
}

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_END: u32 = 0xE000;
const SURROGATE_LEN: u32 = SURROGATE_END - SURROGATE_START;

/// Sample a `char` from `[min, max)`, skipping the surrogate gap
pub fn sample_char(src: &mut BitSource, min: char, max: char) -> Result<char> {
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    let lo = min as u32;
    let hi = max as u32;
    let straddles_gap = lo < SURROGATE_START && hi >= SURROGATE_END;
    let count = if straddles_gap {
        hi - lo - SURROGATE_LEN
    } else {
        hi - lo
    };

    let mut code = lo + bounded_u64(src, count as u64) as u32;
    if straddles_gap && code >= SURROGATE_START {
        code += SURROGATE_LEN;
    }
    char::from_u32(code)
        .ok_or_else(|| GenerationError::range(format!("{:#x} is not a scalar value", code)))
}

/// Sample a [`Duration`] from `[min, max)` with microsecond ticks
pub fn sample_duration(src: &mut BitSource, min: Duration, max: Duration) -> Result<Duration> {
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    let lo = duration_ticks(min)?;
    let hi = duration_ticks(max)?;
    Ok(Duration::microseconds(sample_long(src, lo, hi)?))
}

fn duration_ticks(value: Duration) -> Result<i64> {
    value.num_microseconds().ok_or_else(|| {
        GenerationError::range(format!("duration {} is too large to sample", value))
    })
}

/// Sample a UTC timestamp from `[min, max)` with microsecond ticks
pub fn sample_datetime(
    src: &mut BitSource,
    min: DateTime<Utc>,
    max: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    let ticks = sample_long(src, min.timestamp_micros(), max.timestamp_micros())?;
    datetime_from_ticks(ticks)
}

fn datetime_from_ticks(ticks: i64) -> Result<DateTime<Utc>> {
    let secs = ticks.div_euclid(1_000_000);
    let nanos = (ticks.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos)
        .ok_or_else(|| GenerationError::range(format!("timestamp tick {} is out of range", ticks)))
}

/// Sample a calendar date from `[min, max)` with day ticks
pub fn sample_date(src: &mut BitSource, min: NaiveDate, max: NaiveDate) -> Result<NaiveDate> {
    if check_bounds(&min, &max)? {
        return Ok(min);
    }
    let day = sample_int(src, min.num_days_from_ce(), max.num_days_from_ce())?;
    NaiveDate::from_num_days_from_ce_opt(day)
        .ok_or_else(|| GenerationError::range(format!("day {} is out of range", day)))
}

/// Sample from `[min, max]`, `(min, max)`, `[min, max)` or `(min, max]`
///
/// Every rule keeps the result uniform:
/// - `Exclusive` needs two units of width and defers to
///   [`Sample::sample_open`];
/// - `ExclusiveInclusive` draws from `[min, max)` and maps `min` to `max`;
/// - `Inclusive` defers to [`Sample::sample_closed`].
pub fn sample_with_rule<T: Sample>(
    src: &mut BitSource,
    min: T,
    max: T,
    rule: Inclusivity,
) -> Result<T> {
    let collapsed = check_bounds(&min, &max)?;
    match rule {
        Inclusivity::InclusiveExclusive => T::sample(src, min, max),
        Inclusivity::Exclusive => {
            if !T::spans_two_units(min, max) {
                return Err(GenerationError::range(format!(
                    "exclusive range ({:?}, {:?}) has no interior value",
                    min, max
                )));
            }
            T::sample_open(src, min, max)
        }
        Inclusivity::ExclusiveInclusive => {
            if collapsed {
                return Ok(min);
            }
            let value = T::sample(src, min, max)?;
            Ok(if value == min { max } else { value })
        }
        Inclusivity::Inclusive => {
            if collapsed {
                return Ok(min);
            }
            T::sample_closed(src, min, max)
        }
    }
}

/// Adjust a raw `[min, max)` draw to an inclusivity rule
///
/// - `Exclusive` moves a draw equal to `min` up to `min + 1` and fails when
///   fewer than two units separate the bounds;
/// - `Inclusive` turns a draw equal to `max - 1` into `max` on one extra
///   coin flip;
/// - `InclusiveExclusive` returns the draw unchanged;
/// - `ExclusiveInclusive` promotes a draw equal to `max - 1` to `max`.
pub fn apply_rule<T: Sample>(
    src: &mut BitSource,
    value: T,
    min: T,
    max: T,
    rule: Inclusivity,
) -> Result<T> {
    match rule {
        Inclusivity::InclusiveExclusive => Ok(value),
        Inclusivity::Exclusive => {
            if !T::spans_two_units(min, max) {
                return Err(GenerationError::range(format!(
                    "exclusive range ({:?}, {:?}) has no interior value",
                    min, max
                )));
            }
            if value == min {
                min.step_up().ok_or_else(|| {
                    GenerationError::range(format!("{:?} has no successor", min))
                })
            } else {
                Ok(value)
            }
        }
        Inclusivity::Inclusive => {
            if max.step_down() == Some(value) && src.coin() {
                Ok(max)
            } else {
                Ok(value)
            }
        }
        Inclusivity::ExclusiveInclusive => {
            if max.step_down() == Some(value) {
                Ok(max)
            } else {
                Ok(value)
            }
        }
    }
}

macro_rules! impl_signed_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                fn sample(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
                    Ok(sample_long(src, min as i64, max as i64)? as $t)
                }

                fn step_up(self) -> Option<Self> {
                    self.checked_add(1)
                }

                fn step_down(self) -> Option<Self> {
                    self.checked_sub(1)
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                fn sample(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
                    Ok(sample_unsigned(src, min as u64, max as u64)? as $t)
                }

                fn step_up(self) -> Option<Self> {
                    self.checked_add(1)
                }

                fn step_down(self) -> Option<Self> {
                    self.checked_sub(1)
                }
            }
        )*
    };
}

impl_signed_sample!(i8, i16, i32, i64, isize);
impl_unsigned_sample!(u8, u16, u32, u64, usize);

// One ULP in either direction; `None` past the finite range.
macro_rules! impl_float_sample {
    ($($t:ty => $sample:ident),*) => {
        $(
            impl Sample for $t {
                fn sample(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
                    $sample(src, min, max)
                }

                fn step_up(self) -> Option<Self> {
                    if !self.is_finite() {
                        return None;
                    }
                    let bits = self.to_bits();
                    let next = if self == 0.0 {
                        <$t>::from_bits(1)
                    } else if self > 0.0 {
                        <$t>::from_bits(bits + 1)
                    } else {
                        <$t>::from_bits(bits - 1)
                    };
                    next.is_finite().then_some(next)
                }

                fn step_down(self) -> Option<Self> {
                    (-self).step_up().map(|next| -next)
                }
            }
        )*
    };
}

impl_float_sample!(f32 => sample_float, f64 => sample_double);

// Decimal draws are finer than one unit at the operands' scale, so the
// closed and open forms work on the unit draw instead of shifting bounds.
impl Sample for Decimal {
    fn sample(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
        sample_decimal(src, min, max)
    }

    fn sample_closed(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
        sample_decimal_closed(src, min, max)
    }

    fn sample_open(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
        if min >= max {
            return Err(GenerationError::range(format!(
                "open range ({}, {}) is empty",
                min, max
            )));
        }
        loop {
            let value = sample_decimal(src, min, max)?;
            if value != min {
                return Ok(value);
            }
        }
    }

    // The unit is one step at the value's own scale.
    fn step_up(self) -> Option<Self> {
        self.checked_add(Decimal::new(1, self.scale()))
    }

    fn step_down(self) -> Option<Self> {
        self.checked_sub(Decimal::new(1, self.scale()))
    }
}

impl Sample for char {
    fn sample(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
        sample_char(src, min, max)
    }

    fn step_up(self) -> Option<Self> {
        match self as u32 {
            0xD7FF => char::from_u32(SURROGATE_END),
            code => char::from_u32(code + 1),
        }
    }

    fn step_down(self) -> Option<Self> {
        match self as u32 {
            0 => None,
            SURROGATE_END => char::from_u32(SURROGATE_START - 1),
            code => char::from_u32(code - 1),
        }
    }
}

impl Sample for Duration {
    fn sample(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
        sample_duration(src, min, max)
    }

    fn step_up(self) -> Option<Self> {
        self.checked_add(&Duration::microseconds(1))
    }

    fn step_down(self) -> Option<Self> {
        self.checked_sub(&Duration::microseconds(1))
    }
}

impl Sample for DateTime<Utc> {
    fn sample(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
        sample_datetime(src, min, max)
    }

    fn step_up(self) -> Option<Self> {
        self.checked_add_signed(Duration::microseconds(1))
    }

    fn step_down(self) -> Option<Self> {
        self.checked_sub_signed(Duration::microseconds(1))
    }
}

impl Sample for NaiveDate {
    fn sample(src: &mut BitSource, min: Self, max: Self) -> Result<Self> {
        sample_date(src, min, max)
    }

    fn step_up(self) -> Option<Self> {
        self.succ_opt()
    }

    fn step_down(self) -> Option<Self> {
        self.pred_opt()
    }
}
