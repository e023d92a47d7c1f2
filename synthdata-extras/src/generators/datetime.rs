//! Date and timestamp windows
//!
//! Helpers that turn calendar notions (ages, recent and upcoming windows)
//! into [`Range`] values the core samplers understand. Reference instants
//! are passed in, so a seeded run stays reproducible across days.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use synthdata::{GenerationError, Inclusivity, Range, Result};

/// Birth dates of everyone aged `min_age..=max_age` on `today`
pub fn birth_date_range(today: NaiveDate, min_age: u32, max_age: u32) -> Result<Range<NaiveDate>> {
    if min_age > max_age {
        return Err(GenerationError::argument(
            "min_age",
            format!("{} is greater than max_age {}", min_age, max_age),
        ));
    }
    let latest = years_before(today, min_age)?;
    let past_max = max_age
        .checked_add(1)
        .ok_or_else(|| GenerationError::range(format!("max_age {} is too large", max_age)))?;
    let earliest = years_before(today, past_max)?
        .succ_opt()
        .ok_or_else(|| GenerationError::range("birth date window is out of calendar range"))?;
    Range::inclusive(earliest, latest)
}

/// Instants in the `days` before `now`, `now` included
pub fn recent(now: DateTime<Utc>, days: u32) -> Result<Range<DateTime<Utc>>> {
    let span = window(days)?;
    let start = now
        .checked_sub_signed(span)
        .ok_or_else(|| GenerationError::range("recent window is out of calendar range"))?;
    Range::inclusive(start, now)
}

/// Instants in the `days` after `now`, `now` excluded
pub fn future(now: DateTime<Utc>, days: u32) -> Result<Range<DateTime<Utc>>> {
    let span = window(days)?;
    let end = now
        .checked_add_signed(span)
        .ok_or_else(|| GenerationError::range("future window is out of calendar range"))?;
    Range::new(now, end, Inclusivity::ExclusiveInclusive)
}

fn window(days: u32) -> Result<Duration> {
    if days == 0 {
        return Err(GenerationError::argument("days", "must be > 0"));
    }
    Ok(Duration::days(i64::from(days)))
}

fn years_before(date: NaiveDate, years: u32) -> Result<NaiveDate> {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_sub_months(Months::new(months)))
        .ok_or_else(|| GenerationError::range(format!("{} years before {}", years, date)))
}
