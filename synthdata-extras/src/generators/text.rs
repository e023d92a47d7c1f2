//! Random strings over a character alphabet
//!
//! This module provides generators for:
//! - Alphabetic strings (a-z, A-Z)
//! - Alphanumeric strings (a-z, A-Z, 0-9)
//! - Numeric strings (0-9)
//! - Strings over any caller-supplied alphabet or code point range

use synthdata::{BitSource, GenerationError, Generator, Range, Result, Sample, pick};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

// ============================================================================
// Alphabet
// ============================================================================

/// Where a [`TextGenerator`] takes its characters from
#[derive(Debug, Clone, PartialEq)]
pub enum Alphabet {
    /// An explicit set of characters, each equally likely
    Chars(Vec<char>),
    /// Every scalar value within a code point range
    CodePoints(Range<char>),
}

impl Alphabet {
    fn draw(&self, src: &mut BitSource) -> Result<char> {
        match self {
            Alphabet::Chars(chars) => pick(src, chars).copied(),
            Alphabet::CodePoints(range) => char::sample_in(src, range),
        }
    }
}

// ============================================================================
// Text Generator
// ============================================================================

/// Generator for strings whose length is drawn from a range
#[derive(Debug, Clone, PartialEq)]
pub struct TextGenerator {
    alphabet: Alphabet,
    length: Range<usize>,
}

impl TextGenerator {
    /// Create a generator over an explicit character set
    pub fn new(chars: impl IntoIterator<Item = char>, length: Range<usize>) -> Result<Self> {
        let chars: Vec<char> = chars.into_iter().collect();
        if chars.is_empty() {
            return Err(GenerationError::empty_collection_with_context("alphabet"));
        }
        Ok(Self {
            alphabet: Alphabet::Chars(chars),
            length,
        })
    }

    /// Create a generator over every character in a code point range
    pub fn code_points(chars: Range<char>, length: Range<usize>) -> Self {
        Self {
            alphabet: Alphabet::CodePoints(chars),
            length,
        }
    }

    /// Letters a-z and A-Z, `min_len..=max_len` long
    pub fn alphabetic(min_len: usize, max_len: usize) -> Result<Self> {
        Self::new(
            LOWERCASE.chars().chain(UPPERCASE.chars()),
            Range::inclusive(min_len, max_len)?,
        )
    }

    /// Lowercase letters only
    pub fn lowercase(min_len: usize, max_len: usize) -> Result<Self> {
        Self::new(LOWERCASE.chars(), Range::inclusive(min_len, max_len)?)
    }

    /// Letters and digits
    pub fn alphanumeric(min_len: usize, max_len: usize) -> Result<Self> {
        Self::new(
            LOWERCASE.chars().chain(UPPERCASE.chars()).chain(DIGITS.chars()),
            Range::inclusive(min_len, max_len)?,
        )
    }

    /// Digits only
    pub fn numeric(min_len: usize, max_len: usize) -> Result<Self> {
        Self::new(DIGITS.chars(), Range::inclusive(min_len, max_len)?)
    }

    /// The character source strings are drawn from
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl Generator for TextGenerator {
    type Value = String;

    fn produce(&self, src: &mut BitSource) -> Result<String> {
        let len = usize::sample_in(src, &self.length)?;
        (0..len).map(|_| self.alphabet.draw(src)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabetic_generator() {
        let generator = TextGenerator::alphabetic(5, 10).unwrap();
        let mut src = BitSource::seeded(1);

        for text in generator.take(&mut src, 50).unwrap() {
            let text = text.unwrap();
            assert!(text.len() >= 5 && text.len() <= 10);
            assert!(text.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_lowercase_only() {
        let generator = TextGenerator::lowercase(3, 3).unwrap();
        let mut src = BitSource::seeded(2);
        let text = generator.produce(&mut src).unwrap();
        assert_eq!(text.len(), 3);
        assert!(text.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_alphanumeric_and_numeric() {
        let mut src = BitSource::seeded(3);
        let mixed = TextGenerator::alphanumeric(1, 20).unwrap();
        let digits = TextGenerator::numeric(4, 4).unwrap();
        for _ in 0..20 {
            assert!(
                mixed
                    .produce(&mut src)
                    .unwrap()
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric())
            );
            let pin = digits.produce(&mut src).unwrap();
            assert_eq!(pin.len(), 4);
            assert!(pin.parse::<u32>().is_ok());
        }
    }

    #[test]
    fn test_empty_length_allowed() {
        let generator = TextGenerator::numeric(0, 0).unwrap();
        let mut src = BitSource::seeded(4);
        assert_eq!(generator.produce(&mut src).unwrap(), "");
    }

    #[test]
    fn test_code_point_range() {
        let greek = Range::inclusive('α', 'ω').unwrap();
        let generator = TextGenerator::code_points(greek, Range::inclusive(8, 8).unwrap());
        let mut src = BitSource::seeded(5);
        let text = generator.produce(&mut src).unwrap();
        assert_eq!(text.chars().count(), 8);
        assert!(text.chars().all(|c| ('α'..='ω').contains(&c)));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(TextGenerator::new(Vec::new(), Range::inclusive(1, 2).unwrap()).is_err());
        assert!(TextGenerator::alphabetic(10, 5).is_err());
    }
}
