//! Read-only word lists supplied by the caller.
//!
//! Name lists, postal codes and mail providers are loaded once, outside of
//! the builders, and passed in by reference through the [`Dictionary`]
//! trait. [`StaticDictionary`] is the in-memory implementation; with the
//! `serde` feature it can also be read from a JSON document.

use synthdata::{GenerationError, Result};

/// Source of the word lists domain builders pick from
pub trait Dictionary {
    /// Given names
    fn first_names(&self) -> &[String];

    /// Family names
    fn last_names(&self) -> &[String];

    /// Postal codes
    fn postal_codes(&self) -> &[String];

    /// Mail provider domains, in the order unique email builders cycle them
    fn mail_providers(&self) -> &[String];
}

/// An in-memory [`Dictionary`]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StaticDictionary {
    first_names: Vec<String>,
    last_names: Vec<String>,
    postal_codes: Vec<String>,
    mail_providers: Vec<String>,
}

fn owned<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl StaticDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the given names
    pub fn with_first_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.first_names = owned(names);
        self
    }

    /// Replace the family names
    pub fn with_last_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.last_names = owned(names);
        self
    }

    /// Replace the postal codes
    pub fn with_postal_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.postal_codes = owned(codes);
        self
    }

    /// Replace the mail providers
    pub fn with_mail_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mail_providers = owned(providers);
        self
    }

    /// Parse a JSON document with any of the four lists
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| GenerationError::Config(synthdata::ConfigError::Parse(e.to_string())))
    }

    /// Load a JSON dictionary file
    #[cfg(feature = "serde")]
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GenerationError::Config(synthdata::ConfigError::Io(e.to_string())))?;
        Self::from_json_str(&contents)
    }
}

impl Dictionary for StaticDictionary {
    fn first_names(&self) -> &[String] {
        &self.first_names
    }

    fn last_names(&self) -> &[String] {
        &self.last_names
    }

    fn postal_codes(&self) -> &[String] {
        &self.postal_codes
    }

    fn mail_providers(&self) -> &[String] {
        &self.mail_providers
    }
}

/// Fail with context when a required list is empty
pub(crate) fn require_entries<'d>(entries: &'d [String], label: &str) -> Result<&'d [String]> {
    if entries.is_empty() {
        Err(GenerationError::empty_collection_with_context(label))
    } else {
        Ok(entries)
    }
}
