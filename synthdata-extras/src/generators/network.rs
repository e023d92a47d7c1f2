//! Unique email addresses
//!
//! Candidates are `localpart@domain`. Domains are tried in their fixed order,
//! starting at a picked provider. When every provider has collided for the
//! configured number of passes (two by default), a random decimal digit is
//! appended to the local part and the provider cycle restarts.
//!
//! Multi-part names are joined with a separator that rotates through
//! `.`, `_` and `-`, one choice per call.

use synthdata::sampler::sample_int;
use synthdata::{
    BitSource, DEFAULT_CYCLE_LIMIT, GenerationError, GeneratorConfig, Result, UniquePolicy,
    UniqueValueTracker, pick_index,
};

use crate::dictionary::{Dictionary, require_entries};

/// Separators used to join multi-part local names, in rotation order
pub const NAME_SEPARATORS: [char; 3] = ['.', '_', '-'];

/// Longest local part the builder will augment up to
pub const MAX_LOCAL_LEN: usize = 64;

/// Builds email addresses that never repeat within one builder
#[derive(Debug, Clone)]
pub struct EmailBuilder {
    providers: Vec<String>,
    cycle_limit: usize,
    separator_turn: usize,
    tracker: UniqueValueTracker<String>,
}

impl EmailBuilder {
    /// Create a builder over an ordered list of provider domains
    pub fn new<I, S>(providers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let providers: Vec<String> = providers.into_iter().map(Into::into).collect();
        if providers.is_empty() {
            return Err(GenerationError::empty_collection_with_context(
                "mail providers",
            ));
        }
        Ok(Self {
            providers,
            cycle_limit: DEFAULT_CYCLE_LIMIT,
            separator_turn: 0,
            tracker: UniqueValueTracker::new(),
        })
    }

    /// Create a builder over a dictionary's mail providers
    pub fn from_dictionary<D: Dictionary + ?Sized>(dictionary: &D) -> Result<Self> {
        let providers = require_entries(dictionary.mail_providers(), "mail providers")?;
        Self::new(providers.iter().cloned())
    }

    /// Take the provider-cycle limit from a configuration
    pub fn with_config(mut self, config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        self.cycle_limit = config.unique_cycle_limit;
        Ok(self)
    }

    /// Number of addresses handed out so far
    pub fn issued(&self) -> usize {
        self.tracker.len()
    }

    /// Build a unique address for a single-part local name
    pub fn mail(&mut self, src: &mut BitSource, local: &str) -> Result<String> {
        let local = sanitize_local(local)?;
        self.issue(src, local)
    }

    /// Build a unique address from several name parts
    ///
    /// Each call with two or more parts takes the next separator from
    /// [`NAME_SEPARATORS`].
    pub fn mail_parts(&mut self, src: &mut BitSource, parts: &[&str]) -> Result<String> {
        let local = match parts {
            [] => {
                return Err(GenerationError::argument(
                    "parts",
                    "at least one name part is required",
                ));
            }
            [single] => sanitize_local(single)?,
            _ => {
                let separator = NAME_SEPARATORS[self.separator_turn % NAME_SEPARATORS.len()];
                self.separator_turn += 1;
                let cleaned = parts
                    .iter()
                    .map(|part| sanitize_local(part))
                    .collect::<Result<Vec<_>>>()?;
                cleaned.join(&separator.to_string())
            }
        };
        self.issue(src, local)
    }

    /// Build a unique address for a random name from a dictionary
    pub fn mail_for<D: Dictionary + ?Sized>(
        &mut self,
        src: &mut BitSource,
        dictionary: &D,
    ) -> Result<String> {
        let first = require_entries(dictionary.first_names(), "first names")?;
        let last = require_entries(dictionary.last_names(), "last names")?;
        let first = &first[pick_index(src, first.len())?];
        let last = &last[pick_index(src, last.len())?];
        self.mail_parts(src, &[first.as_str(), last.as_str()])
    }

    fn issue(&mut self, src: &mut BitSource, local: String) -> Result<String> {
        let mut policy = EmailPolicy {
            local,
            providers: &self.providers,
            cycle_limit: self.cycle_limit,
        };
        self.tracker.try_produce(src, &mut policy)
    }
}

/// Lowercase a local name and keep the characters valid in an address.
fn sanitize_local(raw: &str) -> Result<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'))
        .collect();
    if cleaned.is_empty() {
        return Err(GenerationError::argument(
            "local",
            format!("{:?} has no usable characters", raw),
        ));
    }
    Ok(cleaned)
}

struct EmailPolicy<'a> {
    local: String,
    providers: &'a [String],
    cycle_limit: usize,
}

struct EmailCursor {
    local: String,
    start: usize,
    step: usize,
}

impl UniquePolicy<String> for EmailPolicy<'_> {
    type Cursor = EmailCursor;

    fn domain(&self) -> &str {
        "email addresses"
    }

    fn start(&mut self, src: &mut BitSource) -> Result<EmailCursor> {
        Ok(EmailCursor {
            local: self.local.clone(),
            start: pick_index(src, self.providers.len())?,
            step: 0,
        })
    }

    fn next_candidate(
        &mut self,
        cursor: &mut EmailCursor,
        src: &mut BitSource,
    ) -> Result<Option<String>> {
        if cursor.step == self.providers.len() * self.cycle_limit {
            if cursor.local.len() >= MAX_LOCAL_LEN {
                return Ok(None);
            }
            let digit = sample_int(src, 0, 10)?;
            cursor.local.push_str(&digit.to_string());
            cursor.step = 0;
            tracing::debug!(local = %cursor.local, "augmented colliding email local part");
        }
        let provider = &self.providers[(cursor.start + cursor.step) % self.providers.len()];
        cursor.step += 1;
        Ok(Some(format!("{}@{}", cursor.local, provider)))
    }
}
