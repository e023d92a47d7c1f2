//! Names and postal codes drawn from a [`Dictionary`]

use synthdata::{BitSource, Generator, Result, pick_cloned};

use crate::dictionary::{Dictionary, require_entries};

/// Which dictionary list a [`WordGenerator`] draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordList {
    FirstName,
    LastName,
    PostalCode,
    MailProvider,
}

impl WordList {
    fn label(self) -> &'static str {
        match self {
            WordList::FirstName => "first names",
            WordList::LastName => "last names",
            WordList::PostalCode => "postal codes",
            WordList::MailProvider => "mail providers",
        }
    }

    fn entries<D: Dictionary + ?Sized>(self, dictionary: &D) -> &[String] {
        match self {
            WordList::FirstName => dictionary.first_names(),
            WordList::LastName => dictionary.last_names(),
            WordList::PostalCode => dictionary.postal_codes(),
            WordList::MailProvider => dictionary.mail_providers(),
        }
    }
}

/// Picks one entry of a dictionary list per production
#[derive(Debug, Clone)]
pub struct WordGenerator<'d, D: ?Sized> {
    dictionary: &'d D,
    list: WordList,
}

impl<'d, D: Dictionary + ?Sized> WordGenerator<'d, D> {
    pub fn new(dictionary: &'d D, list: WordList) -> Self {
        Self { dictionary, list }
    }
}

impl<D: Dictionary + ?Sized> Generator for WordGenerator<'_, D> {
    type Value = String;

    fn produce(&self, src: &mut BitSource) -> Result<String> {
        let entries = require_entries(self.list.entries(self.dictionary), self.list.label())?;
        pick_cloned(src, entries)
    }
}

pub fn first_names<D: Dictionary + ?Sized>(dictionary: &D) -> WordGenerator<'_, D> {
    WordGenerator::new(dictionary, WordList::FirstName)
}

pub fn last_names<D: Dictionary + ?Sized>(dictionary: &D) -> WordGenerator<'_, D> {
    WordGenerator::new(dictionary, WordList::LastName)
}

pub fn postal_codes<D: Dictionary + ?Sized>(dictionary: &D) -> WordGenerator<'_, D> {
    WordGenerator::new(dictionary, WordList::PostalCode)
}

/// `"First Last"` with both parts picked from the dictionary
pub fn full_names<D: Dictionary + ?Sized>(
    dictionary: &D,
) -> impl Generator<Value = String> + '_ {
    first_names(dictionary).zip_with(last_names(dictionary), |first, last| {
        format!("{} {}", first, last)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::StaticDictionary;
    use synthdata::GenerationError;

    fn dictionary() -> StaticDictionary {
        StaticDictionary::new()
            .with_first_names(["Ada", "Grace", "Alan"])
            .with_last_names(["Hopper"])
            .with_postal_codes(["0150", "5003"])
    }

    #[test]
    fn test_first_names_from_list() {
        let dictionary = dictionary();
        let generator = first_names(&dictionary);
        let mut src = BitSource::seeded(1);
        for name in generator.take(&mut src, 30).unwrap() {
            assert!(["Ada", "Grace", "Alan"].contains(&name.unwrap().as_str()));
        }
    }

    #[test]
    fn test_full_name() {
        let dictionary = dictionary();
        let mut src = BitSource::seeded(2);
        let name = full_names(&dictionary).produce(&mut src).unwrap();
        assert!(name.ends_with(" Hopper"));
    }

    #[test]
    fn test_postal_codes() {
        let dictionary = dictionary();
        let mut src = BitSource::seeded(3);
        let code = postal_codes(&dictionary).produce(&mut src).unwrap();
        assert!(code == "0150" || code == "5003");
    }

    #[test]
    fn test_empty_list_reports_context() {
        let dictionary = StaticDictionary::new();
        let mut src = BitSource::seeded(4);
        let err = WordGenerator::new(&dictionary, WordList::MailProvider)
            .produce(&mut src)
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::EmptyCollection {
                context: Some("mail providers".to_string())
            }
        );
    }

    #[test]
    fn test_dyn_dictionary() {
        let dictionary = dictionary();
        let shared: &dyn Dictionary = &dictionary;
        let mut src = BitSource::seeded(5);
        assert_eq!(
            last_names(shared).produce(&mut src).unwrap(),
            "Hopper"
        );
    }
}
