//! # synthdata-extras
//!
//! Domain builders for the synthdata generator library.
//!
//! This crate provides:
//! - **Network**: email addresses that never repeat within a builder
//! - **Identity**: national security numbers (`DDMMYY` + control number)
//! - **Phone**: phone numbers from `#` digit patterns, optionally unique
//! - **Names**: first, last and full names plus postal codes from a [`Dictionary`]
//! - **DateTime**: birth-date, recent and upcoming windows as ranges
//! - **Text**: strings over alphabetic, alphanumeric, numeric or custom alphabets
//!
//! Word lists are never bundled; callers supply them through the
//! [`Dictionary`] trait (or [`StaticDictionary`], which can be read from JSON
//! with the `serde` feature).
//!
//! ## Quick Start
//!
//! ```rust
//! use synthdata_extras::prelude::*;
//! use synthdata::{BitSource, Generator};
//!
//! let mut src = BitSource::seeded(42);
//!
//! // Unique email addresses
//! let mut emails = EmailBuilder::new(["test.com"]).unwrap();
//! assert_eq!(emails.mail(&mut src, "bob").unwrap(), "bob@test.com");
//! assert_ne!(emails.mail(&mut src, "bob").unwrap(), "bob@test.com");
//!
//! // Unique security numbers for a birth date
//! let mut numbers = SecurityNumberBuilder::new();
//! let birth = synthdata::chrono::NaiveDate::from_ymd_opt(1990, 4, 1).unwrap();
//! let number = numbers.for_date(&mut src, birth).unwrap();
//! assert!(number.starts_with("010490"));
//!
//! // Phone numbers from a pattern
//! let phone = PhoneNumberGenerator::new("+47 ### ## ###").unwrap();
//! assert!(phone.produce(&mut src).unwrap().starts_with("+47 "));
//! ```
//!
//! ## Dictionary-backed names
//!
//! ```rust
//! use synthdata_extras::prelude::*;
//! use synthdata::{BitSource, Generator};
//!
//! let dictionary = StaticDictionary::new()
//!     .with_first_names(["Ada", "Grace"])
//!     .with_last_names(["Hopper"])
//!     .with_mail_providers(["example.org"]);
//!
//! let mut src = BitSource::seeded(7);
//! let name = full_names(&dictionary).produce(&mut src).unwrap();
//! assert!(name.ends_with(" Hopper"));
//!
//! let mut emails = EmailBuilder::from_dictionary(&dictionary).unwrap();
//! let email = emails.mail_for(&mut src, &dictionary).unwrap();
//! assert!(email.ends_with(".hopper@example.org"));
//! ```

// Re-export synthdata for convenience
pub use synthdata;

pub mod dictionary;
pub mod generators;

pub use dictionary::{Dictionary, StaticDictionary};

pub mod prelude {
    //! Convenient re-exports of commonly used builders

    pub use crate::dictionary::{Dictionary, StaticDictionary};

    pub use crate::generators::datetime::{birth_date_range, future, recent};
    pub use crate::generators::identity::SecurityNumberBuilder;
    pub use crate::generators::names::{
        WordGenerator, WordList, first_names, full_names, last_names, postal_codes,
    };
    pub use crate::generators::network::EmailBuilder;
    pub use crate::generators::phone::{PhoneNumberBuilder, PhoneNumberGenerator};
    pub use crate::generators::text::{Alphabet, TextGenerator};
}
