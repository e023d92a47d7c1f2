//! Seeds a table of unique users with the domain builders

use synthdata::chrono::NaiveDate;
use synthdata::{BitSource, Generator};
use synthdata_extras::prelude::*;

struct User {
    name: String,
    email: String,
    security_number: String,
    phone: String,
    postal_code: String,
}

fn main() -> synthdata::Result<()> {
    let dictionary = StaticDictionary::new()
        .with_first_names(["Ada", "Grace", "Alan", "Edsger"])
        .with_last_names(["Lovelace", "Hopper", "Turing", "Dijkstra"])
        .with_postal_codes(["0150", "5003", "7010"])
        .with_mail_providers(["example.com", "example.org"]);

    let mut src = BitSource::seeded(7);
    let mut emails = EmailBuilder::from_dictionary(&dictionary)?;
    let mut security_numbers = SecurityNumberBuilder::new();
    let mut phones = PhoneNumberBuilder::new(PhoneNumberGenerator::mobile());

    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let birth_dates = birth_date_range(today, 18, 80)?;
    let first = first_names(&dictionary);
    let last = last_names(&dictionary);
    let postal = postal_codes(&dictionary);

    for _ in 0..10 {
        let given = first.produce(&mut src)?;
        let family = last.produce(&mut src)?;
        let user = User {
            email: emails.mail_parts(&mut src, &[given.as_str(), family.as_str()])?,
            name: format!("{} {}", given, family),
            security_number: security_numbers.random(&mut src, &birth_dates)?,
            phone: phones.next_number(&mut src)?,
            postal_code: postal.produce(&mut src)?,
        };
        println!(
            "{:<18} {:<32} {} {} {}",
            user.name, user.email, user.security_number, user.phone, user.postal_code
        );
    }
    Ok(())
}
