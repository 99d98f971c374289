//! core::metadata::person
//!
//! Author and maintainer list encoding.
//!
//! A list is written to exactly one header. Without any email it goes to
//! the plain header (`Author`) as a `", "`-joined list of names. As soon
//! as one entry has an email, the whole list goes to the `-email` header
//! and each entry renders as `name <email>`, the bare email, or (for a
//! name-only entry in a mixed list) the bare name.
//!
//! # Example
//!
//! ```
//! use coremeta::core::metadata::person::{encode, PersonHeader};
//! use coremeta::core::types::Person;
//!
//! let people = [Person::named("foo"), Person::named("bar")];
//! assert_eq!(encode(&people), Some((PersonHeader::Plain, "foo, bar".to_string())));
//!
//! let people = [Person::with_email("foo", "bar@domain")];
//! assert_eq!(encode(&people), Some((PersonHeader::Email, "foo <bar@domain>".to_string())));
//! ```

use crate::core::types::Person;

use super::error::MetadataError;

const SEPARATOR: &str = ", ";

/// Which of the pair of headers a list renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonHeader {
    /// `Author` / `Maintainer`
    Plain,
    /// `Author-email` / `Maintainer-email`
    Email,
}

/// Encode a person list. Returns `None` for an empty list.
pub fn encode(people: &[Person]) -> Option<(PersonHeader, String)> {
    if people.is_empty() {
        return None;
    }

    if people.iter().all(|p| p.email.is_none()) {
        let names: Vec<&str> = people.iter().filter_map(|p| p.name.as_deref()).collect();
        return Some((PersonHeader::Plain, names.join(SEPARATOR)));
    }

    let entries: Vec<String> = people
        .iter()
        .filter_map(|p| match (&p.name, &p.email) {
            (Some(name), Some(email)) => Some(format!("{name} <{email}>")),
            (None, Some(email)) => Some(email.clone()),
            (Some(name), None) => Some(name.clone()),
            (None, None) => None,
        })
        .collect();
    Some((PersonHeader::Email, entries.join(SEPARATOR)))
}

/// Decode a plain header value into name-only entries.
pub fn decode_names(value: &str) -> Vec<Person> {
    value
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Person::named)
        .collect()
}

/// Decode an `-email` header value.
///
/// Entries are `name <email>`, `<email>`, or a bare email. An entry with
/// neither `@` nor angle brackets is read as a name.
///
/// # Errors
///
/// Returns [`MetadataError::MalformedField`] for empty entries and
/// unbalanced or misplaced angle brackets.
pub fn decode_emails(field: &str, value: &str) -> Result<Vec<Person>, MetadataError> {
    value
        .split(SEPARATOR)
        .map(|entry| decode_email_entry(field, entry.trim()))
        .collect()
}

fn decode_email_entry(field: &str, entry: &str) -> Result<Person, MetadataError> {
    if entry.is_empty() {
        return Err(MetadataError::malformed(field, entry));
    }

    match (entry.find('<'), entry.rfind('>')) {
        (Some(open), Some(close)) if open < close && close == entry.len() - 1 => {
            let email = entry[open + 1..close].trim();
            if email.is_empty() || email.contains(['<', '>']) {
                return Err(MetadataError::malformed(field, entry));
            }
            let name = entry[..open].trim();
            Ok(if name.is_empty() {
                Person::email(email)
            } else {
                Person::with_email(name, email)
            })
        }
        (None, None) if entry.contains('@') => Ok(Person::email(entry)),
        (None, None) => Ok(Person::named(entry)),
        _ => Err(MetadataError::malformed(field, entry)),
    }
}
