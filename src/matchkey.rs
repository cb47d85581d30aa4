//! Match key strategies.
//!
//! A [`MatchKeyStrategy`] turns a record into the string used to cluster it
//! with equivalent records. Three strategies are provided:
//!
//! - [`GoldRushKey`] — a standard number key when the record has an ISBN, ISSN
//!   or other standard identifier, otherwise a composite of title, year,
//!   publisher, record type, author and an electronic/print indicator.
//! - [`EmptyKey`] — always `""`, so the record never clusters.
//! - [`UniqueKey`] — a fresh UUID per call, so the record never clusters.
//!
//! # Examples
//!
//! ```
//! use marc_matchkey::{GoldRushKey, MatchKeyStrategy};
//!
//! let input = r#"{"marc": {"fields": [{"020": {"subfields": [{"a": "978-0-14-143951-8"}]}}]}}"#;
//! let key = GoldRushKey::new().matchkey_json(input)?;
//! assert_eq!(key, "020_014143951");
//! # Ok::<(), marc_matchkey::MatchKeyError>(())
//! ```

use crate::components;
use crate::error::Result;
use crate::field_access::FieldAccess;
use crate::marcjson;
use crate::record::Record;
use std::fmt;
use uuid::Uuid;

/// Derives match keys from records.
///
/// Implementations hold no per-record state and may be shared across threads.
pub trait MatchKeyStrategy: fmt::Debug + Send + Sync {
    /// Short name used in configuration (`method`).
    fn name(&self) -> &'static str;

    /// Match key for an already loaded record.
    fn matchkey(&self, record: &Record) -> String;

    /// Match key for a JSON envelope (`{"marc": {...}}`).
    ///
    /// # Errors
    ///
    /// Returns the loader's error when the envelope cannot be turned into a record.
    fn matchkey_json(&self, input: &str) -> Result<String> {
        let record = marcjson::parse_envelope(input)?;
        Ok(self.matchkey(&record))
    }
}

/// The components a [`GoldRushKey`] is built from, before joining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParts {
    /// Normalized standard number token (`"020_014143951"`)
    StandardNumber(String),
    /// Composite key tokens, in key order
    Composite {
        /// 70-character title token
        title: String,
        /// 4-character publication year
        year: String,
        /// 5-character publisher token
        publisher: String,
        /// Leader type of record, or empty
        record_type: String,
        /// 5-character author token
        author: String,
        /// `'e'` or `'p'`
        electronic: char,
    },
}

impl KeyParts {
    /// Join the parts into the final, lower-cased key.
    ///
    /// Every composite component is preceded by `delimiter`. A standard number
    /// key is never delimited.
    #[must_use]
    pub fn join(&self, delimiter: &str) -> String {
        let key = match self {
            KeyParts::StandardNumber(token) => token.clone(),
            KeyParts::Composite {
                title,
                year,
                publisher,
                record_type,
                author,
                electronic,
            } => {
                let mut buf = [0; 4];
                let electronic = electronic.encode_utf8(&mut buf);
                let mut key = String::with_capacity(90 + 6 * delimiter.len());
                for component in [
                    title.as_str(),
                    year.as_str(),
                    publisher.as_str(),
                    record_type.as_str(),
                    author.as_str(),
                    electronic,
                ] {
                    key.push_str(delimiter);
                    key.push_str(component);
                }
                key
            },
        };
        key.to_lowercase()
    }
}

/// Standard number or composite key, as used for GoldRush-style deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoldRushKey {
    delimiter: String,
}

impl GoldRushKey {
    /// Create a strategy producing production keys (no delimiter).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strategy that separates composite components with `delimiter`.
    ///
    /// Useful when inspecting keys by eye; keys built this way do not match
    /// undelimited ones.
    #[must_use]
    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        GoldRushKey {
            delimiter: delimiter.into(),
        }
    }

    /// The component delimiter.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Work out the key components for a record without joining them.
    #[must_use]
    pub fn parts(&self, record: &Record) -> KeyParts {
        if let Some((tag, number)) = components::find_standard_number(record) {
            tracing::debug!(tag, "Using standard number key");
            return KeyParts::StandardNumber(components::standard_number(tag, number));
        }

        tracing::debug!("No standard number, using composite key");
        let parts = KeyParts::Composite {
            title: components::title(&[
                record.get_relevant_subfield("245", 'a'),
                record.get_relevant_subfield("245", 'b'),
                record.get_relevant_subfield("245", 'p'),
            ]),
            year: components::publication_year(&[
                record.get_field("008", None),
                record.get_relevant_subfield("264", 'c'),
                record.get_relevant_subfield("260", 'c'),
            ]),
            publisher: components::publisher_name(&[
                record.get_relevant_subfield("264", 'b'),
                record.get_relevant_subfield("260", 'b'),
            ]),
            record_type: components::record_type(&record.leader),
            author: components::author(&[
                record.get_field("100", Some('a')),
                record.get_field("110", Some('a')),
                record.get_field("111", Some('a')),
                record.get_field("130", Some('a')),
            ]),
            electronic: components::electronic_indicator(record),
        };
        tracing::trace!(?parts, "Composite key parts");
        parts
    }
}

impl MatchKeyStrategy for GoldRushKey {
    fn name(&self) -> &'static str {
        "goldrush"
    }

    fn matchkey(&self, record: &Record) -> String {
        self.parts(record).join(&self.delimiter)
    }
}

/// Always returns the empty key.
///
/// The input is never inspected, so even invalid JSON yields `""`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyKey;

impl MatchKeyStrategy for EmptyKey {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn matchkey(&self, _record: &Record) -> String {
        String::new()
    }

    fn matchkey_json(&self, _input: &str) -> Result<String> {
        Ok(String::new())
    }
}

/// Returns a new random UUID (lower-case, hyphenated) on every call.
///
/// Callers may only rely on distinct calls producing distinct keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniqueKey;

impl MatchKeyStrategy for UniqueKey {
    fn name(&self) -> &'static str {
        "unique"
    }

    fn matchkey(&self, _record: &Record) -> String {
        Uuid::new_v4().to_string()
    }

    fn matchkey_json(&self, _input: &str) -> Result<String> {
        Ok(Uuid::new_v4().to_string())
    }
}

/// Derive the production GoldRush key for a JSON envelope.
///
/// # Errors
///
/// See [`marcjson::parse_envelope`].
pub fn matchkey(input: &str) -> Result<String> {
    GoldRushKey::new().matchkey_json(input)
}
