//! Read-only field lookups used by match key derivation.
//!
//! This module provides the [`FieldAccess`] trait, implemented for [`Record`].
//! The lookups follow MARC-in-JSON presence rules: a literal field whose value
//! is empty does not count as carrying its tag, and an empty subfield value
//! does not count as a match for its code.
//!
//! The two extraction methods differ in which field they look at:
//!
//! - [`FieldAccess::get_field`] only ever inspects the *first* field with the tag.
//! - [`FieldAccess::get_relevant_subfield`] walks repeated fields and returns
//!   from the first one that actually has the subfield.
//!
//! # Examples
//!
//! ```
//! use marc_matchkey::{Field, FieldAccess, Leader, Record};
//!
//! let record = Record::builder(Leader::default())
//!     .field(Field::builder("020".to_string(), ' ', ' ').subfield_str('q', "pbk.").build())
//!     .field(Field::builder("020".to_string(), ' ', ' ').subfield_str('a', "0306406152").build())
//!     .build();
//!
//! assert_eq!(record.get_field("020", Some('a')), None);
//! assert_eq!(record.get_relevant_subfield("020", 'a'), Some("0306406152"));
//! ```

use crate::record::{Field, FieldValue, Record};

/// Lookups over a record's fields. All methods are read-only.
pub trait FieldAccess {
    /// True if any present field carries `tag`.
    fn has_field(&self, tag: &str) -> bool;

    /// Value from the first present field with `tag`.
    ///
    /// For a data field this is the first non-empty subfield with `code`, or
    /// `None` when `code` is `None` or nothing matches. For a literal field it
    /// is the literal value, whatever `code` is.
    fn get_field(&self, tag: &str, code: Option<char>) -> Option<&str>;

    /// First non-empty `code` subfield found while scanning `tag` fields in
    /// document order. Fields without the subfield are skipped.
    fn get_relevant_subfield(&self, tag: &str, code: char) -> Option<&str>;
}

impl FieldAccess for Record {
    fn has_field(&self, tag: &str) -> bool {
        self.fields.iter().any(|field| is_present(field, tag))
    }

    fn get_field(&self, tag: &str, code: Option<char>) -> Option<&str> {
        let field = self.fields.iter().find(|field| is_present(field, tag))?;
        match &field.value {
            FieldValue::Control(value) => Some(value),
            FieldValue::Data { .. } => code.and_then(|code| first_subfield(field, code)),
        }
    }

    fn get_relevant_subfield(&self, tag: &str, code: char) -> Option<&str> {
        self.fields
            .iter()
            .filter(|field| is_present(field, tag))
            .find_map(|field| first_subfield(field, code))
    }
}

/// Empty literal fields count as absent.
fn is_present(field: &Field, tag: &str) -> bool {
    field.tag == tag
        && match &field.value {
            FieldValue::Control(value) => !value.is_empty(),
            FieldValue::Data { .. } => true,
        }
}

fn first_subfield(field: &Field, code: char) -> Option<&str> {
    field
        .subfields()
        .iter()
        .find(|sf| sf.code == code && !sf.value.is_empty())
        .map(|sf| sf.value.as_str())
}
