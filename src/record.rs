//! MARC bibliographic record structures.
//!
//! This module provides the record types match keys are derived from:
//! - [`Record`] — A leader plus the record's fields in document order
//! - [`Field`] — A tagged field whose value is a [`FieldValue`]
//! - [`Subfield`] — Named data elements within data fields
//!
//! Unlike ISO 2709 tooling, control and data fields are not split by tag
//! number. MARC-in-JSON decides the shape of each field by its value: a string
//! is a literal (control) value, an object with `subfields` is a data field.
//!
//! # Examples
//!
//! ```
//! use marc_matchkey::{Field, Leader, Record};
//!
//! let record = Record::builder(Leader::default())
//!     .control_field_str("001", "12345")
//!     .field(
//!         Field::builder("245".to_string(), '1', '0')
//!             .subfield_str('a', "The Great Gatsby")
//!             .build(),
//!     )
//!     .build();
//!
//! assert_eq!(record.fields().count(), 2);
//! ```

use crate::leader::Leader;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A MARC bibliographic record
///
/// Fields are kept in a single sequence in the order they appeared in the
/// source document. Accessors that pick "the first" field of a tag depend on
/// that order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Record leader
    pub leader: Leader,
    /// All fields, in document order
    pub fields: Vec<Field>,
}

/// A field in a MARC record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field tag (3 characters)
    pub tag: String,
    /// Literal value or subfield list
    pub value: FieldValue,
}

/// The value carried by a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Literal string value (control fields such as 001 or 008)
    Control(String),
    /// Indicators and an ordered list of subfields
    Data {
        /// First indicator
        indicator1: char,
        /// Second indicator
        indicator2: char,
        /// Subfields (stored in `SmallVec` to avoid allocation for typical fields with 4 or fewer subfields)
        subfields: SmallVec<[Subfield; 4]>,
    },
}

/// A subfield within a data field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value
    pub value: String,
}

impl Record {
    /// Create a new MARC record with the given leader
    #[must_use]
    pub fn new(leader: Leader) -> Self {
        Record {
            leader,
            fields: Vec::new(),
        }
    }

    /// Create a builder for fluently constructing MARC records
    #[must_use]
    pub fn builder(leader: Leader) -> RecordBuilder {
        RecordBuilder {
            record: Record::new(leader),
        }
    }

    /// Append a field
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Append a literal field using string slices
    pub fn add_control_field_str(&mut self, tag: &str, value: &str) {
        self.add_field(Field::control(tag.to_string(), value.to_string()));
    }

    /// Iterate over all fields in document order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Iterate over fields matching a specific tag, in document order
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_matchkey::{Field, Leader, Record};
    ///
    /// let mut record = Record::new(Leader::default());
    /// record.add_control_field_str("007", "cr |n|||||||||");
    /// record.add_field(Field::builder("650".to_string(), ' ', '0').subfield_str('a', "Jazz").build());
    ///
    /// let subjects: Vec<&str> = record
    ///     .fields_by_tag("650")
    ///     .filter_map(|field| field.get_subfield('a'))
    ///     .collect();
    /// assert_eq!(subjects, ["Jazz"]);
    /// ```
    pub fn fields_by_tag<'a, 't>(&'a self, tag: &'t str) -> impl Iterator<Item = &'a Field> + 't
    where
        'a: 't,
    {
        self.fields.iter().filter(move |field| field.tag == tag)
    }
}

/// Builder for fluently constructing MARC records
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Add a literal field using string slices
    #[must_use]
    pub fn control_field_str(mut self, tag: &str, value: &str) -> Self {
        self.record.add_control_field_str(tag, value);
        self
    }

    /// Add a field to the record being built
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.record.add_field(field);
        self
    }

    /// Build the record
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

impl Field {
    /// Create a literal (control) field
    #[must_use]
    pub fn control(tag: String, value: String) -> Self {
        Field {
            tag,
            value: FieldValue::Control(value),
        }
    }

    /// Create an empty data field
    #[must_use]
    pub fn new(tag: String, indicator1: char, indicator2: char) -> Self {
        Field {
            tag,
            value: FieldValue::Data {
                indicator1,
                indicator2,
                subfields: SmallVec::new(),
            },
        }
    }

    /// Create a builder for constructing data fields fluently
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_matchkey::Field;
    ///
    /// let field = Field::builder("245".to_string(), '1', '0')
    ///     .subfield_str('a', "The Great Gatsby")
    ///     .subfield_str('c', "F. Scott Fitzgerald")
    ///     .build();
    /// assert_eq!(field.get_subfield('c'), Some("F. Scott Fitzgerald"));
    /// ```
    #[must_use]
    pub fn builder(tag: String, indicator1: char, indicator2: char) -> FieldBuilder {
        FieldBuilder {
            field: Field::new(tag, indicator1, indicator2),
        }
    }

    /// Add a subfield. Has no effect on literal fields.
    pub fn add_subfield(&mut self, code: char, value: String) {
        if let FieldValue::Data { subfields, .. } = &mut self.value {
            subfields.push(Subfield { code, value });
        }
    }

    /// Whether this is a literal (control) field
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(self.value, FieldValue::Control(_))
    }

    /// Literal value, if this is a control field
    #[must_use]
    pub fn control_value(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Control(value) => Some(value),
            FieldValue::Data { .. } => None,
        }
    }

    /// Subfields of a data field; empty for literal fields
    #[must_use]
    pub fn subfields(&self) -> &[Subfield] {
        match &self.value {
            FieldValue::Control(_) => &[],
            FieldValue::Data { subfields, .. } => subfields,
        }
    }

    /// Get first value for a subfield code
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields()
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }
}

/// Builder for fluently constructing data fields
#[derive(Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Add a subfield
    #[must_use]
    pub fn subfield(mut self, code: char, value: String) -> Self {
        self.field.add_subfield(code, value);
        self
    }

    /// Add a subfield using a string slice
    #[must_use]
    pub fn subfield_str(self, code: char, value: &str) -> Self {
        self.subfield(code, value.to_string())
    }

    /// Build the field
    #[must_use]
    pub fn build(self) -> Field {
        self.field
    }
}
