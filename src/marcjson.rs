//! MARC-in-JSON loading and serialization.
//!
//! Match key input arrives as an *envelope*: a JSON object whose `marc` member
//! holds a MARC-in-JSON record.
//!
//! # Format
//!
//! ```json
//! {
//!   "marc": {
//!     "leader": "00000cam a22000000a 4500",
//!     "fields": [
//!       { "001": "ocm12345" },
//!       { "245": { "ind1": "1", "ind2": "0", "subfields": [ { "a": "Title" } ] } }
//!     ]
//!   }
//! }
//! ```
//!
//! - A field whose value is a string is a literal (control) field.
//! - A field whose value is an object is a data field; its `subfields` array holds
//!   single-key `{code: value}` objects.
//! - A missing or empty `leader` is replaced by [`DEFAULT_LEADER`](crate::leader::DEFAULT_LEADER).
//!
//! Shape is checked once here. The only hard failures are a missing or
//! non-array `fields` member, and envelopes that are not JSON objects carrying
//! a `marc` object. Individual field entries that do not fit the format are
//! skipped.

use crate::error::{MatchKeyError, Result};
use crate::leader::Leader;
use crate::record::{Field, FieldValue, Record};
use serde_json::{json, Map, Value};

/// Parse a JSON envelope string into a record.
///
/// # Examples
///
/// ```
/// use marc_matchkey::{marcjson, FieldAccess};
///
/// let input = r#"{"marc": {"fields": [{"245": {"subfields": [{"a": "Title"}]}}]}}"#;
/// let record = marcjson::parse_envelope(input)?;
/// assert_eq!(record.get_relevant_subfield("245", 'a'), Some("Title"));
/// assert_eq!(record.leader.as_str(), "00000nam a22000000a 4500");
/// # Ok::<(), marc_matchkey::MatchKeyError>(())
/// ```
///
/// # Errors
///
/// Returns [`MatchKeyError::Json`] for malformed JSON, [`MatchKeyError::InvalidEnvelope`]
/// when there is no `marc` object, and a validation error when `marc.fields` is
/// missing or not an array.
pub fn parse_envelope(input: &str) -> Result<Record> {
    let value: Value = serde_json::from_str(input)?;
    record_from_envelope(&value)
}

/// Parse a bare MARC-in-JSON record string (no envelope) into a record.
///
/// # Errors
///
/// Same as [`parse_envelope`], minus the envelope checks.
pub fn parse_marc(input: &str) -> Result<Record> {
    let value: Value = serde_json::from_str(input)?;
    record_from_marc(&value)
}

/// Convert a decoded envelope into a record.
///
/// # Errors
///
/// See [`parse_envelope`].
pub fn record_from_envelope(envelope: &Value) -> Result<Record> {
    let envelope = envelope.as_object().ok_or_else(|| {
        MatchKeyError::InvalidEnvelope("envelope must be a JSON object".to_string())
    })?;
    let marc = envelope
        .get("marc")
        .filter(|marc| marc.is_object())
        .ok_or_else(|| MatchKeyError::InvalidEnvelope("missing marc object".to_string()))?;
    record_from_marc(marc)
}

/// Convert a decoded MARC-in-JSON object into a record.
///
/// # Errors
///
/// Returns [`MatchKeyError::FieldsMissing`] or [`MatchKeyError::FieldsNotArray`]
/// when the field collection is unusable.
pub fn record_from_marc(marc: &Value) -> Result<Record> {
    let fields = marc.get("fields").ok_or(MatchKeyError::FieldsMissing)?;
    let fields = fields.as_array().ok_or(MatchKeyError::FieldsNotArray)?;

    let leader = match marc.get("leader") {
        Some(Value::String(leader)) => Leader::new(leader.as_str()),
        Some(other) if !other.is_null() => {
            tracing::debug!(leader = %other, "Ignoring non-string leader");
            Leader::default()
        },
        _ => Leader::default(),
    };

    let mut record = Record::new(leader);
    for (index, entry) in fields.iter().enumerate() {
        let Some(entry) = entry.as_object() else {
            tracing::debug!(index, "Skipping field entry that is not an object");
            continue;
        };
        for (tag, value) in entry {
            match field_from_json(tag, value) {
                Some(field) => record.add_field(field),
                None => tracing::debug!(index, tag = %tag, "Skipping malformed field"),
            }
        }
    }

    Ok(record)
}

fn field_from_json(tag: &str, value: &Value) -> Option<Field> {
    if tag.chars().count() != 3 {
        return None;
    }

    match value {
        Value::String(literal) => Some(Field::control(tag.to_string(), literal.clone())),
        Value::Object(data) => {
            let mut field = Field::new(
                tag.to_string(),
                indicator(data, "ind1"),
                indicator(data, "ind2"),
            );
            let subfields = data.get("subfields").and_then(Value::as_array);
            for sf in subfields.into_iter().flatten() {
                let Some(sf) = sf.as_object() else {
                    continue;
                };
                for (code, value) in sf {
                    let mut chars = code.chars();
                    if let (Some(code), None, Some(value)) = (chars.next(), chars.next(), value.as_str()) {
                        field.add_subfield(code, value.to_string());
                    }
                }
            }
            Some(field)
        },
        _ => None,
    }
}

fn indicator(data: &Map<String, Value>, key: &str) -> char {
    data.get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}

/// Convert a record to a MARC-in-JSON object.
#[must_use]
pub fn record_to_marc(record: &Record) -> Value {
    let fields: Vec<Value> = record
        .fields()
        .map(|field| {
            let value = match &field.value {
                FieldValue::Control(literal) => Value::String(literal.clone()),
                FieldValue::Data {
                    indicator1,
                    indicator2,
                    subfields,
                } => {
                    let subfields: Vec<Value> = subfields
                        .iter()
                        .map(|sf| {
                            let mut obj = Map::new();
                            obj.insert(sf.code.to_string(), Value::String(sf.value.clone()));
                            Value::Object(obj)
                        })
                        .collect();
                    json!({
                        "ind1": indicator1.to_string(),
                        "ind2": indicator2.to_string(),
                        "subfields": subfields,
                    })
                },
            };
            let mut obj = Map::new();
            obj.insert(field.tag.clone(), value);
            Value::Object(obj)
        })
        .collect();

    json!({
        "leader": record.leader.as_str(),
        "fields": fields,
    })
}

/// Wrap a MARC-in-JSON object in a `{"marc": ...}` envelope.
#[must_use]
pub fn wrap_envelope(marc: Value) -> Value {
    json!({ "marc": marc })
}

/// Convert a record to a complete envelope.
#[must_use]
pub fn record_to_envelope(record: &Record) -> Value {
    wrap_envelope(record_to_marc(record))
}
