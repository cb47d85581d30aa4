//! Common test helpers shared across the integration test suite.

#![allow(dead_code)]

use marc_matchkey::marcjson;
use serde_json::{json, Value};

/// Directory holding the bare MARC-in-JSON fixture records.
pub const RECORDS_DIR: &str = "tests/data/records";

/// Reads a fixture record and wraps it in a `{"marc": ...}` envelope string,
/// the way records are handed to a match key strategy during ingest.
pub fn load_envelope(file_name: &str) -> String {
    let path = format!("{RECORDS_DIR}/{file_name}");
    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"));
    let marc: Value = serde_json::from_str(&content).expect("fixture is valid JSON");
    marcjson::wrap_envelope(marc).to_string()
}

/// Builds an envelope string from a list of field objects and an optional leader.
pub fn envelope(leader: Option<&str>, fields: &[Value]) -> String {
    let mut marc = json!({ "fields": fields });
    if let Some(leader) = leader {
        marc["leader"] = json!(leader);
    }
    marcjson::wrap_envelope(marc).to_string()
}

/// A data field object: `{tag: {"ind1": " ", "ind2": " ", "subfields": [...]}}`.
pub fn data_field(tag: &str, subfields: &[(&str, &str)]) -> Value {
    let subfields: Vec<Value> = subfields
        .iter()
        .map(|(code, value)| json!({ *code: *value }))
        .collect();
    json!({ tag: { "ind1": " ", "ind2": " ", "subfields": subfields } })
}

/// A literal field object: `{tag: value}`.
pub fn control_field(tag: &str, value: &str) -> Value {
    json!({ tag: value })
}

/// `n` underscores.
pub fn pad(n: usize) -> String {
    "_".repeat(n)
}
