//! # marc-matchkey: match keys for MARC records
//!
//! Derives deterministic match keys from MARC-in-JSON bibliographic records so
//! that duplicate or equivalent records from different library catalogs can be
//! clustered together.
//!
//! A record with an ISBN (020), ISSN (022) or other standard identifier (024)
//! is keyed by that number. Any other record gets a composite key built from
//! its normalized title, publication year, publisher, record type, author and
//! an electronic/print indicator.
//!
//! ## Quick Start
//!
//! ```
//! use marc_matchkey::matchkey;
//!
//! let input = r#"{
//!     "marc": {
//!         "leader": "00000cam a22000000a 4500",
//!         "fields": [
//!             {"245": {"ind1": "1", "ind2": "4", "subfields": [{"a": "The Great Gatsby"}]}}
//!         ]
//!     }
//! }"#;
//!
//! let key = matchkey(input)?;
//! assert!(key.starts_with("greatgatsby___"));
//! assert!(key.ends_with("0000_____a_____p"));
//! # Ok::<(), marc_matchkey::MatchKeyError>(())
//! ```
//!
//! ## Choosing a strategy
//!
//! ```
//! use marc_matchkey::config::MatchKeyConfig;
//! use marc_matchkey::MatchKeyStrategy;
//!
//! let config = MatchKeyConfig::from_toml_str(r#"
//!     id = "singletons"
//!     method = "empty"
//! "#)?;
//! let strategy = config.strategy();
//! assert_eq!(strategy.matchkey_json("{}")?, "");
//! # Ok::<(), marc_matchkey::MatchKeyError>(())
//! ```
//!
//! ## Modules
//!
//! - [`record`] — Record structures (`Record`, `Field`, `Subfield`)
//! - [`leader`] — MARC record leader
//! - [`marcjson`] — MARC-in-JSON envelope loading
//! - [`field_access`] — Field and subfield lookups
//! - [`normalize`] — Punctuation folding, diacritic removal, padding
//! - [`components`] — Builders for each key component
//! - [`matchkey`](mod@matchkey) — Key strategies
//! - [`config`] — Match key configuration
//! - [`batch`] — Parallel keying of many records
//! - [`error`] — Error types and result type

pub mod batch;
pub mod components;
pub mod config;
pub mod error;
pub mod field_access;
pub mod leader;
pub mod marcjson;
pub mod matchkey;
pub mod normalize;
pub mod record;

pub use config::{MatchKeyConfig, MatchKeyMethod, UpdateMode};
pub use error::{MatchKeyError, Result};
pub use field_access::FieldAccess;
pub use leader::Leader;
pub use matchkey::{matchkey, EmptyKey, GoldRushKey, KeyParts, MatchKeyStrategy, UniqueKey};
pub use record::{Field, FieldBuilder, FieldValue, Record, RecordBuilder, Subfield};
