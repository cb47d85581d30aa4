//! MARC record leader.
//!
//! The MARC leader is a 24-character fixed-length header at the start of every
//! MARC record. Match key derivation only reads one position from it, so the
//! leader is kept as the raw string it arrived as rather than being parsed into
//! its individual positions.
//!
//! # Structure
//!
//! - Positions 0-4: Record length (5 digits)
//! - Position 5: Record status
//! - Position 6: Record type (a = language material, c = music, etc.)
//! - Position 7: Bibliographic level (m = monograph, s = serial, etc.)
//! - Positions 8-23: Coding, counts, base address, encoding level and reserved

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder leader used when a record arrives without one.
///
/// Describes a new language material monograph.
pub const DEFAULT_LEADER: &str = "00000nam a22000000a 4500";

/// Character offset of the type-of-record code.
const RECORD_TYPE_POSITION: usize = 6;

/// MARC leader as carried in MARC-in-JSON.
///
/// Leaders found in the wild are not always 24 characters long, so no length
/// is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leader(String);

impl Leader {
    /// Create a leader from its raw string form.
    ///
    /// An empty string yields the [`DEFAULT_LEADER`].
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::default()
        } else {
            Leader(value)
        }
    }

    /// The raw leader string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the leader in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the leader is empty. Never true for leaders built with [`Leader::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Type of record code (position 6).
    ///
    /// Only leaders longer than 10 characters are trusted to carry one.
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_matchkey::Leader;
    ///
    /// assert_eq!(Leader::new("00000cam a22000000a 4500").record_type(), Some('a'));
    /// assert_eq!(Leader::new("00000n").record_type(), None);
    /// ```
    #[must_use]
    pub fn record_type(&self) -> Option<char> {
        if self.len() > 10 {
            self.0.chars().nth(RECORD_TYPE_POSITION)
        } else {
            None
        }
    }
}

impl Default for Leader {
    fn default() -> Self {
        Leader(DEFAULT_LEADER.to_string())
    }
}

impl fmt::Display for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
