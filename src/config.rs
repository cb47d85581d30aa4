//! Match key configuration.
//!
//! A [`MatchKeyConfig`] names a match key and selects the strategy that
//! computes it. Configurations are plain serde structs and can be read from
//! TOML or JSON:
//!
//! ```toml
//! id = "goldrush"
//! method = "goldrush"
//! update = "ingest"
//! delimiter = "|"
//! ```

use crate::error::{MatchKeyError, Result};
use crate::matchkey::{EmptyKey, GoldRushKey, MatchKeyStrategy, UniqueKey};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which strategy derives the key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKeyMethod {
    /// Standard number or composite key
    #[default]
    #[serde(alias = "deepdish")]
    GoldRush,
    /// Always the empty key
    #[serde(alias = "malort")]
    Empty,
    /// A fresh UUID per record
    Unique,
}

/// When keys are recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Keys are computed as records are ingested
    #[default]
    Ingest,
    /// Keys are only computed on explicit request
    Manual,
}

/// Configuration for one match key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchKeyConfig {
    /// Identifier of the match key
    pub id: String,
    /// Strategy deriving the key
    #[serde(default)]
    pub method: MatchKeyMethod,
    /// Kind of arguments passed to the matcher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Identifier of an external matcher module, if one is used instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    /// Free-form parameters passed through to the matcher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// When keys are recomputed
    #[serde(default)]
    pub update: UpdateMode,
    /// Component delimiter for debugging composite keys; empty in production
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub delimiter: String,
}

impl MatchKeyConfig {
    /// Configuration with the given id and method and defaults elsewhere.
    #[must_use]
    pub fn new(id: impl Into<String>, method: MatchKeyMethod) -> Self {
        MatchKeyConfig {
            id: id.into(),
            method,
            args: None,
            matcher: None,
            params: None,
            update: UpdateMode::default(),
            delimiter: String::new(),
        }
    }

    /// Parse a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MatchKeyError::Config`] if the TOML is invalid or does not
    /// describe a match key configuration.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).map_err(|e| MatchKeyError::Config(e.to_string()))?;
        config.validate()
    }

    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MatchKeyError::Config`] if the JSON does not describe a match
    /// key configuration.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(input).map_err(|e| MatchKeyError::Config(e.to_string()))?;
        config.validate()
    }

    /// Load a configuration file, choosing the format by extension
    /// (`.json` for JSON, anything else is read as TOML).
    ///
    /// # Errors
    ///
    /// Returns [`MatchKeyError::IoError`] if the file cannot be read, or
    /// [`MatchKeyError::Config`] if its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loading match key configuration");
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    fn validate(self) -> Result<Self> {
        if self.id.trim().is_empty() {
            return Err(MatchKeyError::Config("match key id must not be empty".to_string()));
        }
        Ok(self)
    }

    /// Build the configured strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_matchkey::config::{MatchKeyConfig, MatchKeyMethod};
    /// use marc_matchkey::MatchKeyStrategy;
    ///
    /// let config = MatchKeyConfig::new("singletons", MatchKeyMethod::Empty);
    /// assert_eq!(config.strategy().name(), "empty");
    /// ```
    #[must_use]
    pub fn strategy(&self) -> Box<dyn MatchKeyStrategy> {
        match self.method {
            MatchKeyMethod::GoldRush => Box::new(GoldRushKey::with_delimiter(self.delimiter.as_str())),
            MatchKeyMethod::Empty => Box::new(EmptyKey),
            MatchKeyMethod::Unique => Box::new(UniqueKey),
        }
    }
}
