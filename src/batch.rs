//! Parallel match key derivation using Rayon.
//!
//! Key derivation is a pure function of one record, so batches are keyed with
//! Rayon's work-stealing pool, one task per input. Output order always matches
//! input order. The thread pool respects the `RAYON_NUM_THREADS` env var.
//!
//! # Examples
//!
//! ```
//! use marc_matchkey::batch::matchkeys_parallel;
//! use marc_matchkey::GoldRushKey;
//!
//! let inputs = vec![
//!     r#"{"marc": {"fields": [{"022": {"subfields": [{"a": "0028-0836"}]}}]}}"#,
//!     r#"{"marc": {}}"#,
//! ];
//! let keys = matchkeys_parallel(&GoldRushKey::new(), &inputs);
//! assert_eq!(keys[0].as_deref().ok(), Some("022_00280836"));
//! assert!(keys[1].is_err());
//! ```

use crate::error::Result;
use crate::matchkey::MatchKeyStrategy;
use crate::record::Record;
use rayon::prelude::*;

/// Key a batch of JSON envelopes in parallel.
///
/// Each input gets its own result, so one malformed document does not stop
/// the rest of the batch.
#[tracing::instrument(skip_all, fields(strategy = strategy.name(), count = inputs.len()))]
pub fn matchkeys_parallel<S, I>(strategy: &S, inputs: &[I]) -> Vec<Result<String>>
where
    S: MatchKeyStrategy + ?Sized,
    I: AsRef<str> + Sync,
{
    let results: Vec<Result<String>> = inputs
        .par_iter()
        .map(|input| strategy.matchkey_json(input.as_ref()))
        .collect();

    let failed = results.iter().filter(|result| result.is_err()).count();
    if failed > 0 {
        tracing::warn!(failed, "Some documents could not be keyed");
    }
    results
}

/// Key a batch of JSON envelopes in parallel, failing on the first bad input.
///
/// # Errors
///
/// Returns the error of a failed input if any input cannot be keyed. Which
/// failure is reported is unspecified when several inputs fail.
#[tracing::instrument(skip_all, fields(strategy = strategy.name(), count = inputs.len()))]
pub fn matchkeys_parallel_strict<S, I>(strategy: &S, inputs: &[I]) -> Result<Vec<String>>
where
    S: MatchKeyStrategy + ?Sized,
    I: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| strategy.matchkey_json(input.as_ref()))
        .collect()
}

/// Key already loaded records in parallel.
#[must_use]
pub fn record_matchkeys_parallel<S>(strategy: &S, records: &[Record]) -> Vec<String>
where
    S: MatchKeyStrategy + ?Sized,
{
    records
        .par_iter()
        .map(|record| strategy.matchkey(record))
        .collect()
}
