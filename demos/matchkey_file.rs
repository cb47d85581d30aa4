//! Compute match keys for a file of MARC-in-JSON envelopes
//!
//! Reads one `{"marc": {...}}` envelope per line and prints `<n>\t<key>`
//! for the n-th non-blank line. An optional second argument names a TOML or JSON match key
//! configuration; without it the production GoldRush key is used.
//!
//! ```text
//! cargo run --example matchkey_file -- demos/data/records.jsonl demos/data/debug.toml
//! RUST_LOG=marc_matchkey=debug cargo run --example matchkey_file -- records.jsonl
//! ```

use anyhow::{bail, Context};
use marc_matchkey::batch::matchkeys_parallel;
use marc_matchkey::{MatchKeyConfig, MatchKeyMethod, MatchKeyStrategy};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input_path) = args.next() else {
        bail!("usage: matchkey_file <records.jsonl> [config.toml|config.json]");
    };

    let config = match args.next() {
        Some(path) => MatchKeyConfig::load(&path)
            .with_context(|| format!("failed to load configuration {path}"))?,
        None => MatchKeyConfig::new("goldrush", MatchKeyMethod::GoldRush),
    };
    let strategy = config.strategy();

    let content = std::fs::read_to_string(&input_path)
        .with_context(|| format!("failed to read {input_path}"))?;
    let lines: Vec<&str> = content.lines().filter(|line| !line.trim().is_empty()).collect();

    let keys = matchkeys_parallel(strategy.as_ref(), &lines);
    let mut failures = 0;
    for (line, key) in keys.iter().enumerate() {
        match key {
            Ok(key) => println!("{}\t{key}", line + 1),
            Err(e) => {
                failures += 1;
                eprintln!("{}\terror: {e}", line + 1);
            },
        }
    }

    eprintln!(
        "{} records keyed with '{}' ({}), {failures} failed",
        lines.len() - failures,
        config.id,
        strategy.name()
    );
    Ok(())
}
