//! Runs the bundled fixture corpus against the library.
//!
//! Usage: `cargo run -p dev-test-runner -- [NAME_REGEX]`
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use sigtype::ClassRegistry;
use sigtype::suite::{self, Outcome};

fn main() -> Result<()> {
    let filter = std::env::args()
        .nth(1)
        .map(|pattern| Regex::new(&pattern).with_context(|| format!("bad filter `{pattern}`")))
        .transpose()?;

    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
    let files = suite::fixture_files(&fixtures)?;
    let report = suite::run_files(&files, &ClassRegistry::builtin())?;

    let mut ran = 0usize;
    let mut failed = 0usize;
    for case in &report.cases {
        if filter.as_ref().is_some_and(|rx| !rx.is_match(&case.name)) {
            continue;
        }
        ran += 1;
        if case.passed {
            continue;
        }
        failed += 1;
        let got = match &case.outcome {
            Outcome::Error(message) => format!("error ({message})"),
            other => serde_json::to_string(other)?,
        };
        eprintln!("❌ {}: {} ← {} expected {:?}, got {got}", case.name, case.target, case.candidate, case.expect);
    }

    eprintln!("ran {ran} cases, {failed} failed");
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
