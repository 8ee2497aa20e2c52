//! Fixture-driven assignability checks.
//!
//! A fixture file lists cases, each a target declaration, a candidate
//! (declaration or sample value) and the expected outcome. Files may carry
//! their own classes, layered over the registry the caller passes in.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::decl;
use crate::path_de;
use crate::reflect::{ClassRegistry, RegistryFile};
use crate::types::Type;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Deserialize)]
pub struct SuiteFile {
    #[serde(default)]
    pub classes: Option<RegistryFile>,
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Case {
    pub name: String,
    pub target: String,
    /// Candidate declaration, e.g. `?int`.
    #[serde(default)]
    pub candidate: Option<String>,
    /// Candidate sample value; used when `candidate` is absent. An explicit
    /// `null` is a sample, not an absent field.
    #[serde(default, deserialize_with = "present_value")]
    pub candidate_value: Option<Value>,
    pub expect: Expect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expect {
    Assignable,
    Rejected,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "lowercase")]
pub enum Outcome {
    Assignable,
    Rejected,
    Error(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub file: PathBuf,
    pub name: String,
    pub target: String,
    pub candidate: String,
    pub expect: Expect,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Outcome {
    fn matches(&self, expect: Expect) -> bool {
        matches!(
            (self, expect),
            (Outcome::Assignable, Expect::Assignable)
                | (Outcome::Rejected, Expect::Rejected)
                | (Outcome::Error(_), Expect::Error)
        )
    }
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|c| !c.passed)
    }
}

fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn candidate_of(case: &Case) -> Result<Type, String> {
    match (&case.candidate, &case.candidate_value) {
        (Some(decl), _) => decl::parse(decl).map_err(|e| e.to_string()),
        (None, Some(value)) => Ok(Type::from_value(value, false)),
        (None, None) => Err("case has neither `candidate` nor `candidate_value`".to_string()),
    }
}

pub fn run_case(file: &Path, case: &Case, classes: &ClassRegistry) -> CaseReport {
    let candidate = case
        .candidate
        .clone()
        .or_else(|| case.candidate_value.as_ref().map(Value::to_string))
        .unwrap_or_default();

    let outcome = decl::parse(&case.target)
        .map_err(|e| e.to_string())
        .and_then(|target| {
            let other = candidate_of(case)?;
            target.is_assignable(&other, classes).map_err(|e| e.to_string())
        });
    let outcome = match outcome {
        Ok(true) => Outcome::Assignable,
        Ok(false) => Outcome::Rejected,
        Err(message) => Outcome::Error(message),
    };

    let passed = outcome.matches(case.expect);
    debug!(case = %case.name, ?outcome, passed, "evaluated case");
    CaseReport {
        file: file.to_path_buf(),
        name: case.name.clone(),
        target: case.target.clone(),
        candidate,
        expect: case.expect,
        outcome,
        passed,
    }
}

pub fn load_file(path: &Path) -> Result<SuiteFile> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture file {}", path.display()))?;
    path_de::from_str_with_path(&src)
        .with_context(|| format!("failed to parse fixture file {}", path.display()))
}

pub fn run_file(path: &Path, base: &ClassRegistry) -> Result<Vec<CaseReport>> {
    let suite = load_file(path)?;
    let mut classes = base.clone();
    if let Some(extra) = suite.classes {
        classes.extend(extra);
    }
    info!(file = %path.display(), cases = suite.cases.len(), "running fixture file");
    Ok(suite.cases.iter().map(|case| run_case(path, case, &classes)).collect())
}

/// Runs every file in parallel; report order follows `paths`.
pub fn run_files(paths: &[PathBuf], base: &ClassRegistry) -> Result<SuiteReport> {
    let per_file = paths
        .par_iter()
        .map(|path| run_file(path, base))
        .collect::<Result<Vec<_>>>()?;
    Ok(SuiteReport { cases: per_file.into_iter().flatten().collect() })
}

/// Every `*.json` file directly inside `dir`, sorted by name.
pub fn fixture_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.json");
    let pattern = pattern.to_string_lossy();
    let mut out = glob::glob(&pattern)
        .with_context(|| format!("invalid fixture pattern {pattern}"))?
        .collect::<Result<Vec<_>, _>>()?;
    out.sort();
    Ok(out)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
