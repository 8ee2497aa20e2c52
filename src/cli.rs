//! CLI: render declarations, check one pair, or run fixture suites.
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use sigtype::Type;
use sigtype::decl::{self, DeclError};
use sigtype::reflect::{ClassRegistry, RegistryFile};
use sigtype::suite::{self, Outcome, SuiteReport};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// answer whether one declared type is assignable to another, and render declarations canonically
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the canonical rendering of a declaration
    Render(RenderCmd),
    /// check whether a candidate declaration is assignable to a target
    Check(CheckCmd),
    /// run fixture files of expected assignability outcomes
    Suite(SuiteCmd),
}

#[derive(Args, Debug, Clone)]
struct ClassSettings {
    /// JSON class registry (`{"classes": [...], "functions": [...]}`), layered over the builtin classes
    #[arg(long)]
    classes: Option<PathBuf>,

    /// start from an empty registry instead of the builtin classes
    #[arg(long, default_value_t = false)]
    no_builtin: bool,
}

#[derive(clap::Parser, Debug)]
struct RenderCmd {
    /// declaration text, e.g. `string|int|null`
    decl: String,

    /// render in return position (`: T`)
    #[arg(long, default_value_t = false)]
    return_type: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckCmd {
    #[command(flatten)]
    class_settings: ClassSettings,

    /// declared target type
    #[arg(long)]
    target: String,

    /// candidate type declaration
    #[arg(long)]
    candidate: String,
}

#[derive(clap::Parser, Debug)]
struct SuiteCmd {
    #[command(flatten)]
    class_settings: ClassSettings,

    /// One or more fixture files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// print the report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl ClassSettings {
    fn load(&self) -> Result<ClassRegistry> {
        let mut registry = if self.no_builtin {
            ClassRegistry::new()
        } else {
            ClassRegistry::builtin()
        };
        if let Some(path) = self.classes.as_ref() {
            registry.extend(RegistryFile::from_path(path)?);
        }
        tracing::debug!(classes = registry.len(), "loaded class registry");
        Ok(registry)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Returns the process exit code: 0 on success, 1 when `check` finds the
    /// candidate not assignable or `suite` has failing cases. Errors (bad
    /// declarations, unresolvable classes, unreadable files) are returned and
    /// `main` exits with 2.
    pub fn run(&self) -> Result<i32> {
        match &self.cmd {
            Command::Render(target) => {
                let ty = decl::parse(&target.decl)?;
                if target.return_type {
                    println!("{}", ty.as_return_type_declaration());
                } else {
                    println!("{}", ty.as_string());
                }
                Ok(0)
            }
            Command::Check(target) => {
                let classes = target.class_settings.load()?;
                let declared = parse_declaration("target", &target.target)?;
                let candidate = parse_declaration("candidate", &target.candidate)?;
                let assignable = declared.is_assignable(&candidate, &classes)?;
                println!("{assignable}");
                Ok(if assignable { 0 } else { 1 })
            }
            Command::Suite(target) => {
                let classes = target.class_settings.load()?;
                let paths = resolve_file_path_patterns(&target.input)?;
                let report = suite::run_files(&paths, &classes)?;
                if target.json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print_report(&report);
                }
                Ok(if report.failed() == 0 { 0 } else { 1 })
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn parse_declaration(role: &str, text: &str) -> Result<Type> {
    decl::parse(text).map_err(|error| {
        let what = match &error {
            DeclError::Type(inner) if inner.is_construction_violation() => "malformed union in",
            _ => "invalid",
        };
        anyhow::Error::new(error).context(format!("{what} {role} `{text}`"))
    })
}

fn print_report(report: &SuiteReport) {
    for case in &report.cases {
        let status = if case.passed { "ok".green() } else { "FAIL".red().bold() };
        let outcome = match &case.outcome {
            Outcome::Assignable => "assignable".to_string(),
            Outcome::Rejected => "rejected".to_string(),
            Outcome::Error(message) => format!("error: {message}"),
        };
        println!(
            "{status} {} {} ({} ← {}) → {outcome}",
            case.file.display().to_string().dimmed(),
            case.name,
            case.target,
            case.candidate,
        );
    }
    let summary = format!("{} passed, {} failed", report.passed(), report.failed());
    if report.failed() == 0 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red());
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(entry?);
            }
            if !matched_any {
                return Err(anyhow!("glob pattern matched no files: {pattern}"));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_violations_are_named_in_context() {
        let err = parse_declaration("target", "int|void").unwrap_err();
        assert_eq!(err.to_string(), "malformed union in target `int|void`");
        assert_eq!(
            err.root_cause().to_string(),
            "A union type must not be composed of a void type"
        );
    }

    #[test]
    fn other_declaration_errors_stay_generic() {
        let err = parse_declaration("candidate", "9lives").unwrap_err();
        assert_eq!(err.to_string(), "invalid candidate `9lives`");
        assert!(parse_declaration("candidate", "?int").is_ok());
    }

    #[test]
    fn unresolvable_class_is_an_error_not_a_rejection() {
        let cli = CommandLineInterface::parse_from([
            "sigtype", "check", "--target", "iterable", "--candidate", "App\\Ghost",
        ]);
        let err = cli.run().unwrap_err();
        assert!(err.to_string().contains("App\\Ghost"));
    }
}
