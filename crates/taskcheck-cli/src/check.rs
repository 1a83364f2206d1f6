//! # Check Subcommand
//!
//! Validates task files and reports the diagnostics.
//!
//! ```bash
//! taskcheck check 2024-CH-07-eng.task.md
//! taskcheck check --format json tasks/*.task.md
//! ```
//!
//! ## Exit Status
//!
//! - `0` when no file has an error-severity diagnostic (with `--strict`:
//!   no diagnostic at all).
//! - `1` otherwise, and for files that are not task files or cannot be
//!   read.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use taskcheck_core::{Diagnostic, LineIndex, TaskcheckError, WireDiagnostic, TASK_FILE_EXTENSION};
use taskcheck_schema::Validator;

use crate::config::CheckConfig;
use crate::render::{render_clean, render_diagnostic, render_summary};

/// Arguments for the `taskcheck check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Task files to check (names ending in `.task.md`).
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fail on warnings as well as errors.
    #[arg(long)]
    pub strict: bool,

    /// Maximum number of name suggestions per unrecognized country or
    /// language.
    #[arg(long)]
    pub max_suggestions: Option<usize>,
}

/// How diagnostics are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Annotated source excerpts.
    Text,
    /// One JSON document per file with UTF-16 offsets.
    Json,
}

/// A task file read from disk, ready for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFile {
    /// Path as given.
    pub path: PathBuf,
    /// File name without the `.task.md` extension.
    pub name: String,
    /// Content without a leading byte-order mark.
    pub text: String,
}

/// Per-file JSON report.
#[derive(Debug, Serialize)]
struct FileReport<'a> {
    file: &'a str,
    diagnostics: Vec<WireDiagnostic>,
}

/// File name of `path` without the task-file extension.
///
/// # Errors
///
/// Returns [`TaskcheckError::NotATaskFile`] if the name does not end in
/// `.task.md` or nothing precedes the extension.
pub fn task_name(path: &Path) -> Result<String, TaskcheckError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(TASK_FILE_EXTENSION))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| TaskcheckError::NotATaskFile(path.to_path_buf()))
}

/// Read a task file, stripping a byte-order mark.
pub fn load_task(path: &Path) -> Result<TaskFile, TaskcheckError> {
    let name = task_name(path)?;
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| TaskcheckError::InvalidUtf8 {
        path: path.to_path_buf(),
        reason: e.utf8_error().to_string(),
    })?;
    let text = match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    };
    Ok(TaskFile {
        path: path.to_path_buf(),
        name,
        text,
    })
}

/// Execute the check subcommand, writing reports to stdout.
pub fn run_check(args: &CheckArgs, config: &CheckConfig) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_check_to(args, config, &mut out)
}

/// Execute the check subcommand, writing reports to `out`.
pub fn run_check_to(args: &CheckArgs, config: &CheckConfig, out: &mut dyn Write) -> Result<u8> {
    for path in &args.paths {
        task_name(path)?;
    }

    let mut options = config.validator_options();
    if let Some(limit) = args.max_suggestions {
        options.max_suggestions = limit;
    }
    let strict = args.strict || config.strict;
    let dictionary = config.dictionary();
    let validator = Validator::with_options(&dictionary, options);

    let mut failed = false;
    for path in &args.paths {
        let task = load_task(path).with_context(|| format!("cannot check {}", path.display()))?;
        let diagnostics = validator.validate(&task.text, &task.name);
        tracing::info!(
            file = %path.display(),
            diagnostics = diagnostics.len(),
            "checked task file"
        );
        failed |= if strict {
            !diagnostics.is_empty()
        } else {
            diagnostics.iter().any(Diagnostic::is_error)
        };
        report(out, args.format, &task, &diagnostics)?;
    }

    Ok(u8::from(failed))
}

fn report(
    out: &mut dyn Write,
    format: OutputFormat,
    task: &TaskFile,
    diagnostics: &[Diagnostic],
) -> Result<()> {
    let file = task.path.display().to_string();
    let index = LineIndex::new(&task.text);
    match format {
        OutputFormat::Text => {
            if diagnostics.is_empty() {
                writeln!(out, "{}", render_clean(&file))?;
                return Ok(());
            }
            for diagnostic in diagnostics {
                writeln!(out, "{}\n", render_diagnostic(&index, diagnostic))?;
            }
            writeln!(out, "{}", render_summary(&file, diagnostics))?;
        }
        OutputFormat::Json => {
            let report = FileReport {
                file: &file,
                diagnostics: diagnostics.iter().map(|d| d.to_wire(&index)).collect(),
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
    }
    Ok(())
}
