//! # taskcheck-cli: Command-Line Interface for taskcheck
//!
//! Provides the `taskcheck` binary. Reading files, configuration and
//! output formatting live here; all validation is delegated to
//! `taskcheck-schema`.
//!
//! ## Subcommands
//!
//! - `taskcheck check`: validate task files and report diagnostics as
//!   annotated source excerpts or JSON.
//!
//! ```bash
//! taskcheck check 2024-CH-07-eng.task.md
//! taskcheck -v --config taskcheck.yaml check --strict tasks/*.task.md
//! ```

pub mod check;
pub mod config;
pub mod render;
