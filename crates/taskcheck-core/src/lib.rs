//! # taskcheck-core: Foundational Types for taskcheck
//!
//! Defines the types shared by the validation engine and its consumers
//! (the `taskcheck` CLI and editor integrations):
//!
//! - [`Diagnostic`] / [`Severity`]: a reported issue anchored to an exact
//!   source range, collected in emission order by [`Diagnostics`].
//! - [`LineIndex`]: byte offset to line/column and UTF-16 mapping.
//! - [`NameDictionary`]: the injected source of recognized country and
//!   language names with fuzzy suggestions; [`BuiltinDictionary`] is the
//!   default implementation.
//! - [`TaskcheckError`]: errors raised while loading documents.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `taskcheck-*` crates.
//! - No global mutable state.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostic;
pub mod dictionary;
pub mod error;
pub mod names;
pub mod position;

pub use diagnostic::{Diagnostic, Diagnostics, Severity, WireDiagnostic};
pub use dictionary::{edit_distance, suggest, BuiltinDictionary, NameDictionary};
pub use error::{TaskcheckError, TASK_FILE_EXTENSION};
pub use position::{LineIndex, Position};
