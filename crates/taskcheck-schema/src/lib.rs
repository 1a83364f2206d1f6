//! # taskcheck-schema: Task Metadata Validation Engine
//!
//! Validates task-description documents: a Markdown body preceded by a
//! `---`-delimited YAML metadata block. The result of a run is a list of
//! [`Diagnostic`](taskcheck_core::Diagnostic)s anchored to byte ranges of
//! the input.
//!
//! ## Pipeline
//!
//! - [`extract`]: locate the metadata block.
//! - [`parse`]: parse it with `serde_yaml`, check required fields, and
//!   build the [`locate::FieldLocator`] used to anchor field diagnostics.
//! - [`fields`]: one validator per logical field (identifier, age ladder,
//!   vocabularies, contributors, keywords, support files).
//! - [`sections`]: required Markdown headings in the body.
//! - [`engine`]: orchestration, early exits and the [`validate`] entry
//!   point.
//!
//! ## Crate Policy
//!
//! - Depends only on `taskcheck-core` internally.
//! - No I/O: callers read files, strip a BOM and derive the file name.
//! - Country and language names come from an injected
//!   [`NameDictionary`](taskcheck_core::NameDictionary); the built-in one
//!   is used by [`validate`].

pub mod engine;
pub mod extract;
pub mod fields;
pub mod locate;
pub mod parse;
pub mod sections;

pub use engine::{validate, Validator, ValidatorOptions, DEFAULT_MAX_SUGGESTIONS};
pub use extract::{extract_metadata, MetadataBlock, StructuralError};
pub use fields::ages::{Difficulty, AGE_BANDS};
pub use fields::contributors::{parse_contributor, ParsedContributor};
pub use fields::id::{parse_task_id, TaskId};
pub use fields::keywords::{parse_keyword, ParsedKeyword};
pub use fields::support_files::{parse_support_file, Origin, ParsedSupportFile};
pub use parse::{parse_metadata, ParsedMetadata, SchemaError, REQUIRED_FIELDS};
pub use sections::{missing_sections, REQUIRED_SECTIONS};
