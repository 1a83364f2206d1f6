//! # Diagnostic Engine
//!
//! Runs every check against one document and returns the diagnostics in
//! emission order:
//!
//! 1. structural extraction of the metadata block,
//! 2. schema parsing and the required-field check,
//! 3. field validators (`id`, `title`, `ages`, `answer_type`,
//!    `categories`, `contributors`, `keywords`, `support_files`),
//! 4. the section presence check.
//!
//! ## Early Exits
//!
//! A delimiter failure or missing required fields end the run with exactly
//! one diagnostic. A malformed metadata block skips step 3 only.
//!
//! ## Invariant
//!
//! A run holds no state beyond its own locals: validating the same input
//! twice yields identical output, and every diagnostic range lies within
//! the text on character boundaries.

use std::sync::LazyLock;

use taskcheck_core::{BuiltinDictionary, Diagnostic, Diagnostics, NameDictionary};
use tracing::{debug, trace};

use crate::extract::{extract_metadata, MetadataBlock};
use crate::fields::{
    ages, contributors, enums, id, keywords, support_files, title, FieldContext, RunState,
};
use crate::parse::{parse_metadata, SchemaError, SchemaParse};
use crate::sections::check_sections;

static BUILTIN: LazyLock<BuiltinDictionary> = LazyLock::new(BuiltinDictionary::new);

/// Default number of suggestions offered for an unrecognized name.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Tunables of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Upper bound on "did you mean" suggestions per name.
    pub max_suggestions: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// Validates task documents against one dictionary.
pub struct Validator<'d> {
    dictionary: &'d dyn NameDictionary,
    options: ValidatorOptions,
}

impl<'d> Validator<'d> {
    /// Validator with default options.
    pub fn new(dictionary: &'d dyn NameDictionary) -> Self {
        Self::with_options(dictionary, ValidatorOptions::default())
    }

    pub fn with_options(dictionary: &'d dyn NameDictionary, options: ValidatorOptions) -> Self {
        Self {
            dictionary,
            options,
        }
    }

    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    /// Validate `text`, the BOM-stripped content of a document whose file
    /// name without the `.task.md` extension is `filename`.
    pub fn validate(&self, text: &str, filename: &str) -> Vec<Diagnostic> {
        let _span = tracing::debug_span!("validate", file = filename).entered();
        let mut diags = Diagnostics::new(text);

        let block = match extract_metadata(text) {
            Ok(block) => block,
            Err(e) => {
                debug!(error = %e, "no usable metadata block");
                diags.error(e.range(), e.to_string());
                return diags.into_vec();
            }
        };

        match parse_metadata(&block) {
            Ok(parsed) => self.check_fields(&block, parsed, filename, &mut diags),
            Err(e @ SchemaError::MissingFields { .. }) => {
                debug!("required fields missing");
                diags.error(e.range(), e.message());
                return diags.into_vec();
            }
            Err(e @ SchemaError::Malformed { .. }) => {
                debug!("malformed metadata block, skipping field checks");
                diags.error(e.range(), e.message());
            }
        }

        check_sections(&block, &mut diags);
        debug!(diagnostics = diags.len(), "validation finished");
        diags.into_vec()
    }

    fn check_fields(
        &self,
        block: &MetadataBlock<'_>,
        parsed: SchemaParse,
        filename: &str,
        diags: &mut Diagnostics<'_>,
    ) {
        for warning in parsed.warnings {
            diags.warn(warning.range, warning.message);
        }

        let ctx = FieldContext {
            dictionary: self.dictionary,
            max_suggestions: self.options.max_suggestions,
            locator: &parsed.locator,
            filename,
            anchor: block.opening.clone(),
        };
        let mut state = RunState::default();
        let metadata = &parsed.metadata;

        trace!("checking id");
        id::check_id(&ctx, diags, &mut state, &metadata.id);
        trace!("checking title");
        title::check_title(&ctx, diags, &metadata.title);
        trace!("checking ages");
        ages::check_ages(&ctx, diags, &metadata.ages);
        trace!("checking answer_type and categories");
        enums::check_answer_type(&ctx, diags, &metadata.answer_type);
        enums::check_categories(&ctx, diags, &metadata.categories);
        trace!("checking contributors");
        contributors::check_contributors(&ctx, diags, &mut state, &metadata.contributors);
        if let Some(value) = &metadata.keywords {
            trace!("checking keywords");
            keywords::check_keywords(&ctx, diags, value);
        }
        trace!("checking support_files");
        support_files::check_support_files(&ctx, diags, &state, &metadata.support_files);
    }
}

/// Validate with the built-in dictionary and default options.
pub fn validate(text: &str, filename: &str) -> Vec<Diagnostic> {
    Validator::new(&*BUILTIN).validate(text, filename)
}
