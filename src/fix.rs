use crate::emit;
use crate::error::{FixError, ParseFailure};
use crate::options::Options;
use crate::rules::{self, Corrected, FixLogEntry};
use crate::validate;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Result of running the pipeline on text, without touching the filesystem.
#[derive(Debug, Clone, PartialEq)]
pub enum TextOutcome {
    /// The corrected text parsed; `canonical` is what goes back to disk.
    Fixed {
        corrected: Corrected,
        value: Value,
        canonical: String,
        records: usize,
    },
    /// The corrected text still does not parse.
    Invalid {
        corrected: Corrected,
        failure: ParseFailure,
    },
}

impl TextOutcome {
    pub fn corrected(&self) -> &Corrected {
        match self {
            TextOutcome::Fixed { corrected, .. } | TextOutcome::Invalid { corrected, .. } => {
                corrected
            }
        }
    }
}

/// Apply the rules, then parse and re-serialize.
/// A top-level number, boolean or null is an error: nothing gets written for it.
pub fn fix_text(text: &str, opts: &Options) -> Result<TextOutcome, FixError> {
    let corrected = rules::apply_rules(text, opts);
    match validate::parse(&corrected.text) {
        Ok(value) => {
            // a scalar document has nothing to count; leave the file alone
            let records = validate::record_count(&value).ok_or(FixError::NotACollection {
                found: validate::type_name(&value),
            })?;
            let canonical = emit::to_canonical_string(&value, opts)?;
            Ok(TextOutcome::Fixed {
                corrected,
                value,
                canonical,
                records,
            })
        }
        Err(failure) => Ok(TextOutcome::Invalid { corrected, failure }),
    }
}

/// What `fix_file` did to the filesystem.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The input was rewritten in canonical form.
    Fixed {
        path: PathBuf,
        records: usize,
        /// `(rule name, substitutions)` in application order.
        applied: Vec<(String, usize)>,
        log: Vec<FixLogEntry>,
    },
    /// The input is untouched; the corrected text was saved to `partial_path`.
    StillInvalid {
        partial_path: PathBuf,
        failure: ParseFailure,
        applied: Vec<(String, usize)>,
        log: Vec<FixLogEntry>,
    },
}

impl Outcome {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Outcome::Fixed { .. })
    }

    pub fn log(&self) -> &[FixLogEntry] {
        match self {
            Outcome::Fixed { log, .. } | Outcome::StillInvalid { log, .. } => log,
        }
    }

    pub fn applied(&self) -> &[(String, usize)] {
        match self {
            Outcome::Fixed { applied, .. } | Outcome::StillInvalid { applied, .. } => applied,
        }
    }

    /// Both outcomes are successful runs; only fatal errors exit non-zero.
    pub fn exit_code(&self) -> i32 {
        0
    }
}

/// Read `opts.input`, repair it, and either overwrite it or save the diagnostic file.
pub fn fix_file(opts: &Options) -> Result<Outcome, FixError> {
    let input = &opts.input;
    let content = fs::read_to_string(input).map_err(|source| FixError::Read {
        path: input.clone(),
        source,
    })?;

    match fix_text(&content, opts)? {
        TextOutcome::Fixed {
            corrected,
            canonical,
            records,
            ..
        } => {
            fs::write(input, canonical).map_err(|source| FixError::Write {
                path: input.clone(),
                source,
            })?;
            Ok(Outcome::Fixed {
                path: input.clone(),
                records,
                applied: corrected.applied,
                log: corrected.log,
            })
        }
        TextOutcome::Invalid { corrected, failure } => {
            let partial_path = opts.partial_output_path();
            fs::write(&partial_path, &corrected.text).map_err(|source| FixError::Write {
                path: partial_path.clone(),
                source,
            })?;
            Ok(Outcome::StillInvalid {
                partial_path,
                failure,
                applied: corrected.applied,
                log: corrected.log,
            })
        }
    }
}
