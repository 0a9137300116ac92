pub mod cli;
pub mod emit;
pub mod error;
mod fix;
pub mod options;
pub mod rules;
pub mod validate;

pub use error::{FixError, ParseErrorKind, ParseFailure};
pub use fix::{Outcome, TextOutcome};
pub use options::{DEFAULT_INPUT, Options, PARTIAL_FIX_FILE_NAME};
pub use rules::{Corrected, FixLogEntry, Rule};

/// Apply newline normalization and the substitution rules, without parsing.
pub fn apply_rules(input: &str, opts: &Options) -> Corrected {
    rules::apply_rules(input, opts)
}

/// Repair `input` in memory: apply the rules, then parse and re-serialize.
/// A parse failure is reported as `TextOutcome::Invalid`, not as an error.
pub fn fix_text(input: &str, opts: &Options) -> Result<TextOutcome, FixError> {
    fix::fix_text(input, opts)
}

/// Repair the file at `opts.input`.
///
/// On success the file is overwritten in canonical form. When the corrected
/// text still does not parse, the file is left untouched and the corrected
/// text is saved to `opts.partial_output_path()`. Only I/O failures are errors.
pub fn fix_file(opts: &Options) -> Result<Outcome, FixError> {
    fix::fix_file(opts)
}

#[cfg(test)]
mod tests;
