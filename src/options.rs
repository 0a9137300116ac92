use crate::rules::Rule;
use std::path::{Path, PathBuf};

/// Path the fixer reads and rewrites when no input is given.
pub const DEFAULT_INPUT: &str = "server/data/prompts.json";

/// File name of the diagnostic file written next to the input on parse failure.
pub const PARTIAL_FIX_FILE_NAME: &str = "prompts-partial-fix.json";

#[derive(Clone, Debug)]
pub struct Options {
    /// File to repair. Overwritten only when the corrected text parses.
    pub input: PathBuf,
    /// Where to save the corrected-but-unparsable text.
    /// `None` means `prompts-partial-fix.json` in the input's directory.
    pub partial_output: Option<PathBuf>,
    /// Substitution rules, applied in order before the parse attempt.
    pub rules: Vec<Rule>,
    /// Translate `\r\n` and lone `\r` into `\n` before applying rules.
    pub normalize_newlines: bool,
    /// Number of spaces per nesting level in the canonical output.
    pub indent: usize,
    /// When true, escape non-ASCII characters in strings as \uXXXX.
    pub ensure_ascii: bool,
    /// Record one log entry per substitution.
    pub logging: bool,
    /// Context window size used when building log context snippets.
    /// Controls how many characters are captured on both sides of the position.
    pub log_context_window: usize,
}

impl Options {
    /// Options targeting `input`, everything else default.
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    /// Resolved location of the diagnostic file.
    pub fn partial_output_path(&self) -> PathBuf {
        match &self.partial_output {
            Some(p) => p.clone(),
            None => sibling(&self.input, PARTIAL_FIX_FILE_NAME),
        }
    }
}

fn sibling(path: &Path, file_name: &str) -> PathBuf {
    match path.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            partial_output: None,
            rules: Rule::defaults(),
            normalize_newlines: true,
            indent: 2,
            ensure_ascii: false,
            logging: false,
            log_context_window: 10,
        }
    }
}
