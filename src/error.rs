use serde_json::error::Category;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fatal errors. Nothing here is recoverable; the input file is left as it was.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("top-level JSON value is a {found}, expected a list of prompts")]
    NotACollection { found: &'static str },
    #[error("failed to serialize fixed JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Not syntactically valid JSON.
    Syntax,
    /// The text ended in the middle of a value.
    Eof,
    /// Valid syntax, but not representable (e.g. a number out of range).
    Data,
}

impl From<Category> for ParseErrorKind {
    fn from(c: Category) -> Self {
        match c {
            Category::Eof => ParseErrorKind::Eof,
            Category::Data => ParseErrorKind::Data,
            // reading from a &str never produces Io
            Category::Syntax | Category::Io => ParseErrorKind::Syntax,
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Syntax => f.write_str("syntax error"),
            ParseErrorKind::Eof => f.write_str("unexpected end of input"),
            ParseErrorKind::Data => f.write_str("invalid data"),
        }
    }
}

/// The corrected text still does not parse. This is the expected fallback, not an error exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub kind: ParseErrorKind,
    /// Parser message without the trailing location.
    pub message: String,
    /// 1-based line.
    pub line: usize,
    /// Byte column within `line`, as reported by the parser.
    pub column: usize,
    /// Character offset into the corrected text.
    pub offset: usize,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: line {} column {} (char {})",
            self.message, self.line, self.column, self.offset
        )
    }
}

impl std::error::Error for ParseFailure {}
