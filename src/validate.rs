use crate::error::{ParseErrorKind, ParseFailure};
use memchr::memchr_iter;
use serde_json::Value;

/// Parse `text` as a single JSON document.
pub fn parse(text: &str) -> Result<Value, ParseFailure> {
    serde_json::from_str(text).map_err(|e| failure_from_serde(text, &e))
}

/// Number of top-level records: array length, object entry count or string length.
/// `None` for numbers, booleans and null, which have no length.
pub fn record_count(value: &Value) -> Option<usize> {
    match value {
        Value::Array(a) => Some(a.len()),
        Value::Object(o) => Some(o.len()),
        Value::String(s) => Some(s.chars().count()),
        _ => None,
    }
}

/// Name of the JSON type of `value`, for messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn failure_from_serde(text: &str, err: &serde_json::Error) -> ParseFailure {
    let kind = ParseErrorKind::from(err.classify());
    let (line, column) = (err.line(), err.column());
    let full = err.to_string();
    let suffix = format!(" at line {} column {}", line, column);
    let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();

    // an unterminated string is reported where it starts, not at the end of the text
    if kind == ParseErrorKind::Eof && message == "EOF while parsing a string" {
        if let Some(start) = unterminated_string_start(text) {
            let (line, column) = line_column(text, start);
            return ParseFailure {
                kind,
                message,
                line,
                column,
                offset: text[..start].chars().count(),
            };
        }
    }

    ParseFailure {
        kind,
        message,
        line,
        column,
        offset: char_offset(text, kind, line, column),
    }
}

/// Map serde_json's (line, byte column) to a character offset into `text`.
///
/// For syntax errors the column counts the offending byte itself, so the
/// offset is one less. EOF errors report the position after the last byte.
fn char_offset(text: &str, kind: ParseErrorKind, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        memchr_iter(b'\n', text.as_bytes())
            .nth(line - 2)
            .map_or(text.len(), |nl| nl + 1)
    };
    let col = match kind {
        ParseErrorKind::Eof => column,
        _ => column.saturating_sub(1),
    };
    let mut byte = (line_start + col).min(text.len());
    while !text.is_char_boundary(byte) {
        byte -= 1;
    }
    text[..byte].chars().count()
}

/// Byte offset of the opening quote of a string still open at the end of `text`.
fn unterminated_string_start(text: &str) -> Option<usize> {
    let mut open: Option<usize> = None;
    let mut escaped = false;
    for (i, &b) in text.as_bytes().iter().enumerate() {
        match open {
            Some(_) if escaped => escaped = false,
            Some(_) if b == b'\\' => escaped = true,
            Some(_) if b == b'"' => open = None,
            Some(_) => {}
            None if b == b'"' => open = Some(i),
            None => {}
        }
    }
    open
}

/// serde_json-style (1-based line, byte column counting the byte itself) of byte offset `pos`.
fn line_column(text: &str, pos: usize) -> (usize, usize) {
    let before = &text.as_bytes()[..pos];
    let line = 1 + memchr_iter(b'\n', before).count();
    let line_start = memchr::memrchr(b'\n', before).map_or(0, |nl| nl + 1);
    (line, pos - line_start + 1)
}
