use crate::options::Options;
use memchr::memchr;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// `}` newline `[` newline `{`: an extra array opened between two sibling records.
static NESTED_ARRAY_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\}\s*\n\s*\[\s*\n\s*\{").expect("nested array wrapper pattern is valid")
});

/// `}` newline `]` newline `]` at the end of the document, optionally followed by one `\n`.
static TRAILING_DOUBLE_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\}\s*\n\s*\]\s*\n\s*\](?P<eol>\n?)\z")
        .expect("trailing double close pattern is valid")
});

/// A named regex substitution applied to the whole text.
#[derive(Clone, Debug)]
pub struct Rule {
    name: String,
    pattern: Regex,
    replacement: String,
    trigger: Option<u8>,
}

impl Rule {
    /// Build a rule from a regex and a replacement using `regex` expansion syntax (`$1`, `${name}`).
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
            trigger: None,
        })
    }

    /// Skip the regex entirely when `byte` does not occur in the text.
    /// Only sound when every match of the pattern contains `byte`.
    pub fn with_trigger(mut self, byte: u8) -> Self {
        self.trigger = Some(byte);
        self
    }

    /// Rule A: rejoin two records separated by a stray `[` into one flat sequence.
    pub fn nested_array_wrapper() -> Self {
        Self {
            name: "nested-array-wrapper".to_string(),
            pattern: NESTED_ARRAY_WRAPPER.clone(),
            replacement: "},\n  {".to_string(),
            trigger: Some(b'['),
        }
    }

    /// Rule B: drop the redundant closing `]` at the end of the document.
    pub fn trailing_double_close() -> Self {
        Self {
            name: "trailing-double-close".to_string(),
            pattern: TRAILING_DOUBLE_CLOSE.clone(),
            replacement: "}\n]${eol}".to_string(),
            trigger: Some(b']'),
        }
    }

    /// Rule A followed by rule B.
    pub fn defaults() -> Vec<Rule> {
        vec![Self::nested_array_wrapper(), Self::trailing_double_close()]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replace every non-overlapping match. Returns the new text and the number of matches.
    pub fn apply<'t>(&self, text: &'t str, logger: &mut Logger) -> (Cow<'t, str>, usize) {
        if let Some(b) = self.trigger {
            if memchr(b, text.as_bytes()).is_none() {
                return (Cow::Borrowed(text), 0);
            }
        }

        let mut count = 0usize;
        let mut out = String::new();
        let mut last = 0usize;
        // char offset of `last`, advanced incrementally so logging stays linear
        let mut char_pos = 0usize;
        for caps in self.pattern.captures_iter(text) {
            let m = caps_span(&caps);
            if count == 0 {
                out.reserve(text.len());
            }
            char_pos += text[last..m.0].chars().count();
            logger.log(char_pos, &self.name, text, m.0);
            out.push_str(&text[last..m.0]);
            caps.expand(&self.replacement, &mut out);
            char_pos += text[m.0..m.1].chars().count();
            last = m.1;
            count += 1;
        }
        if count == 0 {
            return (Cow::Borrowed(text), 0);
        }
        out.push_str(&text[last..]);
        (Cow::Owned(out), count)
    }
}

#[inline]
fn caps_span(caps: &Captures<'_>) -> (usize, usize) {
    // group 0 always participates in a match
    caps.get(0).map_or((0, 0), |m| (m.start(), m.end()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixLogEntry {
    /// Character offset of the match in the text the rule ran on.
    pub position: usize,
    /// Name of the rule that fired.
    pub rule: String,
    pub context: String,
}

#[derive(Default)]
pub struct Logger {
    enable: bool,
    window: usize,
    entries: Vec<FixLogEntry>,
}

impl Logger {
    pub fn new(opts: &Options) -> Self {
        Self {
            enable: opts.logging,
            window: opts.log_context_window,
            entries: Vec::new(),
        }
    }

    #[inline]
    fn log(&mut self, position: usize, rule: &str, text: &str, byte_pos: usize) {
        if self.enable {
            self.entries.push(FixLogEntry {
                position,
                rule: rule.to_string(),
                context: build_context(text, byte_pos, self.window),
            });
        }
    }

    pub fn into_entries(self) -> Vec<FixLogEntry> {
        self.entries
    }
}

/// Up to `win` characters on each side of the byte offset `pos`.
fn build_context(text: &str, pos: usize, win: usize) -> String {
    let before = &text[..pos];
    let start = before
        .char_indices()
        .rev()
        .take(win)
        .last()
        .map_or(pos, |(i, _)| i);
    let end = text[pos..]
        .char_indices()
        .nth(win)
        .map_or(text.len(), |(i, _)| pos + i);
    text[start..end].to_string()
}

/// Text after newline normalization and every rule, with per-rule match counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corrected {
    pub text: String,
    /// `(rule name, substitutions)` in application order.
    pub applied: Vec<(String, usize)>,
    pub log: Vec<FixLogEntry>,
}

impl Corrected {
    /// Total number of substitutions across all rules.
    pub fn substitutions(&self) -> usize {
        self.applied.iter().map(|(_, n)| n).sum()
    }
}

/// Translate `\r\n` and lone `\r` into `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if memchr(b'\r', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Apply newline normalization (if enabled) and then every rule in order.
pub fn apply_rules(text: &str, opts: &Options) -> Corrected {
    let mut logger = Logger::new(opts);
    let mut current = if opts.normalize_newlines {
        normalize_newlines(text).into_owned()
    } else {
        text.to_string()
    };
    let mut applied = Vec::with_capacity(opts.rules.len());
    for rule in &opts.rules {
        let replaced = match rule.apply(&current, &mut logger) {
            (Cow::Owned(s), n) => {
                applied.push((rule.name().to_string(), n));
                Some(s)
            }
            (Cow::Borrowed(_), n) => {
                applied.push((rule.name().to_string(), n));
                None
            }
        };
        if let Some(s) = replaced {
            current = s;
        }
    }
    Corrected {
        text: current,
        applied,
        log: logger.into_entries(),
    }
}
