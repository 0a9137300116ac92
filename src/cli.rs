use crate::{DEFAULT_INPUT, FixError, Options, Outcome, fix_file};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Collapse accidental nested array wrappers in a prompts JSON file, validate
/// it, and rewrite it with 2-space indentation.
#[derive(Parser, Debug)]
#[command(name = "promptfix")]
#[command(version)]
#[command(
    long_about = "Collapses an extra array level wrapped around sibling records and a duplicated\n\
                  closing ] at the end of the document, then parses the result.\n\n\
                  If it parses, INPUT is rewritten in canonical form. Otherwise INPUT is left\n\
                  untouched and the partially fixed text is saved for manual repair."
)]
pub struct Cli {
    /// File to repair in place.
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to save the partially fixed text when it still does not parse
    /// (default: prompts-partial-fix.json next to INPUT).
    #[arg(short, long, value_name = "FILE")]
    pub partial_output: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(long, default_value_t = 2, value_name = "N")]
    pub indent: usize,

    /// Escape non-ASCII as \uXXXX.
    #[arg(long)]
    pub ensure_ascii: bool,

    /// Keep \r\n line endings instead of translating them to \n.
    #[arg(long)]
    pub keep_newlines: bool,

    /// Print every substitution to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Characters of context on each side of a logged substitution.
    #[arg(long, default_value_t = 10, value_name = "N")]
    pub log_context: usize,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            input: self.input.clone(),
            partial_output: self.partial_output.clone(),
            normalize_newlines: !self.keep_newlines,
            indent: self.indent,
            ensure_ascii: self.ensure_ascii,
            logging: self.verbose,
            log_context_window: self.log_context,
            ..Default::default()
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Print the user-visible messages for `outcome`.
pub fn report(outcome: &Outcome, verbose: bool) {
    if verbose {
        for e in outcome.log() {
            eprintln!("[{}] at {}: {:?}", e.rule, e.position, e.context);
        }
        for (rule, n) in outcome.applied() {
            eprintln!("{}: {} substitution(s)", rule, n);
        }
    }
    match outcome {
        Outcome::Fixed {
            path,
            records,
            ..
        } => {
            println!("JSON is valid! Found {} prompts", records);
            println!("Successfully fixed and formatted {}", display_name(path));
        }
        Outcome::StillInvalid {
            partial_path,
            failure,
            ..
        } => {
            println!("JSON is still invalid: {}", failure);
            println!("Error at position {}", failure.offset);
            println!(
                "Saved partially fixed content to {}",
                display_name(partial_path)
            );
        }
    }
}

/// Parse the command line, repair the file and print the result.
pub fn run() -> Result<Outcome, FixError> {
    let cli = Cli::parse();
    let outcome = fix_file(&cli.options())?;
    report(&outcome, cli.verbose);
    Ok(outcome)
}
