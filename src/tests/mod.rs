use super::*;
use std::fs;
use std::path::{Path, PathBuf};

// Shared test helpers

/// Two sibling records split by a stray nested array, closed twice at the end.
const SCENARIO: &str = "[{\"a\":1}\n  [\n    {\"b\":2}\n  ]\n]";
const SCENARIO_CORRECTED: &str = "[{\"a\":1},\n  {\"b\":2}\n]";
const SCENARIO_CANONICAL: &str = "[\n  {\n    \"a\": 1\n  },\n  {\n    \"b\": 2\n  }\n]";

fn write_input(dir: &Path, content: &str) -> PathBuf {
    let data = dir.join("server").join("data");
    fs::create_dir_all(&data).unwrap();
    let path = data.join("prompts.json");
    fs::write(&path, content).unwrap();
    path
}

fn logging_opts(window: usize) -> Options {
    Options {
        logging: true,
        log_context_window: window,
        ..Default::default()
    }
}

mod logging;
