//! Error formatting for CLI output.

use std::error::Error;
use std::fmt::Write;

use crate::error::CliError;

/// Error output formatter
#[derive(Debug, Default)]
pub struct ErrorFormatter {
    verbose: bool,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Format an error to a string
    pub fn format(&self, error: &CliError) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "error[{}]: {error}", error.code());

        if self.verbose {
            format_source_chain(&mut output, error);
        }

        if let Some(path) = error.path() {
            let _ = writeln!(output, "\n  path: {}", path.display());
        }

        if let Some(hint) = error.hint() {
            let _ = writeln!(output, "\nhint: {hint}");
        }

        output
    }

    /// Format as JSON
    pub fn format_json(&self, error: &CliError) -> String {
        let json = serde_json::json!({
            "error": {
                "code": error.code(),
                "message": error.to_string(),
                "hint": error.hint(),
            }
        });

        serde_json::to_string_pretty(&json).unwrap_or_else(|_| error.to_string())
    }
}

fn format_source_chain(output: &mut String, error: &CliError) {
    let Some(source) = error.source() else {
        return;
    };

    let _ = writeln!(output, "\ncaused by:");
    let _ = writeln!(output, "  {source}");

    let mut current = source.source();
    let mut depth = 1;
    while let Some(src) = current {
        let _ = writeln!(output, "  {depth}: {src}");
        current = src.source();
        depth += 1;
    }
}
