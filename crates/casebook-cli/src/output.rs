//! Output formatting utilities for CLI commands.

use serde::Serialize;
use std::io::Write;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

pub mod icons;

pub use icons::IconContext;

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

fn render<T>(format: OutputFormat, value: &T) -> Result<String, CliError>
where
    T: FormattedOutput + Serialize,
{
    match format {
        OutputFormat::Text => Ok(value.format_text()),
        OutputFormat::Json => value.format_json().map_err(|e| {
            CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}"))
        }),
    }
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    write_output(ctx, value, std::io::stdout().lock())
}

/// Print formatted output to a writer
pub fn write_output<T, W>(ctx: &CommandContext, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
    W: Write,
{
    let output = render(ctx.format, value)?;
    writeln!(writer, "{output}")?;
    Ok(())
}

/// Helper for simple string outputs
#[derive(Debug, Serialize)]
pub struct SimpleOutput {
    pub message: String,
}

impl SimpleOutput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl FormattedOutput for SimpleOutput {
    fn format_text(&self) -> String {
        self.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_common_config::CasebookConfig;

    fn ctx(format: OutputFormat) -> CommandContext {
        CommandContext {
            config: CasebookConfig::default(),
            config_path: ".casebook/config.yaml".into(),
            format,
            verbose: 0,
        }
    }

    #[test]
    fn test_write_text_output() {
        let mut buf = Vec::new();
        write_output(&ctx(OutputFormat::Text), &SimpleOutput::new("done"), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "done\n");
    }

    #[test]
    fn test_write_json_output() {
        let mut buf = Vec::new();
        write_output(&ctx(OutputFormat::Json), &SimpleOutput::new("done"), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["message"], "done");
    }
}
