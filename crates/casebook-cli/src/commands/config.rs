//! Config command implementation.

use casebook_common_config::{CasebookConfig, ConfigLoader};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, IconContext, SimpleOutput};

/// Inspect or create the configuration file
#[derive(Debug, Parser)]
pub struct ConfigCommand {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the configuration in effect
    Show,

    /// Print the path of the configuration file
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    /// Whether the command writes the file rather than reading it.
    pub fn creates_config(&self) -> bool {
        matches!(self.action, ConfigAction::Init { .. })
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        match &self.action {
            ConfigAction::Show => print_output(ctx, &ConfigReport(ctx.config.clone())),
            ConfigAction::Path => print_output(
                ctx,
                &SimpleOutput::new(ctx.config_path.display().to_string()),
            ),
            ConfigAction::Init { force } => {
                let path = &ctx.config_path;
                if path.exists() && !force {
                    return Err(CliError::user_with_hint(
                        format!("{} already exists", path.display()),
                        "Pass --force to overwrite it",
                    ));
                }
                ConfigLoader::save_to(path, &CasebookConfig::default())?;
                tracing::info!(path = %path.display(), "wrote default configuration");
                print_output(
                    ctx,
                    &SimpleOutput::new(format!(
                        "{} Created {}",
                        IconContext::new().check(),
                        path.display()
                    )),
                )
            }
        }
    }
}

/// The configuration, printed as YAML in text mode.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigReport(CasebookConfig);

impl FormattedOutput for ConfigReport {
    fn format_text(&self) -> String {
        serde_yaml::to_string(&self.0)
            .map(|yaml| yaml.trim_end().to_string())
            .unwrap_or_else(|e| format!("# failed to render configuration: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_init_creates_config() {
        let init = ConfigCommand::try_parse_from(["config", "init"]).unwrap();
        assert!(init.creates_config());

        let show = ConfigCommand::try_parse_from(["config", "show"]).unwrap();
        assert!(!show.creates_config());
    }

    #[test]
    fn test_report_text_is_yaml() {
        let text = ConfigReport(CasebookConfig::default()).format_text();
        let parsed: CasebookConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, CasebookConfig::default());
        assert!(text.contains("default_filter: all"));
    }
}
