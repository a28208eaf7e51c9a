//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use casebook_common_config::{CasebookConfig, ConfigLoader};
use clap::{ArgAction, ColorChoice, Parser, Subcommand, ValueHint};

use crate::commands::{ConfigCommand, SessionCommand, TimelineCommand};
use crate::error::CliError;

/// Casebook - case history for absconder case management
///
/// Merges a case's status history and audit log into one timeline.
#[derive(Debug, Parser)]
#[command(
    name = "casebook",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "CASEBOOK_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// When to use terminal colors in log output
    #[arg(long, global = true, default_value = "auto", value_enum)]
    pub color: ColorChoice,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a case's history as one timeline
    #[command(visible_alias = "history")]
    Timeline(TimelineCommand),

    /// Decode a login token and show what it allows
    Session(SessionCommand),

    /// Inspect or create the configuration file
    Config(ConfigCommand),
}

impl Command {
    /// Whether the command writes the config file rather than reading it.
    fn creates_config(&self) -> bool {
        matches!(self, Self::Config(cmd) if cmd.creates_config())
    }
}

impl Cli {
    /// Load configuration from `--config`, or the project default location.
    pub fn load_config(&self) -> Result<CasebookConfig, CliError> {
        let config = match &self.config {
            Some(path) if !path.exists() && self.command.creates_config() => {
                CasebookConfig::default()
            }
            Some(path) => ConfigLoader::load_from(path)?,
            None => ConfigLoader::default().load()?,
        };
        tracing::debug!(path = %self.config_path().display(), "configuration loaded");
        Ok(config)
    }

    /// The config file in effect, whether or not it exists.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| ConfigLoader::default().config_path())
    }

    /// Execute the selected command
    pub async fn execute(self, config: CasebookConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config_path: self.config_path(),
            config,
            format: self.format,
            verbose: self.verbose,
        };

        match self.command {
            Command::Timeline(cmd) => cmd.execute(&ctx).await,
            Command::Session(cmd) => cmd.execute(&ctx),
            Command::Config(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: CasebookConfig,
    pub config_path: PathBuf,
    pub format: OutputFormat,
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_timeline_flags() {
        let cli = Cli::try_parse_from([
            "casebook",
            "-vv",
            "--format",
            "json",
            "timeline",
            "--status-history",
            "status.json",
            "--filter",
            "edit",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Timeline(_)));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["casebook", "-q", "-v", "config", "path"]).is_err());
    }
}
