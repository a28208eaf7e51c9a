//! Entry point for the `casebook` binary.

use std::io::IsTerminal;
use std::process::ExitCode;

use casebook_cli::cli::{Cli, OutputFormat};
use casebook_cli::error::{ErrorFormatter, Exit};
use casebook_cli::CliError;
use casebook_common_config::Environment;
use casebook_common_log::{LogConfig, LogError, LogLevel};
use clap::{ColorChoice, Parser};

fn main() -> ExitCode {
    Environment::init();
    let cli = Cli::parse();

    init_logging(log_config(&cli));

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    let format = cli.format;
    let verbose = cli.verbose > 0;
    match runtime.block_on(run(cli)) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            tracing::debug!(code = e.code(), "command failed");
            let formatter = ErrorFormatter::new().verbose(verbose);
            match format {
                OutputFormat::Json => eprintln!("{}", formatter.format_json(&e)),
                OutputFormat::Text => eprint!("{}", formatter.format(&e)),
            }
            e.exit_code().into()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config).await
}

/// Logging problems are reported but never stop the command. A log file that
/// cannot be opened falls back to stderr only.
fn init_logging(config: LogConfig) {
    let fallback = LogConfig {
        file_path: None,
        ..config.clone()
    };
    match casebook_common_log::init(config) {
        Ok(()) => {}
        Err(e @ LogError::FileError(_)) => {
            eprintln!("warning: {e}; logging to stderr only");
            if let Err(e) = casebook_common_log::init(fallback) {
                eprintln!("warning: {e}");
            }
        }
        Err(e) => eprintln!("warning: {e}"),
    }
}

/// Environment settings first, then `-v`/`-q` on top when given.
fn log_config(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config.level = LogLevel::from_verbosity(cli.verbose, cli.quiet);
    }
    config.source_location |= cli.verbose >= 3;
    config.ansi = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    };
    config
}
