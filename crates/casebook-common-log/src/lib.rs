//! Logging infrastructure for Casebook.
//!
//! Logs always go to stderr so that command output on stdout stays
//! machine-readable. A file sink can be added alongside.

use std::io;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Environment variables read by [`LogConfig::from_env`].
pub mod vars {
    pub const LEVEL: &str = "CASEBOOK_LOG_LEVEL";
    pub const FORMAT: &str = "CASEBOOK_LOG_FORMAT";
    pub const FILE: &str = "CASEBOOK_LOG_FILE";
    pub const SOURCE: &str = "CASEBOOK_LOG_SOURCE";
    pub const SPANS: &str = "CASEBOOK_LOG_SPANS";
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include source location.
    pub source_location: bool,
    /// Include span open/close events.
    pub span_events: bool,
    /// Colour the stderr output.
    pub ansi: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Directive string understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Level for a `-v`/`-q` command line: warn by default, one step
    /// louder per `-v`, errors only with `-q`.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Error;
        }
        match verbose {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format.
    Pretty,
    /// Compact single-line format.
    #[default]
    Compact,
    /// JSON structured format.
    Json,
}

impl LogFormat {
    /// Parse from string, falling back to compact.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file_path: None,
            source_location: false,
            span_events: false,
            ansi: true,
        }
    }
}

fn flag(var: &str) -> Option<bool> {
    std::env::var(var)
        .ok()
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Overlay environment variables on this config.
    ///
    /// `CASEBOOK_LOG_LEVEL` wins over `RUST_LOG` when both parse.
    pub fn with_env(mut self) -> Self {
        let level = std::env::var(vars::LEVEL)
            .ok()
            .and_then(|l| LogLevel::parse(&l))
            .or_else(|| std::env::var("RUST_LOG").ok().and_then(|l| LogLevel::parse(&l)));
        if let Some(level) = level {
            self.level = level;
        }

        if let Ok(format) = std::env::var(vars::FORMAT) {
            self.format = LogFormat::parse(&format);
        }

        if let Ok(file_path) = std::env::var(vars::FILE) {
            if !file_path.trim().is_empty() {
                self.file_path = Some(PathBuf::from(file_path));
            }
        }

        if let Some(source) = flag(vars::SOURCE) {
            self.source_location = source;
        }

        if let Some(spans) = flag(vars::SPANS) {
            self.span_events = spans;
        }

        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn stderr_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(self.ansi)
            .with_file(self.source_location)
            .with_line_number(self.source_location)
            .with_span_events(self.span_events());

        match self.format {
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Json => layer.json().boxed(),
        }
    }

    fn file_layer(&self) -> Result<Option<Box<dyn Layer<Registry> + Send + Sync>>, LogError> {
        let Some(path) = &self.file_path else {
            return Ok(None);
        };

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        let layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_file(self.source_location)
            .with_line_number(self.source_location)
            .with_span_events(self.span_events());

        Ok(Some(match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty | LogFormat::Compact => layer.compact().boxed(),
        }))
    }

    /// Filter for this config. Per-target `RUST_LOG` directives are kept; a
    /// bare level there has already been folded into `level`.
    fn filter(&self) -> EnvFilter {
        match std::env::var("RUST_LOG") {
            Ok(directives) if LogLevel::parse(&directives).is_none() => {
                EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            _ => EnvFilter::new(self.level.as_str()),
        }
    }
}

/// Initialize logging with the given configuration.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let mut layers = vec![config.stderr_layer()];
    if let Some(file_layer) = config.file_layer()? {
        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(config.filter())
        .try_init()
        .map_err(|e| LogError::InitError(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

pub mod spans;
