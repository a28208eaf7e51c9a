//! CLI error handling and exit codes.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use casebook_case_api::ApiError;
use casebook_common_config::ConfigError;
use casebook_history_timeline::FilterParseError;
use casebook_history_types::IngestError;
use casebook_session::SessionError;
use thiserror::Error;

pub mod formatter;

pub use formatter::ErrorFormatter;

/// Process exit codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    NetworkError = 4,
    ValidationError = 5,
    PermissionError = 6,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// CLI error type with context for the user
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Permission {
        message: String,
        hint: Option<String>,
    },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Short error code shown next to the message
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Network { .. } => "E003",
            Self::Validation { .. } => "E004",
            Self::Permission { .. } => "E006",
            Self::User { .. } => "E010",
            Self::Other(_) => "E999",
        }
    }

    pub fn exit(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Network { .. } => Exit::NetworkError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::Permission { .. } => Exit::PermissionError,
            Self::User { .. } | Self::Other(_) => Exit::GeneralError,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit().into()
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. }
            | Self::Validation { hint, .. }
            | Self::Permission { hint, .. }
            | Self::User { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    pub fn io_with_path(
        message: impl Into<String>,
        source: io::Error,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: Some(path.into()),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    pub fn validation_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
            path: None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::anyhow!("failed to serialize output: {err}"))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Other(anyhow::anyhow!("failed to serialize output: {err}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check .casebook/config.yaml or the file given with --config".to_string()),
        }
    }
}

impl From<FilterParseError> for CliError {
    fn from(err: FilterParseError) -> Self {
        Self::Validation {
            message: err.to_string(),
            source: None,
            hint: Some("Use one of: all, status, edit, view".to_string()),
        }
    }
}

impl From<IngestError> for CliError {
    fn from(err: IngestError) -> Self {
        Self::Validation {
            message: format!("Malformed history: {err}"),
            source: Some(Box::new(err)),
            hint: None,
        }
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Forbidden { .. } => Self::Permission {
                message: err.to_string(),
                hint: None,
            },
            SessionError::Expired(_) => Self::Permission {
                message: err.to_string(),
                hint: Some("Sign in again to get a fresh token".to_string()),
            },
            other => Self::Validation {
                message: format!("Invalid token: {other}"),
                source: Some(Box::new(other)),
                hint: Some("Pass the token exactly as issued at login".to_string()),
            },
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Session(e) => e.into(),
            ApiError::MalformedInput(e) => e.into(),
            ApiError::Config(message) => Self::config(message),
            e if e.is_auth() => Self::Permission {
                message: e.to_string(),
                hint: Some("The case API rejected the token".to_string()),
            },
            e => Self::Network {
                message: format!("Case API request failed: {e}"),
                source: Some(Box::new(e)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_session::{Permission, Role};

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::config("x").exit(), Exit::ConfigError);
        assert_eq!(CliError::validation("x").exit(), Exit::ValidationError);
        let io = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(CliError::io_with_path("x", io, "a.json").exit(), Exit::IoError);
        assert_eq!(CliError::user_with_hint("x", "y").exit(), Exit::GeneralError);
    }

    #[test]
    fn test_session_errors_map_to_permission() {
        let forbidden = SessionError::Forbidden {
            role: Role::Viewer,
            permission: Permission::ViewHistory,
        };
        assert_eq!(CliError::from(forbidden).exit(), Exit::PermissionError);
        assert_eq!(CliError::from(SessionError::Segments(1)).exit(), Exit::ValidationError);
    }

    #[test]
    fn test_filter_error_is_validation() {
        let err: CliError = "everything".parse::<casebook_history_timeline::TimelineFilter>()
            .unwrap_err()
            .into();
        assert_eq!(err.exit(), Exit::ValidationError);
        assert!(err.hint().unwrap().contains("status"));
    }
}
