//! Environment variable handling.

use std::env;

/// Environment variable names.
pub mod vars {
    pub const CASEBOOK_CONFIG: &str = "CASEBOOK_CONFIG";
    pub const CASEBOOK_API_URL: &str = "CASEBOOK_API_URL";
    /// Selects an extra `.env.<name>` file.
    pub const CASEBOOK_ENV: &str = "CASEBOOK_ENV";
}

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Initialize environment from .env files.
    ///
    /// Variables already set in the process win over file values.
    pub fn init() -> Self {
        let _ = dotenvy::from_filename(".env");
        let _ = dotenvy::from_filename(".env.local");

        if let Ok(env) = env::var(vars::CASEBOOK_ENV) {
            let _ = dotenvy::from_filename(format!(".env.{}", env));
        }

        Self { _guard: () }
    }

    /// Get an optional string variable. Blank values count as unset.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.trim().is_empty())
    }
}
