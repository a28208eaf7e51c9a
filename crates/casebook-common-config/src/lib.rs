//! Configuration for Casebook.
//!
//! Settings live in `.casebook/config.yaml` under the project directory.
//! Every section is optional and falls back to its defaults, and values may
//! reference environment variables as `${VAR}` or `${VAR:-default}`.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
