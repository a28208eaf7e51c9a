//! Casebook CLI library.
//!
//! Everything the `casebook` binary does lives here so that it can be tested
//! without spawning a process.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
