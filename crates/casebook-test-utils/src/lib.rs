//! Test utilities for Casebook crates.
//!
//! [`fixtures`] holds a small case history used across the workspace, and
//! [`http`] a mock case API server.

pub mod fixtures;
pub mod http;
