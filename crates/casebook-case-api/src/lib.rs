//! Client for the case records API.
//!
//! Fetches a case's status history and audit log on behalf of a signed-in
//! user and turns the payloads into typed records.

mod client;
mod error;

pub use client::{CaseApi, CaseHistory};
pub use error::ApiError;
