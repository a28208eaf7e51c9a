//! Casebook common core types and utilities.

pub mod error;
pub mod id;
pub mod status;
pub mod timestamp;

pub use error::Error;
pub use id::{CaseId, EventId, IdParseError};
pub use status::CaseStatus;
pub use timestamp::Timestamp;
