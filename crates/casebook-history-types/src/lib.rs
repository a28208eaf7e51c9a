//! Case history record types for Casebook.
//!
//! Two record kinds describe what happened to a case: status transitions and
//! audit log entries. Both arrive from the case API as JSON arrays and are
//! turned into typed values here, once, so that downstream code never has to
//! inspect a record's shape to find out what it is.

mod action;
mod event;
pub mod ingest;

pub use action::AuditAction;
pub use event::{AuditLogEvent, CaseEvent, FieldValue, StatusChangeEvent};
pub use ingest::{Collection, IngestError};

pub use casebook_common_core::{CaseStatus, EventId, Timestamp};
